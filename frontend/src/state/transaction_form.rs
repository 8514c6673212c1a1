//! # Transaction Form State Module
//!
//! State and workflow behind the "new transaction" screen.
//!
//! ## Responsibilities:
//! - Form field state, with the amount sign coupled to the transaction type
//! - Categories available for selection (fetched on initialization)
//! - Field validation before anything is sent
//! - Submission through the API client, with loading/success/error state
//!
//! ## Lifecycle:
//! `Idle -> Submitting -> Success | Failed`. Editing any field or clearing the
//! error/success flags returns the form to `Idle`.

use chrono::Local;
use shared::{Category, CreateRecordPayload, TransactionFormData, TransactionType};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::services::api::{ApiClient, ApiError};

/// Message shown when a submission fails for a reason other than an API error
pub const GENERIC_SUBMIT_ERROR: &str = "Failed to create transaction";
/// Fallback message when a category fetch fails without a recorded error
pub const GENERIC_FETCH_ERROR: &str = "Failed to fetch categories";

/// Field-level validation failures
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum FormValidationError {
    #[error("Description is required")]
    EmptyDescription,
    #[error("Amount is required")]
    EmptyAmount,
    #[error("Amount must be a valid number")]
    InvalidAmount,
    #[error("Date is required")]
    EmptyDate,
    #[error("Category is required")]
    EmptyCategory,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FormError {
    #[error(transparent)]
    Validation(#[from] FormValidationError),
    #[error("Invalid category selected")]
    InvalidCategory,
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl FormError {
    /// Message stored in the form's error state after a failed submission
    pub fn submit_message(&self) -> String {
        match self {
            FormError::Api(e) => e.message(),
            _ => GENERIC_SUBMIT_ERROR.to_string(),
        }
    }
}

/// Where the form is in its submit lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Submitting,
    Success,
    Failed(String),
}

/// Parse the leading number of `input` the way a lenient text field does:
/// optional sign, digits, optional fraction. Trailing garbage is ignored.
fn parse_leading_number(input: &str) -> Option<f64> {
    let trimmed = input.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'-') | Some(b'+')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digit_count = end - digits_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let fraction_start = end + 1;
        let mut fraction_end = fraction_start;
        while fraction_end < bytes.len() && bytes[fraction_end].is_ascii_digit() {
            fraction_end += 1;
        }
        digit_count += fraction_end - fraction_start;
        end = fraction_end;
    }

    if digit_count == 0 {
        return None;
    }
    trimmed[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse a complete amount string; `inf`, `NaN` and overflowing digit strings
/// are rejected
fn parse_amount(input: &str) -> Option<f64> {
    input.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Give `magnitude` the sign implied by `transaction_type`
fn signed_amount(magnitude: f64, transaction_type: TransactionType) -> f64 {
    if transaction_type.is_expense() {
        -magnitude.abs()
    } else {
        magnitude.abs()
    }
}

/// Re-sign `amount` to match `transaction_type`, keeping its magnitude.
///
/// `""` and `"-"` are returned unchanged so the user can keep typing.
/// Returns `None` when the input doesn't start with a number.
pub fn couple_amount_sign(amount: &str, transaction_type: TransactionType) -> Option<String> {
    if amount.is_empty() || amount == "-" {
        return Some(amount.to_string());
    }

    let magnitude = parse_leading_number(amount)?.abs();
    Some(if transaction_type.is_expense() {
        format!("-{}", magnitude)
    } else {
        magnitude.to_string()
    })
}

/// Editable fields of the form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFields {
    pub description: String,
    pub amount: String,
    pub date: String,
    pub category: String,
    pub transaction_type: TransactionType,
}

impl FormFields {
    pub fn to_form_data(&self) -> TransactionFormData {
        TransactionFormData {
            description: self.description.clone(),
            amount: self.amount.clone(),
            date: self.date.clone(),
            category: self.category.clone(),
            transaction_type: self.transaction_type,
        }
    }

    /// Check required fields, returning the first problem found
    pub fn validate(&self) -> Result<(), FormValidationError> {
        if self.description.trim().is_empty() {
            return Err(FormValidationError::EmptyDescription);
        }
        let amount = self.amount.trim();
        if amount.is_empty() || amount == "-" {
            return Err(FormValidationError::EmptyAmount);
        }
        if parse_amount(amount).is_none() {
            return Err(FormValidationError::InvalidAmount);
        }
        if self.date.trim().is_empty() {
            return Err(FormValidationError::EmptyDate);
        }
        if self.category.trim().is_empty() {
            return Err(FormValidationError::EmptyCategory);
        }
        Ok(())
    }
}

/// State for the new-transaction form
pub struct TransactionForm {
    api_client: ApiClient,

    /// Categories available for selection
    pub categories: Vec<Category>,

    /// Whether a category fetch or a submission is in flight
    pub loading: bool,

    pub error: Option<String>,

    pub success: bool,

    pub fields: FormFields,

    status: FormStatus,
}

impl TransactionForm {
    pub fn new(api_client: ApiClient) -> Self {
        Self {
            api_client,
            categories: Vec::new(),
            loading: false,
            error: None,
            success: false,
            fields: FormFields::default(),
            status: FormStatus::Idle,
        }
    }

    /// Load the selectable categories
    pub async fn initialize(&mut self) -> Result<(), ApiError> {
        self.refetch_categories().await
    }

    pub async fn refetch_categories(&mut self) -> Result<(), ApiError> {
        self.loading = true;
        self.error = None;

        let result = self.api_client.get_categories().await;
        self.loading = false;

        match result {
            Ok(categories) => {
                self.categories = categories;
                Ok(())
            }
            Err(e) => {
                error!("Error fetching categories: {}", e);
                self.error = Some(e.message());
                Err(e)
            }
        }
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn set_description(&mut self, description: &str) {
        self.fields.description = description.to_string();
        self.back_to_idle();
    }

    /// Store the typed amount with its sign forced to the current type.
    /// Input that isn't a number is ignored.
    pub fn set_amount(&mut self, amount: &str) {
        if let Some(coupled) = couple_amount_sign(amount, self.fields.transaction_type) {
            self.fields.amount = coupled;
        }
        self.back_to_idle();
    }

    pub fn set_date(&mut self, date: &str) {
        self.fields.date = date.to_string();
        self.back_to_idle();
    }

    /// Set the date to today's calendar date in the local time zone (not UTC)
    pub fn set_today_date(&mut self) {
        self.fields.date = Local::now().format("%Y-%m-%d").to_string();
        self.back_to_idle();
    }

    pub fn set_category(&mut self, category: &str) {
        self.fields.category = category.to_string();
        self.back_to_idle();
    }

    /// Switch type and re-sign the current amount to match
    pub fn set_transaction_type(&mut self, transaction_type: TransactionType) {
        self.fields.transaction_type = transaction_type;
        if let Some(coupled) = couple_amount_sign(&self.fields.amount, transaction_type) {
            self.fields.amount = coupled;
        }
        self.back_to_idle();
    }

    /// Reset every field; the type goes back to expense
    pub fn clear(&mut self) {
        self.fields = FormFields::default();
        self.back_to_idle();
    }

    pub fn clear_error(&mut self) {
        self.error = None;
        if matches!(self.status, FormStatus::Failed(_)) {
            self.status = FormStatus::Idle;
        }
    }

    pub fn clear_success(&mut self) {
        self.success = false;
        if self.status == FormStatus::Success {
            self.status = FormStatus::Idle;
        }
    }

    /// Validate the current fields and submit them. Fields are reset on success.
    pub async fn submit(&mut self) -> bool {
        if let Err(validation) = self.fields.validate() {
            warn!("Transaction form invalid: {}", validation);
            self.success = false;
            self.error = Some(validation.to_string());
            self.status = FormStatus::Failed(validation.to_string());
            return false;
        }

        let form_data = self.fields.to_form_data();
        let created = self.create_transaction(&form_data).await;
        if created {
            let transaction_type = self.fields.transaction_type;
            self.fields = FormFields {
                transaction_type,
                ..FormFields::default()
            };
        }
        created
    }

    /// Resolve the category, build the payload and send it.
    ///
    /// The amount's sign is always taken from `form_data.transaction_type`,
    /// whatever sign the amount string carries.
    ///
    /// Returns whether the record was created; the outcome is also reflected
    /// in `loading`, `error`, `success` and [`Self::status`].
    pub async fn create_transaction(&mut self, form_data: &TransactionFormData) -> bool {
        self.loading = true;
        self.error = None;
        self.success = false;
        self.status = FormStatus::Submitting;

        let result = self.send_record(form_data).await;
        self.loading = false;

        match result {
            Ok(record_id) => {
                info!("Transaction created successfully: {:?}", record_id);
                self.success = true;
                self.status = FormStatus::Success;
                true
            }
            Err(e) => {
                error!("Error creating transaction: {}", e);
                let message = e.submit_message();
                self.error = Some(message.clone());
                self.status = FormStatus::Failed(message);
                false
            }
        }
    }

    async fn send_record(&self, form_data: &TransactionFormData) -> Result<Option<i64>, FormError> {
        let category = self
            .categories
            .iter()
            .find(|category| category.name == form_data.category)
            .ok_or(FormError::InvalidCategory)?;

        let amount = parse_amount(&form_data.amount).ok_or(FormValidationError::InvalidAmount)?;

        let payload = CreateRecordPayload {
            description: form_data.description.clone(),
            amount: signed_amount(amount, form_data.transaction_type),
            date: form_data.date.clone(),
            category: category.id,
        };

        let created = self.api_client.create_record(payload).await?;
        Ok(created.id)
    }

    fn back_to_idle(&mut self) {
        self.error = None;
        self.success = false;
        if self.status != FormStatus::Submitting {
            self.status = FormStatus::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::config::ApiConfig;
    use crate::services::transport::testing::MockTransport;
    use serde_json::json;
    use std::sync::Arc;

    fn form_with(transport: &MockTransport) -> TransactionForm {
        let client = ApiClient::with_transport(&ApiConfig::default(), Arc::new(transport.clone()));
        let mut form = TransactionForm::new(client);
        form.categories = vec![Category::new(1, "Hogar"), Category::new(4, "Supermercado")];
        form
    }

    fn form_data(category: &str) -> TransactionFormData {
        TransactionFormData {
            description: "Compra semanal".to_string(),
            amount: "-45.5".to_string(),
            date: "2024-12-01".to_string(),
            category: category.to_string(),
            transaction_type: TransactionType::Expense,
        }
    }

    #[test]
    fn test_type_change_resigns_preserving_magnitude() {
        let cases = ["12.5", "-12.5", "0.01", "1500", "-0", "99.99", "12.5abc"];

        for amount in cases {
            let magnitude = parse_leading_number(amount).unwrap().abs();

            let expense = couple_amount_sign(amount, TransactionType::Expense).unwrap();
            assert!(expense.starts_with('-'), "{} -> {}", amount, expense);
            assert_eq!(expense[1..].parse::<f64>().unwrap(), magnitude);

            let income = couple_amount_sign(amount, TransactionType::Income).unwrap();
            assert!(!income.starts_with('-'), "{} -> {}", amount, income);
            assert_eq!(income.parse::<f64>().unwrap(), magnitude);
        }
    }

    #[test]
    fn test_partial_input_passes_through() {
        assert_eq!(couple_amount_sign("", TransactionType::Expense).as_deref(), Some(""));
        assert_eq!(couple_amount_sign("-", TransactionType::Income).as_deref(), Some("-"));
        assert_eq!(couple_amount_sign("abc", TransactionType::Income), None);
        assert_eq!(couple_amount_sign(".", TransactionType::Expense), None);
    }

    #[test]
    fn test_sign_and_type_stay_coupled_through_edits() {
        let mut form = form_with(&MockTransport::new());

        form.set_amount("25");
        assert_eq!(form.fields.amount, "-25");

        form.set_transaction_type(TransactionType::Income);
        assert_eq!(form.fields.amount, "25");

        form.set_amount("-7.25");
        assert_eq!(form.fields.amount, "7.25");

        form.set_transaction_type(TransactionType::Expense);
        assert_eq!(form.fields.amount, "-7.25");

        // non-numeric input keeps the previous value
        form.set_amount("x");
        assert_eq!(form.fields.amount, "-7.25");

        form.set_amount("-");
        assert_eq!(form.fields.amount, "-");
        form.set_transaction_type(TransactionType::Income);
        assert_eq!(form.fields.amount, "-");
    }

    #[tokio::test]
    async fn test_unknown_category_fails_without_network() {
        let transport = MockTransport::new();
        let mut form = form_with(&transport);

        let created = form.create_transaction(&form_data("Viajes")).await;

        assert!(!created);
        assert_eq!(transport.request_count(), 0);
        assert!(!form.loading);
        assert!(!form.success);
        assert_eq!(form.error.as_deref(), Some(GENERIC_SUBMIT_ERROR));
        assert_eq!(form.status(), &FormStatus::Failed(GENERIC_SUBMIT_ERROR.to_string()));
    }

    #[tokio::test]
    async fn test_create_transaction_success() {
        let transport = MockTransport::new();
        transport.push_json(201, json!({"id": 77}));
        let mut form = form_with(&transport);

        let created = form.create_transaction(&form_data("Supermercado")).await;

        assert!(created);
        assert!(form.success);
        assert!(!form.loading);
        assert!(form.error.is_none());
        assert_eq!(form.status(), &FormStatus::Success);

        let body: serde_json::Value =
            serde_json::from_str(transport.requests()[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["category"], 4);
        assert_eq!(body["amount"], -45.5);
        assert_eq!(body["date"], "2024-12-01");
        assert_eq!(body["source"], "ingreso manual");
    }

    #[tokio::test]
    async fn test_sent_amount_takes_sign_from_type() {
        let transport = MockTransport::new();
        transport.push_json(201, json!({"id": 1}));
        transport.push_json(201, json!({"id": 2}));
        let mut form = form_with(&transport);

        let expense = TransactionFormData {
            amount: "45".to_string(),
            ..form_data("Hogar")
        };
        assert!(form.create_transaction(&expense).await);

        let income = TransactionFormData {
            amount: "-1200".to_string(),
            transaction_type: TransactionType::Income,
            ..form_data("Hogar")
        };
        assert!(form.create_transaction(&income).await);

        let sent: Vec<serde_json::Value> = transport
            .requests()
            .iter()
            .map(|request| serde_json::from_str(request.body.as_deref().unwrap()).unwrap())
            .collect();
        assert_eq!(sent[0]["amount"], -45.0);
        assert_eq!(sent[1]["amount"], 1200.0);
    }

    #[tokio::test]
    async fn test_non_finite_amounts_are_rejected() {
        let overflowing = "9".repeat(400);

        assert_eq!(couple_amount_sign(&overflowing, TransactionType::Expense), None);
        for amount in ["inf", "-inf", "NaN", "infinity", overflowing.as_str()] {
            let fields = FormFields {
                description: "Cena".to_string(),
                amount: amount.to_string(),
                date: "2024-12-01".to_string(),
                category: "Hogar".to_string(),
                transaction_type: TransactionType::Expense,
            };
            assert_eq!(fields.validate(), Err(FormValidationError::InvalidAmount), "{}", amount);
        }

        let transport = MockTransport::new();
        let mut form = form_with(&transport);
        form.set_amount("12");
        form.set_amount(&overflowing);
        assert_eq!(form.fields.amount, "-12");

        let data = TransactionFormData {
            amount: "inf".to_string(),
            ..form_data("Hogar")
        };
        assert!(!form.create_transaction(&data).await);
        assert_eq!(transport.request_count(), 0);
        assert_eq!(form.error.as_deref(), Some(GENERIC_SUBMIT_ERROR));
    }

    #[tokio::test]
    async fn test_api_error_message_is_surfaced() {
        let transport = MockTransport::new();
        transport.push_json(400, json!({"message": "Amount out of range"}));
        let mut form = form_with(&transport);

        let created = form.create_transaction(&form_data("Hogar")).await;

        assert!(!created);
        assert_eq!(form.error.as_deref(), Some("Amount out of range"));
        assert!(!form.loading);
    }

    #[tokio::test]
    async fn test_field_edit_returns_to_idle() {
        let transport = MockTransport::new();
        transport.push_json(500, json!({}));
        let mut form = form_with(&transport);

        form.create_transaction(&form_data("Hogar")).await;
        assert!(matches!(form.status(), FormStatus::Failed(_)));

        form.set_description("Otra cosa");
        assert_eq!(form.status(), &FormStatus::Idle);
        assert!(form.error.is_none());
    }

    #[test]
    fn test_clear_flags_are_idempotent() {
        let mut form = form_with(&MockTransport::new());
        form.error = Some("boom".to_string());
        form.success = true;

        form.clear_error();
        form.clear_error();
        form.clear_success();
        form.clear_success();

        assert!(form.error.is_none());
        assert!(!form.success);
        assert_eq!(form.status(), &FormStatus::Idle);
    }

    #[tokio::test]
    async fn test_submit_validates_before_sending() {
        let transport = MockTransport::new();
        let mut form = form_with(&transport);
        form.set_description("Luz");
        form.set_category("Hogar");
        form.set_date("2024-12-01");

        assert!(!form.submit().await);
        assert_eq!(form.error.as_deref(), Some("Amount is required"));

        form.set_amount("-");
        assert!(!form.submit().await);
        assert_eq!(form.error.as_deref(), Some("Amount is required"));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_submit_resets_fields_on_success() {
        let transport = MockTransport::new();
        transport.push_json(201, json!({"id": 5}));
        let mut form = form_with(&transport);
        form.set_transaction_type(TransactionType::Income);
        form.set_description("Sueldo");
        form.set_amount("1500");
        form.set_category("Hogar");
        form.set_today_date();

        assert!(form.submit().await);
        assert!(form.success);
        assert_eq!(form.fields.description, "");
        assert_eq!(form.fields.amount, "");
        assert_eq!(form.fields.transaction_type, TransactionType::Income);

        let body: serde_json::Value =
            serde_json::from_str(transport.requests()[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["amount"], 1500.0);
        assert_eq!(body["category"], 1);
    }

    #[test]
    fn test_clear_resets_type_to_expense() {
        let mut form = form_with(&MockTransport::new());
        form.set_transaction_type(TransactionType::Income);
        form.set_amount("10");
        form.set_description("x");

        form.clear();

        assert_eq!(form.fields, FormFields::default());
        assert_eq!(form.fields.transaction_type, TransactionType::Expense);
    }

    #[test]
    fn test_validation_order() {
        let mut fields = FormFields::default();
        assert_eq!(fields.validate(), Err(FormValidationError::EmptyDescription));
        fields.description = "Cena".to_string();
        fields.amount = "abc".to_string();
        assert_eq!(fields.validate(), Err(FormValidationError::InvalidAmount));
        fields.amount = "-30".to_string();
        assert_eq!(fields.validate(), Err(FormValidationError::EmptyDate));
        fields.date = "2024-12-01".to_string();
        assert_eq!(fields.validate(), Err(FormValidationError::EmptyCategory));
        fields.category = "Hogar".to_string();
        assert_eq!(fields.validate(), Ok(()));
    }

    #[tokio::test]
    async fn test_initialize_loads_categories() {
        let transport = MockTransport::new();
        transport.push_json(200, json!({"results": [{"id": 3, "name": "Ocio"}]}));
        let client = ApiClient::with_transport(&ApiConfig::default(), Arc::new(transport.clone()));
        let mut form = TransactionForm::new(client);

        form.initialize().await.unwrap();

        assert_eq!(form.categories, vec![Category::new(3, "Ocio")]);
        assert!(!form.loading);
    }
}
