use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed origin tag attached to every record created from this front-end
pub const RECORD_SOURCE: &str = "ingreso manual";

/// A named grouping for transactions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Server-assigned id (positive) or local placeholder id (negative)
    pub id: i64,
    pub name: String,
    /// Alternate (usually English) name provided by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_name: Option<String>,
}

impl Category {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            alt_name: None,
        }
    }

    /// Whether this category only exists in local state and was never persisted
    pub fn is_local(&self) -> bool {
        self.id < 0
    }
}

/// Paginated envelope returned by list endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Default for PaginatedResponse<T> {
    fn default() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}

/// Caller-facing payload for creating a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRecordPayload {
    pub description: String,
    /// Signed amount (negative for expense, positive for income)
    pub amount: f64,
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    /// Category id
    pub category: i64,
}

/// Wire body sent to `POST /records/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRecordRequest {
    pub description: String,
    pub amount: f64,
    pub date: String,
    pub category: i64,
    pub source: String,
}

impl From<CreateRecordPayload> for CreateRecordRequest {
    fn from(payload: CreateRecordPayload) -> Self {
        Self {
            description: payload.description,
            amount: payload.amount,
            date: payload.date,
            category: payload.category,
            source: RECORD_SOURCE.to_string(),
        }
    }
}

/// Response of `POST /records/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatedRecord {
    /// Absent when the backend answers with an empty body
    #[serde(default)]
    pub id: Option<i64>,
}

/// Direction of a transaction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    #[default]
    Expense,
    Income,
}

impl TransactionType {
    pub fn is_expense(self) -> bool {
        matches!(self, TransactionType::Expense)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Expense => write!(f, "expense"),
            TransactionType::Income => write!(f, "income"),
        }
    }
}

/// Type filter applied to the transaction list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    /// Whether a transaction with the given sign passes this filter
    pub fn accepts(self, is_negative: bool) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Income => !is_negative,
            TypeFilter::Expense => is_negative,
        }
    }

    /// Filter the transaction list opens with when reached from a dashboard
    /// page: `invoices` shows incomes, `payments` shows expenses, and every
    /// other page shows everything
    pub fn for_page(page: &str) -> Self {
        match page {
            "invoices" => TypeFilter::Income,
            "payments" => TypeFilter::Expense,
            _ => TypeFilter::All,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => write!(f, "all"),
            TypeFilter::Income => write!(f, "income"),
            TypeFilter::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = ParseTypeFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(TypeFilter::All),
            "income" => Ok(TypeFilter::Income),
            "expense" => Ok(TypeFilter::Expense),
            _ => Err(ParseTypeFilterError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseTypeFilterError(pub String);

impl fmt::Display for ParseTypeFilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown filter '{}' (expected all, income or expense)", self.0)
    }
}

impl std::error::Error for ParseTypeFilterError {}

/// A transaction row as shown in the transaction list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayTransaction {
    pub id: String,
    pub name: String,
    /// Relative time label ("hace 3 días")
    pub time: String,
    /// Formatted signed amount ("-$12.50", "+$1500.00")
    pub amount: String,
    pub category: String,
    pub is_negative: bool,
}

impl DisplayTransaction {
    /// Case-insensitive substring match on name or category
    pub fn matches_search(&self, search_term: &str) -> bool {
        let needle = search_term.to_lowercase();
        self.name.to_lowercase().contains(&needle) || self.category.to_lowercase().contains(&needle)
    }
}

/// Raw form input handed to the transaction form workflow
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionFormData {
    pub description: String,
    /// Signed amount as typed, already coupled to `transaction_type`
    pub amount: String,
    pub date: String,
    /// Category name as selected in the form
    pub category: String,
    pub transaction_type: TransactionType,
}
