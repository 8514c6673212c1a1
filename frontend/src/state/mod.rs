//! View state for each screen. Every struct here owns the data one screen
//! renders and exposes the operations that screen triggers.

pub mod categories;
pub mod transaction_form;
pub mod transaction_list;

pub use categories::{CategoryError, CategoryStore, Persistence};
pub use transaction_form::{
    FormError, FormFields, FormStatus, FormValidationError, TransactionForm, GENERIC_FETCH_ERROR, GENERIC_SUBMIT_ERROR,
};
pub use transaction_list::{filter_transactions, ScrollMetrics, TransactionListState};
