//! # Expensy front-end core
//!
//! Everything below the views of the Expensy personal-finance front-end:
//!
//! - **services**: the backend API client and its transport, configuration,
//!   logging, the category presentation table and the transaction page source
//! - **state**: per-screen state for categories, the new-transaction form and
//!   the transaction list
//!
//! ```text
//! state (categories, transaction_form, transaction_list)
//!     ↓
//! services::api (ApiClient, ApiError)
//!     ↓
//! services::transport (HttpTransport, ReqwestTransport)
//!     ↓
//! REST backend (/categories/, /records/)
//! ```

pub mod services;
pub mod state;

pub use services::api::{ApiClient, ApiError};
pub use services::config::AppConfig;
