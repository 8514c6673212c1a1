//! # Category State Module
//!
//! Category list state for the categories screen and category pickers.
//!
//! ## Responsibilities:
//! - Fetching the category list from the backend
//! - Loading and error state for that fetch
//! - Adding and deleting categories
//! - Resolving a category name to its icon and color
//!
//! ## Persistence:
//! The backend has no category mutation endpoints yet. Added and deleted
//! categories only change local state and are lost on the next fetch; see
//! [`CategoryStore::MUTATIONS`]. Local categories get negative ids so they can
//! never be confused with server ids.

use shared::Category;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::services::api::{ApiClient, ApiError};
use crate::services::category_theme::{CategoryPresentation, CategoryTheme, ColorToken, IconId};

/// Where category mutations end up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Persistence {
    /// Changes only exist in memory
    LocalOnly,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CategoryError {
    #[error("Category name cannot be empty")]
    EmptyName,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Category list state plus its data access
pub struct CategoryStore {
    api_client: ApiClient,
    theme: Arc<CategoryTheme>,

    /// Categories currently shown
    pub categories: Vec<Category>,

    /// Whether a fetch is in flight
    pub loading: bool,

    /// Last error message, if any
    pub error: Option<String>,

    next_local_id: i64,
}

impl CategoryStore {
    pub const MUTATIONS: Persistence = Persistence::LocalOnly;

    pub fn new(api_client: ApiClient, theme: Arc<CategoryTheme>) -> Self {
        Self {
            api_client,
            theme,
            categories: Vec::new(),
            loading: false,
            error: None,
            next_local_id: -1,
        }
    }

    /// Fetch the category list; on failure the previous list is kept
    pub async fn fetch_categories(&mut self) -> Result<(), CategoryError> {
        self.loading = true;
        self.error = None;

        let result = self.api_client.get_categories().await;
        self.loading = false;

        match result {
            Ok(categories) => {
                info!("Loaded {} categories", categories.len());
                self.categories = categories;
                Ok(())
            }
            Err(e) => {
                error!("Error fetching categories: {}", e);
                self.error = Some(e.message());
                Err(e.into())
            }
        }
    }

    /// Append a category to local state only
    pub fn add_category(&mut self, name: &str) -> Result<Category, CategoryError> {
        let name = name.trim();
        if name.is_empty() {
            let err = CategoryError::EmptyName;
            self.error = Some(err.to_string());
            return Err(err);
        }

        let category = Category::new(self.next_local_id, name);
        self.next_local_id -= 1;
        self.categories.push(category.clone());
        info!(
            "Added category '{}' with id {} ({:?})",
            category.name,
            category.id,
            Self::MUTATIONS
        );
        Ok(category)
    }

    /// Remove a category from local state only; returns whether it was present
    pub fn delete_category(&mut self, id: i64) -> bool {
        let before = self.categories.len();
        self.categories.retain(|category| category.id != id);
        let removed = self.categories.len() != before;
        if removed {
            info!("Deleted category {} ({:?})", id, Self::MUTATIONS);
        } else {
            warn!("Tried to delete unknown category {}", id);
        }
        removed
    }

    pub fn get_category_icon(&self, name: &str) -> IconId {
        self.theme.icon(name)
    }

    pub fn get_category_color(&self, name: &str) -> ColorToken {
        self.theme.color(name)
    }

    pub fn presentation(&self, name: &str) -> CategoryPresentation {
        self.theme.presentation(name)
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
