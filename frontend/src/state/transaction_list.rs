//! # Transaction List State Module
//!
//! State behind the transactions screen: a growing list of transactions,
//! search and type filtering, and incremental page loading.
//!
//! ## Responsibilities:
//! - Initial page load and `load_more` paging with an in-flight guard
//! - Search term and type filter, with the filtered view recomputed on change
//! - Adopting a filter supplied from outside (e.g. navigation pre-filtered to
//!   incomes)
//! - Deciding from scroll metrics when the next page should be requested

use shared::{DisplayTransaction, TypeFilter};
use std::sync::Arc;
use tracing::{debug, info};

use crate::services::config::ListConfig;
use crate::services::transaction_source::TransactionPageSource;

/// Filter `transactions` by search term (name or category) and then by sign
pub fn filter_transactions(
    transactions: &[DisplayTransaction],
    search_term: &str,
    filter: TypeFilter,
) -> Vec<DisplayTransaction> {
    transactions
        .iter()
        .filter(|transaction| search_term.is_empty() || transaction.matches_search(search_term))
        .filter(|transaction| filter.accepts(transaction.is_negative))
        .cloned()
        .collect()
}

/// Scroll position of the list viewport, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub viewport_height: f64,
    pub scroll_top: f64,
    pub content_height: f64,
}

impl ScrollMetrics {
    /// Whether the bottom of the viewport is within `threshold_px` of the end
    pub fn is_near_bottom(&self, threshold_px: f64) -> bool {
        self.viewport_height + self.scroll_top >= self.content_height - threshold_px
    }
}

pub struct TransactionListState {
    source: Arc<dyn TransactionPageSource>,
    config: ListConfig,

    transactions: Vec<DisplayTransaction>,
    filtered: Vec<DisplayTransaction>,
    search_term: String,
    filter: TypeFilter,
    /// Last filter value received from outside, to detect changes
    external_filter: TypeFilter,

    loading: bool,
    has_more: bool,
    page: u32,
}

impl TransactionListState {
    pub fn new(source: Arc<dyn TransactionPageSource>, config: ListConfig, initial_filter: TypeFilter) -> Self {
        Self {
            source,
            config,
            transactions: Vec::new(),
            filtered: Vec::new(),
            search_term: String::new(),
            filter: initial_filter,
            external_filter: initial_filter,
            loading: false,
            has_more: true,
            page: 1,
        }
    }

    /// Replace the list with the first page
    pub async fn load_initial(&mut self) {
        let first_page = self.source.fetch_page(1, self.config.page_size).await;
        self.transactions = first_page;
        self.page = 1;
        self.has_more = self.config.max_pages > 1;
        self.refilter();
        info!("Loaded {} initial transactions", self.transactions.len());
    }

    pub fn transactions(&self) -> &[DisplayTransaction] {
        &self.transactions
    }

    /// Transactions after search and type filtering
    pub fn filtered(&self) -> &[DisplayTransaction] {
        &self.filtered
    }

    /// Whether a page load is in flight
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Last page loaded
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn filter(&self) -> TypeFilter {
        self.filter
    }

    pub fn set_search_term(&mut self, search_term: &str) {
        self.search_term = search_term.to_string();
        self.refilter();
    }

    pub fn set_filter(&mut self, filter: TypeFilter) {
        self.filter = filter;
        self.refilter();
    }

    /// Adopt an externally supplied filter whenever that value changes.
    ///
    /// Local filter changes made in between are kept until the external value
    /// itself changes again.
    pub fn sync_initial_filter(&mut self, external: TypeFilter) {
        if external != self.external_filter {
            debug!("External filter changed to {}", external);
            self.external_filter = external;
            self.set_filter(external);
        }
    }

    /// Mark a page load as started; returns the page to fetch, or `None` when
    /// a load is already running or there is nothing left to load
    pub fn begin_load_more(&mut self) -> Option<u32> {
        if self.loading || !self.has_more {
            return None;
        }
        self.loading = true;
        Some(self.page + 1)
    }

    /// Append a fetched page and advance the cursor
    pub fn finish_load_more(&mut self, page: u32, batch: Vec<DisplayTransaction>) {
        if page >= self.config.max_pages {
            self.has_more = false;
        }
        self.transactions.extend(batch);
        self.page = page;
        self.loading = false;
        self.refilter();
        debug!("Loaded page {} ({} transactions total)", page, self.transactions.len());
    }

    pub async fn load_more(&mut self) {
        let Some(page) = self.begin_load_more() else {
            return;
        };
        let batch = self.source.fetch_page(page, self.config.page_size).await;
        self.finish_load_more(page, batch);
    }

    /// Load the next page if the viewport is close enough to the end
    pub async fn on_scroll(&mut self, metrics: ScrollMetrics) {
        if metrics.is_near_bottom(self.config.scroll_threshold_px) {
            self.load_more().await;
        }
    }

    fn refilter(&mut self) {
        self.filtered = filter_transactions(&self.transactions, &self.search_term, self.filter);
    }
}
