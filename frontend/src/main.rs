use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use shared::{TransactionType, TypeFilter};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use expensy_frontend::services::api::ApiClient;
use expensy_frontend::services::category_theme::CategoryTheme;
use expensy_frontend::services::config::AppConfig;
use expensy_frontend::services::logging::init_logging;
use expensy_frontend::services::transaction_source::MockTransactionSource;
use expensy_frontend::state::{
    CategoryStore, TransactionForm, TransactionListState, GENERIC_FETCH_ERROR, GENERIC_SUBMIT_ERROR,
};

#[derive(Parser, Debug)]
#[command(name = "expensy")]
#[command(version = "1.0.0")]
#[command(about = "Terminal front-end for the Expensy personal-finance backend", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "expensy.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List categories from the backend
    Categories,
    /// Create a new transaction record
    New {
        #[arg(short, long)]
        description: String,
        /// Amount; its sign is forced to match the transaction type
        #[arg(short, long, allow_hyphen_values = true)]
        amount: String,
        /// Date as YYYY-MM-DD, or "today"
        #[arg(long, default_value = "today")]
        date: String,
        /// Category name, exactly as listed by `categories`
        #[arg(short, long)]
        category: String,
        /// Record an income instead of an expense
        #[arg(long)]
        income: bool,
    },
    /// Browse mock transactions
    Transactions {
        #[arg(short, long, default_value = "")]
        search: String,
        /// all, income or expense
        #[arg(short, long, default_value = "all")]
        filter: TypeFilter,
        /// Dashboard page the list is opened from (invoices, payments, ...);
        /// overrides --filter
        #[arg(long)]
        from: Option<String>,
        /// Number of pages to load
        #[arg(short, long, default_value_t = 1)]
        pages: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging("info");

    let args = Args::parse();
    let mut config = AppConfig::load(&args.config)
        .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;
    config.apply_env().context("Invalid environment configuration")?;
    info!("Starting {} {} against {}", config.app.name, config.app.version, config.api.base_url);

    match args.command {
        Command::Categories => list_categories(&config).await,
        Command::New {
            description,
            amount,
            date,
            category,
            income,
        } => {
            let transaction_type = if income { TransactionType::Income } else { TransactionType::Expense };
            create_transaction(&config, &description, &amount, &date, &category, transaction_type).await
        }
        Command::Transactions {
            search,
            filter,
            from,
            pages,
        } => browse_transactions(&config, &search, filter, from.as_deref(), pages).await,
    }
}

async fn list_categories(config: &AppConfig) -> Result<()> {
    let api_client = ApiClient::from_config(&config.api)?;
    let theme = Arc::new(CategoryTheme::with_overrides(&config.category_overrides));
    let mut store = CategoryStore::new(api_client, theme);

    if store.fetch_categories().await.is_err() {
        bail!(store.error.unwrap_or_else(|| "Error loading categories".to_string()));
    }

    for category in &store.categories {
        let presentation = store.presentation(&category.name);
        println!(
            "{:>4}  {:<28} {:<16} {}",
            category.id,
            category.name,
            presentation.icon.name(),
            presentation.color.css_classes()
        );
    }
    Ok(())
}

async fn create_transaction(
    config: &AppConfig,
    description: &str,
    amount: &str,
    date: &str,
    category: &str,
    transaction_type: TransactionType,
) -> Result<()> {
    let api_client = ApiClient::from_config(&config.api)?;
    let mut form = TransactionForm::new(api_client);

    if form.initialize().await.is_err() {
        bail!(form.error.unwrap_or_else(|| GENERIC_FETCH_ERROR.to_string()));
    }

    form.set_transaction_type(transaction_type);
    form.set_description(description);
    form.set_amount(amount);
    if date == "today" {
        form.set_today_date();
    } else {
        form.set_date(date);
    }
    form.set_category(category);

    let summary = format!(
        "{} {} on {} ({})",
        form.fields.description, form.fields.amount, form.fields.date, form.fields.category
    );
    if form.submit().await {
        println!("Saved: {}", summary);
        Ok(())
    } else {
        bail!(form.error.unwrap_or_else(|| GENERIC_SUBMIT_ERROR.to_string()))
    }
}

async fn browse_transactions(
    config: &AppConfig,
    search: &str,
    filter: TypeFilter,
    from_page: Option<&str>,
    pages: u32,
) -> Result<()> {
    let source = Arc::new(MockTransactionSource::new(Duration::from_millis(config.list.load_delay_ms)));
    let mut list = TransactionListState::new(source, config.list.clone(), filter);
    if let Some(page) = from_page {
        list.sync_initial_filter(TypeFilter::for_page(page));
    }

    list.load_initial().await;
    for _ in 1..pages {
        if !list.has_more() {
            break;
        }
        list.load_more().await;
    }
    list.set_search_term(search);

    for transaction in list.filtered() {
        println!(
            "{:<16} {:<32} {:<20} {:<14} {:>12}",
            transaction.id, transaction.name, transaction.category, transaction.time, transaction.amount
        );
    }
    if list.filtered().is_empty() {
        println!("No transactions found");
    } else if !list.has_more() {
        println!("No more transactions to load");
    }
    Ok(())
}
