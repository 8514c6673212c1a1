//! # Transaction Source
//!
//! Where the transaction list gets its pages from. There is no backend
//! listing endpoint yet, so the only implementation is a mock generator that
//! cycles through a fixed set of templates and randomizes amounts and
//! relative times.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared::DisplayTransaction;
use std::sync::Mutex;
use std::time::Duration;

/// Supplies pages of display transactions (pages are 1-based)
#[async_trait]
pub trait TransactionPageSource: Send + Sync {
    async fn fetch_page(&self, page: u32, page_size: usize) -> Vec<DisplayTransaction>;
}

struct Template {
    name: &'static str,
    category: &'static str,
    is_negative: bool,
}

const TEMPLATES: [Template; 8] = [
    Template { name: "Compra Apple Store", category: "Ocio", is_negative: true },
    Template { name: "Depósito de Salario", category: "Hogar", is_negative: false },
    Template { name: "Suscripción Netflix", category: "Ocio", is_negative: true },
    Template { name: "Supermercado", category: "Supermercado", is_negative: true },
    Template { name: "Pago Freelance", category: "Hogar", is_negative: false },
    Template { name: "Consulta Médica", category: "Salud y bienestar", is_negative: true },
    Template { name: "Suscripción Supabase", category: "Ocio", is_negative: true },
    Template { name: "Suscripción Vercel", category: "Ocio", is_negative: true },
];

/// Mock page generator with simulated latency
pub struct MockTransactionSource {
    rng: Mutex<StdRng>,
    latency: Duration,
}

impl MockTransactionSource {
    pub fn new(latency: Duration) -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
            latency,
        }
    }

    /// Deterministic generator for reproducible output
    pub fn seeded(seed: u64, latency: Duration) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            latency,
        }
    }

    pub fn generate_page(&self, page: u32, page_size: usize) -> Vec<DisplayTransaction> {
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let first_index = page.saturating_sub(1) as usize * page_size;

        (first_index..first_index + page_size)
            .map(|index| {
                let template = &TEMPLATES[index % TEMPLATES.len()];
                let amount = if template.is_negative {
                    format!("-${:.2}", rng.gen_range(10.0..510.0))
                } else {
                    format!("+${:.2}", rng.gen_range(100.0..2100.0))
                };
                let name = if index >= TEMPLATES.len() {
                    format!("{} #{}", template.name, index + 1 - TEMPLATES.len())
                } else {
                    template.name.to_string()
                };

                DisplayTransaction {
                    id: format!("transaction-{}", index),
                    name,
                    time: format!("hace {} días", rng.gen_range(1..=30)),
                    amount,
                    category: template.category.to_string(),
                    is_negative: template.is_negative,
                }
            })
            .collect()
    }
}

#[async_trait]
impl TransactionPageSource for MockTransactionSource {
    async fn fetch_page(&self, page: u32, page_size: usize) -> Vec<DisplayTransaction> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.generate_page(page, page_size)
    }
}
