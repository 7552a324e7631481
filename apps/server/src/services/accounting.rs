//! Revenue accounting
//!
//! A single operation: accumulate an amount onto an establishment's running
//! total. The addition happens in the store, so concurrent sales never lose
//! an increment. No sign check on the amount; refunds are negative values.

use std::sync::Arc;

use goodtogo_models::Establishment;

use crate::{db::EstablishmentStore, Error, Result};

#[derive(Clone)]
pub struct AccountingService {
    store: Arc<dyn EstablishmentStore>,
}

impl AccountingService {
    pub fn new(store: Arc<dyn EstablishmentStore>) -> Self {
        Self { store }
    }

    pub async fn add_amount_received(&self, id: i64, amount: f64) -> Result<Establishment> {
        let establishment = self
            .store
            .add_amount_received(id, amount)
            .await?
            .ok_or(Error::EstablishmentNotFound { id })?;
        tracing::info!(
            id,
            amount,
            total = establishment.total_amount_received,
            "amount received recorded"
        );
        Ok(establishment)
    }
}
