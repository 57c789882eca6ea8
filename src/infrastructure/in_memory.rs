use crate::domain::ports::TransactionLog;
use crate::domain::transaction::Transaction;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory order history.
///
/// Uses `Arc<RwLock<Vec<Transaction>>>` kept in insertion order; reads
/// return it reversed. Lives as long as the process.
#[derive(Default, Clone)]
pub struct InMemoryTransactionLog {
    transactions: Arc<RwLock<Vec<Transaction>>>,
}

impl InMemoryTransactionLog {
    /// Creates a new, empty order history.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionLog for InMemoryTransactionLog {
    async fn record(&self, tx: Transaction) -> Result<()> {
        let mut transactions = self.transactions.write().await;
        transactions.push(tx);
        Ok(())
    }

    async fn all(&self) -> Result<Vec<Transaction>> {
        let transactions = self.transactions.read().await;
        Ok(transactions.iter().rev().cloned().collect())
    }
}
