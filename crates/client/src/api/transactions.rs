use api_types::transaction::{
    NewTransaction, TransactionPage, TransactionQuery, TransactionRecord, TransactionUpdate,
};

use super::ApiClient;
use crate::error::Result;

impl ApiClient {
    /// Lists transactions; use [`TransactionQuery`] to filter by kind,
    /// date range or page.
    pub async fn transactions(&self, query: &TransactionQuery) -> Result<TransactionPage> {
        self.get_query("transactions", query).await
    }

    pub async fn create_transaction(&self, new: &NewTransaction) -> Result<TransactionRecord> {
        self.post("transactions", new).await
    }

    /// Partial update; fields left `None` keep their stored value.
    pub async fn update_transaction(
        &self,
        id: &str,
        update: &TransactionUpdate,
    ) -> Result<TransactionRecord> {
        self.put(&format!("transactions/{id}"), update).await
    }

    pub async fn delete_transaction(&self, id: &str) -> Result<()> {
        self.delete_discard(&format!("transactions/{id}")).await
    }
}
