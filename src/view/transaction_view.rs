use crate::entity::{Transaction, TransactionStatus};
use crate::listing::{Listing, PageInfo};
use crate::utils::{calculate_transaction_fee, format_fixed};
use chrono::SecondsFormat;
use serde::Serialize;

/// Wire representation of a transaction
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    pub id: String,
    pub hash: String,
    pub from_address: String,
    pub to_address: String,
    pub amount: String,
    pub status: TransactionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<String>,
    pub fee: String,
    pub timestamp: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Transaction> for TransactionView {
    fn from(tx: &Transaction) -> Self {
        let created_at = tx.created_at.to_rfc3339_opts(SecondsFormat::Millis, true);
        let fee = calculate_transaction_fee(tx.gas_limit.as_deref(), tx.gas_price.as_deref());

        Self {
            id: tx.id.to_string(),
            hash: tx.hash.clone(),
            from_address: tx.from_address.clone(),
            to_address: tx.to_address.clone(),
            amount: tx.amount.clone(),
            status: tx.status,
            gas_limit: tx.gas_limit.clone(),
            gas_price: tx.gas_price.clone(),
            fee: format_fixed(fee, 8),
            timestamp: created_at.clone(),
            created_at,
            updated_at: tx.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// List envelope; `pagination` is only present for paged queries
#[derive(Debug, Serialize)]
pub struct TransactionListView {
    pub success: bool,
    pub data: Vec<TransactionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageInfo>,
}

impl From<&Listing> for TransactionListView {
    fn from(listing: &Listing) -> Self {
        Self {
            success: true,
            data: listing.items.iter().map(TransactionView::from).collect(),
            pagination: listing.page_info,
        }
    }
}
