use serde::Serialize;

pub mod seed_view;
pub mod stats_view;
pub mod transaction_view;

pub use seed_view::SeedView;
pub use stats_view::StatsView;
pub use transaction_view::{TransactionListView, TransactionView};

/// Success envelope shared by every JSON endpoint
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
