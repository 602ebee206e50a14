//! Transaction handlers

use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use super::error::ApiResult;
use crate::di::ServiceContainer;
use crate::entity::{AppError, NewTransaction};
use crate::listing::{
    ListingQuery, PageRequest, SortConfig, SortDirection, SortField, StatusFilter,
    TransactionFilters,
};
use crate::utils::{is_positive_amount, ETH_ADDRESS_RE};
use crate::view::{ApiResponse, TransactionListView, TransactionView};

/// Create transaction request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    #[validate(regex(
        path = "ETH_ADDRESS_RE",
        message = "toAddress must be a valid Ethereum address"
    ))]
    pub to_address: String,

    #[validate(
        length(min = 1, message = "amount is required"),
        custom(function = "validate_amount")
    )]
    pub amount: String,

    pub gas_limit: Option<String>,

    pub gas_price: Option<String>,
}

fn validate_amount(amount: &str) -> Result<(), ValidationError> {
    if is_positive_amount(amount) {
        Ok(())
    } else {
        let mut error = ValidationError::new("positive_amount");
        error.message = Some("amount must be a positive number".into());
        Err(error)
    }
}

impl From<CreateTransactionRequest> for NewTransaction {
    fn from(req: CreateTransactionRequest) -> Self {
        Self {
            to_address: req.to_address,
            amount: req.amount,
            gas_limit: req.gas_limit,
            gas_price: req.gas_price,
        }
    }
}

/// Optional table controls for the list endpoint
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTransactionsParams {
    pub status: Option<StatusFilter>,
    pub search: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub sort_field: Option<SortField>,
    pub sort_direction: Option<SortDirection>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl ListTransactionsParams {
    pub fn into_query(self, default_page_size: usize) -> ListingQuery {
        let page = if self.page.is_some() || self.page_size.is_some() {
            Some(PageRequest::new(
                self.page.unwrap_or(1),
                self.page_size.unwrap_or(default_page_size),
            ))
        } else {
            None
        };

        ListingQuery {
            filters: TransactionFilters {
                status: self.status.unwrap_or_default(),
                search: self.search.unwrap_or_default(),
                date_from: self.date_from,
                date_to: self.date_to,
            },
            sort: SortConfig {
                field: self.sort_field.unwrap_or_default(),
                direction: self.sort_direction.unwrap_or_default(),
            },
            page,
        }
    }
}

/// Create a new transaction
pub async fn create_transaction(
    services: web::Data<ServiceContainer>,
    req: web::Json<CreateTransactionRequest>,
) -> ApiResult<HttpResponse> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let tx = services
        .transaction_interactor()
        .create(req.into_inner().into())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(TransactionView::from(&tx))))
}

/// List transactions, newest first unless the query says otherwise
pub async fn list_transactions(
    services: web::Data<ServiceContainer>,
    params: web::Query<ListTransactionsParams>,
) -> ApiResult<HttpResponse> {
    let query = params.into_inner().into_query(services.config().page_size);
    let listing = services.transaction_interactor().list(&query).await?;

    Ok(HttpResponse::Ok().json(TransactionListView::from(&listing)))
}

/// Get a transaction by id
pub async fn get_transaction(
    services: web::Data<ServiceContainer>,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let tx = services.transaction_interactor().find_one(&id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(TransactionView::from(&tx))))
}
