//! Filter, sort and paginate pipeline for the transactions table.
//!
//! Stages run in order: filters narrow the set, the sort orders it (stable),
//! and the optional page request slices it.

use crate::entity::{Transaction, TransactionStatus};
use crate::utils::amount_or_zero;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const DEFAULT_PAGE_SIZE: usize = 15;

/// Status filter; `all` disables it
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Confirmed,
    Failed,
}

impl StatusFilter {
    fn status(&self) -> Option<TransactionStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Pending => Some(TransactionStatus::Pending),
            StatusFilter::Confirmed => Some(TransactionStatus::Confirmed),
            StatusFilter::Failed => Some(TransactionStatus::Failed),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilters {
    pub status: StatusFilter,
    pub search: String,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl TransactionFilters {
    pub fn is_active(&self) -> bool {
        self.status != StatusFilter::All
            || !self.search.is_empty()
            || self.date_from.is_some()
            || self.date_to.is_some()
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some(status) = self.status.status() {
            if tx.status != status {
                return false;
            }
        }

        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            let hit = tx.hash.to_lowercase().contains(&needle)
                || tx.from_address.to_lowercase().contains(&needle)
                || tx.to_address.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }

        if let Some(from) = self.date_from {
            if tx.created_at < start_of_day(from) {
                return false;
            }
        }

        if let Some(to) = self.date_to {
            if tx.created_at > end_of_day(to) {
                return false;
            }
        }

        true
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    // 23:59:59.999
    let end = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    date.and_time(end).and_utc()
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    CreatedAt,
    Amount,
    Status,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortConfig {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortConfig {
    /// Column-header click: same field flips direction, a new field starts descending
    pub fn toggle(self, field: SortField) -> Self {
        if self.field == field {
            Self {
                field,
                direction: self.direction.flipped(),
            }
        } else {
            Self {
                field,
                direction: SortDirection::Desc,
            }
        }
    }

    fn compare(&self, a: &Transaction, b: &Transaction) -> Ordering {
        let ordering = match self.field {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::Amount => amount_or_zero(&a.amount).cmp(&amount_or_zero(&b.amount)),
            SortField::Status => a.status.as_str().cmp(b.status.as_str()),
        };

        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub per_page: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingQuery {
    pub filters: TransactionFilters,
    pub sort: SortConfig,
    pub page: Option<PageRequest>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub items: Vec<Transaction>,
    /// Present only when the query asked for a page
    pub page_info: Option<PageInfo>,
}

pub fn apply_filters(transactions: Vec<Transaction>, filters: &TransactionFilters) -> Vec<Transaction> {
    if !filters.is_active() {
        return transactions;
    }
    transactions
        .into_iter()
        .filter(|tx| filters.matches(tx))
        .collect()
}

pub fn sort_transactions(transactions: &mut [Transaction], sort: SortConfig) {
    transactions.sort_by(|a, b| sort.compare(a, b));
}

pub fn paginate(transactions: Vec<Transaction>, request: PageRequest) -> (Vec<Transaction>, PageInfo) {
    let request = PageRequest::new(request.page, request.per_page);
    let total_items = transactions.len();
    let total_pages = total_items.div_ceil(request.per_page);
    let start = (request.page - 1).saturating_mul(request.per_page);

    let items = transactions
        .into_iter()
        .skip(start)
        .take(request.per_page)
        .collect();

    let info = PageInfo {
        page: request.page,
        per_page: request.per_page,
        total_items,
        total_pages,
    };
    (items, info)
}

/// Run the whole pipeline over an in-memory set
pub fn run(transactions: Vec<Transaction>, query: &ListingQuery) -> Listing {
    let mut filtered = apply_filters(transactions, &query.filters);
    sort_transactions(&mut filtered, query.sort);

    match query.page {
        Some(request) => {
            let (items, info) = paginate(filtered, request);
            Listing {
                items,
                page_info: Some(info),
            }
        }
        None => Listing {
            items: filtered,
            page_info: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::NewTransaction;
    use chrono::TimeZone;

    fn tx(hash: &str, amount: &str, status: TransactionStatus, created: DateTime<Utc>) -> Transaction {
        let mut tx = Transaction::new(
            hash.to_string(),
            format!("0xfrom{}", hash.trim_start_matches("0x")),
            NewTransaction {
                to_address: "0xAbCdEf0000000000000000000000000000000000".to_string(),
                amount: amount.to_string(),
                gas_limit: None,
                gas_price: None,
            },
            status,
        );
        tx.created_at = created;
        tx.updated_at = created;
        tx
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    fn fixture() -> Vec<Transaction> {
        vec![
            tx("0xaaa1", "2.50", TransactionStatus::Confirmed, at(1, 9)),
            tx("0xbbb2", "10", TransactionStatus::Pending, at(2, 12)),
            tx("0xccc3", "0.75", TransactionStatus::Failed, at(3, 23)),
            tx("0xddd4", "oops", TransactionStatus::Confirmed, at(4, 0)),
        ]
    }

    fn hashes(items: &[Transaction]) -> Vec<&str> {
        items.iter().map(|tx| tx.hash.as_str()).collect()
    }

    #[test]
    fn default_query_sorts_newest_first_without_paging() {
        let listing = run(fixture(), &ListingQuery::default());
        assert_eq!(hashes(&listing.items), vec!["0xddd4", "0xccc3", "0xbbb2", "0xaaa1"]);
        assert!(listing.page_info.is_none());
    }

    #[test]
    fn status_filter_keeps_exact_matches() {
        let filters = TransactionFilters {
            status: StatusFilter::Confirmed,
            ..Default::default()
        };
        let kept = apply_filters(fixture(), &filters);
        assert_eq!(hashes(&kept), vec!["0xaaa1", "0xddd4"]);
    }

    #[test]
    fn search_is_case_insensitive_across_hash_and_addresses() {
        let by_hash = TransactionFilters {
            search: "BBB".to_string(),
            ..Default::default()
        };
        assert_eq!(hashes(&apply_filters(fixture(), &by_hash)), vec!["0xbbb2"]);

        let by_to = TransactionFilters {
            search: "abcdef".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(fixture(), &by_to).len(), 4);

        let by_from = TransactionFilters {
            search: "fromccc".to_string(),
            ..Default::default()
        };
        assert_eq!(hashes(&apply_filters(fixture(), &by_from)), vec!["0xccc3"]);
    }

    #[test]
    fn date_range_covers_whole_days() {
        let filters = TransactionFilters {
            date_from: NaiveDate::from_ymd_opt(2024, 3, 2),
            date_to: NaiveDate::from_ymd_opt(2024, 3, 3),
            ..Default::default()
        };
        // 0xccc3 lands at 23:00 on the last day and is still inside the range
        assert_eq!(hashes(&apply_filters(fixture(), &filters)), vec!["0xbbb2", "0xccc3"]);
    }

    #[test]
    fn amount_sort_is_numeric_and_treats_garbage_as_zero() {
        let mut items = fixture();
        sort_transactions(
            &mut items,
            SortConfig {
                field: SortField::Amount,
                direction: SortDirection::Asc,
            },
        );
        assert_eq!(hashes(&items), vec!["0xddd4", "0xccc3", "0xaaa1", "0xbbb2"]);
    }

    #[test]
    fn status_sort_is_lexicographic_and_stable() {
        let mut items = fixture();
        sort_transactions(
            &mut items,
            SortConfig {
                field: SortField::Status,
                direction: SortDirection::Asc,
            },
        );
        assert_eq!(hashes(&items), vec!["0xaaa1", "0xddd4", "0xccc3", "0xbbb2"]);
    }

    #[test]
    fn toggle_flips_same_field_and_resets_new_field() {
        let sort = SortConfig::default();
        let flipped = sort.toggle(SortField::CreatedAt);
        assert_eq!(flipped.direction, SortDirection::Asc);

        let switched = flipped.toggle(SortField::Amount);
        assert_eq!(switched.field, SortField::Amount);
        assert_eq!(switched.direction, SortDirection::Desc);
    }

    #[test]
    fn pagination_reports_totals_and_handles_overflow() {
        let (page, info) = paginate(fixture(), PageRequest::new(2, 3));
        assert_eq!(hashes(&page), vec!["0xddd4"]);
        assert_eq!(info.total_items, 4);
        assert_eq!(info.total_pages, 2);

        let (beyond, info) = paginate(fixture(), PageRequest::new(5, 3));
        assert!(beyond.is_empty());
        assert_eq!(info.page, 5);

        let (first, info) = paginate(fixture(), PageRequest::new(0, 3));
        assert_eq!(first.len(), 3);
        assert_eq!(info.page, 1);
    }

    #[test]
    fn empty_set_has_zero_pages() {
        let listing = run(
            Vec::new(),
            &ListingQuery {
                page: Some(PageRequest::default()),
                ..Default::default()
            },
        );
        assert!(listing.items.is_empty());
        assert_eq!(listing.page_info.map(|p| p.total_pages), Some(0));
    }
}
