//! Listing Data

use jiff::Timestamp;

use crate::domain::{
    pickup_points::records::PickupPointRecord, products::records::ProductRecord,
    receptions::records::ReceptionRecord,
};

/// Largest page a single listing call may return.
pub const MAX_PAGE_LIMIT: u64 = 30;

pub const DEFAULT_PAGE: u64 = 1;

pub const DEFAULT_PAGE_LIMIT: u64 = 10;

/// Largest offset a store can seek to; `PostgreSQL` binds `OFFSET` as a `bigint`.
pub const MAX_OFFSET: u64 = i64::MAX.unsigned_abs();

/// Half-open window over reception opening times: `from <= opened_at < to`.
///
/// Either bound may be absent, in which case that side is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenedAtRange {
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}

impl OpenedAtRange {
    #[must_use]
    pub fn contains(&self, opened_at: Timestamp) -> bool {
        self.from.is_none_or(|from| from <= opened_at) && self.to.is_none_or(|to| opened_at < to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingQuery {
    pub range: OpenedAtRange,

    /// One-based page number.
    pub page: u64,

    pub limit: u64,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            range: OpenedAtRange::default(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl ListingQuery {
    /// Number of receptions to skip before this page starts.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// Whether the page starts beyond any row a store can hold, so it is empty.
    #[must_use]
    pub fn is_past_end(&self) -> bool {
        self.offset() > MAX_OFFSET
    }
}

/// One page of receptions with the pickup points and products they reference.
///
/// The three collections are returned as read; grouping is left to the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickupPointListing {
    pub pickup_points: Vec<PickupPointRecord>,
    pub receptions: Vec<ReceptionRecord>,
    pub products: Vec<ProductRecord>,
}

impl PickupPointListing {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.receptions.is_empty()
    }
}
