//! Records produced by scraping the site's pages.

use chrono::NaiveDateTime;
use std::time::Instant;

/// One row of the order-history table on the account page.
///
/// Only `id` and `customer_id` are sent back when reordering; the remaining
/// fields are informational.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i64,
    pub placed_at: NaiveDateTime,
    pub item_count: u32,
    pub price: f64,
    pub status: String,
    pub customer_id: i64,
}

/// One top-level line of the shopping cart after a reorder.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    /// Relative URL that deletes this line, e.g. `cart.php?remove=3496801837`.
    pub remove_href: String,
    pub product: String,
    pub quantity: u32,
    pub price: f64,
}

/// An order that has been placed but not yet accepted by the restaurant.
///
/// The status token is opaque and must be echoed verbatim on every poll. The
/// poll also requires the seconds elapsed since checkout, derived from a
/// monotonic clock so it never goes backwards within a run.
#[derive(Debug, Clone)]
pub struct PendingOrder {
    pub id: i64,
    pub status_token: String,
    created_at: Instant,
}

impl PendingOrder {
    pub fn new(id: i64, status_token: String) -> Self {
        Self {
            id,
            status_token,
            created_at: Instant::now(),
        }
    }

    /// Seconds since the order was placed.
    pub fn elapsed_seconds(&self) -> u64 {
        self.created_at.elapsed().as_secs()
    }
}
