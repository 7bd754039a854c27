//! Test doubles for infra contracts.

use crate::infra::contracts::{Listing, ListingProvider};

/// Catalog that knows no listings.
#[derive(Debug, Clone, Default)]
pub struct EmptyCatalog;

impl ListingProvider for EmptyCatalog {
    fn describe(&self, _product_ref: &str) -> Option<Listing> {
        None
    }
}
