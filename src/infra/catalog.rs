use crate::infra::contracts::{Listing, ListingProvider};

const DEMO_LISTINGS: [(&str, &str); 3] = [
    ("1", "Fresh Green Mussels"),
    ("2", "Premium Black Mussels"),
    ("3", "Organic Farm Mussels"),
];

/// Fixed in-memory catalog of the demo marketplace.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoCatalog;

impl ListingProvider for DemoCatalog {
    fn describe(&self, product_ref: &str) -> Option<Listing> {
        DEMO_LISTINGS
            .iter()
            .find(|(id, _)| *id == product_ref)
            .map(|(_, label)| Listing {
                label: (*label).to_owned(),
            })
    }
}
