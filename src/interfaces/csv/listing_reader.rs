use crate::domain::listing::{Catalog, Listing};
use crate::error::{PaymentError, Result};
use std::io::Read;
use tracing::warn;

/// Reads catalog listings from a CSV source.
///
/// Expects the header `id,name,seller,price,unit,location`. Whitespace
/// around fields is trimmed.
pub struct ListingReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ListingReader<R> {
    /// Creates a new `ListingReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes listings.
    pub fn listings(self) -> impl Iterator<Item = Result<Listing>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PaymentError::from))
    }

    /// Collects every valid row into a catalog.
    ///
    /// Malformed rows are logged and skipped; a duplicate id keeps the
    /// first listing seen.
    pub fn into_catalog(self) -> Catalog {
        let mut listings: Vec<Listing> = Vec::new();
        for result in self.listings() {
            match result {
                Ok(listing) if listings.iter().any(|l| l.id == listing.id) => {
                    warn!(listing = %listing.id, "Skipping duplicate listing id");
                }
                Ok(listing) => listings.push(listing),
                Err(e) => warn!(error = %e, "Skipping malformed listing"),
            }
        }
        Catalog::new(listings)
    }
}
