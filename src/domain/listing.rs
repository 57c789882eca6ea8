use super::money::Amount;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(pub u32);

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog entry: a sellable quantity of produce from a named seller.
///
/// Listings are supplied by the catalog and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub name: String,
    /// The farmer selling this produce.
    pub seller: String,
    /// Price of one `unit`, in whole shillings.
    #[serde(deserialize_with = "whole_unit_price")]
    pub price: Amount,
    pub unit: String,
    /// Where the produce comes from.
    pub location: String,
}

// Catalog prices are plain digit strings: no sign, no decimal point, no exponent.
fn whole_unit_price<'de, D>(deserializer: D) -> Result<Amount, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(D::Error::custom(format!(
            "price must be a whole number of shillings, got {raw:?}"
        )));
    }
    let value = Decimal::from_str(&raw).map_err(D::Error::custom)?;
    Amount::unit_price(value).map_err(D::Error::custom)
}

/// An ordered, read-only list of listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    listings: Vec<Listing>,
}

const DEFAULT_PRODUCE: [(u32, &str, &str, Decimal, &str, &str); 6] = [
    (1, "Maize", "John Kamau", dec!(3500), "90kg bag", "Nakuru"),
    (2, "Tomatoes", "Mary Wanjiku", dec!(1200), "crate", "Kiambu"),
    (3, "Potatoes", "Peter Omondi", dec!(2800), "50kg bag", "Molo"),
    (4, "Cabbage", "Grace Achieng", dec!(800), "10 heads", "Eldoret"),
    (5, "Milk", "David Kipchoge", dec!(50), "liter", "Nandi"),
    (6, "Beans", "Sarah Muthoni", dec!(4200), "90kg bag", "Embu"),
];

impl Catalog {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }

    /// The built-in produce catalog used when no catalog file is given.
    pub fn default_produce() -> Self {
        let listings = DEFAULT_PRODUCE
            .iter()
            .filter_map(|&(id, name, seller, price, unit, location)| {
                let price = Amount::unit_price(price).ok()?;
                Some(Listing {
                    id: ListingId(id),
                    name: name.to_string(),
                    seller: seller.to_string(),
                    price,
                    unit: unit.to_string(),
                    location: location.to_string(),
                })
            })
            .collect();
        Self { listings }
    }

    pub fn find(&self, id: ListingId) -> Option<&Listing> {
        self.listings.iter().find(|listing| listing.id == id)
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_produce_catalog() {
        let catalog = Catalog::default_produce();
        assert_eq!(catalog.len(), 6);

        let maize = catalog.find(ListingId(1)).unwrap();
        assert_eq!(maize.name, "Maize");
        assert_eq!(maize.price.value(), dec!(3500));

        let milk = catalog.find(ListingId(5)).unwrap();
        assert_eq!(milk.unit, "liter");
    }

    #[test]
    fn test_find_missing_listing() {
        let catalog = Catalog::default_produce();
        assert!(catalog.find(ListingId(42)).is_none());
        assert!(Catalog::default().is_empty());
    }

    #[test]
    fn test_catalog_keeps_order() {
        let catalog = Catalog::default_produce();
        let ids: Vec<u32> = catalog.listings().iter().map(|l| l.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }
}
