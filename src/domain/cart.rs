use super::listing::{Listing, ListingId};
use super::money::Money;
use serde::Serialize;
use tracing::debug;

/// Most units of one listing a cart line may hold.
pub const MAX_LINE_QUANTITY: u32 = 1_000_000;

/// A listing plus the quantity the buyer intends to purchase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub listing: Listing,
    /// Between 1 and [`MAX_LINE_QUANTITY`].
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> Money {
        self.listing.price * self.quantity
    }
}

/// The buyer's cart.
///
/// Holds at most one line per listing, in the order listings were first
/// added. A line's quantity never drops below 1: lines only disappear
/// through [`Cart::remove`] or [`Cart::clear`]. Quantities stop at
/// [`MAX_LINE_QUANTITY`], so with capped unit prices a total cannot overflow.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `listing`, creating the line if needed.
    pub fn add_or_increment(&mut self, listing: &Listing) {
        match self.line_mut(listing.id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(1).min(MAX_LINE_QUANTITY);
                debug!(listing = %listing.id, quantity = line.quantity, "Incremented cart line");
            }
            None => {
                self.lines.push(CartLine {
                    listing: listing.clone(),
                    quantity: 1,
                });
                debug!(listing = %listing.id, "Added cart line");
            }
        }
    }

    /// Removes the line for `listing_id`. Absent lines are ignored.
    pub fn remove(&mut self, listing_id: ListingId) {
        let before = self.lines.len();
        self.lines.retain(|line| line.listing.id != listing_id);
        if self.lines.len() != before {
            debug!(listing = %listing_id, "Removed cart line");
        }
    }

    /// Changes a line's quantity by `delta`, flooring at 1 and capping at
    /// [`MAX_LINE_QUANTITY`].
    pub fn adjust_quantity(&mut self, listing_id: ListingId, delta: i64) {
        if let Some(line) = self.line_mut(listing_id) {
            let adjusted = i64::from(line.quantity)
                .saturating_add(delta)
                .clamp(1, i64::from(MAX_LINE_QUANTITY));
            line.quantity = u32::try_from(adjusted).unwrap_or(MAX_LINE_QUANTITY);
            debug!(listing = %listing_id, quantity = line.quantity, "Adjusted cart line");
        }
    }

    /// Sum of unit price times quantity over all lines.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        debug!("Cleared cart");
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn quantity_of(&self, listing_id: ListingId) -> Option<u32> {
        self.line(listing_id).map(|line| line.quantity)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line(&self, listing_id: ListingId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.listing.id == listing_id)
    }

    fn line_mut(&mut self, listing_id: ListingId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.listing.id == listing_id)
    }
}
