use super::simulator::{PaymentSimulator, Transition};
use crate::config::SimulatorConfig;
use crate::domain::cart::Cart;
use crate::domain::listing::{Catalog, ListingId};
use crate::domain::money::Money;
use crate::domain::payment::{PaymentAttempt, PaymentSnapshot, PaymentStatus};
use crate::domain::ports::{ConfirmationProviderRef, TransactionLogBox};
use crate::domain::transaction::Transaction;
use crate::error::{PaymentError, Result};
use tracing::info;

/// One buyer session.
///
/// `Storefront` owns the cart, the payment simulator and the order history,
/// and applies the simulator's transitions to the rest of the session: a
/// successful payment clears the cart, closes the checkout view and empties
/// the contact input once its display window elapses.
///
/// Closing the checkout view while a payment is pending does not cancel it.
/// The confirmation still resolves and a success is still recorded.
pub struct Storefront {
    catalog: Catalog,
    cart: Cart,
    payments: PaymentSimulator,
    log: TransactionLogBox,
    checkout_open: bool,
    contact: String,
}

impl Storefront {
    pub fn new(
        catalog: Catalog,
        provider: ConfirmationProviderRef,
        log: TransactionLogBox,
        config: SimulatorConfig,
    ) -> Self {
        Self {
            catalog,
            cart: Cart::new(),
            payments: PaymentSimulator::new(provider, config),
            log,
            checkout_open: false,
            contact: String::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn add_to_cart(&mut self, listing_id: ListingId) -> Result<()> {
        let listing = self
            .catalog
            .find(listing_id)
            .ok_or(PaymentError::UnknownListing(listing_id))?;
        self.cart.add_or_increment(listing);
        Ok(())
    }

    pub fn remove_from_cart(&mut self, listing_id: ListingId) {
        self.cart.remove(listing_id);
    }

    pub fn adjust_quantity(&mut self, listing_id: ListingId, delta: i64) {
        self.cart.adjust_quantity(listing_id, delta);
    }

    pub fn total(&self) -> Money {
        self.cart.total()
    }

    pub fn open_checkout(&mut self) {
        self.checkout_open = true;
    }

    pub fn close_checkout(&mut self) {
        if self.payments.status() == PaymentStatus::Pending {
            info!("Checkout closed while payment pending; it will still complete");
        }
        self.checkout_open = false;
    }

    pub fn is_checkout_open(&self) -> bool {
        self.checkout_open
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }

    /// Edits the contact input. Locked while a payment is pending.
    pub fn set_contact(&mut self, contact: &str) -> Result<()> {
        if self.payments.status() == PaymentStatus::Pending {
            return Err(PaymentError::AttemptInProgress);
        }
        self.contact = contact.to_string();
        Ok(())
    }

    /// Starts paying for the current cart with the current contact.
    ///
    /// The amount and line count are frozen at this point; later cart edits
    /// do not change what this attempt charges. The checkout view is opened
    /// only once the attempt is accepted; a rejected checkout changes nothing.
    pub fn checkout(&mut self) -> Result<PaymentAttempt> {
        let attempt = self
            .payments
            .initiate(&self.contact, self.cart.total(), self.cart.len())?
            .clone();
        self.checkout_open = true;
        Ok(attempt)
    }

    pub fn payment_status(&self) -> PaymentStatus {
        self.payments.status()
    }

    pub fn payment_snapshot(&self) -> PaymentSnapshot {
        self.payments.snapshot()
    }

    /// Waits for the next payment transition and applies it to the session.
    ///
    /// Returns `None` when no payment is in flight.
    pub async fn next_event(&mut self) -> Result<Option<Transition>> {
        let transition = self.payments.next_transition(&*self.log).await?;
        if let Some(transition) = &transition
            && transition.clears_cart()
        {
            self.cart.clear();
            self.checkout_open = false;
            self.contact.clear();
            info!("Checkout complete; cart cleared");
        }
        Ok(transition)
    }

    /// Applies transitions until the payment state is back to idle.
    pub async fn settle(&mut self) -> Result<Vec<Transition>> {
        let mut applied = Vec::new();
        while let Some(transition) = self.next_event().await? {
            applied.push(transition);
        }
        Ok(applied)
    }

    /// Order history, most recent first.
    pub async fn transactions(&self) -> Result<Vec<Transaction>> {
        self.log.all().await
    }
}
