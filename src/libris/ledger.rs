//! The checkout ledger: every loan ever made, in the order it was made.
//!
//! The ledger does not own the books. Availability is read from and written
//! back to an [`Inventory`] handed in by the caller, so the catalog stays the
//! single owner of quantities.
//!
//! A checkout moves through `OnLoan -> Returned` exactly once. Returning looks
//! for the first record of the (user, ISBN) pair that is still on loan, so a
//! user who borrowed the same title twice returns those loans oldest first.

use crate::catalog::Inventory;
use crate::error::{LibrisError, Result};
use crate::model::Checkout;
use crate::store::{Collection, StorageBackend};
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
pub struct CheckoutLedger {
    checkouts: Vec<Checkout>,
}

impl CheckoutLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<S: StorageBackend>(&mut self, store: &S) -> Result<()> {
        self.checkouts = store.load(Collection::Checkouts)?;
        debug!(count = self.checkouts.len(), "ledger loaded");
        Ok(())
    }

    /// Lend one copy of `isbn` to `user_id`.
    ///
    /// Fails with [`LibrisError::BookNotFound`] or [`LibrisError::NotAvailable`]
    /// without touching any state. The user id is not checked against the
    /// directory.
    pub fn checkout_book<I: Inventory, S: StorageBackend>(
        &mut self,
        inventory: &mut I,
        store: &S,
        user_id: &str,
        isbn: &str,
    ) -> Result<&Checkout> {
        let quantity = inventory
            .lookup(isbn)
            .ok_or_else(|| LibrisError::BookNotFound(isbn.to_string()))?
            .quantity;
        if quantity == 0 {
            return Err(LibrisError::NotAvailable(isbn.to_string()));
        }

        let checkout = Checkout::new(user_id, isbn)?;
        inventory.update_quantity(store, isbn, quantity - 1)?;
        self.checkouts.push(checkout);

        if let Err(e) = self.save(store) {
            self.checkouts.pop();
            if let Err(restore) = inventory.update_quantity(store, isbn, quantity) {
                warn!(isbn, error = %restore, "could not restore quantity after failed checkout");
            }
            return Err(e);
        }

        info!(user_id, isbn, remaining = quantity - 1, "book checked out");
        Ok(&self.checkouts[self.checkouts.len() - 1])
    }

    /// Close the oldest open loan of `isbn` held by `user_id` and put the copy
    /// back on the shelf.
    pub fn return_book<I: Inventory, S: StorageBackend>(
        &mut self,
        inventory: &mut I,
        store: &S,
        user_id: &str,
        isbn: &str,
    ) -> Result<&Checkout> {
        let position = self
            .checkouts
            .iter()
            .position(|c| c.is_on_loan() && c.user_id == user_id && c.isbn == isbn)
            .ok_or_else(|| LibrisError::LoanNotFound {
                user_id: user_id.to_string(),
                isbn: isbn.to_string(),
            })?;
        let quantity = inventory
            .lookup(isbn)
            .ok_or_else(|| LibrisError::BookNotFound(isbn.to_string()))?
            .quantity;

        inventory.update_quantity(store, isbn, quantity.saturating_add(1))?;
        let open = self.checkouts[position].clone();
        self.checkouts[position].mark_returned();

        if let Err(e) = self.save(store) {
            self.checkouts[position] = open;
            if let Err(restore) = inventory.update_quantity(store, isbn, quantity) {
                warn!(isbn, error = %restore, "could not restore quantity after failed return");
            }
            return Err(e);
        }

        info!(user_id, isbn, available = quantity.saturating_add(1), "book returned");
        Ok(&self.checkouts[position])
    }

    pub fn list(&self) -> &[Checkout] {
        &self.checkouts
    }

    pub fn loans_for<'a>(&'a self, user_id: &'a str) -> impl Iterator<Item = &'a Checkout> + 'a {
        self.checkouts.iter().filter(move |c| c.user_id == user_id)
    }

    /// Copies of `isbn` currently out on loan.
    pub fn on_loan_count(&self, isbn: &str) -> usize {
        self.checkouts
            .iter()
            .filter(|c| c.is_on_loan() && c.isbn == isbn)
            .count()
    }

    fn save<S: StorageBackend>(&self, store: &S) -> Result<()> {
        store.save(Collection::Checkouts, &self.checkouts)
    }
}
