//! In-memory cart store with synchronous change notification.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::catalog::Textbook;
use crate::ids::TextbookId;
use crate::money::Money;

/// One distinct textbook in the cart together with its accumulated quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: TextbookId,
    pub title: String,
    pub price: Money,
    pub quantity: u32,
}

impl CartLineItem {
    pub fn line_total(&self) -> Money {
        self.price.saturating_mul(self.quantity)
    }
}

/// Handle returned by [`CartStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Subscriber = Box<dyn Fn(&[CartLineItem]) + 'static>;

/// Holds the cart lines and notifies subscribers after every change.
///
/// The store is plain mutable state owned by whoever drives the session.
/// Callers that need to react to changes register a closure; each mutation
/// runs all of them synchronously before returning, so a subscriber never
/// observes a half-applied update.
#[derive(Default)]
pub struct CartStore {
    items: Vec<CartLineItem>,
    subscribers: Vec<(SubscriberId, Subscriber)>,
    next_subscriber: u64,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of the textbook. A repeat of an id already in the cart
    /// increments that line's quantity instead of appending a duplicate line.
    pub fn add_item(&mut self, textbook: &Textbook) {
        match self.items.iter_mut().find(|item| item.id == textbook.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => self.items.push(CartLineItem {
                id: textbook.id,
                title: textbook.title.clone(),
                price: textbook.price,
                quantity: 1,
            }),
        }
        debug!(textbook_id = %textbook.id, "added textbook to cart");
        self.notify();
    }

    /// Drops the whole line for `id`, whatever its quantity. Removing an id
    /// that is not in the cart changes nothing and notifies nobody.
    pub fn remove_item(&mut self, id: TextbookId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed = self.items.len() != before;
        if removed {
            debug!(textbook_id = %id, "removed textbook from cart");
            self.notify();
        }
        removed
    }

    pub fn clear(&mut self) {
        self.items.clear();
        debug!("cleared cart");
        self.notify();
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn snapshot(&self) -> Vec<CartLineItem> {
        self.items.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
    }

    /// Sum of `price * quantity` over every line, in exact kobo.
    pub fn subtotal(&self) -> Money {
        Money::sum(self.items.iter().map(CartLineItem::line_total))
    }

    /// Registers a change subscriber and immediately hands back its handle.
    /// The closure fires after every subsequent mutation.
    pub fn subscribe(&mut self, subscriber: impl Fn(&[CartLineItem]) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber);
        self.next_subscriber += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Removes a subscriber. Returns false if the handle was already gone.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    fn notify(&self) {
        for (_, subscriber) in &self.subscribers {
            subscriber(&self.items);
        }
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
