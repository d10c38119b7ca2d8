//! User-visible acknowledgments emitted by cart mutations.

use std::fmt;
use std::sync::Mutex;

/// Acknowledgment of a cart mutation, shown to the shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartNotice {
    /// A new entry was appended.
    Added,
    /// An existing entry's quantity went up.
    QuantityUpdated,
    Removed,
    Cleared,
    /// The entry is already at the product's inventory ceiling.
    LimitReached { available: u32 },
    /// The product has no inventory, so nothing was added.
    OutOfStock,
}

impl fmt::Display for CartNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added => f.write_str("Added to cart"),
            Self::QuantityUpdated => f.write_str("Updated quantity in cart"),
            Self::Removed => f.write_str("Removed from cart"),
            Self::Cleared => f.write_str("Cart cleared"),
            Self::LimitReached { available } => write!(f, "Only {available} available"),
            Self::OutOfStock => f.write_str("Out of stock"),
        }
    }
}

/// Receives acknowledgments as they are emitted.
///
/// This is the seam a presentation layer hooks into (a toast, a status line).
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &CartNotice);
}

/// Reports acknowledgments as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &CartNotice) {
        match notice {
            CartNotice::LimitReached { .. } | CartNotice::OutOfStock => {
                tracing::warn!(notice = %notice, "Cart unchanged");
            }
            _ => tracing::info!(notice = %notice, "Cart updated"),
        }
    }
}

/// Keeps every acknowledgment in order, for callers that render them later.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<CartNotice>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all recorded notices, leaving the recorder empty.
    #[must_use]
    pub fn drain(&self) -> Vec<CartNotice> {
        self.notices
            .lock()
            .map(|mut notices| std::mem::take(&mut *notices))
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &CartNotice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice.clone());
        }
    }
}
