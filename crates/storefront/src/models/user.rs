//! Signed-in user identity.

use serde::{Deserialize, Serialize};

use mycart_core::{Email, UserId};

/// The identity held while a shopper is signed in.
///
/// Stored as-is under the current-user key and removed on sign-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    /// Display name shown in the header.
    pub name: String,
}

impl User {
    /// First letter of the display name, uppercased, for the avatar badge.
    #[must_use]
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next().map(|c| c.to_ascii_uppercase())
    }
}
