//! Cards: an identity plus an immutable value.

use serde::{Deserialize, Serialize};

/// Unique card identity, allocated at deal time.
///
/// Two cards may share a value; ids keep them apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u16);

/// A President card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub value: u8,
}

impl Card {
    #[must_use]
    pub const fn new(id: CardId, value: u8) -> Self {
        Self { id, value }
    }

    /// True if this card strictly exceeds `value`.
    #[must_use]
    pub const fn beats(self, value: u8) -> bool {
        self.value > value
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.value)
    }
}
