use std::{fmt, num::NonZeroUsize, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::SplitError;

macro_rules! amount_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
        pub struct $name(pub f64);
    };
}

amount_newtype!(
    /// Tip as a percentage of the subtotal.
    Tip
);
amount_newtype!(
    /// Flat tax in currency units.
    Tax
);

/// Zero-based position of a friend at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonIndex(pub usize);

impl PersonIndex {
    /// One-based number shown to users ("Friend 1").
    pub fn display_number(self) -> usize {
        self.0 + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendCount(NonZeroUsize);

impl FriendCount {
    pub fn new(count: usize) -> Option<Self> {
        NonZeroUsize::new(count).map(Self)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }

    pub fn contains(self, person: PersonIndex) -> bool {
        person.0 < self.get()
    }
}

impl Default for FriendCount {
    fn default() -> Self {
        Self(NonZeroUsize::MIN)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SplitMode {
    /// Tax and tip divided equally across every friend.
    #[default]
    Even,
    /// Friend 1 pays tax and tip in proportion to their share, Friend 2 pays the rest.
    TwoPerson,
    /// Every friend pays tax and tip in proportion to their share.
    Proportional,
}

impl SplitMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SplitMode::Even => "even",
            SplitMode::TwoPerson => "two-person",
            SplitMode::Proportional => "proportional",
        }
    }
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SplitMode {
    type Err = SplitError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "even" => Ok(SplitMode::Even),
            "two-person" | "two_person" | "two" => Ok(SplitMode::TwoPerson),
            "proportional" => Ok(SplitMode::Proportional),
            other => Err(SplitError::UnknownMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub item: String,
    pub cost: f64,
    pub person: PersonIndex,
}

/// Tip, tax, table size and mode for one calculation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BillInputs {
    pub tip: Tip,
    pub tax: Tax,
    pub friends: FriendCount,
    pub mode: SplitMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn friend_count_rejects_zero() {
        assert!(FriendCount::new(0).is_none());
        assert_eq!(FriendCount::new(3).map(FriendCount::get), Some(3));
        assert_eq!(FriendCount::default().get(), 1);
    }

    #[test]
    fn friend_count_bounds_person_indices() {
        let friends = FriendCount::new(2).expect("count");
        assert!(friends.contains(PersonIndex(1)));
        assert!(!friends.contains(PersonIndex(2)));
    }

    #[test]
    fn split_mode_parses_cli_spellings() {
        assert_eq!("Even".parse::<SplitMode>(), Ok(SplitMode::Even));
        assert_eq!("two_person".parse::<SplitMode>(), Ok(SplitMode::TwoPerson));
        assert_eq!(" proportional ".parse::<SplitMode>(), Ok(SplitMode::Proportional));
        assert!(matches!(
            "thirds".parse::<SplitMode>(),
            Err(SplitError::UnknownMode(mode)) if mode == "thirds"
        ));
    }

    #[test]
    fn split_mode_serializes_kebab_case() {
        let json = serde_json::to_string(&SplitMode::TwoPerson).expect("serialize");
        assert_eq!(json, "\"two-person\"");
    }
}
