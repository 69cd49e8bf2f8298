use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Validation,
    Fetch,
}

/// Error shown to the user; never fatal to the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserError {
    pub category: ErrorCategory,
    pub message: String,
}

impl UserError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Validation, message)
    }

    pub fn fetch(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Fetch, message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    #[error("Please enter a valid item name and cost.")]
    InvalidOrder,
    #[error("Friend {friend} is not at the table (friends: {friends}).")]
    UnknownFriend { friend: usize, friends: usize },
    #[error("No order numbered {number}.")]
    NoSuchOrder { number: usize },
    #[error("{field} must not be negative.")]
    NegativeAmount { field: &'static str },
    #[error("Number of friends must be a whole number of at least 1.")]
    InvalidFriendCount,
    #[error("Please add at least one order before calculating.")]
    EmptyLedger,
    #[error("A two-person split needs exactly 2 friends, not {friends}.")]
    TwoPersonNeedsTwoFriends { friends: usize },
    #[error("Cannot apportion tax and tip by share when the subtotal is zero.")]
    UndefinedShare,
    #[error("The bill is too large to calculate.")]
    BillTooLarge,
    #[error("Unknown split mode '{0}' (expected even, two-person or proportional).")]
    UnknownMode(String),
}

impl From<SplitError> for UserError {
    fn from(value: SplitError) -> Self {
        Self::validation(value.to_string())
    }
}
