//! The single numeric coercion and validation policy shared by every input.

use shared::{
    domain::{FriendCount, PersonIndex, Tax, Tip},
    error::SplitError,
};

/// Parses a user-entered amount; blank, unparsable or non-finite input counts as zero.
pub fn coerce_amount(raw: &str) -> f64 {
    finite_or_zero(raw.trim().parse::<f64>().unwrap_or(0.0))
}

pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

pub fn parse_tip(raw: &str) -> Result<Tip, SplitError> {
    non_negative(coerce_amount(raw), "Tip").map(Tip)
}

pub fn parse_tax(raw: &str) -> Result<Tax, SplitError> {
    non_negative(coerce_amount(raw), "Tax").map(Tax)
}

pub fn parse_friend_count(raw: &str) -> Result<FriendCount, SplitError> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .and_then(FriendCount::new)
        .ok_or(SplitError::InvalidFriendCount)
}

/// Cost of a new order: must be a finite number strictly above zero.
pub fn parse_new_cost(raw: &str) -> Result<f64, SplitError> {
    match raw.trim().parse::<f64>() {
        Ok(cost) if cost.is_finite() && cost > 0.0 => Ok(cost),
        _ => Err(SplitError::InvalidOrder),
    }
}

/// Cost typed over an existing order; coerced like tip and tax.
pub fn parse_cost_edit(raw: &str) -> Result<f64, SplitError> {
    non_negative(coerce_amount(raw), "Cost")
}

pub fn ensure_seated(person: PersonIndex, friends: FriendCount) -> Result<PersonIndex, SplitError> {
    if friends.contains(person) {
        Ok(person)
    } else {
        Err(SplitError::UnknownFriend {
            friend: person.display_number(),
            friends: friends.get(),
        })
    }
}

fn non_negative(value: f64, field: &'static str) -> Result<f64, SplitError> {
    if value < 0.0 {
        Err(SplitError::NegativeAmount { field })
    } else {
        Ok(value)
    }
}
