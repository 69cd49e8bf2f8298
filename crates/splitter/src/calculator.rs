use serde::Serialize;
use shared::{
    domain::{BillInputs, FriendCount, Order, SplitMode, Tax, Tip},
    error::SplitError,
};
use tracing::debug;

use crate::policy::finite_or_zero;

/// Every figure derived from one calculation. Rebuilt wholesale each time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitBreakdown {
    pub mode: SplitMode,
    pub subtotal: f64,
    pub tip_amount: f64,
    pub tax_amount: f64,
    pub total: f64,
    /// Equal tax-and-tip share; only set for even splits.
    pub tax_and_tip_per_friend: Option<f64>,
    pub per_person: Vec<f64>,
    /// Cost of orders assigned to a friend beyond the current table size.
    pub unassigned: f64,
    /// Tax and tip carried by those orders, in proportion to their cost.
    pub unassigned_extras: f64,
}

impl SplitBreakdown {
    pub fn allocated(&self) -> f64 {
        self.per_person.iter().sum()
    }

    /// Everything no friend pays; `allocated() + unassigned_total() == total`.
    pub fn unassigned_total(&self) -> f64 {
        self.unassigned + self.unassigned_extras
    }
}

pub fn subtotal(orders: &[Order]) -> f64 {
    orders.iter().map(|order| finite_or_zero(order.cost)).sum()
}

pub fn tip_amount(subtotal: f64, tip: Tip) -> f64 {
    subtotal * (finite_or_zero(tip.0) / 100.0)
}

pub fn total_with_tip_and_tax(orders: &[Order], tip: Tip, tax: Tax) -> f64 {
    let subtotal = subtotal(orders);
    subtotal + tip_amount(subtotal, tip) + finite_or_zero(tax.0)
}

/// Tax plus tip divided equally across the table. Defined for an empty ledger
/// so live summaries can show it before anything is ordered.
pub fn tax_and_tip_per_friend(orders: &[Order], inputs: &BillInputs) -> f64 {
    let extras = total_with_tip_and_tax(orders, inputs.tip, inputs.tax) - subtotal(orders);
    extras / inputs.friends.get() as f64
}

pub fn split(orders: &[Order], inputs: &BillInputs) -> Result<SplitBreakdown, SplitError> {
    if orders.is_empty() {
        return Err(SplitError::EmptyLedger);
    }

    let subtotal = subtotal(orders);
    let tip_amount = tip_amount(subtotal, inputs.tip);
    let tax_amount = finite_or_zero(inputs.tax.0);
    let total = subtotal + tip_amount + tax_amount;
    if !total.is_finite() {
        return Err(SplitError::BillTooLarge);
    }
    let extras = total - subtotal;
    let (mut per_person, unassigned) = order_costs_by_friend(orders, inputs.friends);

    // Stranded orders keep their cost-proportional slice of tax and tip in
    // every mode; only the rest is apportioned among the table.
    let unassigned_extras = if unassigned > 0.0 {
        extras * (unassigned / subtotal)
    } else {
        0.0
    };
    let assigned_extras = extras - unassigned_extras;

    let mut tax_and_tip_per_friend = None;
    match inputs.mode {
        SplitMode::Even => {
            let share = assigned_extras / inputs.friends.get() as f64;
            per_person.iter_mut().for_each(|amount| *amount += share);
            tax_and_tip_per_friend = Some(share);
        }
        SplitMode::TwoPerson => {
            if per_person.len() != 2 {
                return Err(SplitError::TwoPersonNeedsTwoFriends {
                    friends: per_person.len(),
                });
            }
            if subtotal == 0.0 {
                return Err(SplitError::UndefinedShare);
            }
            let first = per_person[0] + extras * (per_person[0] / subtotal);
            per_person[1] = total - unassigned - unassigned_extras - first;
            per_person[0] = first;
        }
        SplitMode::Proportional => {
            if subtotal == 0.0 {
                return Err(SplitError::UndefinedShare);
            }
            per_person
                .iter_mut()
                .for_each(|amount| *amount += extras * (*amount / subtotal));
        }
    }

    debug!(
        mode = %inputs.mode,
        subtotal,
        total,
        friends = per_person.len(),
        unassigned,
        unassigned_extras,
        "bill split"
    );

    Ok(SplitBreakdown {
        mode: inputs.mode,
        subtotal,
        tip_amount,
        tax_amount,
        total,
        tax_and_tip_per_friend,
        per_person,
        unassigned,
        unassigned_extras,
    })
}

fn order_costs_by_friend(orders: &[Order], friends: FriendCount) -> (Vec<f64>, f64) {
    let mut per_person = vec![0.0; friends.get()];
    let mut unassigned = 0.0;
    for order in orders {
        let cost = finite_or_zero(order.cost);
        match per_person.get_mut(order.person.0) {
            Some(amount) => *amount += cost,
            None => unassigned += cost,
        }
    }
    (per_person, unassigned)
}

#[cfg(test)]
#[path = "tests/calculator_tests.rs"]
mod tests;
