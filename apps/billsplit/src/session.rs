//! The bill being edited. This is the only mutable state in the app; every
//! figure it shows is derived from the ledger and inputs on demand.

use meal_client::MealSource;
use shared::{
    domain::{BillInputs, FriendCount, PersonIndex, SplitMode, Tax, Tip},
    error::{SplitError, UserError},
};
use splitter::{policy, Ledger, SplitBreakdown};
use tracing::{error, info, warn};

/// Figures shown above the order list while editing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveSummary {
    pub subtotal: f64,
    pub total: f64,
    pub tax_and_tip_per_friend: f64,
}

pub struct BillSession {
    ledger: Ledger,
    inputs: BillInputs,
    meal_source: Option<Box<dyn MealSource>>,
    breakdown: Option<SplitBreakdown>,
    suggested_meal: Option<String>,
    error: Option<UserError>,
}

impl BillSession {
    pub fn new(inputs: BillInputs, meal_source: Option<Box<dyn MealSource>>) -> Self {
        Self {
            ledger: Ledger::new(),
            inputs,
            meal_source,
            breakdown: None,
            suggested_meal: None,
            error: None,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn inputs(&self) -> &BillInputs {
        &self.inputs
    }

    pub fn breakdown(&self) -> Option<&SplitBreakdown> {
        self.breakdown.as_ref()
    }

    pub fn per_person_amounts(&self) -> &[f64] {
        self.breakdown
            .as_ref()
            .map(|breakdown| breakdown.per_person.as_slice())
            .unwrap_or_default()
    }

    pub fn suggested_meal(&self) -> Option<&str> {
        self.suggested_meal.as_deref()
    }

    pub fn error(&self) -> Option<&UserError> {
        self.error.as_ref()
    }

    pub fn set_tip(&mut self, raw: &str) -> Result<Tip, SplitError> {
        let tip = policy::parse_tip(raw)?;
        self.inputs.tip = tip;
        Ok(tip)
    }

    pub fn set_tax(&mut self, raw: &str) -> Result<Tax, SplitError> {
        let tax = policy::parse_tax(raw)?;
        self.inputs.tax = tax;
        Ok(tax)
    }

    /// Orders assigned past the new count stay in the ledger but drop out of
    /// per-person totals until reassigned.
    pub fn set_friends(&mut self, raw: &str) -> Result<FriendCount, SplitError> {
        let friends = policy::parse_friend_count(raw)?;
        self.inputs.friends = friends;
        let stranded = self
            .ledger
            .orders()
            .iter()
            .filter(|order| !friends.contains(order.person))
            .count();
        if stranded > 0 {
            warn!(stranded, friends = friends.get(), "orders assigned beyond table size");
        }
        Ok(friends)
    }

    pub fn set_mode(&mut self, raw: &str) -> Result<SplitMode, SplitError> {
        let mode = raw.parse::<SplitMode>()?;
        self.inputs.mode = mode;
        Ok(mode)
    }

    pub fn add_order(
        &mut self,
        item: &str,
        raw_cost: &str,
        person: PersonIndex,
    ) -> Result<usize, SplitError> {
        self.ledger.add(item, raw_cost, person, self.inputs.friends)
    }

    pub fn set_cost(&mut self, index: usize, raw_cost: &str) -> Result<f64, SplitError> {
        self.ledger.set_cost(index, raw_cost)
    }

    pub fn assign(&mut self, index: usize, person: PersonIndex) -> Result<(), SplitError> {
        self.ledger.set_person(index, person, self.inputs.friends)
    }

    pub fn rename(&mut self, index: usize, item: &str) -> Result<(), SplitError> {
        self.ledger.rename(index, item)
    }

    pub fn remove_order(&mut self, index: usize) -> Result<(), SplitError> {
        self.ledger.remove(index).map(|_| ())
    }

    pub fn live_summary(&self) -> LiveSummary {
        let orders = self.ledger.orders();
        LiveSummary {
            subtotal: splitter::subtotal(orders),
            total: splitter::total_with_tip_and_tax(orders, self.inputs.tip, self.inputs.tax),
            tax_and_tip_per_friend: splitter::tax_and_tip_per_friend(orders, &self.inputs),
        }
    }

    /// Recomputes the split. On failure the error is shown and no per-person
    /// amounts remain published.
    pub fn calculate(&mut self) -> bool {
        match splitter::split(self.ledger.orders(), &self.inputs) {
            Ok(breakdown) => {
                info!(
                    mode = %breakdown.mode,
                    total = breakdown.total,
                    friends = breakdown.per_person.len(),
                    "split calculated"
                );
                self.breakdown = Some(breakdown);
                self.error = None;
                true
            }
            Err(err) => {
                warn!(error = %err, "split rejected");
                self.breakdown = None;
                self.error = Some(err.into());
                false
            }
        }
    }

    /// Calculates, then fetches a meal suggestion if the calculation succeeded.
    pub async fn submit(&mut self) {
        if !self.calculate() {
            return;
        }
        let Some(source) = self.meal_source.as_ref() else {
            return;
        };

        match source.fetch_suggestion().await {
            Ok(suggestion) => {
                self.suggested_meal = Some(suggestion.image);
                self.error = None;
            }
            Err(err) => {
                error!(error = %err, "Error fetching meal suggestion");
                self.suggested_meal = None;
                self.error = Some(UserError::fetch(err.user_message()));
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
