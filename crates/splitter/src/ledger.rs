use shared::{
    domain::{FriendCount, Order, PersonIndex},
    error::SplitError,
};
use tracing::{debug, warn};

use crate::policy::{ensure_seated, parse_cost_edit, parse_new_cost};

/// Ordered list of line items. Orders are addressed purely by position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    orders: Vec<Order>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Appends an order and returns its index. The ledger is untouched on error.
    pub fn add(
        &mut self,
        item: &str,
        raw_cost: &str,
        person: PersonIndex,
        friends: FriendCount,
    ) -> Result<usize, SplitError> {
        let item = item.trim();
        if item.is_empty() {
            warn!("rejected order with empty item name");
            return Err(SplitError::InvalidOrder);
        }
        let cost = parse_new_cost(raw_cost).inspect_err(|_| {
            warn!(item, raw_cost, "rejected order with invalid cost");
        })?;
        let person = ensure_seated(person, friends)?;

        self.orders.push(Order {
            item: item.to_string(),
            cost,
            person,
        });
        debug!(item, cost, person = person.0, "order added");
        Ok(self.orders.len() - 1)
    }

    pub fn set_cost(&mut self, index: usize, raw_cost: &str) -> Result<f64, SplitError> {
        let cost = parse_cost_edit(raw_cost)?;
        self.order_mut(index)?.cost = cost;
        Ok(cost)
    }

    pub fn set_person(
        &mut self,
        index: usize,
        person: PersonIndex,
        friends: FriendCount,
    ) -> Result<(), SplitError> {
        let person = ensure_seated(person, friends)?;
        self.order_mut(index)?.person = person;
        Ok(())
    }

    pub fn rename(&mut self, index: usize, item: &str) -> Result<(), SplitError> {
        let item = item.trim();
        if item.is_empty() {
            return Err(SplitError::InvalidOrder);
        }
        self.order_mut(index)?.item = item.to_string();
        Ok(())
    }

    /// Removes the order at `index`; later orders shift down by one.
    pub fn remove(&mut self, index: usize) -> Result<Order, SplitError> {
        if index >= self.orders.len() {
            return Err(no_such_order(index));
        }
        let removed = self.orders.remove(index);
        debug!(index, item = %removed.item, "order removed");
        Ok(removed)
    }

    fn order_mut(&mut self, index: usize) -> Result<&mut Order, SplitError> {
        self.orders
            .get_mut(index)
            .ok_or_else(|| no_such_order(index))
    }
}

fn no_such_order(index: usize) -> SplitError {
    SplitError::NoSuchOrder { number: index + 1 }
}
