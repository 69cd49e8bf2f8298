use serde::Serialize;
use shared::{domain::SplitMode, error::UserError};
use splitter::SplitBreakdown;

use crate::session::BillSession;

fn money(amount: f64) -> String {
    format!("${amount:.2}")
}

pub fn render_summary(session: &BillSession) -> String {
    let inputs = session.inputs();
    let summary = session.live_summary();
    let mut out = format!(
        "Tip: {}%  Tax: {}  Friends: {}  Mode: {}\n",
        inputs.tip.0,
        money(inputs.tax.0),
        inputs.friends.get(),
        inputs.mode
    );
    out.push_str(&format!("Subtotal: {}\n", money(summary.subtotal)));
    out.push_str(&format!(
        "Total with Tax and Tip: {}\n",
        money(summary.total)
    ));
    if inputs.mode == SplitMode::Even {
        out.push_str(&format!(
            "Tax and Tip per Friend: {}\n",
            money(summary.tax_and_tip_per_friend)
        ));
    }
    out
}

pub fn render_orders(session: &BillSession) -> String {
    let orders = session.ledger().orders();
    if orders.is_empty() {
        return "No orders added yet.\n".to_string();
    }
    let friends = session.inputs().friends;
    let mut out = String::new();
    for (index, order) in orders.iter().enumerate() {
        out.push_str(&format!(
            "Item {}: {}  Cost: {}  Assigned to Friend {}",
            index + 1,
            order.item,
            money(order.cost),
            order.person.display_number()
        ));
        if !friends.contains(order.person) {
            out.push_str(" (not at table)");
        }
        out.push('\n');
    }
    out
}

/// Per-friend amounts, meal suggestion and any error, as shown after submit.
pub fn render_results(session: &BillSession) -> String {
    let mut out = String::new();
    if let Some(breakdown) = session.breakdown() {
        out.push_str("Amount Each Friend Should Pay:\n");
        for (index, amount) in breakdown.per_person.iter().enumerate() {
            out.push_str(&format!("  Friend {}: {}\n", index + 1, money(*amount)));
        }
        if breakdown.unassigned > 0.0 {
            out.push_str(&format!(
                "  Unassigned orders: {}\n",
                money(breakdown.unassigned_total())
            ));
        }
    }
    if let Some(image) = session.suggested_meal() {
        out.push_str(&format!("Meal Suggestion for Your Next Meal: {image}\n"));
    }
    if let Some(error) = session.error() {
        out.push_str(&format!("Error: {}\n", error.message));
    }
    out
}

pub fn render_bill(session: &BillSession) -> String {
    let mut out = render_summary(session);
    out.push_str(&render_orders(session));
    out.push_str(&render_results(session));
    out
}

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub breakdown: Option<&'a SplitBreakdown>,
    pub suggested_meal: Option<&'a str>,
    pub error: Option<&'a UserError>,
}

impl<'a> JsonReport<'a> {
    pub fn from_session(session: &'a BillSession) -> Self {
        Self {
            breakdown: session.breakdown(),
            suggested_meal: session.suggested_meal(),
            error: session.error(),
        }
    }
}
