//! Budget figure and the values derived from it.

use serde::{Deserialize, Serialize};

/// Wire shape of the budget resource: a single non-negative figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Budget {
    pub budget: f64,
}

impl Budget {
    pub fn new(budget: f64) -> Self {
        Self { budget }
    }
}

/// Spent/remaining/budget triple. `remaining` may be negative on overspend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub spent: f64,
    pub remaining: f64,
    pub budget: f64,
}

impl BudgetSummary {
    pub fn is_overspent(&self) -> bool {
        self.remaining < 0.0
    }
}

/// Chart-ready variant of [`BudgetSummary`] where `remaining` is floored at zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetBars {
    pub spent: f64,
    pub remaining: f64,
    pub budget: f64,
}

/// Summed amount for one normalized category label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub label: String,
    pub total: f64,
}

/// A category total together with its share of overall spending, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub label: String,
    pub total: f64,
    pub percent: f64,
}
