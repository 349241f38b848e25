//! Derived totals over an expense collection.

use std::collections::HashMap;

use tally_domain::{BudgetBars, BudgetSummary, CategoryShare, CategoryTotal, Expense};

use crate::normalize::normalize;

/// Pure derivations over already-validated expense records.
pub struct Aggregator;

impl Aggregator {
    /// Groups by normalized category, summing amounts. Groups appear in the order
    /// their label is first seen in `expenses`.
    pub fn by_category<'a, I>(expenses: I) -> Vec<CategoryTotal>
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        let mut groups: Vec<CategoryTotal> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for expense in expenses {
            let label = normalize(&expense.category);
            match index.get(&label) {
                Some(&slot) => groups[slot].total += expense.amount,
                None => {
                    index.insert(label.clone(), groups.len());
                    groups.push(CategoryTotal {
                        label,
                        total: expense.amount,
                    });
                }
            }
        }
        groups
    }

    pub fn total_spent<'a, I>(expenses: I) -> f64
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        expenses.into_iter().map(|expense| expense.amount).sum()
    }

    /// Spent, remaining and budget. `remaining` is never clamped.
    pub fn budget_summary<'a, I>(expenses: I, budget: f64) -> BudgetSummary
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        let spent = Self::total_spent(expenses);
        BudgetSummary {
            spent,
            remaining: budget - spent,
            budget,
        }
    }

    /// Bar chart values: as [`Aggregator::budget_summary`] but with `remaining` floored
    /// at zero, since a bar cannot show a negative magnitude.
    pub fn budget_bars<'a, I>(expenses: I, budget: f64) -> BudgetBars
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        let summary = Self::budget_summary(expenses, budget);
        BudgetBars {
            spent: summary.spent,
            remaining: summary.remaining.max(0.0),
            budget: summary.budget,
        }
    }

    /// Category totals with each group's percentage of overall spending.
    pub fn category_shares<'a, I>(expenses: I) -> Vec<CategoryShare>
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        let totals = Self::by_category(expenses);
        let overall: f64 = totals.iter().map(|group| group.total).sum();
        totals
            .into_iter()
            .map(|group| {
                let percent = if overall > 0.0 {
                    group.total / overall * 100.0
                } else {
                    0.0
                };
                CategoryShare {
                    label: group.label,
                    total: group.total,
                    percent,
                }
            })
            .collect()
    }

    /// Distinct normalized labels in first-seen order.
    pub fn category_labels<'a, I>(expenses: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        Self::by_category(expenses)
            .into_iter()
            .map(|group| group.label)
            .collect()
    }
}
