//! Expense collection plus the transient filter and sort selections.

use std::cmp::Ordering;

use tally_domain::{
    BudgetBars, BudgetSummary, CategoryShare, CategoryTotal, Expense, ExpenseId, SortDirection,
    SortField, SortSpec,
};
use tracing::debug;

use crate::aggregate::Aggregator;
use crate::normalize::normalize;

/// Owns the session's expense list and derives the rows and aggregates to display.
///
/// Filter and sort only shape [`ViewState::visible_rows`]; they never reorder or
/// drop entries of the stored collection.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    expenses: Vec<Expense>,
    filter: Option<String>,
    sort: Option<SortSpec>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_expenses(expenses: Vec<Expense>) -> Self {
        Self {
            expenses,
            ..Self::default()
        }
    }

    /// Replaces the whole collection, e.g. after a fetch.
    pub fn set_expenses(&mut self, expenses: Vec<Expense>) {
        debug!(count = expenses.len(), "replacing expense collection");
        self.expenses = expenses;
    }

    /// Appends a record; it is always last in stored order.
    pub fn add_expense(&mut self, expense: Expense) {
        self.expenses.push(expense);
    }

    /// Removes the record with `id`, returning it. Absent ids are a no-op.
    pub fn remove_expense(&mut self, id: &ExpenseId) -> Option<Expense> {
        let position = self.expenses.iter().position(|expense| &expense.id == id)?;
        Some(self.expenses.remove(position))
    }

    /// Sets the category filter. The label is normalized first; a blank label or
    /// `None` clears the filter.
    pub fn set_filter(&mut self, label: Option<&str>) {
        self.filter = label.map(normalize).filter(|label| !label.is_empty());
    }

    pub fn clear_filter(&mut self) {
        self.filter = None;
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.sort = sort;
    }

    /// Column-header click: the field's first direction, then the opposite one,
    /// then cleared. Clicking a different column starts that column over.
    pub fn toggle_sort(&mut self, field: SortField) {
        let first = field.first_direction();
        self.sort = match self.sort {
            Some(spec) if spec.field == field && spec.direction == first => {
                Some(SortSpec::new(field, first.toggled()))
            }
            Some(spec) if spec.field == field => None,
            _ => Some(SortSpec::new(field, first)),
        };
    }

    /// Clears filter and sort, as when leaving the screen.
    pub fn reset_view(&mut self) {
        self.filter = None;
        self.sort = None;
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn get(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|expense| &expense.id == id)
    }

    /// Filtered then stably sorted rows. Insertion order when no sort is active.
    pub fn visible_rows(&self) -> Vec<&Expense> {
        let mut rows: Vec<&Expense> = match &self.filter {
            Some(label) => self
                .expenses
                .iter()
                .filter(|expense| &normalize(&expense.category) == label)
                .collect(),
            None => self.expenses.iter().collect(),
        };
        if let Some(spec) = self.sort {
            rows.sort_by(|a, b| compare(a, b, spec));
        }
        rows
    }

    pub fn by_category(&self) -> Vec<CategoryTotal> {
        Aggregator::by_category(&self.expenses)
    }

    pub fn category_shares(&self) -> Vec<CategoryShare> {
        Aggregator::category_shares(&self.expenses)
    }

    pub fn category_labels(&self) -> Vec<String> {
        Aggregator::category_labels(&self.expenses)
    }

    pub fn summary(&self, budget: f64) -> BudgetSummary {
        Aggregator::budget_summary(&self.expenses, budget)
    }

    pub fn bars(&self, budget: f64) -> BudgetBars {
        Aggregator::budget_bars(&self.expenses, budget)
    }
}

fn compare(a: &Expense, b: &Expense, spec: SortSpec) -> Ordering {
    let ordering = match spec.field {
        SortField::Name => a
            .name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name)),
        SortField::Category => normalize(&a.category).cmp(&normalize(&b.category)),
        SortField::Amount => a.amount.total_cmp(&b.amount),
    };
    match spec.direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(rows: &[&Expense]) -> Vec<String> {
        rows.iter().map(|expense| expense.id.to_string()).collect()
    }

    fn sample() -> ViewState {
        ViewState::with_expenses(vec![
            Expense::new(1, "Coffee", "food", 5.0),
            Expense::new(2, "Bus", "Food ", 3.0),
            Expense::new(3, "Bus", "Transport", 10.0),
        ])
    }

    #[test]
    fn no_filter_no_sort_keeps_insertion_order() {
        let view = sample();
        assert_eq!(ids(&view.visible_rows()), vec!["1", "2", "3"]);
    }

    #[test]
    fn filter_matches_normalized_category() {
        let mut view = sample();
        view.set_filter(Some(" food"));
        assert_eq!(view.filter(), Some("Food"));
        assert_eq!(ids(&view.visible_rows()), vec!["1", "2"]);
        assert_eq!(view.len(), 3);
    }

    #[test]
    fn blank_filter_clears() {
        let mut view = sample();
        view.set_filter(Some("Transport"));
        view.set_filter(Some("  "));
        assert!(view.filter().is_none());
        assert_eq!(view.visible_rows().len(), 3);
    }

    #[test]
    fn stable_sort_keeps_ties_in_input_order() {
        let mut view = sample();
        view.set_sort(Some(SortSpec::ascending(SortField::Name)));
        assert_eq!(ids(&view.visible_rows()), vec!["2", "3", "1"]);

        view.set_sort(Some(SortSpec::new(SortField::Name, SortDirection::Descending)));
        assert_eq!(ids(&view.visible_rows()), vec!["1", "2", "3"]);
    }

    #[test]
    fn amount_sort_descending() {
        let mut view = sample();
        view.set_sort(Some(SortSpec::new(SortField::Amount, SortDirection::Descending)));
        assert_eq!(ids(&view.visible_rows()), vec!["3", "1", "2"]);
    }

    #[test]
    fn toggle_sort_cycles_through_directions() {
        let mut view = sample();
        view.toggle_sort(SortField::Name);
        assert_eq!(view.sort(), Some(SortSpec::ascending(SortField::Name)));
        view.toggle_sort(SortField::Name);
        assert_eq!(
            view.sort(),
            Some(SortSpec::new(SortField::Name, SortDirection::Descending))
        );
        view.toggle_sort(SortField::Name);
        assert_eq!(view.sort(), None);

        view.toggle_sort(SortField::Name);
        view.toggle_sort(SortField::Category);
        assert_eq!(view.sort(), Some(SortSpec::ascending(SortField::Category)));
    }

    #[test]
    fn amount_header_starts_descending() {
        let mut view = sample();
        view.toggle_sort(SortField::Amount);
        assert_eq!(
            view.sort(),
            Some(SortSpec::new(SortField::Amount, SortDirection::Descending))
        );
        assert_eq!(ids(&view.visible_rows()), vec!["3", "1", "2"]);

        view.toggle_sort(SortField::Amount);
        assert_eq!(view.sort(), Some(SortSpec::ascending(SortField::Amount)));
        view.toggle_sort(SortField::Amount);
        assert_eq!(view.sort(), None);
    }

    #[test]
    fn reset_view_clears_selections_but_keeps_rows() {
        let mut view = sample();
        view.set_filter(Some("food"));
        view.set_sort(Some(SortSpec::ascending(SortField::Amount)));
        view.reset_view();
        assert!(view.filter().is_none());
        assert!(view.sort().is_none());
        assert_eq!(view.len(), 3);
    }
}
