//! Budget and expense state reconciled against the budget service.

use tally_domain::{Budget, BudgetBars, BudgetSummary, CategoryShare, CategoryTotal, Expense, ExpenseId};
use tracing::{info, warn};

use crate::controller::ViewState;
use crate::error::{CoreResult, GatewayError};
use crate::gateway::BudgetGateway;
use crate::validation;

/// Local copy of the user's budget and expenses.
///
/// Mutations wait for the service to confirm before touching local state, so a
/// failed call leaves everything as it was.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    view: ViewState,
    budget: f64,
    loaded: bool,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches budget and expenses and replaces local state with them.
    pub fn load<G: BudgetGateway>(&mut self, gateway: &G) -> CoreResult<()> {
        let budget = accept_budget(gateway.fetch_budget()?)?;
        let fetched = gateway.list_expenses()?;
        let total = fetched.len();
        let expenses: Vec<Expense> = fetched.into_iter().filter(accept_expense).collect();
        if expenses.len() != total {
            warn!(
                dropped = total - expenses.len(),
                "ignored expense records with invalid amounts"
            );
        }
        info!(budget, expenses = expenses.len(), "dashboard loaded");
        self.budget = budget;
        self.view.set_expenses(expenses);
        self.loaded = true;
        Ok(())
    }

    /// Validates and saves a new budget; stores the value the service echoes back.
    pub fn set_budget<G: BudgetGateway>(&mut self, gateway: &G, raw: &str) -> CoreResult<f64> {
        let requested = validation::parse_budget(raw)?;
        let saved = accept_budget(gateway.save_budget(Budget::new(requested))?)?;
        info!(budget = saved, "budget updated");
        self.budget = saved;
        Ok(saved)
    }

    /// Creates an expense and appends the service's record, with its assigned id.
    pub fn add_expense<G: BudgetGateway>(
        &mut self,
        gateway: &G,
        name: &str,
        amount: &str,
        category: &str,
    ) -> CoreResult<Expense> {
        let draft = validation::validate_new_expense(name, amount, category)?;
        let created = gateway.create_expense(&draft)?;
        if !accept_expense(&created) {
            return Err(GatewayError::Parse(format!(
                "server returned invalid amount {} for expense {}",
                created.amount, created.id
            ))
            .into());
        }
        info!(id = %created.id, amount = created.amount, "expense added");
        self.view.add_expense(created.clone());
        Ok(created)
    }

    /// Deletes on the service, then locally. Unknown ids are removed as a no-op.
    pub fn delete_expense<G: BudgetGateway>(
        &mut self,
        gateway: &G,
        id: &ExpenseId,
    ) -> CoreResult<Option<Expense>> {
        gateway.delete_expense(id)?;
        let removed = self.view.remove_expense(id);
        info!(id = %id, found = removed.is_some(), "expense deleted");
        Ok(removed)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    pub fn visible_rows(&self) -> Vec<&Expense> {
        self.view.visible_rows()
    }

    pub fn summary(&self) -> BudgetSummary {
        self.view.summary(self.budget)
    }

    pub fn bars(&self) -> BudgetBars {
        self.view.bars(self.budget)
    }

    pub fn by_category(&self) -> Vec<CategoryTotal> {
        self.view.by_category()
    }

    pub fn shares(&self) -> Vec<CategoryShare> {
        self.view.category_shares()
    }

    /// Drops everything, e.g. on sign-out.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn accept_expense(expense: &Expense) -> bool {
    expense.amount.is_finite() && expense.amount >= 0.0
}

fn accept_budget(budget: Budget) -> Result<f64, GatewayError> {
    if budget.budget.is_finite() {
        Ok(budget.budget)
    } else {
        Err(GatewayError::Parse(format!(
            "server returned invalid budget {}",
            budget.budget
        )))
    }
}
