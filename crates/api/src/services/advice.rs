//! Spending advice sourced from a chat-completion upstream.

use spendlog_advisor::{AdviceClient, AdvisorError};
use spendlog_database::{Expense, ExpenseRepository, User};
use sqlx::SqlitePool;
use tracing::info;

use super::error::ServiceError;
use super::expense::ExpenseStore;
use super::mock_stores::MockExpenseStore;

/// System prompt sent with every advice request.
pub const ADVICE_PROMPT: &str = "Given the maximum of 20 expenses consists of name, description, and the amount, give me a financial advice based on that, in two sentence maximum.";

/// How many recent expenses feed one advice request.
const ADVICE_EXPENSE_LIMIT: i64 = 20;

/// Service for requesting spending advice
#[derive(Clone)]
pub struct AdviceService<E> {
    expenses: E,
    client: Option<AdviceClient>,
}

impl AdviceService<ExpenseRepository> {
    /// Create an advice service backed by the real database repository.
    /// Without a client every request reports the upstream as unconfigured.
    pub fn new(pool: SqlitePool, client: Option<AdviceClient>) -> Self {
        Self {
            expenses: ExpenseRepository::new(pool),
            client,
        }
    }
}

impl AdviceService<MockExpenseStore> {
    /// Create an advice service for testing
    pub fn new_for_testing(expenses: MockExpenseStore, client: Option<AdviceClient>) -> Self {
        Self { expenses, client }
    }
}

impl<E> AdviceService<E>
where
    E: ExpenseStore,
{
    /// Ask the upstream model for advice over the actor's most recent
    /// expenses.
    pub async fn advise(&self, actor: &User) -> Result<String, ServiceError> {
        let client = self
            .client
            .as_ref()
            .ok_or(ServiceError::Advice(AdvisorError::ApiKeyMissing))?;

        let expenses = self
            .expenses
            .list_for_user(actor.id, ADVICE_EXPENSE_LIMIT, 0)
            .await?;
        let summary = build_expense_summary(&expenses);

        info!(
            user_id = actor.id,
            expense_count = expenses.len(),
            model = client.model(),
            "requesting spending advice"
        );

        Ok(client.complete(ADVICE_PROMPT, &summary).await?)
    }
}

/// One line per expense under a fixed header.
fn build_expense_summary(expenses: &[Expense]) -> String {
    let mut message = String::from("My last expenses were:");
    for expense in expenses {
        message.push_str(&format!(
            "\n- name: {}, description: {}, amount: {}",
            expense.name, expense.description, expense.amount
        ));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::test_user;
    use spendlog_database::NewExpense;

    fn expense(name: &str, description: &str, amount: i64) -> Expense {
        let now = chrono::Utc::now().to_rfc3339();
        Expense {
            id: 1,
            user_id: 1,
            account_id: 1,
            category_id: None,
            name: name.to_string(),
            description: description.to_string(),
            amount,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    #[test]
    fn summary_of_no_expenses_is_just_the_header() {
        assert_eq!(build_expense_summary(&[]), "My last expenses were:");
    }

    #[test]
    fn summary_lists_one_expense_per_line() {
        let expenses = vec![
            expense("Coffee", "flat white", 500),
            expense("Rent", "", 120_000),
        ];

        let summary = build_expense_summary(&expenses);

        assert_eq!(
            summary,
            "My last expenses were:\n\
             - name: Coffee, description: flat white, amount: 500\n\
             - name: Rent, description: , amount: 120000"
        );
    }

    #[tokio::test]
    async fn advise_without_a_client_reports_unconfigured_upstream() {
        let store = MockExpenseStore::new();
        store
            .insert(NewExpense {
                user_id: 1,
                account_id: 1,
                category_id: None,
                name: "Coffee".to_string(),
                description: String::new(),
                amount: 500,
            })
            .await
            .unwrap();
        let service = AdviceService::new_for_testing(store, None);
        let alice = test_user(1);

        let result = service.advise(&alice).await;

        assert!(matches!(
            result,
            Err(ServiceError::Advice(AdvisorError::ApiKeyMissing))
        ));
    }
}
