//! Membership factory for creating test membership documents.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{DatabaseConnection, DbErr};
use serde_json::json;

use crate::factory::helpers::insert_document;

/// Factory for creating test memberships.
///
/// Defaults to an active membership that started a week ago, ends in 30 days and has
/// nothing left to pay.
pub struct MembershipFactory<'a> {
    db: &'a DatabaseConnection,
    client_id: String,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    status: &'static str,
    balance_cents: i64,
    due_date: Option<DateTime<Utc>>,
}

impl<'a> MembershipFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, client_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            db,
            client_id: client_id.into(),
            start_date: now - Duration::days(7),
            end_date: now + Duration::days(30),
            status: "active",
            balance_cents: 0,
            due_date: None,
        }
    }

    /// Makes the membership lapse yesterday.
    pub fn expired(mut self) -> Self {
        let now = Utc::now();
        self.start_date = now - Duration::days(60);
        self.end_date = now - Duration::days(1);
        self
    }

    pub fn status(mut self, status: &'static str) -> Self {
        self.status = status;
        self
    }

    /// Leaves an unpaid balance whose due date passed `days_overdue` days ago.
    pub fn overdue(mut self, balance_cents: i64, days_overdue: i64) -> Self {
        self.balance_cents = balance_cents;
        self.due_date = Some(Utc::now() - Duration::days(days_overdue));
        self
    }

    /// Leaves an unpaid balance due in the future.
    pub fn balance_due(mut self, balance_cents: i64, due_in_days: i64) -> Self {
        self.balance_cents = balance_cents;
        self.due_date = Some(Utc::now() + Duration::days(due_in_days));
        self
    }

    /// Builds and inserts the membership document.
    pub async fn build(self) -> Result<entity::document::Model, DbErr> {
        insert_document(
            self.db,
            "memberships",
            json!({
                "clientId": self.client_id,
                "startDate": self.start_date,
                "endDate": self.end_date,
                "status": self.status,
                "balanceCents": self.balance_cents,
                "dueDate": self.due_date,
                "payments": [],
            }),
        )
        .await
    }
}

/// Creates an active, fully paid membership for a client.
pub async fn create_membership(
    db: &DatabaseConnection,
    client_id: &str,
) -> Result<entity::document::Model, DbErr> {
    MembershipFactory::new(db, client_id).build().await
}
