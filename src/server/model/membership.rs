//! Membership, membership offer and payment domain models.
//!
//! Amounts are kept in integer cents. A membership carries the outstanding balance the
//! client still owes; payments reduce it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    model::membership::{MembershipDto, PaymentDto},
    server::model::document::DocumentModel,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    #[default]
    Active,
    Suspended,
    Expired,
}

/// A client's subscription to the gym.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub offer_id: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub status: MembershipStatus,
    /// Amount still owed by the client.
    #[serde(default)]
    pub balance_cents: i64,
    /// Date by which the outstanding balance must be paid.
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    /// Payment ids applied to this membership, oldest first.
    #[serde(default)]
    pub payments: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Membership {
    /// Converts a request DTO to a membership owned by `client_id`.
    pub fn from_dto(client_id: impl Into<String>, dto: MembershipDto) -> Self {
        Self {
            client_id: client_id.into(),
            offer_id: dto.offer_id,
            start_date: dto.start_date,
            end_date: dto.end_date,
            status: MembershipStatus::Active,
            balance_cents: dto.balance_cents,
            due_date: dto.due_date,
            payments: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Whether the membership is active and `now` lies within its validity period.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.status == MembershipStatus::Active && self.start_date <= now && now <= self.end_date
    }

    /// Whether the client owes money past the due date.
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        self.balance_cents > 0 && self.due_date.is_some_and(|due| due < now)
    }

    /// Records a payment and lowers the outstanding balance, never below zero.
    pub fn apply_payment(&mut self, payment_id: impl Into<String>, amount_cents: i64) {
        self.balance_cents = (self.balance_cents - amount_cents).max(0);
        self.payments.push(payment_id.into());
    }
}

impl DocumentModel for Membership {
    const COLLECTION: &'static str = "memberships";

    fn validate(&self) -> Result<(), String> {
        if self.end_date < self.start_date {
            return Err("Membership end date is before its start date".to_string());
        }
        if self.balance_cents < 0 {
            return Err("Membership balance cannot be negative".to_string());
        }
        Ok(())
    }
}

/// A membership plan clients can subscribe to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipOffer {
    pub name: String,
    pub price_cents: i64,
    pub duration_days: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DocumentModel for MembershipOffer {
    const COLLECTION: &'static str = "membership_offers";

    fn validate(&self) -> Result<(), String> {
        if self.price_cents < 0 {
            return Err("Offer price cannot be negative".to_string());
        }
        Ok(())
    }
}

/// A payment made by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(default)]
    pub client_id: String,
    pub amount_cents: i64,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default = "Utc::now")]
    pub paid_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Payment {
    /// Converts a request DTO to a payment made by `client_id`.
    pub fn from_dto(client_id: impl Into<String>, dto: PaymentDto) -> Self {
        Self {
            client_id: client_id.into(),
            amount_cents: dto.amount_cents,
            method: dto.method,
            paid_at: dto.paid_at.unwrap_or_else(Utc::now),
            extra: Map::new(),
        }
    }
}

impl DocumentModel for Payment {
    const COLLECTION: &'static str = "payments";

    fn validate(&self) -> Result<(), String> {
        if self.amount_cents <= 0 {
            return Err("Payment amount must be positive".to_string());
        }
        Ok(())
    }
}
