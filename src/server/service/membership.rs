//! Memberships, payments and reservation eligibility.
//!
//! A client may reserve when at least one of their memberships is active today and none
//! of them has an outstanding balance past its due date.

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::{
    model::membership::{MembershipDto, PaymentDto},
    server::{
        error::AppError,
        model::{
            client::Client,
            document::{DocumentModel, Stored},
            membership::{Membership, Payment},
            query::Filter,
        },
        service::entity::EntityService,
    },
};

pub struct MembershipService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MembershipService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a membership for a client together with its first payment.
    ///
    /// The payment is recorded, deducted from the membership balance, and the membership
    /// becomes the client's current one.
    ///
    /// # Returns
    /// - `Ok(Stored<Membership>)` - Created membership
    /// - `Err(AppError::NotFound)` - Client does not exist
    /// - `Err(AppError::BadRequest)` - Invalid membership dates, balance or payment amount
    pub async fn create_membership(
        &self,
        client_id: &str,
        membership: MembershipDto,
        payment: PaymentDto,
    ) -> Result<Stored<Membership>, AppError> {
        let clients = EntityService::<Client>::new(self.db);
        let mut client = clients.get_by_id(client_id).await?;

        let mut membership = Membership::from_dto(client_id, membership);
        let payment = Payment::from_dto(client_id, payment);
        membership.validate().map_err(AppError::BadRequest)?;
        payment.validate().map_err(AppError::BadRequest)?;

        let payment = EntityService::<Payment>::new(self.db).create(payment).await?;
        membership.apply_payment(&payment.id, payment.value.amount_cents);

        let membership = EntityService::<Membership>::new(self.db)
            .create(membership)
            .await?;

        client.value.membership_id = Some(membership.id.clone());
        clients.save(&client).await?;

        tracing::info!(
            "Created membership {} for client {}",
            membership.id,
            client_id
        );

        Ok(membership)
    }

    /// Gets every membership of a client, oldest first.
    pub async fn memberships_for(&self, client_id: &str) -> Result<Vec<Stored<Membership>>, AppError> {
        EntityService::<Membership>::new(self.db)
            .find(&Filter::new().eq("clientId", client_id))
            .await
    }

    pub async fn has_active_membership(&self, client_id: &str) -> Result<bool, AppError> {
        self.require_client(client_id).await?;

        let now = Utc::now();
        let memberships = self.memberships_for(client_id).await?;

        Ok(memberships.iter().any(|m| m.value.is_active_at(now)))
    }

    /// Whether the client owes money past a due date on any membership.
    pub async fn is_defaulter(&self, client_id: &str) -> Result<bool, AppError> {
        self.require_client(client_id).await?;

        let now = Utc::now();
        let memberships = self.memberships_for(client_id).await?;

        Ok(memberships.iter().any(|m| m.value.is_overdue_at(now)))
    }

    pub async fn its_allowed_to_reserve(&self, client_id: &str) -> Result<bool, AppError> {
        self.require_client(client_id).await?;

        Ok(self.ineligibility(client_id).await?.is_none())
    }

    /// Explains why a client may not reserve.
    ///
    /// # Returns
    /// - `Ok(None)` - Client may reserve
    /// - `Ok(Some(reason))` - Client has no active membership or is a defaulter
    pub async fn ineligibility(&self, client_id: &str) -> Result<Option<String>, AppError> {
        let now = Utc::now();
        let memberships = self.memberships_for(client_id).await?;

        if memberships.iter().any(|m| m.value.is_overdue_at(now)) {
            return Ok(Some("membership payment is overdue".to_string()));
        }
        if !memberships.iter().any(|m| m.value.is_active_at(now)) {
            return Ok(Some("no active membership".to_string()));
        }

        Ok(None)
    }

    /// Records a payment against the client's current membership.
    ///
    /// The current membership is the one referenced by the client, or else the most recent
    /// membership of the client.
    ///
    /// # Returns
    /// - `Ok(Stored<Membership>)` - Membership with the reduced balance
    /// - `Err(AppError::NotFound)` - Client unknown or without membership
    /// - `Err(AppError::BadRequest)` - Non-positive payment amount
    pub async fn apply_charge(
        &self,
        client_id: &str,
        payment: PaymentDto,
    ) -> Result<Stored<Membership>, AppError> {
        let client = EntityService::<Client>::new(self.db)
            .get_by_id(client_id)
            .await?;

        let payment = Payment::from_dto(client_id, payment);
        payment.validate().map_err(AppError::BadRequest)?;

        let memberships = EntityService::<Membership>::new(self.db);
        let current = match client.value.membership_id.as_deref() {
            Some(id) => memberships.find_by_id(id).await?,
            None => None,
        };
        let mut membership = match current {
            Some(membership) => membership,
            None => self
                .memberships_for(client_id)
                .await?
                .pop()
                .ok_or_else(|| {
                    AppError::NotFound(format!("Client {} has no membership", client_id))
                })?,
        };

        let payment = EntityService::<Payment>::new(self.db).create(payment).await?;
        membership
            .value
            .apply_payment(&payment.id, payment.value.amount_cents);

        memberships.save(&membership).await
    }

    async fn require_client(&self, client_id: &str) -> Result<(), AppError> {
        EntityService::<Client>::new(self.db)
            .get_by_id(client_id)
            .await
            .map(|_| ())
    }
}
