use sea_orm::DatabaseConnection;
use serde_json::{Map, Value};

use crate::server::{
    error::AppError,
    model::{
        client::Client,
        document::Stored,
        query::Filter,
        reservation::{Reservation, ReservationStatus},
    },
    service::{entity::EntityService, membership::MembershipService},
};

/// Fields only the enrollment flow may write.
const PROTECTED_FIELDS: [&str; 4] = ["status", "sessionId", "clientId", "rewarded"];

pub struct ReservationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReservationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets every reservation of a client, oldest first.
    pub async fn get_by_client(&self, client_id: &str) -> Result<Vec<Stored<Reservation>>, AppError> {
        EntityService::<Reservation>::new(self.db)
            .find(&Filter::new().eq("clientId", client_id))
            .await
    }

    /// Books a place for a client in a session.
    ///
    /// Only checks the client's eligibility; capacity is the session service's concern.
    ///
    /// # Returns
    /// - `Ok(Stored<Reservation>)` - Active reservation created
    /// - `Err(AppError::ReservationIneligible)` - Client unknown, without active membership
    ///   or with overdue payments
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn reserve(
        &self,
        session_id: &str,
        client_id: &str,
    ) -> Result<Stored<Reservation>, AppError> {
        let client = EntityService::<Client>::new(self.db)
            .find_by_id(client_id)
            .await?;
        if client.is_none() {
            return Err(AppError::ReservationIneligible {
                client_id: client_id.to_string(),
                reason: "client does not exist".to_string(),
            });
        }

        if let Some(reason) = MembershipService::new(self.db)
            .ineligibility(client_id)
            .await?
        {
            return Err(AppError::ReservationIneligible {
                client_id: client_id.to_string(),
                reason,
            });
        }

        EntityService::<Reservation>::new(self.db)
            .create(Reservation::active(client_id, session_id))
            .await
    }

    /// Marks a reservation as cancelled.
    ///
    /// # Returns
    /// - `Ok(Stored<Reservation>)` - Reservation now cancelled
    /// - `Err(AppError::NotFound)` - No reservation with this id
    /// - `Err(AppError::BadRequest)` - Reservation was already cancelled
    pub async fn mark_cancelled(&self, reservation_id: &str) -> Result<Stored<Reservation>, AppError> {
        let reservations = EntityService::<Reservation>::new(self.db);

        let mut reservation = reservations.get_by_id(reservation_id).await?;
        if !reservation.value.is_active() {
            return Err(AppError::BadRequest(format!(
                "Reservation {} is already cancelled",
                reservation_id
            )));
        }

        reservation.value.status = ReservationStatus::Cancelled;

        reservations.save(&reservation).await
    }

    /// Applies a merge patch to a reservation's descriptive fields.
    ///
    /// Booking state is owned by the session service: `status` changes go through
    /// enrollment and cancellation, and `sessionId`, `clientId` and `rewarded` never change.
    ///
    /// # Returns
    /// - `Ok(Stored<Reservation>)` - Updated reservation
    /// - `Err(AppError::BadRequest)` - Patch touches a protected field
    /// - `Err(AppError::NotFound)` - No reservation with this id
    pub async fn update(
        &self,
        reservation_id: &str,
        patch: Map<String, Value>,
    ) -> Result<Stored<Reservation>, AppError> {
        if let Some(field) = PROTECTED_FIELDS.iter().find(|f| patch.contains_key(**f)) {
            return Err(AppError::BadRequest(format!(
                "Reservation field '{}' cannot be updated directly",
                field
            )));
        }

        EntityService::<Reservation>::new(self.db)
            .modify(reservation_id, patch)
            .await
    }

    /// Reactivates a reservation cancelled by an operation that failed afterwards.
    pub async fn restore_active(&self, reservation_id: &str) -> Result<Stored<Reservation>, AppError> {
        let reservations = EntityService::<Reservation>::new(self.db);

        let mut reservation = reservations.get_by_id(reservation_id).await?;
        reservation.value.status = ReservationStatus::Active;

        reservations.save(&reservation).await
    }
}
