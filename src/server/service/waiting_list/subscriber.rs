use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::server::{
    error::AppError,
    service::{
        reservation::ReservationService,
        waiting_list::{FreedSlot, Promotion},
    },
};

/// Receives freed places on behalf of waiting clients.
#[async_trait]
pub trait WaitingListSubscriber: Send + Sync {
    /// Tries to give `client_id` a place in the session of `slot`.
    ///
    /// # Returns
    /// - `Ok(Promotion)` - Client now holds a reservation
    /// - `Err(AppError::ReservationIneligible)` - Client cannot take the place; the
    ///   publisher moves on to the next client
    /// - `Err(_)` - Any other failure ends the notification round
    async fn update(&self, client_id: &str, slot: &FreedSlot) -> Result<Promotion, AppError>;
}

/// Books promoted clients through the reservation service.
pub struct ReservationSubscriber<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReservationSubscriber<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WaitingListSubscriber for ReservationSubscriber<'_> {
    async fn update(&self, client_id: &str, slot: &FreedSlot) -> Result<Promotion, AppError> {
        let service = ReservationService::new(self.db);

        let reservation = service.reserve(&slot.session_id, client_id).await?;

        tracing::info!(
            "Promoted client {} from the waiting list of session {}",
            client_id,
            slot.session_id
        );

        Ok(Promotion {
            client_id: client_id.to_string(),
            reservation_id: reservation.id,
        })
    }
}
