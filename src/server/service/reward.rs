//! Attendance stars and rewards.
//!
//! Each attended session (an active reservation for a session that already ended) is worth
//! one star, granted once. Clients reaching `STAR_REWARD_THRESHOLD` stars get a reward
//! notification and the threshold is deducted from their counter.

use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    model::client::RewardSummaryDto,
    server::{
        error::AppError,
        model::{
            client::{Client, STAR_REWARD_THRESHOLD},
            query::Filter,
            reservation::Reservation,
            session::GymSession,
        },
        service::entity::EntityService,
    },
};

/// Clients touched by a reward run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewardSummary {
    pub client_ids: Vec<String>,
    pub reservations_rewarded: usize,
}

impl RewardSummary {
    pub fn into_dto(self) -> RewardSummaryDto {
        RewardSummaryDto {
            client_ids: self.client_ids,
            reservations_rewarded: self.reservations_rewarded,
        }
    }
}

pub struct RewardService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RewardService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Grants a star for every attended session that was not rewarded yet.
    ///
    /// Reservations whose session or client no longer exists are left untouched. The
    /// reservation is flagged before the star is written, so a reservation is never
    /// rewarded twice; a reservation changed concurrently (e.g. cancelled) is skipped and
    /// reconsidered on the next run.
    pub async fn give_client_reward(&self, now: DateTime<Utc>) -> Result<RewardSummary, AppError> {
        let reservations = EntityService::<Reservation>::new(self.db);
        let sessions = EntityService::<GymSession>::new(self.db);
        let clients = EntityService::<Client>::new(self.db);

        let pending = reservations
            .find(&Filter::new().eq("status", "active"))
            .await?;

        let mut summary = RewardSummary::default();
        for mut reservation in pending.into_iter().filter(|r| !r.value.rewarded) {
            let Some(session) = sessions.find_by_id(&reservation.value.session_id).await? else {
                tracing::warn!(
                    "Reservation {} points to missing session {}",
                    reservation.id,
                    reservation.value.session_id
                );
                continue;
            };
            let ends_at =
                session.value.date + Duration::minutes(session.value.duration_minutes as i64);
            if ends_at > now {
                continue;
            }

            let Some(mut client) = clients.find_by_id(&reservation.value.client_id).await? else {
                continue;
            };

            reservation.value.rewarded = true;
            let flagged = match reservations.save(&reservation).await {
                Ok(flagged) => flagged,
                Err(AppError::ConcurrentModification(msg)) => {
                    tracing::debug!("Skipping reward for reservation {}: {}", reservation.id, msg);
                    continue;
                }
                Err(err) => return Err(err),
            };

            client.value.stars += 1;
            if let Err(err) = clients.save(&client).await {
                let mut unflagged = flagged;
                unflagged.value.rewarded = false;
                if let Err(e) = reservations.save(&unflagged).await {
                    tracing::error!(
                        "Failed to clear reward flag of reservation {}: {}",
                        unflagged.id,
                        e
                    );
                }
                return Err(err);
            }

            summary.reservations_rewarded += 1;
            if !summary.client_ids.contains(&client.id) {
                summary.client_ids.push(client.id);
            }
        }

        tracing::info!(
            "Rewarded {} attended reservation(s) for {} client(s)",
            summary.reservations_rewarded,
            summary.client_ids.len()
        );

        Ok(summary)
    }

    /// Converts collected stars into rewards for every client at or above the threshold.
    pub async fn check_stars(&self) -> Result<RewardSummary, AppError> {
        let clients = EntityService::<Client>::new(self.db);

        let mut summary = RewardSummary::default();
        for mut client in clients.find(&Filter::new()).await? {
            if client.value.stars < STAR_REWARD_THRESHOLD {
                continue;
            }

            client.value.stars -= STAR_REWARD_THRESHOLD;
            client.value.notify(format!(
                "You collected {} stars and earned a reward!",
                STAR_REWARD_THRESHOLD
            ));
            let client = clients.save(&client).await?;

            summary.client_ids.push(client.id);
        }

        Ok(summary)
    }
}
