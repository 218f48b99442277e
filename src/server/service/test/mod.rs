use crate::server::{
    error::AppError,
    model::{
        document::Stored,
        query::Filter,
        reservation::{Reservation, ReservationStatus},
    },
    service::entity::EntityService,
};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr};
use serde_json::json;
use test_utils::{builder::TestBuilder, factory};

mod calendar;
mod entity;
mod membership;

/// Creates `count` clients that each hold an active, paid membership.
async fn eligible_clients(db: &DatabaseConnection, count: usize) -> Result<Vec<String>, DbErr> {
    let mut ids = Vec::with_capacity(count);
    for _ in 0..count {
        let (client, _) = factory::create_eligible_client(db).await?;
        ids.push(client.id);
    }
    Ok(ids)
}

/// Makes every later update of a collection's documents fail with a database error.
async fn reject_updates(db: &DatabaseConnection, collection: &str) -> Result<(), DbErr> {
    db.execute_unprepared(&format!(
        "CREATE TRIGGER reject_{0}_updates BEFORE UPDATE ON document \
         WHEN OLD.collection = '{0}' \
         BEGIN SELECT RAISE(ABORT, '{0} are read-only'); END",
        collection
    ))
    .await?;

    Ok(())
}

/// Statuses of a client's reservations in a session, oldest first.
async fn reservation_statuses(
    db: &DatabaseConnection,
    session_id: &str,
    client_id: &str,
) -> Result<Vec<ReservationStatus>, AppError> {
    let reservations = EntityService::<Reservation>::new(db)
        .find(
            &Filter::new()
                .eq("sessionId", session_id)
                .eq("clientId", client_id),
        )
        .await?;

    Ok(reservations.into_iter().map(|r| r.value.status).collect())
}
