//! Session enrollment, waiting lists and calendar placement.
//!
//! Every operation that changes who is enrolled in or waiting for a session holds the
//! session's lock from `SessionLocks` for its whole read-modify-write cycle, and writes the
//! session back with a version check. When places free up the waiting list is notified
//! before the session is written, so the stored session never shows a free place while
//! an eligible client is waiting.
//!
//! Reservations are separate documents. If the session write fails after reservations
//! were created for promoted clients, those reservations are cancelled again before the
//! error is returned.

use sea_orm::DatabaseConnection;
use serde_json::{Map, Value};

use crate::{
    model::session::{CancellationDto, EnrollmentDto, PromotionDto},
    server::{
        error::AppError,
        model::{
            calendar::{Calendar, CalendarStatus},
            catalog::{Instructor, Room, Service},
            client::Client,
            document::{merge_patch, DocumentModel, Stored},
            query::{Filter, Projection},
            reservation::Reservation,
            session::GymSession,
        },
        service::{
            entity::EntityService,
            reservation::ReservationService,
            waiting_list::{
                FreedSlot, NotifyAborted, NotifyReport, ReservationSubscriber, SessionLocks,
                WaitingListPublisher,
            },
        },
    },
};

/// Session fields only changed through enrollment, cancellation and the waiting list.
const BOOKING_FIELDS: [&str; 2] = ["enrolled", "waitingList"];

/// Result of an enrollment request.
#[derive(Debug, Clone, PartialEq)]
pub enum EnrollmentOutcome {
    /// The client got a place.
    Enrolled(Stored<Reservation>),
    /// The session is full; the client waits at `position` (0 based).
    Waiting { position: usize },
}

impl EnrollmentOutcome {
    pub fn into_dto(self) -> Result<EnrollmentDto, serde_json::Error> {
        Ok(match self {
            Self::Enrolled(reservation) => EnrollmentDto::Enrolled {
                reservation: serde_json::to_value(reservation)?,
            },
            Self::Waiting { position } => EnrollmentDto::Waiting { position },
        })
    }
}

/// A cancelled reservation and the waiting-list round it triggered.
#[derive(Debug, Clone, PartialEq)]
pub struct Cancellation {
    pub reservation: Stored<Reservation>,
    pub report: NotifyReport,
}

impl Cancellation {
    pub fn into_dto(self) -> Result<CancellationDto, serde_json::Error> {
        Ok(CancellationDto {
            reservation: serde_json::to_value(self.reservation)?,
            promoted: self
                .report
                .promoted
                .into_iter()
                .map(|p| PromotionDto {
                    client_id: p.client_id,
                    reservation_id: p.reservation_id,
                })
                .collect(),
            skipped: self.report.skipped,
        })
    }
}

pub struct SessionService<'a> {
    db: &'a DatabaseConnection,
    locks: &'a SessionLocks,
}

impl<'a> SessionService<'a> {
    pub fn new(db: &'a DatabaseConnection, locks: &'a SessionLocks) -> Self {
        Self { db, locks }
    }

    /// Creates a session from a request body.
    ///
    /// New sessions start with nobody enrolled or waiting.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - Body is not a valid session, breaks capacity rules or
    ///   lists enrolled or waiting clients
    pub async fn create(&self, body: Value) -> Result<Stored<GymSession>, AppError> {
        if let Value::Object(map) = &body {
            let booked = BOOKING_FIELDS.iter().find(|f| {
                map.get(**f)
                    .is_some_and(|v| v.as_array().is_none_or(|items| !items.is_empty()))
            });
            if let Some(field) = booked {
                return Err(AppError::BadRequest(format!(
                    "New sessions cannot list '{}'; use enroll or enqueueWaitingList",
                    field
                )));
            }
        }

        EntityService::<GymSession>::new(self.db)
            .create_from_json(body)
            .await
    }

    /// Applies a merge patch to a session.
    ///
    /// Raising the capacity frees places, which are offered to the waiting list before the
    /// session is written.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - Patch touches `enrolled` or `waitingList`, or produces
    ///   an invalid session
    pub async fn update(
        &self,
        session_id: &str,
        patch: Map<String, Value>,
    ) -> Result<Stored<GymSession>, AppError> {
        if let Some(field) = BOOKING_FIELDS.iter().find(|f| patch.contains_key(**f)) {
            return Err(AppError::BadRequest(format!(
                "Session field '{}' cannot be updated directly",
                field
            )));
        }

        let _guard = self.locks.acquire(session_id).await;

        let session = EntityService::<GymSession>::new(self.db)
            .get_by_id(session_id)
            .await?;

        let mut body = session.value.to_body()?;
        merge_patch(&mut body, patch);
        let value = serde_json::from_value::<GymSession>(Value::Object(body))
            .map_err(|e| AppError::BadRequest(format!("Invalid sessions document: {}", e)))?;

        let (session, _) = self
            .save_with_promotion(Stored {
                id: session.id,
                version: session.version,
                value,
            })
            .await?;

        Ok(session)
    }

    /// Deletes a session and cancels its active reservations.
    pub async fn delete(&self, session_id: &str) -> Result<(), AppError> {
        let _guard = self.locks.acquire(session_id).await;

        EntityService::<GymSession>::new(self.db)
            .delete(session_id)
            .await?;

        let reservations = EntityService::<Reservation>::new(self.db)
            .find(
                &Filter::new()
                    .eq("sessionId", session_id)
                    .eq("status", "active"),
            )
            .await?;
        let service = ReservationService::new(self.db);
        for reservation in reservations {
            service.mark_cancelled(&reservation.id).await?;
        }

        Ok(())
    }

    /// Enrolls a client, or puts them on the waiting list when the session is full.
    ///
    /// A client already on the waiting list keeps their position.
    ///
    /// # Returns
    /// - `Ok(EnrollmentOutcome::Enrolled)` - Place taken, reservation created
    /// - `Ok(EnrollmentOutcome::Waiting)` - Session full, client waiting
    /// - `Err(AppError::NotFound)` - Session or client does not exist
    /// - `Err(AppError::BadRequest)` - Client already enrolled
    /// - `Err(AppError::ReservationIneligible)` - Place available but client may not reserve
    /// - `Err(AppError::ConcurrentModification)` - Session changed during the operation
    pub async fn enroll(
        &self,
        session_id: &str,
        client_id: &str,
    ) -> Result<EnrollmentOutcome, AppError> {
        let _guard = self.locks.acquire(session_id).await;

        let sessions = EntityService::<GymSession>::new(self.db);
        let mut session = sessions.get_by_id(session_id).await?;
        EntityService::<Client>::new(self.db)
            .get_by_id(client_id)
            .await?;

        if session.value.is_enrolled(client_id) {
            return Err(AppError::BadRequest(format!(
                "Client {} is already enrolled in session {}",
                client_id, session_id
            )));
        }

        let mut waiting = WaitingListPublisher::new(std::mem::take(&mut session.value.waiting_list));
        if let Some(position) = waiting.position(client_id) {
            return Ok(EnrollmentOutcome::Waiting { position });
        }

        if session.value.free_slots() > 0 {
            let reservation = ReservationService::new(self.db)
                .reserve(session_id, client_id)
                .await?;

            session.value.waiting_list = waiting.into_subscribers();
            session.value.enrolled.push(client_id.to_string());
            if let Err(err) = sessions.save(&session).await {
                self.compensate(&[reservation.id]).await;
                return Err(err);
            }

            tracing::info!("Enrolled client {} in session {}", client_id, session_id);

            return Ok(EnrollmentOutcome::Enrolled(reservation));
        }

        waiting.subscribe(client_id);
        let position = waiting.subscribers().len() - 1;
        session.value.waiting_list = waiting.into_subscribers();
        sessions.save(&session).await?;

        tracing::info!(
            "Session {} is full, client {} waits at position {}",
            session_id,
            client_id,
            position
        );

        Ok(EnrollmentOutcome::Waiting { position })
    }

    /// Adds a client to the end of a session's waiting list.
    ///
    /// Enqueueing a client who is already waiting changes nothing. If the session has
    /// free places the waiting list is notified right away.
    ///
    /// # Returns
    /// - `Ok(Stored<GymSession>)` - Session after the change
    /// - `Err(AppError::NotFound)` - Session or client does not exist
    /// - `Err(AppError::BadRequest)` - Client already enrolled
    pub async fn enqueue_waiting_list(
        &self,
        session_id: &str,
        client_id: &str,
    ) -> Result<Stored<GymSession>, AppError> {
        let _guard = self.locks.acquire(session_id).await;

        let mut session = EntityService::<GymSession>::new(self.db)
            .get_by_id(session_id)
            .await?;
        EntityService::<Client>::new(self.db)
            .get_by_id(client_id)
            .await?;

        if session.value.is_enrolled(client_id) {
            return Err(AppError::BadRequest(format!(
                "Client {} is already enrolled in session {}",
                client_id, session_id
            )));
        }

        let mut waiting = WaitingListPublisher::new(std::mem::take(&mut session.value.waiting_list));
        let added = waiting.subscribe(client_id);
        session.value.waiting_list = waiting.into_subscribers();
        if !added {
            return Ok(session);
        }

        let (session, _) = self.save_with_promotion(session).await?;

        Ok(session)
    }

    /// Removes a client from a session's waiting list. Does nothing if the client is not
    /// waiting.
    pub async fn withdraw_waiting_list(
        &self,
        session_id: &str,
        client_id: &str,
    ) -> Result<Stored<GymSession>, AppError> {
        let _guard = self.locks.acquire(session_id).await;

        let sessions = EntityService::<GymSession>::new(self.db);
        let mut session = sessions.get_by_id(session_id).await?;

        let mut waiting = WaitingListPublisher::new(std::mem::take(&mut session.value.waiting_list));
        let removed = waiting.unsubscribe(client_id);
        session.value.waiting_list = waiting.into_subscribers();
        if !removed {
            return Ok(session);
        }

        sessions.save(&session).await
    }

    /// Cancels a reservation and hands the freed place to the waiting list.
    ///
    /// The reservation is cancelled before the session is written. If the session write or
    /// the promotion round fails, the reservation is made active again.
    ///
    /// # Returns
    /// - `Ok(Cancellation)` - Cancelled reservation and promoted/skipped clients
    /// - `Err(AppError::NotFound)` - Reservation does not exist
    /// - `Err(AppError::BadRequest)` - Reservation already cancelled
    /// - `Err(AppError::ConcurrentModification)` - Reservation or session changed during the
    ///   operation; nothing was cancelled
    pub async fn cancel_reservation(&self, reservation_id: &str) -> Result<Cancellation, AppError> {
        let reservations = EntityService::<Reservation>::new(self.db);
        let session_id = reservations
            .get_by_id(reservation_id)
            .await?
            .value
            .session_id;

        let _guard = self.locks.acquire(&session_id).await;

        let service = ReservationService::new(self.db);
        let reservation = service.mark_cancelled(reservation_id).await?;

        let report = match self
            .release_place(&session_id, &reservation.value.client_id)
            .await
        {
            Ok(report) => report,
            Err(err) => {
                if let Err(e) = service.restore_active(reservation_id).await {
                    tracing::error!(
                        "Failed to restore reservation {}: {}",
                        reservation_id,
                        e
                    );
                }
                return Err(err);
            }
        };

        tracing::info!(
            "Cancelled reservation {} of client {}, promoted {} waiting client(s)",
            reservation.id,
            reservation.value.client_id,
            report.promoted.len()
        );

        Ok(Cancellation {
            reservation,
            report,
        })
    }

    /// Removes a client from a session's enrolled set and promotes waiting clients.
    ///
    /// Must be called with the session's lock held. A deleted session has no place to hand
    /// out.
    async fn release_place(
        &self,
        session_id: &str,
        client_id: &str,
    ) -> Result<NotifyReport, AppError> {
        let Some(mut session) = EntityService::<GymSession>::new(self.db)
            .find_by_id(session_id)
            .await?
        else {
            return Ok(NotifyReport::default());
        };

        session.value.remove_enrolled(client_id);
        let (_, report) = self.save_with_promotion(session).await?;

        Ok(report)
    }

    /// Places a session in a room's calendar.
    ///
    /// The room's calendar is created as a draft when it does not exist yet. A session that
    /// was listed in another room's calendar is moved.
    ///
    /// # Returns
    /// - `Ok(Stored<Calendar>)` - Calendar now listing the session
    /// - `Err(AppError::NotFound)` - Session or room does not exist
    pub async fn add_session_to_calendar(
        &self,
        session_id: &str,
        room_id: &str,
    ) -> Result<Stored<Calendar>, AppError> {
        let _guard = self.locks.acquire(session_id).await;

        let sessions = EntityService::<GymSession>::new(self.db);
        let calendars = EntityService::<Calendar>::new(self.db);
        let mut session = sessions.get_by_id(session_id).await?;
        EntityService::<Room>::new(self.db).get_by_id(room_id).await?;

        if let Some(previous) = session.value.room_id.as_deref().filter(|r| *r != room_id) {
            let previous_calendars = calendars.find(&Filter::new().eq("roomId", previous)).await?;
            for mut calendar in previous_calendars {
                let before = calendar.value.sessions.len();
                calendar.value.sessions.retain(|s| s != session_id);
                if calendar.value.sessions.len() != before {
                    calendars.save(&calendar).await?;
                }
            }
        }

        let existing = calendars
            .find(&Filter::new().eq("roomId", room_id))
            .await?
            .into_iter()
            .next();
        let mut calendar = match existing {
            Some(calendar) => calendar,
            None => {
                calendars
                    .create(Calendar {
                        room_id: room_id.to_string(),
                        sessions: Vec::new(),
                        status: CalendarStatus::Draft,
                        extra: Map::new(),
                    })
                    .await?
            }
        };

        if !calendar.value.sessions.iter().any(|s| s == session_id) {
            calendar.value.sessions.push(session_id.to_string());
            calendar = calendars.save(&calendar).await?;
        }

        if session.value.room_id.as_deref() != Some(room_id) {
            session.value.room_id = Some(room_id.to_string());
            sessions.save(&session).await?;
        }

        Ok(calendar)
    }

    /// Gets the enrolled clients of a session in enrollment order.
    pub async fn get_clients_by_session(
        &self,
        session_id: &str,
    ) -> Result<Vec<Stored<Client>>, AppError> {
        let session = EntityService::<GymSession>::new(self.db)
            .get_by_id(session_id)
            .await?;
        let clients = EntityService::<Client>::new(self.db);

        let mut enrolled = Vec::with_capacity(session.value.enrolled.len());
        for client_id in &session.value.enrolled {
            match clients.find_by_id(client_id).await? {
                Some(client) => enrolled.push(client),
                None => tracing::warn!(
                    "Session {} lists missing client {}",
                    session_id,
                    client_id
                ),
            }
        }

        Ok(enrolled)
    }

    /// Gets sessions with their `service`, `instructor` and `room` documents embedded.
    pub async fn get_completed(
        &self,
        filter: &Filter,
        projection: &Projection,
    ) -> Result<Vec<Value>, AppError> {
        let sessions = EntityService::<GymSession>::new(self.db).find(filter).await?;

        let mut completed = Vec::with_capacity(sessions.len());
        for session in sessions {
            let service = self.embed::<Service>(session.value.service_id.as_deref()).await?;
            let instructor = self
                .embed::<Instructor>(session.value.instructor_id.as_deref())
                .await?;
            let room = self.embed::<Room>(session.value.room_id.as_deref()).await?;

            let mut value = serde_json::to_value(&session)?;
            if let Value::Object(ref mut map) = value {
                map.insert("service".to_string(), service);
                map.insert("instructor".to_string(), instructor);
                map.insert("room".to_string(), room);
            }
            completed.push(projection.apply(value));
        }

        Ok(completed)
    }

    async fn embed<M: DocumentModel>(&self, id: Option<&str>) -> Result<Value, AppError> {
        let document = match id {
            Some(id) => EntityService::<M>::new(self.db).find_by_id(id).await?,
            None => None,
        };

        Ok(serde_json::to_value(document)?)
    }

    /// Offers the session's free places to its waiting list, then writes the session.
    ///
    /// Must be called with the session's lock held.
    async fn save_with_promotion(
        &self,
        mut session: Stored<GymSession>,
    ) -> Result<(Stored<GymSession>, NotifyReport), AppError> {
        let report = match self.promote_waiting(&mut session).await {
            Ok(report) => report,
            Err(aborted) => {
                let ids: Vec<String> = aborted
                    .promoted
                    .into_iter()
                    .map(|p| p.reservation_id)
                    .collect();
                self.compensate(&ids).await;
                return Err(aborted.source);
            }
        };

        match EntityService::<GymSession>::new(self.db)
            .save(&session)
            .await
        {
            Ok(saved) => Ok((saved, report)),
            Err(err) => {
                let ids: Vec<String> = report
                    .promoted
                    .iter()
                    .map(|p| p.reservation_id.clone())
                    .collect();
                self.compensate(&ids).await;
                Err(err)
            }
        }
    }

    async fn promote_waiting(
        &self,
        session: &mut Stored<GymSession>,
    ) -> Result<NotifyReport, NotifyAborted> {
        let slot = FreedSlot {
            session_id: session.id.clone(),
            slots: session.value.free_slots(),
        };
        if slot.slots == 0 || session.value.waiting_list.is_empty() {
            return Ok(NotifyReport::default());
        }

        let mut waiting = WaitingListPublisher::new(std::mem::take(&mut session.value.waiting_list));
        let subscriber = ReservationSubscriber::new(self.db);
        let result = waiting.notify_subscribers(&slot, &subscriber).await;
        session.value.waiting_list = waiting.into_subscribers();

        if let Ok(report) = &result {
            session
                .value
                .enrolled
                .extend(report.promoted.iter().map(|p| p.client_id.clone()));
        }

        result
    }

    /// Cancels reservations created by an operation that failed afterwards.
    async fn compensate(&self, reservation_ids: &[String]) {
        let service = ReservationService::new(self.db);
        for reservation_id in reservation_ids {
            if let Err(e) = service.mark_cancelled(reservation_id).await {
                tracing::error!(
                    "Failed to roll back reservation {}: {}",
                    reservation_id,
                    e
                );
            }
        }
    }
}
