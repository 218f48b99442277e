//! Room calendars.
//!
//! Every room has at most one calendar listing its sessions in order. Filtering is
//! delegated to the `CalendarFilterStrategy` chosen at startup.

pub mod filter;

use sea_orm::DatabaseConnection;

use crate::server::{
    error::AppError,
    model::{
        calendar::{Calendar, CalendarSessions, CalendarStatus, FilterCriteria},
        document::Stored,
        query::Filter,
        session::GymSession,
    },
    service::{calendar::filter::CalendarFilterStrategy, entity::EntityService},
};

pub struct CalendarService<'a> {
    db: &'a DatabaseConnection,
    strategy: &'a dyn CalendarFilterStrategy,
}

impl<'a> CalendarService<'a> {
    pub fn new(db: &'a DatabaseConnection, strategy: &'a dyn CalendarFilterStrategy) -> Self {
        Self { db, strategy }
    }

    /// Gets the calendar of a room with its sessions resolved in calendar order.
    ///
    /// # Returns
    /// - `Ok(CalendarSessions)` - Calendar and its existing sessions
    /// - `Err(AppError::NotFound)` - The room has no calendar
    pub async fn get_calendar_by_room(&self, room_id: &str) -> Result<CalendarSessions, AppError> {
        let calendar = self.find_by_room(room_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("Room {} has no calendar", room_id))
        })?;

        let sessions = EntityService::<GymSession>::new(self.db);
        let mut resolved = Vec::with_capacity(calendar.value.sessions.len());
        for session_id in &calendar.value.sessions {
            if let Some(session) = sessions.find_by_id(session_id).await? {
                resolved.push(session);
            }
        }

        Ok(CalendarSessions {
            calendar,
            sessions: resolved,
        })
    }

    pub async fn find_by_room(&self, room_id: &str) -> Result<Option<Stored<Calendar>>, AppError> {
        let calendars = EntityService::<Calendar>::new(self.db)
            .find(&Filter::new().eq("roomId", room_id))
            .await?;

        Ok(calendars.into_iter().next())
    }

    pub async fn publish_calendar(&self, calendar_id: &str) -> Result<Stored<Calendar>, AppError> {
        let calendars = EntityService::<Calendar>::new(self.db);

        let mut calendar = calendars.get_by_id(calendar_id).await?;
        if calendar.value.status == CalendarStatus::Published {
            return Ok(calendar);
        }
        calendar.value.status = CalendarStatus::Published;

        let calendar = calendars.save(&calendar).await?;
        tracing::info!("Published calendar {}", calendar.id);

        Ok(calendar)
    }

    /// Filters the sessions of a room's calendar with the configured strategy.
    pub async fn filter_calendar(
        &self,
        room_id: &str,
        criteria: &FilterCriteria,
    ) -> Result<Vec<Stored<GymSession>>, AppError> {
        let calendar = self.get_calendar_by_room(room_id).await?;

        Ok(self.strategy.filter_calendar(&calendar, criteria))
    }
}
