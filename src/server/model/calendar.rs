//! Calendar domain models and filter criteria.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::server::model::{
    document::{DocumentModel, Stored},
    session::GymSession,
};

/// Publication state of a calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarStatus {
    #[default]
    Draft,
    Published,
}

/// The session plan of a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calendar {
    pub room_id: String,
    /// Session ids in calendar order.
    #[serde(default)]
    pub sessions: Vec<String>,
    #[serde(default)]
    pub status: CalendarStatus,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DocumentModel for Calendar {
    const COLLECTION: &'static str = "calendars";
}

/// A calendar together with its sessions resolved in calendar order.
///
/// Session ids that no longer resolve to a document are left out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarSessions {
    pub calendar: Stored<Calendar>,
    pub sessions: Vec<Stored<GymSession>>,
}

/// Ad-hoc criteria handed to a calendar filter strategy.
///
/// Each strategy reads only the fields it cares about; a strategy whose field is absent
/// matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub instructor_id: Option<String>,
    pub room_id: Option<String>,
    pub service_id: Option<String>,
    /// Inclusive lower bound on session start.
    pub from: Option<DateTime<Utc>>,
    /// Exclusive upper bound on session start.
    pub to: Option<DateTime<Utc>>,
}

impl FilterCriteria {
    /// Converts the request DTO to filter criteria.
    pub fn from_dto(dto: crate::model::calendar::FilterCriteriaDto) -> Self {
        Self {
            instructor_id: dto.instructor_id,
            room_id: dto.room_id,
            service_id: dto.service_id,
            from: dto.from,
            to: dto.to,
        }
    }
}
