//! Calendar filter strategies.
//!
//! A strategy selects sessions of a calendar according to one criterion. Strategies are
//! pure: they never touch the calendar they are given and return matching sessions in
//! calendar order. Missing or unmatched criteria yield an empty list.

use std::{str::FromStr, sync::Arc};

use crate::server::model::{
    calendar::{CalendarSessions, FilterCriteria},
    document::Stored,
    session::GymSession,
};

pub trait CalendarFilterStrategy: Send + Sync {
    fn filter_calendar(
        &self,
        calendar: &CalendarSessions,
        criteria: &FilterCriteria,
    ) -> Vec<Stored<GymSession>>;
}

fn select<F>(calendar: &CalendarSessions, keep: F) -> Vec<Stored<GymSession>>
where
    F: Fn(&GymSession) -> bool,
{
    calendar
        .sessions
        .iter()
        .filter(|s| keep(&s.value))
        .cloned()
        .collect()
}

/// Sessions taught by `criteria.instructor_id`.
pub struct FilterByInstructor;

impl CalendarFilterStrategy for FilterByInstructor {
    fn filter_calendar(
        &self,
        calendar: &CalendarSessions,
        criteria: &FilterCriteria,
    ) -> Vec<Stored<GymSession>> {
        let Some(instructor_id) = criteria.instructor_id.as_deref() else {
            return Vec::new();
        };

        select(calendar, |s| s.instructor_id.as_deref() == Some(instructor_id))
    }
}

/// Sessions held in `criteria.room_id`.
pub struct FilterByRoom;

impl CalendarFilterStrategy for FilterByRoom {
    fn filter_calendar(
        &self,
        calendar: &CalendarSessions,
        criteria: &FilterCriteria,
    ) -> Vec<Stored<GymSession>> {
        let Some(room_id) = criteria.room_id.as_deref() else {
            return Vec::new();
        };

        select(calendar, |s| s.room_id.as_deref() == Some(room_id))
    }
}

/// Sessions of `criteria.service_id`.
pub struct FilterByService;

impl CalendarFilterStrategy for FilterByService {
    fn filter_calendar(
        &self,
        calendar: &CalendarSessions,
        criteria: &FilterCriteria,
    ) -> Vec<Stored<GymSession>> {
        let Some(service_id) = criteria.service_id.as_deref() else {
            return Vec::new();
        };

        select(calendar, |s| s.service_id.as_deref() == Some(service_id))
    }
}

/// Sessions starting in `[criteria.from, criteria.to)`. A missing bound is open.
pub struct FilterByDateRange;

impl CalendarFilterStrategy for FilterByDateRange {
    fn filter_calendar(
        &self,
        calendar: &CalendarSessions,
        criteria: &FilterCriteria,
    ) -> Vec<Stored<GymSession>> {
        if criteria.from.is_none() && criteria.to.is_none() {
            return Vec::new();
        }

        select(calendar, |s| {
            criteria.from.is_none_or(|from| s.date >= from)
                && criteria.to.is_none_or(|to| s.date < to)
        })
    }
}

/// Strategy selected through configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CalendarFilterKind {
    #[default]
    Instructor,
    Room,
    Service,
    DateRange,
}

impl CalendarFilterKind {
    pub fn strategy(self) -> Arc<dyn CalendarFilterStrategy> {
        match self {
            Self::Instructor => Arc::new(FilterByInstructor),
            Self::Room => Arc::new(FilterByRoom),
            Self::Service => Arc::new(FilterByService),
            Self::DateRange => Arc::new(FilterByDateRange),
        }
    }
}

impl FromStr for CalendarFilterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "instructor" => Ok(Self::Instructor),
            "room" => Ok(Self::Room),
            "service" => Ok(Self::Service),
            "date_range" | "daterange" => Ok(Self::DateRange),
            other => Err(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::calendar::{Calendar, CalendarStatus};
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::Map;

    fn session(id: &str, instructor: &str, service: &str, day: u32) -> Stored<GymSession> {
        Stored {
            id: id.to_string(),
            version: 1,
            value: GymSession {
                service_id: Some(service.to_string()),
                instructor_id: Some(instructor.to_string()),
                room_id: Some("r1".to_string()),
                date: Utc.with_ymd_and_hms(2026, 3, day, 9, 0, 0).unwrap(),
                duration_minutes: 60,
                capacity: 10,
                enrolled: Vec::new(),
                waiting_list: Vec::new(),
                extra: Map::new(),
            },
        }
    }

    fn calendar() -> CalendarSessions {
        let sessions = vec![
            session("s1", "i1", "yoga", 2),
            session("s2", "i2", "spin", 3),
            session("s3", "i1", "spin", 4),
        ];
        CalendarSessions {
            calendar: Stored {
                id: "cal".to_string(),
                version: 1,
                value: Calendar {
                    room_id: "r1".to_string(),
                    sessions: sessions.iter().map(|s| s.id.clone()).collect(),
                    status: CalendarStatus::Published,
                    extra: Map::new(),
                },
            },
            sessions,
        }
    }

    fn ids(sessions: &[Stored<GymSession>]) -> Vec<&str> {
        sessions.iter().map(|s| s.id.as_str()).collect()
    }

    /// Expected: matching sessions in calendar order, calendar untouched
    #[test]
    fn filters_by_instructor_preserving_order() {
        let calendar = calendar();
        let before = calendar.clone();
        let criteria = FilterCriteria {
            instructor_id: Some("i1".to_string()),
            ..Default::default()
        };

        let result = FilterByInstructor.filter_calendar(&calendar, &criteria);

        assert_eq!(ids(&result), ["s1", "s3"]);
        assert_eq!(calendar, before);
    }

    /// Expected: the same input always gives the same output
    #[test]
    fn filtering_is_deterministic() {
        let calendar = calendar();
        let criteria = FilterCriteria {
            service_id: Some("spin".to_string()),
            ..Default::default()
        };

        let first = FilterByService.filter_calendar(&calendar, &criteria);
        let second = FilterByService.filter_calendar(&calendar, &criteria);

        assert_eq!(ids(&first), ["s2", "s3"]);
        assert_eq!(first, second);
    }

    /// Expected: unknown or absent criteria give an empty list
    #[test]
    fn unmatched_criteria_yield_empty() {
        let calendar = calendar();
        let unknown = FilterCriteria {
            instructor_id: Some("nobody".to_string()),
            room_id: Some("r9".to_string()),
            ..Default::default()
        };

        assert!(FilterByInstructor
            .filter_calendar(&calendar, &unknown)
            .is_empty());
        assert!(FilterByRoom.filter_calendar(&calendar, &unknown).is_empty());
        assert!(FilterByService
            .filter_calendar(&calendar, &FilterCriteria::default())
            .is_empty());
        assert!(FilterByDateRange
            .filter_calendar(&calendar, &FilterCriteria::default())
            .is_empty());
    }

    /// Expected: lower bound inclusive, upper bound exclusive
    #[test]
    fn date_range_is_half_open() {
        let calendar = calendar();
        let from = Utc.with_ymd_and_hms(2026, 3, 3, 9, 0, 0).unwrap();
        let criteria = FilterCriteria {
            from: Some(from),
            to: Some(from + Duration::days(1)),
            ..Default::default()
        };

        let result = FilterByDateRange.filter_calendar(&calendar, &criteria);

        assert_eq!(ids(&result), ["s2"]);
    }

    /// Expected: configuration names map to strategies, unknown names are rejected
    #[test]
    fn parses_filter_kind() {
        assert_eq!("room".parse::<CalendarFilterKind>(), Ok(CalendarFilterKind::Room));
        assert_eq!("DATE_RANGE".parse::<CalendarFilterKind>(), Ok(CalendarFilterKind::DateRange));
        assert_eq!(
            "weekday".parse::<CalendarFilterKind>(),
            Err("weekday".to_string())
        );
    }
}
