//! Document filters and projections.
//!
//! Filters are JSON objects mapping (dot separated) field paths to the value the field must
//! equal. An array field matches when it contains the filter value. Projections select
//! which top-level fields of a document are returned.

use serde_json::{Map, Value};
use thiserror::Error;

/// Malformed filter or projection supplied by a caller.
#[derive(Error, Debug, PartialEq)]
pub enum QueryError {
    #[error("Filter must be a JSON object")]
    FilterNotObject,
    #[error("Projection must be a JSON object")]
    ProjectionNotObject,
    #[error("Projection value for '{0}' must be 0, 1, true or false")]
    InvalidProjectionValue(String),
    #[error("Projection cannot mix included and excluded fields")]
    MixedProjection,
}

/// Equality filter over document fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    /// Creates a filter matching every document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an equality condition on a field path.
    pub fn eq(mut self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((path.into(), value.into()));
        self
    }

    /// Parses a filter from request JSON. `null` or an absent filter matches everything.
    pub fn from_json(value: Option<Value>) -> Result<Self, QueryError> {
        match value {
            None | Some(Value::Null) => Ok(Self::new()),
            Some(Value::Object(map)) => Ok(Self {
                conditions: map.into_iter().collect(),
            }),
            Some(_) => Err(QueryError::FilterNotObject),
        }
    }

    /// The document id this filter pins, when it has an `id` condition with a string value.
    pub fn id(&self) -> Option<&str> {
        self.conditions
            .iter()
            .find(|(path, _)| path == "id")
            .and_then(|(_, value)| value.as_str())
    }

    /// Checks whether a document with the given id and body satisfies every condition.
    pub fn matches(&self, id: &str, body: &Map<String, Value>) -> bool {
        self.conditions.iter().all(|(path, expected)| {
            if path == "id" {
                return expected.as_str() == Some(id);
            }

            match lookup(body, path) {
                Some(Value::Array(items)) if !expected.is_array() => items.contains(expected),
                Some(actual) => actual == expected,
                None => expected.is_null(),
            }
        })
    }
}

fn lookup<'a>(body: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = body.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Field selection applied to documents on the way out.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Projection {
    #[default]
    All,
    Include(Vec<String>),
    Exclude(Vec<String>),
}

impl Projection {
    /// Parses a projection from request JSON such as `{"name": 1, "capacity": 1}`.
    pub fn from_json(value: Option<Value>) -> Result<Self, QueryError> {
        let map = match value {
            None | Some(Value::Null) => return Ok(Self::All),
            Some(Value::Object(map)) => map,
            Some(_) => return Err(QueryError::ProjectionNotObject),
        };

        let mut include = Vec::new();
        let mut exclude = Vec::new();
        for (field, flag) in map {
            let keep = match flag {
                Value::Bool(b) => b,
                Value::Number(ref n) if n.as_i64() == Some(1) => true,
                Value::Number(ref n) if n.as_i64() == Some(0) => false,
                _ => return Err(QueryError::InvalidProjectionValue(field)),
            };
            if keep {
                include.push(field);
            } else {
                exclude.push(field);
            }
        }

        match (include.is_empty(), exclude.is_empty()) {
            (true, true) => Ok(Self::All),
            (false, true) => Ok(Self::Include(include)),
            (true, false) => Ok(Self::Exclude(exclude)),
            (false, false) => Err(QueryError::MixedProjection),
        }
    }

    /// Applies the projection to a document rendered as a JSON object.
    ///
    /// `id` is always kept by inclusion projections.
    pub fn apply(&self, document: Value) -> Value {
        let Value::Object(mut map) = document else {
            return document;
        };

        match self {
            Self::All => {}
            Self::Include(fields) => {
                map.retain(|key, _| key == "id" || fields.iter().any(|f| f == key));
            }
            Self::Exclude(fields) => {
                for field in fields {
                    map.remove(field);
                }
            }
        }

        Value::Object(map)
    }
}
