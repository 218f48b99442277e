use crate::server::{
    data::document::{DocumentRepository, WriteOutcome},
    model::query::{Filter, Projection},
};
use sea_orm::DbErr;
use serde_json::{json, Map, Value};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod get;
mod replace_if_version;

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected a JSON object"),
    }
}
