//! Document repository for collection-based persistence.
//!
//! This module provides the `DocumentRepository`, the generic store every service goes
//! through. Documents are JSON objects grouped in named collections and addressed by a
//! string id. Writes to existing documents are guarded by the document version so that
//! concurrent read-modify-write cycles are detected instead of silently lost.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::server::model::{
    document::{strip_reserved, Document},
    query::{Filter, Projection},
};

/// Result of a version-checked write.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOutcome {
    /// The write went through; holds the document as stored.
    Written(Document),
    /// No document with this id exists in the collection.
    Missing,
    /// The document exists but its version no longer matches the expected one.
    Stale { current_version: i64 },
}

/// Repository providing document operations over named collections.
pub struct DocumentRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DocumentRepository<'a> {
    /// Creates a new DocumentRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `DocumentRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets documents of a collection matching a filter, rendered through a projection.
    ///
    /// # Arguments
    /// - `collection` - Collection name
    /// - `filter` - Field equality conditions
    /// - `projection` - Field selection applied to each result
    ///
    /// # Returns
    /// - `Ok(Vec<Value>)` - Matching documents in insertion order, each including `id` and
    ///   `version` unless projected away
    /// - `Err(DbErr)` - Database error or unreadable stored document
    pub async fn get(
        &self,
        collection: &str,
        filter: &Filter,
        projection: &Projection,
    ) -> Result<Vec<Value>, DbErr> {
        let documents = self.find(collection, filter).await?;

        Ok(documents
            .into_iter()
            .map(|d| projection.apply(d.into_json()))
            .collect())
    }

    /// Finds documents of a collection matching a filter.
    ///
    /// Filtering happens on the decoded bodies, so any field path can be used. A filter
    /// pinning `id` loads that single row instead of scanning the collection.
    ///
    /// # Returns
    /// - `Ok(Vec<Document>)` - Matching documents in insertion order
    /// - `Err(DbErr)` - Database error or unreadable stored document
    pub async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, DbErr> {
        if let Some(id) = filter.id() {
            let document = self.get_by_id(collection, id).await?;

            return Ok(document
                .filter(|d| filter.matches(&d.id, &d.body))
                .into_iter()
                .collect());
        }

        let models = entity::prelude::Document::find()
            .filter(entity::document::Column::Collection.eq(collection))
            .order_by_asc(entity::document::Column::Seq)
            .all(self.db)
            .await?;

        let mut documents = Vec::with_capacity(models.len());
        for model in models {
            let document = Document::from_entity(model)?;
            if filter.matches(&document.id, &document.body) {
                documents.push(document);
            }
        }

        Ok(documents)
    }

    /// Gets a single document by id.
    ///
    /// # Returns
    /// - `Ok(Some(Document))` - Document found in the collection
    /// - `Ok(None)` - No document with this id in the collection
    /// - `Err(DbErr)` - Database error
    pub async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, DbErr> {
        entity::prelude::Document::find()
            .filter(entity::document::Column::Collection.eq(collection))
            .filter(entity::document::Column::Id.eq(id))
            .one(self.db)
            .await?
            .map(Document::from_entity)
            .transpose()
    }

    /// Creates a new document with a generated id and version 1.
    ///
    /// Reserved fields (`id`, `version`) present in the body are dropped.
    ///
    /// # Returns
    /// - `Ok(Document)` - The stored document
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(
        &self,
        collection: &str,
        mut body: Map<String, Value>,
    ) -> Result<Document, DbErr> {
        strip_reserved(&mut body);
        let now = Utc::now().naive_utc();

        let model = entity::document::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4().to_string()),
            collection: ActiveValue::Set(collection.to_string()),
            body: ActiveValue::Set(Value::Object(body).to_string()),
            version: ActiveValue::Set(1),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Document::from_entity(model)
    }

    /// Replaces a document body if its version still equals `expected_version`.
    ///
    /// The version check and the write happen in a single conditional UPDATE, so two
    /// writers that read the same version cannot both succeed.
    ///
    /// # Arguments
    /// - `collection` - Collection name
    /// - `id` - Document id
    /// - `expected_version` - Version the caller read before computing `body`
    /// - `body` - New document body
    ///
    /// # Returns
    /// - `Ok(WriteOutcome::Written)` - Body replaced, version incremented
    /// - `Ok(WriteOutcome::Stale)` - Document was modified since it was read
    /// - `Ok(WriteOutcome::Missing)` - Document does not exist
    /// - `Err(DbErr)` - Database error
    pub async fn replace_if_version(
        &self,
        collection: &str,
        id: &str,
        expected_version: i64,
        mut body: Map<String, Value>,
    ) -> Result<WriteOutcome, DbErr> {
        strip_reserved(&mut body);

        let result = entity::prelude::Document::update_many()
            .col_expr(
                entity::document::Column::Body,
                sea_orm::sea_query::Expr::value(Value::Object(body).to_string()),
            )
            .col_expr(
                entity::document::Column::Version,
                sea_orm::sea_query::Expr::value(expected_version + 1),
            )
            .col_expr(
                entity::document::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::document::Column::Collection.eq(collection))
            .filter(entity::document::Column::Id.eq(id))
            .filter(entity::document::Column::Version.eq(expected_version))
            .exec(self.db)
            .await?;

        let current = self.get_by_id(collection, id).await?;

        Ok(match current {
            Some(document) if result.rows_affected == 1 => WriteOutcome::Written(document),
            Some(document) => WriteOutcome::Stale {
                current_version: document.version,
            },
            None => WriteOutcome::Missing,
        })
    }

    /// Deletes a document.
    ///
    /// # Returns
    /// - `Ok(true)` - Document deleted
    /// - `Ok(false)` - No document with this id in the collection
    /// - `Err(DbErr)` - Database error
    pub async fn delete(&self, collection: &str, id: &str) -> Result<bool, DbErr> {
        let result = entity::prelude::Document::delete_many()
            .filter(entity::document::Column::Collection.eq(collection))
            .filter(entity::document::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
