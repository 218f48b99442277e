//! Generic CRUD over a typed collection.
//!
//! `EntityService<M>` wraps `DocumentRepository` for one `DocumentModel` type. It decodes
//! stored bodies into `M`, runs the model's `validate` before every write and converts
//! repository outcomes into `AppError`s. Business services build on it instead of talking
//! to the repository directly.

use std::marker::PhantomData;

use sea_orm::DatabaseConnection;
use serde_json::{Map, Value};

use crate::server::{
    data::document::{DocumentRepository, WriteOutcome},
    error::AppError,
    model::{
        document::{merge_patch, DocumentModel, Stored},
        query::{Filter, Projection},
    },
};

pub struct EntityService<'a, M> {
    db: &'a DatabaseConnection,
    _model: PhantomData<fn() -> M>,
}

impl<'a, M: DocumentModel> EntityService<'a, M> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            _model: PhantomData,
        }
    }

    /// Gets raw documents matching a filter, rendered through a projection.
    pub async fn get(&self, filter: &Filter, projection: &Projection) -> Result<Vec<Value>, AppError> {
        let repo = DocumentRepository::new(self.db);

        Ok(repo.get(M::COLLECTION, filter, projection).await?)
    }

    /// Finds typed documents matching a filter.
    pub async fn find(&self, filter: &Filter) -> Result<Vec<Stored<M>>, AppError> {
        let repo = DocumentRepository::new(self.db);

        let documents = repo.find(M::COLLECTION, filter).await?;

        documents
            .into_iter()
            .map(|d| d.decode::<M>().map_err(Into::into))
            .collect()
    }

    /// Gets a typed document by id, if it exists.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Stored<M>>, AppError> {
        let repo = DocumentRepository::new(self.db);

        let document = repo.get_by_id(M::COLLECTION, id).await?;

        Ok(document.map(|d| d.decode::<M>()).transpose()?)
    }

    /// Gets a typed document by id.
    ///
    /// # Returns
    /// - `Ok(Stored<M>)` - Document found
    /// - `Err(AppError::NotFound)` - No document with this id
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn get_by_id(&self, id: &str) -> Result<Stored<M>, AppError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| not_found::<M>(id))
    }

    /// Validates and stores a new document.
    ///
    /// # Returns
    /// - `Ok(Stored<M>)` - Created document with its generated id
    /// - `Err(AppError::BadRequest)` - Model invariants violated
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn create(&self, model: M) -> Result<Stored<M>, AppError> {
        model.validate().map_err(AppError::BadRequest)?;

        let repo = DocumentRepository::new(self.db);
        let document = repo.create(M::COLLECTION, model.to_body()?).await?;

        Ok(document.decode::<M>()?)
    }

    /// Creates a document from an untyped request body.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - Body does not describe a valid `M`
    pub async fn create_from_json(&self, body: Value) -> Result<Stored<M>, AppError> {
        let model = serde_json::from_value::<M>(body).map_err(|e| {
            AppError::BadRequest(format!("Invalid {} document: {}", M::COLLECTION, e))
        })?;

        self.create(model).await
    }

    /// Applies a merge patch to a stored document.
    ///
    /// The patched body must still decode into `M` and pass validation. The write is
    /// checked against the version that was read.
    ///
    /// # Returns
    /// - `Ok(Stored<M>)` - Updated document
    /// - `Err(AppError::NotFound)` - No document with this id
    /// - `Err(AppError::BadRequest)` - Patch produces an invalid document
    /// - `Err(AppError::ConcurrentModification)` - Document changed in between
    pub async fn modify(&self, id: &str, patch: Map<String, Value>) -> Result<Stored<M>, AppError> {
        let repo = DocumentRepository::new(self.db);

        let document = repo
            .get_by_id(M::COLLECTION, id)
            .await?
            .ok_or_else(|| not_found::<M>(id))?;

        let version = document.version;
        let mut body = document.body;
        merge_patch(&mut body, patch);

        let model = serde_json::from_value::<M>(Value::Object(body)).map_err(|e| {
            AppError::BadRequest(format!("Invalid {} document: {}", M::COLLECTION, e))
        })?;

        self.save(&Stored {
            id: id.to_string(),
            version,
            value: model,
        })
        .await
    }

    /// Writes a typed document back, provided nobody changed it since it was read.
    ///
    /// # Returns
    /// - `Ok(Stored<M>)` - Written document carrying the new version
    /// - `Err(AppError::BadRequest)` - Model invariants violated
    /// - `Err(AppError::NotFound)` - Document was deleted
    /// - `Err(AppError::ConcurrentModification)` - `stored.version` is stale
    pub async fn save(&self, stored: &Stored<M>) -> Result<Stored<M>, AppError> {
        stored.value.validate().map_err(AppError::BadRequest)?;

        let repo = DocumentRepository::new(self.db);
        let outcome = repo
            .replace_if_version(
                M::COLLECTION,
                &stored.id,
                stored.version,
                stored.value.to_body()?,
            )
            .await?;

        match outcome {
            WriteOutcome::Written(document) => Ok(document.decode::<M>()?),
            WriteOutcome::Missing => Err(not_found::<M>(&stored.id)),
            WriteOutcome::Stale { current_version } => {
                Err(AppError::ConcurrentModification(format!(
                    "{} document {} was modified concurrently (expected version {}, found {})",
                    M::COLLECTION,
                    stored.id,
                    stored.version,
                    current_version
                )))
            }
        }
    }

    /// Deletes a document.
    ///
    /// # Returns
    /// - `Ok(())` - Document deleted
    /// - `Err(AppError::NotFound)` - No document with this id
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let repo = DocumentRepository::new(self.db);

        if repo.delete(M::COLLECTION, id).await? {
            Ok(())
        } else {
            Err(not_found::<M>(id))
        }
    }
}

fn not_found<M: DocumentModel>(id: &str) -> AppError {
    AppError::NotFound(format!("No document {} in {}", id, M::COLLECTION))
}
