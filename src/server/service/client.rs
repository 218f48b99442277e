use sea_orm::DatabaseConnection;
use serde_json::Value;

use crate::server::{
    error::AppError,
    model::{
        catalog::Service,
        client::{Client, Notification},
        document::Stored,
        membership::Membership,
        query::{Filter, Projection},
    },
    service::entity::EntityService,
};

pub struct ClientService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ClientService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_one(&self, client_id: &str) -> Result<Stored<Client>, AppError> {
        EntityService::<Client>::new(self.db).get_by_id(client_id).await
    }

    /// Gets clients matching a filter with their current membership embedded.
    ///
    /// Each result carries a `membership` field holding the membership document, or `null`
    /// when the client has none. The projection is applied after embedding.
    pub async fn get_completed(
        &self,
        filter: &Filter,
        projection: &Projection,
    ) -> Result<Vec<Value>, AppError> {
        let memberships = EntityService::<Membership>::new(self.db);
        let clients = EntityService::<Client>::new(self.db).find(filter).await?;

        let mut completed = Vec::with_capacity(clients.len());
        for client in clients {
            let membership = match client.value.membership_id.as_deref() {
                Some(id) => memberships.find_by_id(id).await?,
                None => None,
            };

            let mut value = serde_json::to_value(&client)?;
            if let Value::Object(ref mut map) = value {
                map.insert("membership".to_string(), serde_json::to_value(membership)?);
            }
            completed.push(projection.apply(value));
        }

        Ok(completed)
    }

    /// Adds a service to the client's favorites. Adding an existing favorite changes nothing.
    ///
    /// # Returns
    /// - `Ok(Stored<Client>)` - Client after the change
    /// - `Err(AppError::NotFound)` - Client or service does not exist
    pub async fn add_favorite_service(
        &self,
        client_id: &str,
        service_id: &str,
    ) -> Result<Stored<Client>, AppError> {
        let clients = EntityService::<Client>::new(self.db);
        let mut client = clients.get_by_id(client_id).await?;
        EntityService::<Service>::new(self.db)
            .get_by_id(service_id)
            .await?;

        if client.value.favorite_services.iter().any(|s| s == service_id) {
            return Ok(client);
        }
        client.value.favorite_services.push(service_id.to_string());

        clients.save(&client).await
    }

    /// Removes a service from the client's favorites, if present.
    pub async fn delete_favorite_service(
        &self,
        client_id: &str,
        service_id: &str,
    ) -> Result<Stored<Client>, AppError> {
        let clients = EntityService::<Client>::new(self.db);
        let mut client = clients.get_by_id(client_id).await?;

        let before = client.value.favorite_services.len();
        client.value.favorite_services.retain(|s| s != service_id);
        if client.value.favorite_services.len() == before {
            return Ok(client);
        }

        clients.save(&client).await
    }

    /// Gets the favorite services of a client in the order they were added.
    ///
    /// Favorites pointing to deleted services are left out.
    pub async fn get_favorites_services(
        &self,
        client_id: &str,
    ) -> Result<Vec<Stored<Service>>, AppError> {
        let client = self.get_one(client_id).await?;
        let services = EntityService::<Service>::new(self.db);

        let mut favorites = Vec::with_capacity(client.value.favorite_services.len());
        for service_id in &client.value.favorite_services {
            if let Some(service) = services.find_by_id(service_id).await? {
                favorites.push(service);
            }
        }

        Ok(favorites)
    }

    pub async fn add_notification(
        &self,
        client_id: &str,
        message: &str,
    ) -> Result<Notification, AppError> {
        let clients = EntityService::<Client>::new(self.db);
        let mut client = clients.get_by_id(client_id).await?;

        let notification = client.value.notify(message);
        clients.save(&client).await?;

        Ok(notification)
    }

    /// Removes one notification of a client.
    ///
    /// # Returns
    /// - `Ok(())` - Notification removed
    /// - `Err(AppError::NotFound)` - Client or notification does not exist
    pub async fn delete_notification(&self, client_id: &str, id: u32) -> Result<(), AppError> {
        let clients = EntityService::<Client>::new(self.db);
        let mut client = clients.get_by_id(client_id).await?;

        if !client.value.remove_notification(id) {
            return Err(AppError::NotFound(format!(
                "Client {} has no notification {}",
                client_id, id
            )));
        }

        clients.save(&client).await?;

        Ok(())
    }
}
