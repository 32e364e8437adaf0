use crate::config::{MongoConfig, CONNECT_TIMEOUT};
use crate::models::{Item, ItemId};
use crate::services::ItemStore;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc, options::ClientOptions, Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;

/// MongoDB-backed item store holding one client for the process lifetime.
#[derive(Clone)]
pub struct MongoItemStore {
    client: MongoClient,
    db: Database,
    collection_name: String,
}

impl MongoItemStore {
    /// Connects and verifies the server answers, all within [`CONNECT_TIMEOUT`].
    ///
    /// The bound covers connection-string parsing too, since `mongodb+srv://`
    /// URIs resolve DNS records there.
    pub async fn connect(config: &MongoConfig) -> Result<Self, AppError> {
        tracing::info!(
            database = %config.database,
            collection = %config.collection,
            "Connecting to MongoDB"
        );

        let store = tokio::time::timeout(CONNECT_TIMEOUT, Self::establish(config))
            .await
            .map_err(|_| {
                tracing::error!(
                    "MongoDB did not respond within {}s",
                    CONNECT_TIMEOUT.as_secs()
                );
                AppError::DatabaseError(anyhow::anyhow!(
                    "connection timed out after {}s",
                    CONNECT_TIMEOUT.as_secs()
                ))
            })??;

        tracing::info!(database = %config.database, "Successfully connected to MongoDB database");
        Ok(store)
    }

    async fn establish(config: &MongoConfig) -> Result<Self, AppError> {
        let mut options = ClientOptions::parse(&config.uri).await.map_err(|e| {
            tracing::error!("Failed to parse MongoDB connection string: {}", e);
            AppError::from(e)
        })?;
        options.app_name = Some("stuff-service".to_string());
        options.connect_timeout = Some(CONNECT_TIMEOUT);
        options.server_selection_timeout = Some(CONNECT_TIMEOUT);

        let client = MongoClient::with_options(options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;

        let store = Self {
            db: client.database(&config.database),
            client,
            collection_name: config.collection.clone(),
        };
        store.health_check().await?;

        Ok(store)
    }

    pub fn items(&self) -> Collection<Item> {
        self.db.collection(&self.collection_name)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl ItemStore for MongoItemStore {
    async fn insert(&self, item: &Item) -> Result<(), AppError> {
        self.items().insert_one(item, None).await.map_err(|e| {
            tracing::error!(item_id = %item.id, "Failed to insert item: {}", e);
            AppError::from(e)
        })?;
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Item>, AppError> {
        let cursor = self.items().find(doc! {}, None).await.map_err(|e| {
            tracing::error!("Failed to query items: {}", e);
            AppError::from(e)
        })?;

        cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to decode items: {}", e);
            AppError::from(e)
        })
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, AppError> {
        self.items()
            .find_one(doc! { "_id": id.as_object_id() }, None)
            .await
            .map_err(|e| {
                tracing::error!(item_id = %id, "Failed to fetch item: {}", e);
                AppError::from(e)
            })
    }

    async fn delete_by_id(&self, id: ItemId) -> Result<u64, AppError> {
        let result = self
            .items()
            .delete_one(doc! { "_id": id.as_object_id() }, None)
            .await
            .map_err(|e| {
                tracing::error!(item_id = %id, "Failed to delete item: {}", e);
                AppError::from(e)
            })?;
        Ok(result.deleted_count)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    async fn shutdown(&self) {
        tracing::info!("Closing MongoDB client");
        self.client.clone().shutdown().await;
    }
}
