#![allow(dead_code)]

use serde_json::Value;
use std::sync::Arc;
use stuff_service::config::StuffConfig;
use stuff_service::services::InMemoryItemStore;
use stuff_service::startup::Application;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: InMemoryItemStore,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the real HTTP server on a random port over an in-memory store.
    pub async fn spawn() -> Self {
        let mut config = StuffConfig::load().expect("Failed to load configuration");
        config.common.port = 0; // Random port for testing

        let store = InMemoryItemStore::new();
        let app = Application::build_with_store(config, Arc::new(store.clone()))
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept connections
        let client = reqwest::Client::new();
        let probe_url = format!("{}/test", address);
        for _ in 0..50 {
            if client.get(&probe_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            store,
            client,
        }
    }

    pub async fn create_item(&self, payload: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}/stuff", self.address))
            .json(payload)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_item(&self, id: &str) -> reqwest::Response {
        self.client
            .get(format!("{}/stuff/{}", self.address, id))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn list_items(&self) -> reqwest::Response {
        self.client
            .get(format!("{}/stuff", self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete_item(&self, id: &str) -> reqwest::Response {
        self.client
            .delete(format!("{}/stuff/{}", self.address, id))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Create an item and return its assigned id.
    pub async fn seed_item(&self, payload: &Value) -> String {
        let response = self.create_item(payload).await;
        assert_eq!(response.status().as_u16(), 201);
        let body: Value = response.json().await.expect("Failed to parse JSON");
        body["id"].as_str().expect("Missing id").to_string()
    }
}

pub fn is_object_id_hex(s: &str) -> bool {
    s.len() == 24 && s.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
}
