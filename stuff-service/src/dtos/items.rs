use crate::models::Item;
use serde::{Deserialize, Serialize};

/// Body of `POST /stuff`. Unknown fields, including any client-chosen `id`, are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct CreateItemRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id.to_string(),
            title: item.title,
            body: item.body,
        }
    }
}
