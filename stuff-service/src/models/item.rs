use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Store-generated identifier of an [`Item`].
///
/// Wraps the native ObjectId; its external form is 24 lowercase hex characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(ObjectId);

#[derive(Debug, Error)]
#[error("invalid item id '{input}': expected 24 hex characters")]
pub struct InvalidItemId {
    pub input: String,
}

impl ItemId {
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for ItemId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl FromStr for ItemId {
    type Err = InvalidItemId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s).map(Self).map_err(|_| InvalidItemId {
            input: s.to_string(),
        })
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

/// A stored document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "_id")]
    pub id: ItemId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl Item {
    /// Builds a new item with a freshly generated id.
    pub fn new(title: Option<String>, body: Option<String>) -> Self {
        Self {
            id: ItemId::new(),
            title,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn test_item_id_display_is_24_lowercase_hex() {
        let id = ItemId::new();
        let s = id.to_string();
        assert_eq!(s.len(), 24);
        assert!(s.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_item_id_parses_its_own_display() {
        let id = ItemId::new();
        let parsed: ItemId = id.to_string().parse().expect("Failed to parse id");
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_item_id_rejects_malformed_input() {
        for input in ["", "not-an-id", "507f1f77bcf86cd79943901", "zzzzzzzzzzzzzzzzzzzzzzzz"] {
            let err = input.parse::<ItemId>().unwrap_err();
            assert_eq!(err.input, input);
        }
    }

    #[test]
    fn test_fresh_ids_are_unique() {
        assert_ne!(ItemId::new(), ItemId::new());
    }

    #[test]
    fn test_item_serializes_to_bson_with_object_id_and_omits_absent_fields() {
        let item = Item::new(Some("a".to_string()), None);
        let document = bson::to_document(&item).expect("Failed to serialize item");

        assert_eq!(
            document.get_object_id("_id").expect("missing _id"),
            item.id.as_object_id()
        );
        assert_eq!(document.get_str("title").expect("missing title"), "a");
        assert!(!document.contains_key("body"));
    }

    #[test]
    fn test_item_decodes_document_without_optional_fields() {
        let oid = ObjectId::new();
        let document = bson::doc! { "_id": oid };
        let item: Item = bson::from_document(document).expect("Failed to decode item");

        assert_eq!(item.id, ItemId::from(oid));
        assert_eq!(item.title, None);
        assert_eq!(item.body, None);
    }
}
