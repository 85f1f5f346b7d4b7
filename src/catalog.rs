//! The synthetic model catalog served at `/v1/models`.
//!
//! A static, hardcoded list in the OpenAI list shape so that client libraries
//! which enumerate models before use keep working. The upstream's own model
//! listing is not consulted.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ModelEntry {
    pub id: &'static str,
    pub object: &'static str, // "model"
    pub created: u64,
    pub owned_by: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelList {
    pub object: &'static str, // "list"
    pub data: Vec<ModelEntry>,
}

// Release-date epochs for the advertised models.
const CATALOG: &[(&str, u64)] = &[
    ("claude-3-7-sonnet-20250219", 1_739_923_200),
    ("claude-3-5-sonnet-20241022", 1_729_555_200),
    ("claude-3-5-sonnet-20240620", 1_718_841_600),
    ("claude-3-5-haiku-20241022", 1_729_555_200),
    ("claude-3-opus-20240229", 1_709_164_800),
    ("claude-3-sonnet-20240229", 1_709_164_800),
    ("claude-3-haiku-20240307", 1_709_769_600),
];

/// Build the catalog document.
#[must_use]
pub fn model_list() -> ModelList {
    ModelList {
        object: "list",
        data: CATALOG
            .iter()
            .map(|&(id, created)| ModelEntry {
                id,
                object: "model",
                created,
                owned_by: "anthropic",
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shape() {
        let list = model_list();
        assert_eq!(list.object, "list");
        assert!(!list.data.is_empty());

        for entry in &list.data {
            assert_eq!(entry.object, "model");
            assert_eq!(entry.owned_by, "anthropic");
            assert!(entry.created > 0);
            assert!(entry.id.starts_with("claude-"));
        }
    }

    #[test]
    fn test_catalog_serializes_like_openai_list() {
        let json = serde_json::to_value(model_list()).unwrap();
        assert_eq!(json["object"], "list");
        assert_eq!(json["data"][0]["object"], "model");
        assert!(json["data"][0]["id"].is_string());
    }
}
