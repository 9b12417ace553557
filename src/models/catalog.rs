use chrono::Utc;
use serde::Serialize;

/// A model known to the upstream service. The catalog is fixed at compile
/// time; requests naming any other id are rejected before dispatch.
#[derive(Debug, Clone)]
pub struct ModelEntry {
    pub id: &'static str,
    pub owned_by: &'static str,
    /// The model is tuned for English prompts; non-ASCII prompts degrade
    /// output quality and trigger an advisory warning.
    pub prefers_ascii_prompts: bool,
}

pub static MODEL_CATALOG: &[ModelEntry] = &[
    ModelEntry {
        id: "eyedance-qwen-image",
        owned_by: "lzA6",
        prefers_ascii_prompts: false,
    },
    ModelEntry {
        id: "Flux-Krea",
        owned_by: "lzA6",
        prefers_ascii_prompts: true,
    },
];

pub fn find_model(id: &str) -> Option<&'static ModelEntry> {
    MODEL_CATALOG.iter().find(|entry| entry.id == id)
}

pub fn known_model_ids() -> Vec<&'static str> {
    MODEL_CATALOG.iter().map(|entry| entry.id).collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelCard {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub owned_by: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelList {
    pub object: String,
    pub data: Vec<ModelCard>,
}

pub fn model_list() -> ModelList {
    let created = Utc::now().timestamp();
    ModelList {
        object: "list".to_string(),
        data: MODEL_CATALOG
            .iter()
            .map(|entry| ModelCard {
                id: entry.id.to_string(),
                object: "model".to_string(),
                created,
                owned_by: entry.owned_by.to_string(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_known_model() {
        let entry = find_model("Flux-Krea").unwrap();
        assert!(entry.prefers_ascii_prompts);
        assert_eq!(entry.owned_by, "lzA6");

        let default_entry = find_model("eyedance-qwen-image").unwrap();
        assert!(!default_entry.prefers_ascii_prompts);
    }

    #[test]
    fn test_unknown_model_is_absent() {
        assert!(find_model("dall-e-3").is_none());
        assert!(find_model("").is_none());
    }

    #[test]
    fn test_model_list_matches_catalog() {
        let list = model_list();
        assert_eq!(list.object, "list");
        assert_eq!(list.data.len(), MODEL_CATALOG.len());
        for card in &list.data {
            assert_eq!(card.object, "model");
            assert!(find_model(&card.id).is_some());
        }
    }
}
