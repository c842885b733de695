//! Data model shared by the playlist pipeline and the web layer
//!
//! Field names follow the Stremio addon protocol so the structs serialize
//! straight into response bodies.

use serde::{Deserialize, Serialize, Serializer};

use crate::config::AddonConfig;

/// Prefix of every synthetic entry identifier
pub const ID_PREFIX: &str = "vod-";

/// Content type assigned to every entry
pub const CONTENT_TYPE_MOVIE: &str = "movie";

/// One playable unit derived from an `#EXTINF` line and the URL line after it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub name: String,
    pub poster: String,
    pub description: String,
    pub url: String,
}

impl Entry {
    /// Stream reference for this entry
    pub fn stream(&self) -> StreamRef {
        StreamRef {
            url: self.url.clone(),
            title: self.name.clone(),
        }
    }
}

/// Build the identifier for the `sequence`-th committed entry (1-based)
pub fn entry_id(sequence: usize) -> String {
    format!("{ID_PREFIX}{sequence}")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamRef {
    pub url: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogResponse {
    pub metas: Vec<Entry>,
}

/// Meta response; a miss serializes as `{"meta":{}}`
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetaResponse {
    #[serde(serialize_with = "serialize_or_empty_object")]
    pub meta: Option<Entry>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StreamResponse {
    pub streams: Vec<StreamRef>,
}

fn serialize_or_empty_object<S>(value: &Option<Entry>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(entry) => entry.serialize(serializer),
        None => serde_json::Map::new().serialize(serializer),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ManifestCatalog {
    #[serde(rename = "type")]
    pub content_type: String,
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorHints {
    pub configurable: bool,
    pub configuration_required: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub id: String,
    pub version: String,
    pub name: String,
    pub description: String,
    pub resources: Vec<String>,
    pub types: Vec<String>,
    pub catalogs: Vec<ManifestCatalog>,
    pub id_prefixes: Vec<String>,
    pub behavior_hints: BehaviorHints,
}

impl Manifest {
    pub fn from_config(addon: &AddonConfig) -> Self {
        Self {
            id: addon.id.clone(),
            version: addon.version.clone(),
            name: addon.name.clone(),
            description: addon.description.clone(),
            resources: vec!["catalog".into(), "meta".into(), "stream".into()],
            types: vec![CONTENT_TYPE_MOVIE.to_string()],
            catalogs: vec![ManifestCatalog {
                content_type: CONTENT_TYPE_MOVIE.to_string(),
                id: addon.catalog_id.clone(),
                name: addon.catalog_name.clone(),
            }],
            id_prefixes: vec![ID_PREFIX.to_string()],
            behavior_hints: BehaviorHints {
                configurable: true,
                configuration_required: false,
            },
        }
    }

    /// Whether `content_type`/`catalog_id` name the catalog this addon publishes
    pub fn serves_catalog(&self, content_type: &str, catalog_id: &str) -> bool {
        self.catalogs
            .iter()
            .any(|c| c.content_type == content_type && c.id == catalog_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::json;

    fn sample_entry() -> Entry {
        Entry {
            id: entry_id(1),
            content_type: CONTENT_TYPE_MOVIE.to_string(),
            name: "Movie One".to_string(),
            poster: "https://dl.strem.io/addon-logo.png".to_string(),
            description: "Movie One".to_string(),
            url: "http://a/1.mp4".to_string(),
        }
    }

    #[test]
    fn test_entry_serializes_type_field() {
        let value = serde_json::to_value(sample_entry()).unwrap();
        assert_eq!(value["id"], "vod-1");
        assert_eq!(value["type"], "movie");
        assert!(value.get("content_type").is_none());
    }

    #[test]
    fn test_meta_miss_serializes_as_empty_object() {
        let value = serde_json::to_value(MetaResponse { meta: None }).unwrap();
        assert_eq!(value, json!({ "meta": {} }));

        let value = serde_json::to_value(MetaResponse {
            meta: Some(sample_entry()),
        })
        .unwrap();
        assert_eq!(value["meta"]["name"], "Movie One");
    }

    #[test]
    fn test_manifest_shape() {
        let manifest = Manifest::from_config(&Config::default().addon);
        let value = serde_json::to_value(&manifest).unwrap();

        assert_eq!(value["id"], "org.vodplaylist.sid");
        assert_eq!(value["resources"], json!(["catalog", "meta", "stream"]));
        assert_eq!(value["idPrefixes"], json!(["vod-"]));
        assert_eq!(value["catalogs"][0]["type"], "movie");
        assert_eq!(value["behaviorHints"]["configurable"], true);
        assert_eq!(value["behaviorHints"]["configurationRequired"], false);
    }

    #[test]
    fn test_serves_catalog() {
        let manifest = Manifest::from_config(&Config::default().addon);
        assert!(manifest.serves_catalog("movie", "vod-playlist"));
        assert!(!manifest.serves_catalog("series", "vod-playlist"));
        assert!(!manifest.serves_catalog("movie", "other"));
    }
}
