// Catalog API response types.
// Defines the three resource entities and normalization for the two
// list shapes the upstream APIs have shipped (bare array vs. wrapped).

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::error::{DuffError, Result};

/// One of the three independent catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    Characters,
    Episodes,
    Locations,
}

impl Resource {
    /// Collection endpoint for this resource.
    pub fn url(&self) -> &'static str {
        match self {
            Resource::Characters => "https://thesimpsonsapi.com/api/characters?limit=50",
            Resource::Episodes => "https://api.sampleapis.com/simpsons/episodes",
            Resource::Locations => "https://api.sampleapis.com/simpsons/products",
        }
    }

    /// Items shown per page in the list view.
    pub fn page_size(&self) -> usize {
        match self {
            Resource::Characters => 20,
            Resource::Episodes => 18,
            Resource::Locations => 16,
        }
    }
}

/// A Simpsons character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub portrait_path: Option<String>,
    /// Stringified id, stamped when the item is favorited.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub fav_id: Option<String>,
}

/// An episode of the show.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub season: u32,
    #[serde(default)]
    pub episode: u32,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(rename = "originalAirDate", default)]
    pub original_air_date: Option<String>,
    #[serde(rename = "thumbnailUrl", default)]
    pub thumbnail_url: Option<String>,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub fav_id: Option<String>,
}

impl Episode {
    /// Season/episode code, e.g. "S3E12". Searchable alongside the title.
    pub fn code(&self) -> String {
        format!("S{}E{}", self.season, self.episode)
    }
}

/// A product or location from the show.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub fav_id: Option<String>,
}

/// Normalize a list response into `Vec<T>`.
///
/// The upstream APIs have returned both a bare array and an object wrapping
/// the list under `results` (older revisions used `docs`). Views never see
/// the difference; it is resolved here at the fetch boundary.
pub fn parse_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>> {
    match value {
        Value::Array(_) => Ok(serde_json::from_value(value)?),
        Value::Object(mut map) => {
            let items = map
                .remove("results")
                .or_else(|| map.remove("docs"))
                .ok_or_else(|| {
                    DuffError::Shape("object response without a results/docs list".to_string())
                })?;
            match items {
                Value::Array(_) => Ok(serde_json::from_value(items)?),
                other => Err(DuffError::Shape(format!(
                    "results field is not an array (got {})",
                    type_name(&other)
                ))),
            }
        }
        other => Err(DuffError::Shape(format!(
            "expected array or object, got {}",
            type_name(&other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_bare_array() {
        let value = json!([
            { "id": 1, "name": "Homer Simpson", "occupation": "Safety Inspector" },
            { "id": 2, "name": "Marge Simpson" }
        ]);

        let characters: Vec<Character> = parse_list(value).unwrap();
        assert_eq!(characters.len(), 2);
        assert_eq!(characters[0].name, "Homer Simpson");
        assert_eq!(
            characters[0].occupation.as_deref(),
            Some("Safety Inspector")
        );
        assert!(characters[1].occupation.is_none());
    }

    #[test]
    fn test_parse_results_wrapper() {
        let value = json!({
            "count": 1,
            "next": null,
            "pages": 1,
            "results": [{ "id": 7, "name": "Ned Flanders", "status": "Alive" }]
        });

        let characters: Vec<Character> = parse_list(value).unwrap();
        assert_eq!(characters.len(), 1);
        assert_eq!(characters[0].id, 7);
    }

    #[test]
    fn test_parse_docs_wrapper() {
        let value = json!({
            "docs": [{ "id": 3, "title": "Duff Beer" }],
            "totalDocs": 1
        });

        let products: Vec<Product> = parse_list(value).unwrap();
        assert_eq!(products[0].title, "Duff Beer");
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        assert!(parse_list::<Product>(json!(42)).is_err());
        assert!(parse_list::<Product>(json!({ "items": [] })).is_err());
        assert!(parse_list::<Product>(json!({ "results": "nope" })).is_err());
    }

    #[test]
    fn test_episode_code() {
        let episode: Episode = serde_json::from_value(json!({
            "id": 12,
            "name": "Marge vs. the Monorail",
            "season": 4,
            "episode": 12
        }))
        .unwrap();
        assert_eq!(episode.code(), "S4E12");
    }

    #[test]
    fn test_fav_id_round_trip() {
        let mut character: Character = serde_json::from_value(json!({
            "id": 42,
            "name": "Troy McClure"
        }))
        .unwrap();
        assert!(character.fav_id.is_none());

        character.fav_id = Some(character.id.to_string());
        let json = serde_json::to_value(&character).unwrap();
        assert_eq!(json["_id"], "42");

        let back: Character = serde_json::from_value(json).unwrap();
        assert_eq!(back.fav_id.as_deref(), Some("42"));
    }
}
