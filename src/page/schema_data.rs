//! Page-declared Schema.org data.
//!
//! ```toml
//! [page.seo.schema_data]
//! types = ["Article", "FAQPage"]
//!
//! [page.seo.schema_data.properties.Article]
//! author = { "@type" = "Person", name = "Jane Doe" }
//! ```
//!
//! The same structure may also be given as a JSON string, which is parsed
//! leniently: anything that is not a JSON object yields the empty default.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::JsonMap;

/// JSON written for an empty [`SchemaData`].
const EMPTY_JSON: &str = r#"{"types":[],"properties":{}}"#;

/// Schema types a page declares, plus per-type override properties.
///
/// Both keys are always present; missing ones default to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemaData {
    pub types: Vec<String>,
    pub properties: JsonMap,
}

impl SchemaData {
    /// Parse editor input, falling back to the empty default on any problem.
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw.trim()) {
            Ok(Value::Object(object)) => Self::from_object(object),
            _ => Self::default(),
        }
    }

    fn from_object(mut object: JsonMap) -> Self {
        let types = match object.remove("types") {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(ty) => Some(ty),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };
        let properties = match object.remove("properties") {
            Some(Value::Object(properties)) => properties,
            _ => JsonMap::new(),
        };
        Self { types, properties }
    }

    /// Serialize for storage; always an object with both keys.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| EMPTY_JSON.to_string())
    }

    /// Override mapping for `ty`, if one is declared and is an object.
    pub fn properties_for(&self, ty: &str) -> Option<&JsonMap> {
        self.properties.get(ty).and_then(Value::as_object)
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.properties.is_empty()
    }
}

impl<'de> Deserialize<'de> for SchemaData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Json(String),
            Object(JsonMap),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Json(raw) => Self::from_json(&raw),
            Raw::Object(object) => Self::from_object(object),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_valid() {
        let data = SchemaData::from_json(
            r#"{"types": ["Article"], "properties": {"Article": {"headline": "X"}}}"#,
        );
        assert_eq!(data.types, ["Article"]);
        assert_eq!(
            data.properties_for("Article"),
            json!({"headline": "X"}).as_object()
        );
    }

    #[test]
    fn test_from_json_lenient() {
        for raw in ["", "   ", "not json", "[1,2]", "\"Article\"", "{\"types\": 3}"] {
            assert_eq!(SchemaData::from_json(raw), SchemaData::default(), "{raw:?}");
        }
    }

    #[test]
    fn test_from_json_fills_missing_keys() {
        let data = SchemaData::from_json(r#"{"types": ["Product", 7]}"#);
        assert_eq!(data.types, ["Product"]);
        assert!(data.properties.is_empty());
    }

    #[test]
    fn test_to_json_has_both_keys() {
        assert_eq!(SchemaData::default().to_json(), EMPTY_JSON);
    }

    #[test]
    fn test_deserialize_from_toml_table_or_string() {
        #[derive(Deserialize)]
        struct Doc {
            a: SchemaData,
            b: SchemaData,
        }
        let doc: Doc = toml::from_str(
            r#"
b = '{"types": ["Event"]}'

[a]
types = ["Article"]

[a.properties.Article]
author = { "@type" = "Person", name = "Jane" }
"#,
        )
        .unwrap();

        assert_eq!(doc.a.types, ["Article"]);
        assert_eq!(
            doc.a.properties_for("Article").unwrap()["author"]["name"],
            "Jane"
        );
        assert_eq!(doc.b.types, ["Event"]);
    }

    #[test]
    fn test_properties_for_ignores_non_objects() {
        let data = SchemaData::from_json(r#"{"types": [], "properties": {"Article": 5}}"#);
        assert!(data.properties_for("Article").is_none());
    }
}
