use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// One content item from an Agility `list` query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "contentID")]
    pub content_id: i64,
    pub fields: PostFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostFields {
    pub title: String,
    pub slug: String,
    /// ISO-8601 timestamp as sent by the CMS.
    pub date: String,
    /// Raw HTML body.
    pub content: String,
}

/// Response envelope of the content list endpoint. Other keys
/// (`totalCount`, item `properties`, `seo`) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentList {
    pub items: Vec<Post>,
}

// Only JSON objects are accepted for the envelope, each item and its
// `fields`. A non-array `items` renders as an empty page; a malformed item
// inside an array still fails the whole envelope.
impl<'de> Deserialize<'de> for ContentList {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut envelope = match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Object(envelope) => envelope,
            other => {
                return Err(D::Error::custom(format!(
                    "expected content list object, got {}",
                    json_type_name(&other)
                )))
            }
        };

        let items = match envelope.remove("items") {
            Some(serde_json::Value::Array(items)) => items,
            Some(other) => {
                tracing::warn!(
                    "Content list `items` is not an array (got {}), rendering no posts",
                    json_type_name(&other)
                );
                return Ok(Self { items: Vec::new() });
            }
            None => return Err(D::Error::missing_field("items")),
        };

        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| post_from_value(index, item).map_err(D::Error::custom))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(|items| Self { items })
    }
}

fn post_from_value(index: usize, item: serde_json::Value) -> std::result::Result<Post, String> {
    if !item.is_object() {
        return Err(format!(
            "items[{}]: expected object, got {}",
            index,
            json_type_name(&item)
        ));
    }
    if let Some(fields) = item.get("fields").filter(|fields| !fields.is_object()) {
        return Err(format!(
            "items[{}].fields: expected object, got {}",
            index,
            json_type_name(fields)
        ));
    }
    serde_json::from_value(item).map_err(|e| format!("items[{}]: {}", index, e))
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// A post after its body went through the markup transform.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPost {
    pub content_id: i64,
    pub title: String,
    pub body_html: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_valid_envelope_ignores_extra_keys() {
        let payload = json!({
            "items": [{
                "contentID": 1,
                "properties": {"state": 2, "referenceName": "posts"},
                "fields": {
                    "title": "A",
                    "slug": "a",
                    "date": "2024-01-01",
                    "content": "<p>x</p>",
                    "image": {"url": "https://cdn.example.com/a.png"}
                },
                "seo": null
            }],
            "totalCount": 1
        });

        let list: ContentList = serde_json::from_value(payload).unwrap();
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].content_id, 1);
        assert_eq!(list.items[0].fields.title, "A");
        assert_eq!(list.items[0].fields.content, "<p>x</p>");
    }

    #[test]
    fn test_missing_date_is_rejected() {
        let payload = json!({
            "items": [{
                "contentID": 1,
                "fields": {"title": "A", "slug": "a", "content": "<p>x</p>"}
            }]
        });
        let err = serde_json::from_value::<ContentList>(payload).unwrap_err();
        assert!(err.to_string().contains("date"));
    }

    #[test]
    fn test_string_content_id_is_rejected() {
        let payload = json!({
            "items": [{
                "contentID": "1",
                "fields": {"title": "A", "slug": "a", "date": "2024-01-01", "content": ""}
            }]
        });
        assert!(serde_json::from_value::<ContentList>(payload).is_err());
    }

    #[test]
    fn test_missing_items_is_rejected() {
        assert!(serde_json::from_value::<ContentList>(json!({"totalCount": 0})).is_err());
    }

    #[test]
    fn test_non_array_items_falls_back_to_empty() {
        for items in [json!({"0": 1}), json!("posts"), json!(null), json!(3)] {
            let list: ContentList = serde_json::from_value(json!({ "items": items })).unwrap();
            assert!(list.items.is_empty());
        }
    }

    #[test]
    fn test_array_envelope_is_rejected() {
        assert!(serde_json::from_str::<ContentList>("[1]").is_err());
        assert!(serde_json::from_str::<ContentList>("[[]]").is_err());
    }

    #[test]
    fn test_array_shaped_item_is_rejected() {
        let payload = json!({ "items": [[7, ["T", "s", "d", "<p>x</p>"]]] });
        let err = serde_json::from_value::<ContentList>(payload).unwrap_err();
        assert!(err.to_string().contains("items[0]"));

        let payload = json!({ "items": [{"contentID": 7, "fields": ["T", "s", "d", "<p>x</p>"]}] });
        let err = serde_json::from_value::<ContentList>(payload).unwrap_err();
        assert!(err.to_string().contains("items[0].fields"));
    }

    #[test]
    fn test_empty_items() {
        let list: ContentList = serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert!(list.items.is_empty());
    }
}
