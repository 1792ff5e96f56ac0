//! Marvel API wire schema.
//!
//! Only the fields the domain models need are kept; serde drops the rest of
//! the envelope (copyright, etags, collection URIs, ...) on the floor.

use serde::Deserialize;

use super::types::{CharacterRecord, EventRecord};

/// Top-level response envelope shared by every Marvel listing endpoint.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub code: i64,
    pub status: String,
    pub data: PageData<T>,
}

/// One page of a paginated listing.
#[derive(Debug, Deserialize)]
pub struct PageData<T> {
    pub offset: u32,
    pub limit: u32,
    pub total: u32,
    pub count: u32,
    pub results: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub path: String,
    #[serde(rename = "extension")]
    pub extension: String,
}

impl Thumbnail {
    /// Full image URL with the scheme forced to https.
    ///
    /// The API hands out `http:` paths with the extension split off; clients
    /// on mobile transports reject cleartext, so the scheme is rewritten.
    pub fn secure_url(&self) -> String {
        format!("{}.{}", self.path.replacen("http:", "https:", 1), self.extension)
    }
}

#[derive(Debug, Deserialize)]
pub struct CharacterResult {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub thumbnail: Thumbnail,
}

impl From<CharacterResult> for CharacterRecord {
    fn from(result: CharacterResult) -> Self {
        let image_url = result.thumbnail.secure_url();
        Self {
            id: result.id,
            name: result.name,
            image_url,
            bio: result.description.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EventResult {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub thumbnail: Thumbnail,
}

impl From<EventResult> for EventRecord {
    fn from(result: EventResult) -> Self {
        let image_url = result.thumbnail.secure_url();
        Self {
            name: result.title,
            image_url,
            description: result.description.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thumbnail_forces_https() {
        let thumb = Thumbnail {
            path: "http://i.annihil.us/u/prod/marvel/i/mg/c/e0/hulk".to_string(),
            extension: "jpg".to_string(),
        };
        assert_eq!(
            thumb.secure_url(),
            "https://i.annihil.us/u/prod/marvel/i/mg/c/e0/hulk.jpg"
        );
    }

    #[test]
    fn test_thumbnail_keeps_https() {
        let thumb = Thumbnail {
            path: "https://i.annihil.us/a/b".to_string(),
            extension: "png".to_string(),
        };
        assert_eq!(thumb.secure_url(), "https://i.annihil.us/a/b.png");
    }

    #[test]
    fn test_character_translation_strips_wire_fields() {
        let body = r#"{
            "code": 200,
            "status": "Ok",
            "copyright": "(c) 2021 MARVEL",
            "data": {
                "offset": 0,
                "limit": 100,
                "total": 1559,
                "count": 1,
                "results": [{
                    "id": 1011334,
                    "name": "3-D Man",
                    "description": "",
                    "modified": "2014-04-29T14:18:17-0400",
                    "thumbnail": {
                        "path": "http://i.annihil.us/u/prod/marvel/i/mg/c/e0/535fecbbb9784",
                        "extension": "jpg"
                    },
                    "resourceURI": "http://gateway.marvel.com/v1/public/characters/1011334"
                }]
            }
        }"#;

        let envelope: Envelope<CharacterResult> = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.code, 200);
        assert_eq!(envelope.data.total, 1559);

        let record: CharacterRecord = envelope.data.results.into_iter().next().unwrap().into();
        assert_eq!(record.id, 1011334);
        assert_eq!(record.name, "3-D Man");
        assert_eq!(
            record.image_url,
            "https://i.annihil.us/u/prod/marvel/i/mg/c/e0/535fecbbb9784.jpg"
        );
        assert_eq!(record.bio, "");
    }

    #[test]
    fn test_event_translation_tolerates_null_description() {
        let body = r#"{
            "code": 200,
            "status": "Ok",
            "data": {
                "offset": 0,
                "limit": 20,
                "total": 1,
                "count": 1,
                "results": [{
                    "id": 116,
                    "title": "Acts of Vengeance!",
                    "description": null,
                    "thumbnail": {
                        "path": "http://i.annihil.us/u/prod/marvel/i/mg/9/40/51ca10d996b8b",
                        "extension": "jpg"
                    }
                }]
            }
        }"#;

        let envelope: Envelope<EventResult> = serde_json::from_str(body).unwrap();
        let record: EventRecord = envelope.data.results.into_iter().next().unwrap().into();
        assert_eq!(record.name, "Acts of Vengeance!");
        assert_eq!(record.description, "");
    }
}
