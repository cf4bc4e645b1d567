//! Decoding of catalog JSON into core entities.
//!
//! Records are first validated against a typed schema in which every optional
//! field is an `Option`; defaults are then substituted field by field:
//!
//! | entity    | field           | default     |
//! |-----------|-----------------|-------------|
//! | character | `name`          | `"Unknown"` |
//! | character | `status`        | `"unknown"` |
//! | character | `species`       | `"unknown"` |
//! | character | `image`         | `""`        |
//! | character | `location.name` | `"unknown"` |
//! | character | `episode`       | `[]`        |
//! | episode   | `name`          | `"Unknown"` |
//! | episode   | `air_date`      | `"Unknown"` |
//! | episode   | `episode`       | `"Unknown"` |
//! | episode   | `characters`    | `[]`        |
//!
//! A missing or null field and a missing or null parent object are treated
//! alike. `id` is required and its absence is a [`DecodeError`].

use catalog_core::{
    Character, EntityId, Episode, PageEnvelope, PageInfo, UNKNOWN_ATTRIBUTE, UNKNOWN_LOCATION,
    UNKNOWN_TITLE,
};
use serde::Deserialize;
use serde_json::Value;

use crate::{Collection, FailureKind, FetchError};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("response body is not valid JSON: {0}")]
    Json(String),
    #[error("malformed {entity} record: {message}")]
    Record {
        entity: &'static str,
        message: String,
    },
    #[error("expected {expected}, found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },
}

impl From<DecodeError> for FetchError {
    fn from(err: DecodeError) -> Self {
        FetchError::new(FailureKind::Decode, err.to_string())
    }
}

/// An entity that lives in a catalog collection and can be decoded from one
/// JSON record.
pub trait CatalogEntity: Sized {
    const COLLECTION: Collection;

    fn decode(record: &Value) -> Result<Self, DecodeError>;
}

impl CatalogEntity for Character {
    const COLLECTION: Collection = Collection::Character;

    fn decode(record: &Value) -> Result<Self, DecodeError> {
        decode_character(record)
    }
}

impl CatalogEntity for Episode {
    const COLLECTION: Collection = Collection::Episode;

    fn decode(record: &Value) -> Result<Self, DecodeError> {
        decode_episode(record)
    }
}

#[derive(Debug, Deserialize)]
struct CharacterRecord {
    id: EntityId,
    name: Option<String>,
    status: Option<String>,
    species: Option<String>,
    image: Option<String>,
    location: Option<LocationRecord>,
    episode: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct LocationRecord {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EpisodeRecord {
    id: EntityId,
    name: Option<String>,
    air_date: Option<String>,
    episode: Option<String>,
    characters: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct PageRecord {
    info: Option<InfoRecord>,
    results: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct InfoRecord {
    count: Option<u32>,
    pages: Option<u32>,
    next: Option<String>,
    prev: Option<String>,
}

pub fn decode_character(record: &Value) -> Result<Character, DecodeError> {
    let record = CharacterRecord::deserialize(record).map_err(|err| DecodeError::Record {
        entity: "character",
        message: err.to_string(),
    })?;

    let location_name = record
        .location
        .and_then(|location| location.name)
        .unwrap_or_else(|| UNKNOWN_LOCATION.to_owned());

    Ok(
        Character::new(record.id, or_default(record.name, UNKNOWN_TITLE))
            .with_status(or_default(record.status, UNKNOWN_ATTRIBUTE))
            .with_species(or_default(record.species, UNKNOWN_ATTRIBUTE))
            .with_image(record.image.unwrap_or_default())
            .with_location_name(location_name)
            .with_episode_refs(record.episode.unwrap_or_default()),
    )
}

pub fn decode_episode(record: &Value) -> Result<Episode, DecodeError> {
    let record = EpisodeRecord::deserialize(record).map_err(|err| DecodeError::Record {
        entity: "episode",
        message: err.to_string(),
    })?;

    Ok(Episode::new(record.id, or_default(record.name, UNKNOWN_TITLE))
        .with_air_date(or_default(record.air_date, UNKNOWN_TITLE))
        .with_code(or_default(record.episode, UNKNOWN_TITLE))
        .with_character_refs(record.characters.unwrap_or_default()))
}

/// Decode a list-endpoint body `{info, results}`.
pub fn decode_page<T: CatalogEntity>(body: &str) -> Result<PageEnvelope<T>, DecodeError> {
    let value = parse_json(body)?;
    if !value.is_object() {
        return Err(DecodeError::UnexpectedShape {
            expected: "page object",
            found: shape_name(&value),
        });
    }
    let page = PageRecord::deserialize(&value).map_err(|err| DecodeError::Record {
        entity: "page",
        message: err.to_string(),
    })?;

    let info = page.info.map(|info| PageInfo {
        count: info.count.unwrap_or_default(),
        pages: info.pages.unwrap_or_default(),
        next: info.next,
        prev: info.prev,
    });
    let results = page
        .results
        .unwrap_or_default()
        .iter()
        .map(T::decode)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PageEnvelope { info, results })
}

/// Decode a single-entity body.
pub fn decode_record<T: CatalogEntity>(body: &str) -> Result<T, DecodeError> {
    let value = parse_json(body)?;
    if !value.is_object() {
        return Err(DecodeError::UnexpectedShape {
            expected: "record",
            found: shape_name(&value),
        });
    }
    T::decode(&value)
}

/// Decode a batched-lookup body. The server unwraps a batch of one into a
/// bare record, so both a list and a single object are accepted.
pub fn decode_batch<T: CatalogEntity>(body: &str) -> Result<Vec<T>, DecodeError> {
    match parse_json(body)? {
        Value::Array(records) => records.iter().map(T::decode).collect(),
        record @ Value::Object(_) => Ok(vec![T::decode(&record)?]),
        other => Err(DecodeError::UnexpectedShape {
            expected: "list or record",
            found: shape_name(&other),
        }),
    }
}

fn parse_json(body: &str) -> Result<Value, DecodeError> {
    serde_json::from_str(body).map_err(|err| DecodeError::Json(err.to_string()))
}

fn or_default(value: Option<String>, default: &str) -> String {
    value.unwrap_or_else(|| default.to_owned())
}

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "record",
    }
}
