//! Lenient field deserializers for API payloads.
//!
//! The API is inconsistent about identifier types (numbers in some
//! endpoints, strings in others) and about skills (a list, or one
//! comma-separated string). These helpers normalize both.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Str(String),
    Int(i64),
    UInt(u64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Str(s) => s,
            RawId::Int(n) => n.to_string(),
            RawId::UInt(n) => n.to_string(),
        }
    }
}

pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    RawId::deserialize(deserializer).map(String::from)
}

pub fn opt_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSkills {
    List(Vec<String>),
    Line(String),
}

/// Split a comma-separated skills line into trimmed, non-empty entries.
pub fn split_skills(line: &str) -> Vec<String> {
    line.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn normalize(raw: RawSkills) -> Vec<String> {
    match raw {
        RawSkills::List(list) => list
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        RawSkills::Line(line) => split_skills(&line),
    }
}

pub fn skills<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<RawSkills>::deserialize(deserializer)?
        .map(normalize)
        .unwrap_or_default())
}

pub fn opt_skills<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    Ok(Option::<RawSkills>::deserialize(deserializer)?.map(normalize))
}
