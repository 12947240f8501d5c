//! Serde helpers for rows returned by the hosted store

use serde::{Deserialize, Deserializer};

/// Deserialize an identifier column that may be text (uuid) or an integer.
///
/// The hosted tables are not consistent about key types, and the client only
/// ever echoes ids back, so they are kept as strings.
pub fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
    })
}
