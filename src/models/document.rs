//! Gem metadata document written to `{ID}.json`.

use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::Result;

/// Display metadata for one catalogue item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GemDocument {
    /// Display name
    pub name: String,

    /// Generated sentence from cut and colour
    pub description: String,

    /// Cut, Color, Carat, Clarity, Rarity (in that order)
    pub attributes: Vec<Attribute>,

    /// Image reference
    pub image: String,

    /// Animation reference
    pub animation_url: String,
}

/// A `(trait_type, value)` pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attribute {
    pub trait_type: String,
    pub value: TraitValue,
}

impl Attribute {
    pub fn new(trait_type: &str, value: impl Into<TraitValue>) -> Self {
        Self {
            trait_type: trait_type.to_string(),
            value: value.into(),
        }
    }
}

/// Trait values are strings except Carat, which is emitted as a JSON integer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum TraitValue {
    Number(i64),
    Text(String),
}

impl From<&str> for TraitValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for TraitValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl GemDocument {
    /// Serialize with 4-space indentation and no trailing newline.
    ///
    /// `serde_json` leaves non-ASCII text unescaped, so names in any script
    /// are written verbatim.
    pub fn to_pretty_json(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        self.serialize(&mut ser)?;
        Ok(buf)
    }
}
