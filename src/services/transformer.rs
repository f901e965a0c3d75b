// src/services/transformer.rs

//! Row-to-document transformation.
//!
//! Pure logic: no I/O happens here. The pipeline feeds rows in and persists
//! whatever comes out.

use csv::StringRecord;

use crate::error::RowError;
use crate::models::{Attribute, ColumnIndex, GemDocument, GemRecord};

/// Cut values shown under a different name in the description.
const CUT_DISPLAY_ALIASES: &[(&str, &str)] = &[("Brilliant", "RoundBrilliant")];

/// Transform one data row.
///
/// - `Ok(None)`: spacer row (blank identifier), neither produced nor counted
/// - `Ok(Some((id, doc)))`: document ready to persist under `id`
/// - `Err(_)`: row is skipped and counted
pub fn transform_row(
    index: &ColumnIndex,
    row: &StringRecord,
) -> Result<Option<(String, GemDocument)>, RowError> {
    let Some(record) = GemRecord::from_row(index, row)? else {
        return Ok(None);
    };
    let document = build_document(&record)?;
    Ok(Some((record.id, document)))
}

/// Validate a record and map it to a document.
pub fn build_document(record: &GemRecord) -> Result<GemDocument, RowError> {
    let color = record.resolved_color();

    let required = [
        ("name", record.name.as_str()),
        ("color", color),
        ("cut", record.cut.as_str()),
        ("carat", record.carat.as_str()),
        ("clarity", record.clarity.as_str()),
        ("rarity", record.rarity.as_str()),
        ("image", record.image.as_str()),
        ("animation_url", record.animation_url.as_str()),
    ];
    let blank: Vec<&'static str> = required
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| *field)
        .collect();
    if !blank.is_empty() {
        return Err(RowError::MissingFields {
            id: record.id.clone(),
            fields: blank,
        });
    }

    let carat: i64 = record.carat.parse().map_err(|_| RowError::InvalidCarat {
        id: record.id.clone(),
        value: record.carat.clone(),
    })?;

    Ok(GemDocument {
        name: record.name.clone(),
        description: describe(&record.cut, color),
        attributes: vec![
            Attribute::new("Cut", record.cut.as_str()),
            Attribute::new("Color", color),
            Attribute::new("Carat", carat),
            Attribute::new("Clarity", record.clarity.as_str()),
            Attribute::new("Rarity", record.rarity.as_str()),
        ],
        image: record.image.clone(),
        animation_url: record.animation_url.clone(),
    })
}

/// Human-readable description for a cut and resolved colour.
pub fn describe(cut: &str, color: &str) -> String {
    let cut_display = CUT_DISPLAY_ALIASES
        .iter()
        .find(|(from, _)| *from == cut)
        .map_or(cut, |&(_, to)| to);
    format!("A unique {cut_display} cut gemstone in {color} color.")
}
