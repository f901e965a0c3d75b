//! Spreadsheet row model.
//!
//! The header row is resolved once into a [`ColumnIndex`]; each data row is
//! then parsed into a [`GemRecord`] in a single step that reports the first
//! required column it could not find.

use csv::StringRecord;

use crate::error::RowError;

/// The columns the sync reads. Any other column in the sheet is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Id,
    Name,
    Category,
    Color,
    Cut,
    Carat,
    Clarity,
    Rarity,
    Image,
    AnimationUrl,
}

impl Column {
    /// All required columns, in sheet order.
    pub const ALL: [Column; 10] = [
        Column::Id,
        Column::Name,
        Column::Category,
        Column::Color,
        Column::Cut,
        Column::Carat,
        Column::Clarity,
        Column::Rarity,
        Column::Image,
        Column::AnimationUrl,
    ];

    /// Exact header text in the sheet (case-sensitive).
    pub fn header(self) -> &'static str {
        match self {
            Column::Id => "ID",
            Column::Name => "名稱",
            Column::Category => "Category",
            Column::Color => "Color",
            Column::Cut => "Cut",
            Column::Carat => "Carat",
            Column::Clarity => "Clarity",
            Column::Rarity => "Rarity",
            Column::Image => "image",
            Column::AnimationUrl => "animation_url",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Header positions of the required columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnIndex {
    positions: [Option<usize>; 10],
}

impl ColumnIndex {
    /// Resolve positions from the header row.
    ///
    /// If a header appears more than once the last occurrence wins.
    pub fn from_headers(headers: &StringRecord) -> Self {
        let mut positions = [None; 10];
        for (pos, name) in headers.iter().enumerate() {
            if let Some(column) = Column::ALL.iter().find(|c| c.header() == name) {
                positions[column.slot()] = Some(pos);
            }
        }
        Self { positions }
    }

    /// Position of a column in the header, if present.
    pub fn position(&self, column: Column) -> Option<usize> {
        self.positions[column.slot()]
    }

    /// Required columns missing from the header.
    pub fn missing(&self) -> Vec<&'static str> {
        Column::ALL
            .iter()
            .filter(|c| self.position(**c).is_none())
            .map(|c| c.header())
            .collect()
    }

    /// Trimmed cell value, or `None` if the column is absent from the header
    /// or the row is too short to contain it.
    pub fn get<'r>(&self, record: &'r StringRecord, column: Column) -> Option<&'r str> {
        self.position(column)
            .and_then(|pos| record.get(pos))
            .map(str::trim)
    }
}

/// One spreadsheet row, trimmed. Values may still be blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GemRecord {
    pub id: String,
    pub name: String,
    pub category: String,
    pub color_code: String,
    pub cut: String,
    /// Raw carat text; coerced to an integer when the document is built
    pub carat: String,
    pub clarity: String,
    pub rarity: String,
    pub image: String,
    pub animation_url: String,
}

impl GemRecord {
    /// Parse a data row.
    ///
    /// Returns `Ok(None)` for spacer rows (identifier absent or blank).
    pub fn from_row(
        index: &ColumnIndex,
        record: &StringRecord,
    ) -> Result<Option<Self>, RowError> {
        let id = match index.get(record, Column::Id) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => return Ok(None),
        };

        let field = |column: Column| -> Result<String, RowError> {
            index
                .get(record, column)
                .map(str::to_string)
                .ok_or_else(|| RowError::MissingColumn {
                    id: id.clone(),
                    column: column.header(),
                })
        };

        Ok(Some(Self {
            name: field(Column::Name)?,
            category: field(Column::Category)?,
            color_code: field(Column::Color)?,
            cut: field(Column::Cut)?,
            carat: field(Column::Carat)?,
            clarity: field(Column::Clarity)?,
            rarity: field(Column::Rarity)?,
            image: field(Column::Image)?,
            animation_url: field(Column::AnimationUrl)?,
            id,
        }))
    }

    /// Category when present, otherwise the raw colour code.
    pub fn resolved_color(&self) -> &str {
        if self.category.is_empty() {
            &self.color_code
        } else {
            &self.category
        }
    }
}
