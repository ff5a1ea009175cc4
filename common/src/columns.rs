//! Column assignment
//!
//! Maps spreadsheet columns onto the three text fields the analysis needs
//! (title / abstract / claims), with keyword based auto-selection.

use thiserror::Error;

/// Target field of a column assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnField {
    Title,
    Abstract,
    Claims,
}

impl ColumnField {
    pub const ALL: [ColumnField; 3] = [ColumnField::Title, ColumnField::Abstract, ColumnField::Claims];

    /// Case-insensitive keyword used by auto-selection
    pub fn keyword(&self) -> &'static str {
        match self {
            ColumnField::Title => "title",
            ColumnField::Abstract => "abstract",
            ColumnField::Claims => "claims",
        }
    }

    /// Positional fallback when no column name matches
    pub fn fallback_index(&self) -> usize {
        match self {
            ColumnField::Title => 0,
            ColumnField::Abstract => 1,
            ColumnField::Claims => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ColumnField::Title => "Title Column",
            ColumnField::Abstract => "Abstract Column",
            ColumnField::Claims => "Claims Column",
        }
    }

    /// Multipart field name sent to `/analyze`
    pub fn form_name(&self) -> &'static str {
        match self {
            ColumnField::Title => "title_col",
            ColumnField::Abstract => "abstract_col",
            ColumnField::Claims => "claims_col",
        }
    }

    /// Element id used by the web form
    pub fn element_id(&self) -> &'static str {
        match self {
            ColumnField::Title => "title-col",
            ColumnField::Abstract => "abstract-col",
            ColumnField::Claims => "claims-col",
        }
    }
}

impl std::fmt::Display for ColumnField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnField::Title => write!(f, "Title"),
            ColumnField::Abstract => write!(f, "Abstract"),
            ColumnField::Claims => write!(f, "Claims"),
        }
    }
}

impl std::str::FromStr for ColumnField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(ColumnField::Title),
            "abstract" => Ok(ColumnField::Abstract),
            "claims" => Ok(ColumnField::Claims),
            _ => Err(format!("Unknown field: {}. Use title, abstract, or claims", s)),
        }
    }
}

/// Rejected column assignment
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Column \"{column}\" is already assigned to {assigned_to}")]
    AlreadyAssigned { column: String, assigned_to: ColumnField },

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Column selection is locked while a request is in progress")]
    Locked,
}

/// Current title / abstract / claims assignment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSelection {
    pub title: Option<String>,
    pub abstract_col: Option<String>,
    pub claims: Option<String>,
}

impl ColumnSelection {
    pub fn get(&self, field: ColumnField) -> Option<&str> {
        match field {
            ColumnField::Title => self.title.as_deref(),
            ColumnField::Abstract => self.abstract_col.as_deref(),
            ColumnField::Claims => self.claims.as_deref(),
        }
    }

    pub fn set(&mut self, field: ColumnField, value: Option<String>) {
        let slot = match field {
            ColumnField::Title => &mut self.title,
            ColumnField::Abstract => &mut self.abstract_col,
            ColumnField::Claims => &mut self.claims,
        };
        *slot = value.filter(|v| !v.is_empty());
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_complete(&self) -> bool {
        ColumnField::ALL.iter().all(|f| self.get(*f).is_some())
    }

    /// Field other than `field` that already holds `column`
    pub fn assigned_elsewhere(&self, field: ColumnField, column: &str) -> Option<ColumnField> {
        ColumnField::ALL
            .into_iter()
            .filter(|other| *other != field)
            .find(|other| self.get(*other) == Some(column))
    }

    /// Number of distinct assigned columns (0..=3)
    pub fn distinct_count(&self) -> usize {
        let mut seen: Vec<&str> = Vec::with_capacity(3);
        for value in ColumnField::ALL.iter().filter_map(|f| self.get(*f)) {
            if !seen.contains(&value) {
                seen.push(value);
            }
        }
        seen.len()
    }
}

/// Pre-select title / abstract / claims columns
///
/// Name matches win first (in field order, skipping columns already taken),
/// then each unset field falls back to its positional column, or to the first
/// column nobody uses yet. With fewer than three columns the trailing fields
/// stay unset.
pub fn auto_select(columns: &[String]) -> ColumnSelection {
    let mut selection = ColumnSelection::default();
    let taken = |sel: &ColumnSelection, col: &str| ColumnField::ALL.iter().any(|f| sel.get(*f) == Some(col));

    for field in ColumnField::ALL {
        let keyword = field.keyword();
        let matched = columns
            .iter()
            .find(|c| c.to_lowercase().contains(keyword) && !taken(&selection, c.as_str()))
            .cloned();
        if matched.is_some() {
            selection.set(field, matched);
        }
    }

    for field in ColumnField::ALL {
        if selection.get(field).is_some() {
            continue;
        }
        let positional = columns
            .get(field.fallback_index())
            .filter(|c| !taken(&selection, c.as_str()));
        let fallback = positional
            .or_else(|| columns.iter().find(|c| !taken(&selection, c.as_str())))
            .cloned();
        selection.set(field, fallback);
    }

    selection
}
