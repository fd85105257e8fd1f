// Pivot dimension addressing types
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PivotArea {
    Rows,
    Columns,
    Values,
}

impl PivotArea {
    pub fn as_str(&self) -> &'static str {
        match self {
            PivotArea::Rows => "rows",
            PivotArea::Columns => "columns",
            PivotArea::Values => "values",
        }
    }
}

impl FromStr for PivotArea {
    type Err = DimensionIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rows" => Ok(PivotArea::Rows),
            "columns" => Ok(PivotArea::Columns),
            "values" => Ok(PivotArea::Values),
            other => Err(DimensionIdError::UnknownArea(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DimensionIdError {
    #[error("dimension id `{0}` is not of the form <area>.<index>")]
    Malformed(String),
    #[error("unknown pivot area `{0}`")]
    UnknownArea(String),
    #[error("invalid nesting index `{0}`")]
    InvalidIndex(String),
}

/// Stable address of a pivot axis position, written `<area>.<index>`
/// (`rows.0`, `values.2`). The index is the nesting depth within the area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DimensionId {
    pub area: PivotArea,
    pub index: usize,
}

impl DimensionId {
    pub fn new(area: PivotArea, index: usize) -> Self {
        Self { area, index }
    }
}

impl fmt::Display for DimensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.area.as_str(), self.index)
    }
}

impl FromStr for DimensionId {
    type Err = DimensionIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (area, index) = s
            .split_once('.')
            .ok_or_else(|| DimensionIdError::Malformed(s.to_string()))?;
        let area = area.parse()?;
        // Only canonical indexes, so configured ids print back unchanged
        let invalid = || DimensionIdError::InvalidIndex(index.to_string());
        let parsed = index.parse::<usize>().map_err(|_| invalid())?;
        if parsed.to_string() != index {
            return Err(invalid());
        }
        Ok(Self { area, index: parsed })
    }
}

impl TryFrom<String> for DimensionId {
    type Error = DimensionIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DimensionId> for String {
    fn from(id: DimensionId) -> Self {
        id.to_string()
    }
}
