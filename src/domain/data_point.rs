// Clicked chart points and pivot cells
use super::attribute::{Attribute, Measure};
use super::dimension::PivotArea;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw cell value rendered as a filter member. Nulls have no member form.
pub fn member_of(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPointEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<Attribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measure: Option<Measure>,
    #[serde(default)]
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_value: Option<String>,
}

impl DataPointEntry {
    pub fn category(attribute: Attribute, value: impl Into<Value>) -> Self {
        Self {
            attribute: Some(attribute),
            measure: None,
            value: value.into(),
            display_value: None,
        }
    }

    pub fn measure(measure: Measure, value: impl Into<Value>) -> Self {
        Self {
            attribute: None,
            measure: Some(measure),
            value: value.into(),
            display_value: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPointEntries {
    #[serde(default)]
    pub category: Vec<DataPointEntry>,
    #[serde(default)]
    pub value: Vec<DataPointEntry>,
    #[serde(default)]
    pub break_by: Vec<DataPointEntry>,
}

/// A point of a cartesian/categorical chart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    #[serde(default)]
    pub entries: Option<ChartDataPointEntries>,
}

impl DataPoint {
    pub fn new(entries: ChartDataPointEntries) -> Self {
        Self {
            entries: Some(entries),
        }
    }

    /// Members of the point's category entries, outermost first
    pub fn category_members(&self) -> Vec<String> {
        self.entries
            .iter()
            .flat_map(|e| e.category.iter())
            .filter_map(|entry| member_of(&entry.value))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataOptionLocation {
    pub area: PivotArea,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotDataPointEntry {
    #[serde(default)]
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_option_location: Option<DataOptionLocation>,
}

impl PivotDataPointEntry {
    pub fn new(value: impl Into<Value>, area: PivotArea, index: usize) -> Self {
        Self {
            value: value.into(),
            display_value: None,
            data_option_location: Some(DataOptionLocation { area, index }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PivotTableEntries {
    #[serde(default)]
    pub rows: Vec<PivotDataPointEntry>,
    #[serde(default)]
    pub columns: Vec<PivotDataPointEntry>,
    #[serde(default)]
    pub values: Vec<PivotDataPointEntry>,
}

/// A clicked pivot cell. Only data cells that are not captions are actionable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PivotTableDataPoint {
    #[serde(default)]
    pub is_data_cell: bool,
    #[serde(default)]
    pub is_caption_cell: bool,
    #[serde(default)]
    pub entries: Option<PivotTableEntries>,
}

impl PivotTableDataPoint {
    pub fn data_cell(entries: PivotTableEntries) -> Self {
        Self {
            is_data_cell: true,
            is_caption_cell: false,
            entries: Some(entries),
        }
    }

    pub fn is_actionable_cell(&self) -> bool {
        self.is_data_cell && !self.is_caption_cell
    }
}

/// Data options of a pivot widget, used to resolve an entry's location to the
/// attribute or measure that produced it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PivotDataOptions {
    #[serde(default)]
    pub rows: Vec<Attribute>,
    #[serde(default)]
    pub columns: Vec<Attribute>,
    #[serde(default)]
    pub values: Vec<Measure>,
}

impl PivotDataOptions {
    pub fn attribute_at(&self, location: &DataOptionLocation) -> Option<&Attribute> {
        match location.area {
            PivotArea::Rows => self.rows.get(location.index),
            PivotArea::Columns => self.columns.get(location.index),
            PivotArea::Values => None,
        }
    }

    pub fn measure_at(&self, location: &DataOptionLocation) -> Option<&Measure> {
        match location.area {
            PivotArea::Values => self.values.get(location.index),
            _ => None,
        }
    }
}

/// Anything a user can click on inside a widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum WidgetPoint {
    Chart(DataPoint),
    Pivot(PivotTableDataPoint),
}
