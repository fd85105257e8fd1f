// Drilldown domain models
use super::attribute::Attribute;
use serde::{Deserialize, Serialize};

/// One level of a drill chain: the dimension drilled into, and the members
/// selected on the dimension that was active before the drill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrilldownSelection {
    pub attribute: Attribute,
    pub selected_members: Vec<String>,
}

impl DrilldownSelection {
    pub fn new(attribute: Attribute, selected_members: Vec<String>) -> Self {
        Self {
            attribute,
            selected_members,
        }
    }
}

/// Drilldown settings of a widget as authored
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrilldownOptions {
    /// Explicit drill paths; when empty, paths come from the data source hierarchies
    pub drilldown_paths: Vec<Attribute>,
    pub drilldown_selections: Vec<DrilldownSelection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub label: String,
    /// Chain length to slice to when this crumb is clicked
    pub slice_index: usize,
    pub current: bool,
}
