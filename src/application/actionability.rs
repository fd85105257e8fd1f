// Actionability resolver - Decide whether an interaction can navigate, and where to
use crate::application::addressing::{resolve_formatter_cell_id, resolve_pivot_dimension_id};
use crate::domain::data_point::{DataPoint, PivotTableDataPoint, WidgetPoint};
use crate::domain::dimension::DimensionId;
use crate::domain::jtd::{JtdConfig, JtdTargetInner};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Actionability {
    pub actionable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<JtdTargetInner>,
}

impl Actionability {
    pub fn none() -> Self {
        Self {
            actionable: false,
            target: None,
        }
    }

    fn with(target: &JtdTargetInner) -> Self {
        Self {
            actionable: true,
            target: Some(target.clone()),
        }
    }
}

fn navigation_possible(config: &JtdConfig) -> bool {
    config.enabled && !config.jump_targets.is_empty()
}

/// Targets applying to a pivot dimension.
///
/// Targets listing the dimension match. When none match, unscoped targets
/// only apply if no target in the whole config is dimension-scoped.
fn targets_for_dimension<'a>(config: &'a JtdConfig, dimension_id: &DimensionId) -> Vec<&'a JtdTargetInner> {
    let matching: Vec<&JtdTargetInner> = config
        .jump_targets
        .iter()
        .filter(|t| t.covers(dimension_id))
        .collect();

    if !matching.is_empty() || config.has_scoped_targets() {
        return matching;
    }

    config.jump_targets.iter().collect()
}

pub fn is_actionable_dimension(config: &JtdConfig, dimension_id: &DimensionId) -> Actionability {
    if !navigation_possible(config) {
        return Actionability::none();
    }

    targets_for_dimension(config, dimension_id)
        .first()
        .map_or_else(Actionability::none, |t| Actionability::with(t))
}

/// Used by cell formatters that already know the cell's dimension id
pub fn is_actionable_cell(config: &JtdConfig, cell_id: &str) -> Actionability {
    match resolve_formatter_cell_id(cell_id) {
        Some(dimension_id) => is_actionable_dimension(config, &dimension_id),
        None => Actionability::none(),
    }
}

pub fn is_actionable_pivot_point(config: &JtdConfig, point: &PivotTableDataPoint) -> Actionability {
    if !point.is_actionable_cell() {
        return Actionability::none();
    }

    match resolve_pivot_dimension_id(point) {
        Some(dimension_id) => is_actionable_dimension(config, &dimension_id),
        None => Actionability::none(),
    }
}

/// Charts have no per-dimension scoping: any configured target makes the
/// point actionable. With several targets the caller must offer a choice.
pub fn is_actionable_chart_point(config: &JtdConfig, point: &DataPoint) -> Actionability {
    if !navigation_possible(config) || point.entries.is_none() {
        return Actionability::none();
    }

    config
        .jump_targets
        .first()
        .map_or_else(Actionability::none, Actionability::with)
}

pub fn is_actionable(config: &JtdConfig, point: &WidgetPoint) -> Actionability {
    match point {
        WidgetPoint::Chart(point) => is_actionable_chart_point(config, point),
        WidgetPoint::Pivot(point) => is_actionable_pivot_point(config, point),
    }
}

/// Every target applying to the point, in configuration order
pub fn find_all_matching_targets<'a>(config: &'a JtdConfig, point: &WidgetPoint) -> Vec<&'a JtdTargetInner> {
    if !navigation_possible(config) {
        return Vec::new();
    }

    match point {
        WidgetPoint::Chart(point) if point.entries.is_some() => config.jump_targets.iter().collect(),
        WidgetPoint::Chart(_) => Vec::new(),
        WidgetPoint::Pivot(point) => {
            if !point.is_actionable_cell() {
                return Vec::new();
            }
            match resolve_pivot_dimension_id(point) {
                Some(dimension_id) => targets_for_dimension(config, &dimension_id),
                None => Vec::new(),
            }
        }
    }
}
