// Jump-to-dashboard configuration domain models
use super::dimension::DimensionId;
use super::filter::Filter;
use serde::{Deserialize, Serialize};

/// Dashboard definition carried inline instead of referenced by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineDashboard {
    pub title: String,
    #[serde(default)]
    pub widget_oids: Vec<String>,
    #[serde(default)]
    pub filters: Vec<Filter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JtdDestination {
    DashboardId { id: String },
    Inline { dashboard: InlineDashboard },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JtdTarget {
    pub caption: String,
    pub destination: JtdDestination,
}

impl JtdTarget {
    pub fn dashboard(id: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            destination: JtdDestination::DashboardId { id: id.into() },
        }
    }

    pub fn inline(dashboard: InlineDashboard, caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            destination: JtdDestination::Inline { dashboard },
        }
    }
}

/// Exhaustive dispatch over a target's destination
pub fn match_target<R>(
    target: &JtdTarget,
    on_id: impl FnOnce(&str) -> R,
    on_dashboard: impl FnOnce(&InlineDashboard) -> R,
) -> R {
    match &target.destination {
        JtdDestination::DashboardId { id } => on_id(id),
        JtdDestination::Inline { dashboard } => on_dashboard(dashboard),
    }
}

/// A jump target, optionally scoped to pivot dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JtdTargetInner {
    #[serde(flatten)]
    pub target: JtdTarget,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pivot_dimensions: Option<Vec<DimensionId>>,
}

impl JtdTargetInner {
    pub fn new(target: JtdTarget) -> Self {
        Self {
            target,
            pivot_dimensions: None,
        }
    }

    pub fn scoped(target: JtdTarget, pivot_dimensions: Vec<DimensionId>) -> Self {
        Self {
            target,
            pivot_dimensions: Some(pivot_dimensions),
        }
    }

    /// A target declaring an empty dimension list is treated as unscoped
    pub fn is_scoped(&self) -> bool {
        matches!(&self.pivot_dimensions, Some(dims) if !dims.is_empty())
    }

    pub fn covers(&self, dimension_id: &DimensionId) -> bool {
        self.pivot_dimensions
            .as_ref()
            .is_some_and(|dims| dims.contains(dimension_id))
    }

    pub fn caption(&self) -> &str {
        &self.target.caption
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigateType {
    Click,
    #[default]
    RightClick,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasurementUnit {
    #[default]
    #[serde(rename = "px")]
    Px,
    #[serde(rename = "%")]
    Percent,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalConfig {
    pub title: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub measurement: MeasurementUnit,
    pub resize: bool,
}

/// How many identical formula-context filters are forwarded when several
/// selected points share the same measure context
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormulaDuplicatePolicy {
    #[default]
    None,
    Limit(usize),
}

/// Normalized navigation configuration of one widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JtdConfig {
    pub enabled: bool,
    pub navigate_type: NavigateType,
    pub jump_targets: Vec<JtdTargetInner>,
    pub include_dash_filter_dims: Option<Vec<String>>,
    pub include_widget_filter_dims: Option<Vec<String>>,
    pub extra_filters: Vec<Filter>,
    pub modal: ModalConfig,
    pub merge_target_dashboard_filters: bool,
    pub send_formula_filters_duplicate: FormulaDuplicatePolicy,
    pub display_toolbar_row: bool,
    pub display_filter_pane: bool,
}

impl Default for JtdConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            navigate_type: NavigateType::default(),
            jump_targets: Vec::new(),
            include_dash_filter_dims: None,
            include_widget_filter_dims: None,
            extra_filters: Vec::new(),
            modal: ModalConfig::default(),
            merge_target_dashboard_filters: false,
            send_formula_filters_duplicate: FormulaDuplicatePolicy::default(),
            display_toolbar_row: true,
            display_filter_pane: true,
        }
    }
}

impl JtdConfig {
    pub fn with_targets(jump_targets: Vec<JtdTargetInner>) -> Self {
        Self {
            jump_targets,
            ..Self::default()
        }
    }

    pub fn has_scoped_targets(&self) -> bool {
        self.jump_targets.iter().any(JtdTargetInner::is_scoped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dimension::PivotArea;
    use serde_json::json;

    #[test]
    fn test_match_target_dispatches_on_destination() {
        let by_id = JtdTarget::dashboard("d1", "Details");
        let inline = JtdTarget::inline(
            InlineDashboard {
                title: "Ad hoc".to_string(),
                widget_oids: vec!["w1".to_string()],
                filters: Vec::new(),
            },
            "Ad hoc",
        );

        let describe = |t: &JtdTarget| {
            match_target(t, |id| format!("id:{}", id), |d| format!("inline:{}", d.title))
        };
        assert_eq!(describe(&by_id), "id:d1");
        assert_eq!(describe(&inline), "inline:Ad hoc");
    }

    #[test]
    fn test_empty_dimension_list_is_unscoped() {
        let target = JtdTarget::dashboard("d1", "Details");
        assert!(!JtdTargetInner::new(target.clone()).is_scoped());
        assert!(!JtdTargetInner::scoped(target.clone(), vec![]).is_scoped());

        let rows = DimensionId::new(PivotArea::Rows, 0);
        let scoped = JtdTargetInner::scoped(target, vec![rows]);
        assert!(scoped.is_scoped());
        assert!(scoped.covers(&rows));
        assert!(!scoped.covers(&DimensionId::new(PivotArea::Rows, 1)));
    }

    #[test]
    fn test_config_defaults_from_partial_json() {
        let config: JtdConfig = serde_json::from_value(json!({
            "jump_targets": [{
                "caption": "Details",
                "destination": { "type": "dashboard_id", "id": "d1" },
                "pivot_dimensions": ["rows.0"]
            }],
            "modal": { "width": 80, "measurement": "%" }
        }))
        .unwrap();

        assert!(config.enabled);
        assert_eq!(config.navigate_type, NavigateType::RightClick);
        assert_eq!(config.modal.measurement, MeasurementUnit::Percent);
        assert_eq!(config.modal.width, Some(80));
        assert!(config.include_dash_filter_dims.is_none());
        assert!(config.has_scoped_targets());
        assert_eq!(config.jump_targets[0].caption(), "Details");
    }
}
