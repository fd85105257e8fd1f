// Legacy jump-to-dashboard configuration format and its mapping to JtdConfig
use crate::domain::dimension::{DimensionId, DimensionIdError};
use crate::domain::jtd::{
    FormulaDuplicatePolicy, JtdConfig, JtdTarget, JtdTargetInner, MeasurementUnit, ModalConfig,
    NavigateType,
};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid pivot dimension `{value}` on jump target {target}")]
    InvalidPivotDimension {
        target: String,
        value: String,
        #[source]
        source: DimensionIdError,
    },
    #[error("unknown navigate type `{0}`")]
    UnknownNavigateType(String),
    #[error("unknown modal measurement `{0}`")]
    UnknownMeasurement(String),
    #[error("invalid sendFormulaFiltersDuplicate value `{0}`")]
    InvalidFormulaDuplicate(String),
    #[error("widget `{0}` is configured more than once")]
    DuplicateWidget(String),
}

impl ConfigError {
    pub fn translation_key(&self) -> &'static str {
        match self {
            ConfigError::InvalidPivotDimension { .. } => "jumpToDashboard.errors.invalidPivotDimension",
            ConfigError::UnknownNavigateType(_) => "jumpToDashboard.errors.unknownNavigateType",
            ConfigError::UnknownMeasurement(_) => "jumpToDashboard.errors.unknownMeasurement",
            ConfigError::InvalidFormulaDuplicate(_) => "jumpToDashboard.errors.invalidFormulaDuplicate",
            ConfigError::DuplicateWidget(_) => "jumpToDashboard.errors.duplicateWidget",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillTargetDto {
    pub oid: String,
    pub caption: String,
    pub pivot_dimensions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FormulaDuplicateDto {
    Count(usize),
    Keyword(String),
}

/// Jump-to-dashboard settings as stored by the legacy dashboard format
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JtdConfigDto {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Single-target form predating `dashboardIds`
    pub drill_target: Option<DrillTargetDto>,
    #[serde(default)]
    pub dashboard_ids: Vec<DrillTargetDto>,
    pub navigate_type: Option<String>,
    pub include_dash_filter_dims: Option<Vec<String>>,
    pub include_widget_filter_dims: Option<Vec<String>>,
    pub modal_window_title: Option<String>,
    pub modal_window_width: Option<u32>,
    pub modal_window_height: Option<u32>,
    pub modal_window_measurement: Option<String>,
    pub modal_window_resize: Option<bool>,
    pub merge_target_dashboard_filters: Option<bool>,
    pub send_formula_filters_duplicate: Option<FormulaDuplicateDto>,
    pub display_toolbar_row: Option<bool>,
    pub display_filter_pane: Option<bool>,
}

fn default_enabled() -> bool {
    true
}

fn target_from_dto(dto: &DrillTargetDto) -> Result<JtdTargetInner, ConfigError> {
    let target = JtdTarget::dashboard(dto.oid.clone(), dto.caption.clone());
    let Some(raw_dims) = &dto.pivot_dimensions else {
        return Ok(JtdTargetInner::new(target));
    };

    let dims = raw_dims
        .iter()
        .map(|raw| {
            raw.parse::<DimensionId>()
                .map_err(|source| ConfigError::InvalidPivotDimension {
                    target: dto.oid.clone(),
                    value: raw.clone(),
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(JtdTargetInner::scoped(target, dims))
}

fn navigate_type_from_dto(raw: Option<&str>) -> Result<NavigateType, ConfigError> {
    match raw {
        None => Ok(NavigateType::default()),
        Some(s) => match s.to_ascii_lowercase().as_str() {
            "click" => Ok(NavigateType::Click),
            "rightclick" | "right_click" => Ok(NavigateType::RightClick),
            _ => Err(ConfigError::UnknownNavigateType(s.to_string())),
        },
    }
}

fn measurement_from_dto(raw: Option<&str>) -> Result<MeasurementUnit, ConfigError> {
    match raw {
        None | Some("px") => Ok(MeasurementUnit::Px),
        Some("%") => Ok(MeasurementUnit::Percent),
        Some(other) => Err(ConfigError::UnknownMeasurement(other.to_string())),
    }
}

fn formula_duplicate_from_dto(raw: Option<&FormulaDuplicateDto>) -> Result<FormulaDuplicatePolicy, ConfigError> {
    match raw {
        None => Ok(FormulaDuplicatePolicy::None),
        Some(FormulaDuplicateDto::Count(n)) => Ok(FormulaDuplicatePolicy::Limit(*n)),
        Some(FormulaDuplicateDto::Keyword(k)) if k == "none" => Ok(FormulaDuplicatePolicy::None),
        Some(FormulaDuplicateDto::Keyword(k)) => Err(ConfigError::InvalidFormulaDuplicate(k.clone())),
    }
}

/// Translate the legacy format field by field. This is the only place that
/// knows legacy field names.
pub fn jtd_config_from_dto(dto: &JtdConfigDto) -> Result<JtdConfig, ConfigError> {
    let target_dtos: Vec<&DrillTargetDto> = if dto.dashboard_ids.is_empty() {
        dto.drill_target.iter().collect()
    } else {
        dto.dashboard_ids.iter().collect()
    };
    let jump_targets = target_dtos
        .into_iter()
        .map(target_from_dto)
        .collect::<Result<Vec<_>, _>>()?;

    let defaults = JtdConfig::default();
    Ok(JtdConfig {
        enabled: dto.enabled,
        navigate_type: navigate_type_from_dto(dto.navigate_type.as_deref())?,
        jump_targets,
        include_dash_filter_dims: dto.include_dash_filter_dims.clone(),
        include_widget_filter_dims: dto.include_widget_filter_dims.clone(),
        extra_filters: Vec::new(),
        modal: ModalConfig {
            title: dto.modal_window_title.clone(),
            width: dto.modal_window_width,
            height: dto.modal_window_height,
            measurement: measurement_from_dto(dto.modal_window_measurement.as_deref())?,
            resize: dto.modal_window_resize.unwrap_or(false),
        },
        merge_target_dashboard_filters: dto
            .merge_target_dashboard_filters
            .unwrap_or(defaults.merge_target_dashboard_filters),
        send_formula_filters_duplicate: formula_duplicate_from_dto(
            dto.send_formula_filters_duplicate.as_ref(),
        )?,
        display_toolbar_row: dto.display_toolbar_row.unwrap_or(defaults.display_toolbar_row),
        display_filter_pane: dto.display_filter_pane.unwrap_or(defaults.display_filter_pane),
    })
}
