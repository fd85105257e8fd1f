// Configuration loading - Service settings and per-widget navigation
use crate::domain::drilldown::DrilldownOptions;
use crate::domain::jtd::JtdConfig;
use crate::infrastructure::jtd_dto::{jtd_config_from_dto, ConfigError, JtdConfigDto};
use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub hierarchy: HierarchySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_navigation_file")]
    pub navigation_file: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            navigation_file: default_navigation_file(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HierarchySettings {
    pub host: String,
    pub token: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_navigation_file() -> String {
    "config/navigation.toml".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct NavigationConfig {
    #[serde(default)]
    pub widgets: Vec<WidgetNavigationConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WidgetNavigationConfig {
    pub oid: String,
    #[serde(default)]
    pub jtd: Option<JtdConfigDto>,
    #[serde(default)]
    pub drilldown: Option<DrilldownOptions>,
}

/// Navigation settings of one widget after legacy translation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetNavigation {
    pub jtd: Option<JtdConfig>,
    pub drilldown: DrilldownOptions,
}

/// `config/service.*`, overridable through `NAV__SECTION__KEY` environment variables
pub fn load_service_config() -> anyhow::Result<ServiceConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/service"))
        .add_source(config::Environment::with_prefix("NAV").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Per-widget navigation settings. Keys keep the legacy camelCase spelling,
/// so the file is read as plain TOML.
pub fn load_navigation_config(path: impl AsRef<Path>) -> anyhow::Result<NavigationConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read navigation config {}", path.display()))?;
    parse_navigation_config(&text)
        .with_context(|| format!("Failed to parse navigation config {}", path.display()))
}

pub fn parse_navigation_config(text: &str) -> anyhow::Result<NavigationConfig> {
    Ok(toml::from_str(text)?)
}

impl NavigationConfig {
    pub fn resolve(&self) -> Result<HashMap<String, WidgetNavigation>, ConfigError> {
        let mut widgets = HashMap::with_capacity(self.widgets.len());

        for widget in &self.widgets {
            let jtd = widget.jtd.as_ref().map(jtd_config_from_dto).transpose()?;
            let navigation = WidgetNavigation {
                jtd,
                drilldown: widget.drilldown.clone().unwrap_or_default(),
            };
            if widgets.insert(widget.oid.clone(), navigation).is_some() {
                return Err(ConfigError::DuplicateWidget(widget.oid.clone()));
            }
        }

        Ok(widgets)
    }
}
