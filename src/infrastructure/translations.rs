// Static translation table for menu captions and error messages
use crate::application::presenter::Translator;
use std::collections::HashMap;

const DEFAULT_ENTRIES: &[(&str, &str)] = &[
    ("jumpToDashboard.menuTitle", "Jump to"),
    (
        "jumpToDashboard.errors.noTargets",
        "No target dashboards are configured for this widget",
    ),
    (
        "jumpToDashboard.errors.unknownMenuItem",
        "The selected dashboard is no longer available",
    ),
    (
        "jumpToDashboard.errors.invalidPivotDimension",
        "A jump target refers to an invalid pivot dimension",
    ),
    (
        "jumpToDashboard.errors.unknownNavigateType",
        "Unknown jump to dashboard navigation type",
    ),
    (
        "jumpToDashboard.errors.unknownMeasurement",
        "Unknown modal window measurement",
    ),
    (
        "jumpToDashboard.errors.invalidFormulaDuplicate",
        "Invalid formula filter duplicate setting",
    ),
    (
        "jumpToDashboard.errors.duplicateWidget",
        "A widget is configured more than once",
    ),
];

#[derive(Debug, Clone)]
pub struct StaticTranslator {
    entries: HashMap<String, String>,
}

impl StaticTranslator {
    pub fn new() -> Self {
        Self {
            entries: DEFAULT_ENTRIES
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Replace or add entries, e.g. for another language
    pub fn with_overrides(mut self, overrides: HashMap<String, String>) -> Self {
        self.entries.extend(overrides);
        self
    }
}

impl Default for StaticTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator for StaticTranslator {
    fn translate(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
