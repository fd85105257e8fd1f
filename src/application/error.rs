// Errors raised at the interaction entry points
use crate::application::presenter::Translator;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    /// Navigation was triggered on a widget without any jump target
    #[error("no jump targets are configured for this widget")]
    NoJumpTargetsConfigured,

    /// A menu item was selected that the open menu does not contain
    #[error("menu item {0} does not exist")]
    UnknownMenuItem(usize),
}

impl NavigationError {
    pub fn translation_key(&self) -> &'static str {
        match self {
            NavigationError::NoJumpTargetsConfigured => "jumpToDashboard.errors.noTargets",
            NavigationError::UnknownMenuItem(_) => "jumpToDashboard.errors.unknownMenuItem",
        }
    }

    /// User-facing message in the host's language
    pub fn translate(&self, translator: &dyn Translator) -> String {
        translator.translate(self.translation_key())
    }
}
