// Capabilities the engine consumes from its rendering collaborator
use crate::application::navigation::{JumpAction, MenuDescriptor};

/// Opaque handle returned by the host for an opened modal or menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct PresentationHandle(pub u64);

pub trait NavigationPresenter: Send + Sync {
    /// Open a modal hosting the destination dashboard
    fn open_modal(&self, action: JumpAction) -> PresentationHandle;

    /// Open a context menu listing several jump actions
    fn open_menu(&self, menu: MenuDescriptor) -> PresentationHandle;
}

pub trait Translator: Send + Sync {
    /// Localized text for `key`; unknown keys come back unchanged
    fn translate(&self, key: &str) -> String;
}
