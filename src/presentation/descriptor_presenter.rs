// Presenter that hands descriptors back to the HTTP caller instead of rendering them
use crate::application::navigation::{JumpAction, MenuDescriptor};
use crate::application::presenter::{NavigationPresenter, PresentationHandle};
use serde::Serialize;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Presented {
    Modal(JumpAction),
    Menu(MenuDescriptor),
}

/// Collects what the engine asked to open during one request
#[derive(Debug, Default)]
pub struct DescriptorPresenter {
    presented: Mutex<Vec<Presented>>,
}

impl DescriptorPresenter {
    pub fn take(&self) -> Vec<Presented> {
        let mut presented = self
            .presented
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        std::mem::take(&mut *presented)
    }

    fn record(&self, item: Presented) -> PresentationHandle {
        let mut presented = self
            .presented
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        presented.push(item);
        PresentationHandle(presented.len() as u64)
    }
}

impl NavigationPresenter for DescriptorPresenter {
    fn open_modal(&self, action: JumpAction) -> PresentationHandle {
        self.record(Presented::Modal(action))
    }

    fn open_menu(&self, menu: MenuDescriptor) -> PresentationHandle {
        self.record(Presented::Menu(menu))
    }
}
