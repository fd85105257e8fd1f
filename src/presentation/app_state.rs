// Application state for HTTP handlers
use crate::application::hierarchy_repository::HierarchyRepository;
use crate::application::presenter::Translator;
use crate::infrastructure::config::WidgetNavigation;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub widgets: HashMap<String, WidgetNavigation>,
    pub hierarchy_repository: Arc<dyn HierarchyRepository>,
    pub translator: Arc<dyn Translator>,
}
