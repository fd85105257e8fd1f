// Presentation layer - HTTP surface over the navigation engine
pub mod app_state;
pub mod descriptor_presenter;
pub mod handlers;
