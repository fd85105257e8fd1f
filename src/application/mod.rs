// Application layer - Navigation resolution engine
pub mod actionability;
pub mod addressing;
pub mod drilldown_controller;
pub mod error;
pub mod filter_pipeline;
pub mod hierarchy_repository;
pub mod navigation;
pub mod path_sync;
pub mod presenter;
