// Dashboard navigation engine - jump-to-dashboard and drilldown
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
