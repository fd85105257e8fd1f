// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod hierarchy_client;
pub mod jtd_dto;
pub mod translations;
