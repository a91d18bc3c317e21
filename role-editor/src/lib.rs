//! Role editor - edit-role state model for the users-permissions admin plugin.

pub mod config;
pub mod dtos;
pub mod models;
pub mod report;
pub mod services;
