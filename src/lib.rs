pub mod api;
pub mod config;
pub mod handlers;
pub mod humanize;
pub mod observability;
pub mod providers;
