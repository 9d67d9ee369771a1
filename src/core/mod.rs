//! Core layer: commands, the query builder, pagination, middleware and config.

pub mod command;
pub mod config;
pub mod filters;
pub mod handler;
pub mod middleware;
pub mod pagination;
pub mod query;
pub mod resources;
pub mod sdk;
