//! Overtime ledger service: records overtime entries, values them at a fixed
//! hourly rate, and serves per-user and global totals over a JSON API.

pub mod auth;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi_config;
pub mod repositories;
pub mod services;
