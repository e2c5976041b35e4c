pub mod api;
pub mod auth;
pub mod chat;
pub mod config;
pub mod db;
pub mod docs;
pub mod engine;
pub mod error;
pub mod mcp;
pub mod model;
pub mod routes;
pub mod store;
