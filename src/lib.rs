pub mod api;
pub mod client;
pub mod config;
pub mod docs;
pub mod engine;
pub mod error;
pub mod model;
pub mod routes;
