pub mod auth;
pub mod client;
pub mod config;
pub mod database;
pub mod errors;
pub mod graphql;
pub mod images;
pub mod server;
pub mod services;
