pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod optimistic;
pub mod pipeline;
pub mod services;
pub mod state;
