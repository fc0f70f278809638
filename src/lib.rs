pub mod aggregator;
pub mod config;
pub mod connpass;
pub mod doorkeeper;
pub mod error;
pub mod event;
pub mod provider;
pub mod query;
pub mod server;
pub mod tracing;
