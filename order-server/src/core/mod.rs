//! Core: configuration, shared state, server assembly.

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::{Server, app, build_app};
pub use state::ServerState;
