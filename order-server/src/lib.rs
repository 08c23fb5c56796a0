//! Oakline Order Server — order management for a custom-furniture shop
//!
//! # Architecture
//!
//! - **HTTP API** (`api`): one router module per collection
//! - **Store** (`db`): embedded SurrealDB, models and repositories
//! - **Billing** (`billing`): identifier generation and money arithmetic
//! - **Core** (`core`): configuration, shared state, server assembly
//!
//! ```text
//! order-server/src/
//! ├── core/          # config, state, server
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # models + repositories over SurrealDB
//! ├── billing/       # numbering, totals, payment status
//! └── utils/         # errors, logging, validation
//! ```

pub mod api;
pub mod billing;
pub mod core;
pub mod db;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState, app, build_app};
pub use crate::utils::{AppError, AppResult};

// Re-export logger functions
pub use crate::utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
   ____        __    ___
  / __ \____ _/ /__ / (_)___  ___
 / / / / __ `/ //_// / / __ \/ _ \
/ /_/ / /_/ / ,<  / / / / / /  __/
\____/\__,_/_/|_|/_/_/_/ /_/\___/
    "#
    );
}
