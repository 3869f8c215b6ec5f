//! Worker communication module.
//!
//! This crate does not link a database driver. Statements are forwarded to
//! a long-running worker process that owns the Oracle connections.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                catalog-inspector (Rust + Tokio)                 │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │  WorkerQueryExecutor ──► WorkerClient (Async)             │  │
//! │  │  - Spawns the worker as child process                     │  │
//! │  │  - NDJSON protocol over stdin/stdout                      │  │
//! │  │  - Request IDs for response correlation                   │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │               stdin (NDJSON) │ stdout (NDJSON)                  │
//! └──────────────────────────────┼──────────────────────────────────┘
//!                                ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │          Database worker (owns connections, runs SQL)           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod client;
mod error;
mod executor;
pub mod protocol;

pub use client::{WorkerClient, DEFAULT_TIMEOUT_SECS};
pub use error::{WorkerError, WorkerResult};
pub use executor::{connection_params, WorkerQueryExecutor, ORACLE_DRIVER};
