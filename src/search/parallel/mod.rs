//! Parallel search execution for running several workers concurrently.
//!
//! # Architecture
//!
//! The parallel search system consists of:
//! - A **coordinator** that spawns worker threads, waits for a result or an
//!   interrupt, and aggregates statistics
//! - Multiple **workers**, each running the generate → square → validate
//!   loop on its own square
//! - A **channel** carrying worker results back to the coordinator
//! - **Shared state** (attempt counter, stop flag) updated with atomics only
//!
//! # Example
//!
//! ```ignore
//! let (_tx, interrupt) = crossbeam_channel::bounded(1);
//! let config = ParallelConfig::default().with_workers(4).with_seed(7);
//! let result = run_parallel_search(&SearchConfig::default(), &config, &interrupt);
//! println!("{}", result);
//! ```

pub mod channel;
pub mod config;
pub mod coordinator;

pub use config::ParallelConfig;
pub use coordinator::run_parallel_search;
