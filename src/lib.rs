//! confsweep library crate
//!
//! Classifies per-application config folders as installed or orphaned and
//! drives the interactive cleanup of orphaned ones.

pub mod alias;
pub mod classifier;
pub mod cleaner;
pub mod cli;
pub mod config;
pub mod disposition;
pub mod error;
pub mod ignore;
pub mod index;
pub mod logging;
pub mod normalize;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod sources;
pub mod theme;
pub mod utils;
