//! Terminal helpers for the nearby-places CLI
//!
//! Provides shared CLI functionality:
//! - Status messages and error reports
//! - Distance, duration and table formatting
//! - Progress indicators for loading and migrating place data

#![warn(missing_docs)]

pub mod output;
pub mod progress;
