//! CLI utilities for aerocoord tools
//!
//! Provides shared CLI functionality:
//! - Status messages and value formatting
//! - Text rendering of extraction and analysis results

#![warn(missing_docs)]

pub mod output;
pub mod report;
