pub mod actions;
pub mod boundary;
pub mod bumper;
pub mod cli;
pub mod collector;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod publish;
pub mod resolver;
pub mod telemetry;
pub mod ui;

pub use error::{AffirmError, Result};
