//! User interface module - human-readable run reporting.
//!
//! Machine-readable outputs go through [crate::actions]; everything here is
//! written to stderr so stdout stays parseable.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_error, display_failure, display_status, display_success,
    display_version_change,
};
