//! Template discovery and numbered file creation
//!
//! This module provides:
//! - Template scanning and creation in a workspace's `.cp/` directory
//! - Copying the chosen template into the next free `{prefix}-{n}.{ext}` file

pub mod catalog;
pub mod materializer;

pub use catalog::{create_template_file, ensure_template_dir, is_template_name, scan_templates};
pub use materializer::{
    destination_name, is_valid_prefix, materialize, next_available_path, template_extension,
};

/// Directory (relative to the workspace root) holding templates and folder settings
pub const TEMPLATE_DIR: &str = ".cp";
