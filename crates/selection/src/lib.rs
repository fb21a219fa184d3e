//! Upload set selection for dist deployments.
//!
//! Decides which build outputs are sent to the bucket. Everything here is
//! pure over path lists except the scanner, which walks a dist directory
//! for hosts that do not already carry a file list.
//!
//! # Pipeline
//!
//! 1. **Scan** (optional): list files under the dist directory
//! 2. **Filter**: keep paths matching the include glob, drop the exclude glob
//! 3. **Reconcile**: drop excluded paths from the compressed-variant lists too

pub mod error;
pub mod glob;
pub mod scanner;
pub mod types;
pub mod variants;

pub use error::SelectionError;
pub use glob::{GlobPattern, PathFilter};
pub use scanner::scan_dist_dir;
pub use types::FileSet;
pub use variants::reconcile_variants;
