//! The upload set produced by one selection pass.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::glob::PathFilter;
use crate::variants::reconcile_variants;

/// Files selected for one upload run.
///
/// `gzipped` and `brotli` list the subset of `primary` that was
/// precompressed with that encoding by an earlier build step. Every path in
/// a variant list also appears in `primary`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSet {
    pub primary: Vec<String>,
    pub gzipped: Vec<String>,
    pub brotli: Vec<String>,
}

impl FileSet {
    /// Runs the filter over `dist_files` and prunes the variant lists.
    pub fn select(
        dist_files: &[String],
        gzipped: Vec<String>,
        brotli: Vec<String>,
        filter: &PathFilter,
    ) -> Self {
        let primary = filter.apply(dist_files);
        let (primary, mut variants) =
            reconcile_variants(primary, vec![gzipped, brotli], filter.exclude_pattern());

        let brotli = variants.pop().unwrap_or_default();
        let gzipped = variants.pop().unwrap_or_default();

        debug!(
            candidates = dist_files.len(),
            selected = primary.len(),
            gzipped = gzipped.len(),
            brotli = brotli.len(),
            "upload set selected"
        );

        Self {
            primary,
            gzipped,
            brotli,
        }
    }

    /// True when nothing was selected.
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty()
    }
}
