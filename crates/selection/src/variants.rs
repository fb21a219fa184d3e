//! Keeps compressed-variant lists in lockstep with the primary upload set.
//!
//! Variant lists come from an earlier pipeline stage that compressed exactly
//! the files later selected, so they only need pruning when an exclude
//! pattern removes files from the primary set.

use crate::glob::GlobPattern;

/// Removes paths matching `exclude` from `primary` and every variant list.
///
/// Without an exclude pattern the inputs are returned unchanged. Relative
/// order within each list is preserved, and applying the function twice
/// yields the same result as applying it once.
pub fn reconcile_variants(
    primary: Vec<String>,
    variants: Vec<Vec<String>>,
    exclude: Option<&GlobPattern>,
) -> (Vec<String>, Vec<Vec<String>>) {
    let Some(exclude) = exclude else {
        return (primary, variants);
    };

    let keep = |list: Vec<String>| -> Vec<String> {
        list.into_iter()
            .filter(|p| !exclude.is_match(p, true))
            .collect()
    };

    let primary = keep(primary);
    let variants = variants.into_iter().map(keep).collect();
    (primary, variants)
}
