//! Glob matching for upload selection.
//!
//! Patterns follow the usual shell glob syntax (`*`, `?`, `**`, `[abc]`,
//! `{js,css}`) with two deploy-specific rules:
//!
//! - **Base-name matching**: a pattern without `/` is tested against the
//!   last path segment only, so `*.map` matches `assets/app.js.map`.
//! - **Dot segments**: unless dot matching is enabled, wildcards never match
//!   a segment starting with `.`. A dot segment only matches where the
//!   pattern spells one at the same position, so `.well-known/*` matches
//!   `.well-known/security.txt` but not `.well-known/.env`.
//!
//! Paths are relative and use `/` as separator.

use globset::{GlobBuilder, GlobMatcher};

use crate::error::SelectionError;

/// A compiled glob pattern.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    matcher: GlobMatcher,
    match_base: bool,
    dot_segments: DotSegments,
}

impl GlobPattern {
    /// Compiles `pattern`.
    ///
    /// `*` and `?` never cross a `/`; use `**` for recursive matching.
    pub fn new(pattern: &str) -> Result<Self, SelectionError> {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .backslash_escape(true)
            .build()
            .map_err(|e| SelectionError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.kind().to_string(),
            })?;

        Ok(Self {
            source: pattern.to_string(),
            matcher: glob.compile_matcher(),
            match_base: !pattern.contains('/'),
            dot_segments: DotSegments::new(pattern)?,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Tests `path` against the pattern.
    ///
    /// With `dot` false, every dot segment of the path must line up with a
    /// pattern segment that itself starts with `.`.
    pub fn is_match(&self, path: &str, dot: bool) -> bool {
        let candidate = if self.match_base {
            path.rsplit('/').next().unwrap_or(path)
        } else {
            path
        };

        if !self.matcher.is_match(candidate) {
            return false;
        }
        dot || self.dot_segments.allows(candidate)
    }
}

/// Where a pattern spells dot segments.
///
/// Segments before the first `**` and after the last one line up with path
/// segments by position. Path segments swallowed by `**` may only be dot
/// segments if a dot-spelling pattern segment between the globstars matches
/// them.
#[derive(Debug, Clone)]
struct DotSegments {
    head: Vec<bool>,
    tail: Vec<bool>,
    /// `None` when the pattern has no `**`.
    middle: Option<Vec<GlobMatcher>>,
}

impl DotSegments {
    fn new(pattern: &str) -> Result<Self, SelectionError> {
        let segments: Vec<&str> = pattern.split('/').collect();
        let spells_dot = |seg: &&str| seg.starts_with('.');

        let first = segments.iter().position(|seg| *seg == "**");
        let last = segments.iter().rposition(|seg| *seg == "**");
        let (Some(first), Some(last)) = (first, last) else {
            return Ok(Self {
                head: segments.iter().map(spells_dot).collect(),
                tail: Vec::new(),
                middle: None,
            });
        };

        let middle = segments[first..=last]
            .iter()
            .filter(|seg| seg.starts_with('.'))
            .map(|seg| compile_segment(pattern, seg))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            head: segments[..first].iter().map(spells_dot).collect(),
            tail: segments[last + 1..].iter().map(spells_dot).collect(),
            middle: Some(middle),
        })
    }

    fn allows(&self, path: &str) -> bool {
        let segments: Vec<&str> = path.split('/').collect();
        let Some(middle) = &self.middle else {
            return segments.len() == self.head.len() && aligned(&segments, &self.head);
        };

        if segments.len() < self.head.len() + self.tail.len() {
            return false;
        }
        let (head, rest) = segments.split_at(self.head.len());
        let (inner, tail) = rest.split_at(rest.len() - self.tail.len());

        aligned(head, &self.head)
            && aligned(tail, &self.tail)
            && inner
                .iter()
                .all(|seg| !seg.starts_with('.') || middle.iter().any(|m| m.is_match(seg)))
    }
}

fn aligned(segments: &[&str], spells_dot: &[bool]) -> bool {
    segments
        .iter()
        .zip(spells_dot)
        .all(|(seg, dot)| *dot || !seg.starts_with('.'))
}

fn compile_segment(pattern: &str, segment: &str) -> Result<GlobMatcher, SelectionError> {
    GlobBuilder::new(segment)
        .literal_separator(true)
        .backslash_escape(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| SelectionError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.kind().to_string(),
        })
}

/// Include/exclude filter applied to the dist file list.
#[derive(Debug, Clone)]
pub struct PathFilter {
    include: GlobPattern,
    exclude: Option<GlobPattern>,
    dot_files: bool,
}

impl PathFilter {
    /// Compiles an include pattern and an optional exclude pattern.
    ///
    /// An empty exclude pattern is treated as absent.
    pub fn new(
        include: &str,
        exclude: Option<&str>,
        dot_files: bool,
    ) -> Result<Self, SelectionError> {
        let include = GlobPattern::new(include)?;
        let exclude = match exclude {
            Some(p) if !p.is_empty() => Some(GlobPattern::new(p)?),
            _ => None,
        };
        Ok(Self {
            include,
            exclude,
            dot_files,
        })
    }

    /// Returns the compiled exclude pattern, if any.
    pub fn exclude_pattern(&self) -> Option<&GlobPattern> {
        self.exclude.as_ref()
    }

    /// True if `path` matches the include pattern.
    pub fn includes(&self, path: &str) -> bool {
        self.include.is_match(path, self.dot_files)
    }

    /// True if `path` matches the exclude pattern.
    ///
    /// Exclusion always considers dot segments, so an excluded path is never
    /// kept regardless of how it was included.
    pub fn excludes(&self, path: &str) -> bool {
        self.exclude.as_ref().is_some_and(|p| p.is_match(path, true))
    }

    /// Filters `paths`, preserving input order.
    pub fn apply(&self, paths: &[String]) -> Vec<String> {
        paths
            .iter()
            .filter(|p| self.includes(p) && !self.excludes(p))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASSET_PATTERN: &str =
        "**/*.{js,css,png,gif,ico,jpg,webp,map,xml,txt,svg,swf,eot,ttf,woff,woff2,otf,wasm,json}";

    fn paths(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn include_keeps_matching_in_order() {
        let filter = PathFilter::new("**/*.js", None, false).unwrap();
        let out = filter.apply(&paths(&["a.js", "b.css", "c.js"]));
        assert_eq!(out, vec!["a.js", "c.js"]);
    }

    #[test]
    fn recursive_pattern_matches_nested() {
        let filter = PathFilter::new("**/*.js", None, false).unwrap();
        let out = filter.apply(&paths(&["assets/app.js", "assets/vendor/x.js", "index.html"]));
        assert_eq!(out, vec!["assets/app.js", "assets/vendor/x.js"]);
    }

    #[test]
    fn base_name_pattern_matches_in_subdirs() {
        let filter = PathFilter::new("*.css", None, false).unwrap();
        let out = filter.apply(&paths(&["app.css", "assets/deep/theme.css", "assets/app.js"]));
        assert_eq!(out, vec!["app.css", "assets/deep/theme.css"]);
    }

    #[test]
    fn star_does_not_cross_separator() {
        let pattern = GlobPattern::new("assets/*.js").unwrap();
        assert!(pattern.is_match("assets/app.js", false));
        assert!(!pattern.is_match("assets/vendor/app.js", false));
    }

    #[test]
    fn default_asset_pattern() {
        let filter = PathFilter::new(ASSET_PATTERN, None, false).unwrap();
        let out = filter.apply(&paths(&[
            "index.html",
            "assets/app-1f2e.js",
            "assets/app.css",
            "fonts/icons.woff2",
            "robots.txt",
            "engine.wasm",
        ]));
        assert_eq!(
            out,
            vec![
                "assets/app-1f2e.js",
                "assets/app.css",
                "fonts/icons.woff2",
                "robots.txt",
                "engine.wasm",
            ]
        );
    }

    #[test]
    fn exclude_removes_even_when_included() {
        let filter = PathFilter::new("**/*.{js,map}", Some("*.map"), false).unwrap();
        let out = filter.apply(&paths(&["assets/app.js", "assets/app.js.map", "vendor.map"]));
        assert_eq!(out, vec!["assets/app.js"]);
    }

    #[test]
    fn empty_exclude_is_ignored() {
        let filter = PathFilter::new("**/*.js", Some(""), false).unwrap();
        assert!(filter.exclude_pattern().is_none());
        assert_eq!(filter.apply(&paths(&["a.js"])), vec!["a.js"]);
    }

    #[test]
    fn dot_segments_skipped_by_default() {
        let filter = PathFilter::new("**/*.json", None, false).unwrap();
        let input = paths(&[".well-known/apple-app-site-association.json", "manifest.json", ".eslintrc.json"]);
        assert_eq!(filter.apply(&input), vec!["manifest.json"]);

        let dotted = PathFilter::new("**/*.json", None, true).unwrap();
        assert_eq!(dotted.apply(&input), input);
    }

    #[test]
    fn explicit_dot_pattern_matches_without_flag() {
        let pattern = GlobPattern::new(".well-known/*").unwrap();
        assert!(pattern.is_match(".well-known/security.txt", false));

        let base = GlobPattern::new(".htaccess").unwrap();
        assert!(base.is_match("public/.htaccess", false));
    }

    #[test]
    fn wildcards_skip_dot_segments_inside_named_dot_folder() {
        let pattern = GlobPattern::new(".well-known/*").unwrap();
        assert!(!pattern.is_match(".well-known/.env", false));
        assert!(pattern.is_match(".well-known/.env", true));

        let nested = GlobPattern::new(".well-known/**").unwrap();
        assert!(nested.is_match(".well-known/acme/token", false));
        assert!(!nested.is_match(".well-known/.git/config", false));
    }

    #[test]
    fn globstar_does_not_enter_dot_folders() {
        let pattern = GlobPattern::new("**/.htaccess").unwrap();
        assert!(pattern.is_match(".htaccess", false));
        assert!(pattern.is_match("public/.htaccess", false));
        assert!(!pattern.is_match(".git/.htaccess", false));
        assert!(pattern.is_match(".git/.htaccess", true));

        let between = GlobPattern::new("**/.cache/**/*.json").unwrap();
        assert!(between.is_match("app/.cache/v1/data.json", false));
        assert!(!between.is_match(".git/.cache/v1/data.json", false));
        assert!(!between.is_match("app/.cache/v1/.hidden.json", false));
    }

    #[test]
    fn exclude_applies_to_dot_segments() {
        let filter = PathFilter::new("**/*.txt", Some("**/*.txt"), true).unwrap();
        assert!(filter.apply(&paths(&[".well-known/security.txt"])).is_empty());
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let filter = PathFilter::new("**/*", None, false).unwrap();
        assert!(filter.apply(&[]).is_empty());
    }

    #[test]
    fn result_is_subset_matching_include_and_not_exclude() {
        let filter = PathFilter::new("**/*.{js,css}", Some("vendor/**"), false).unwrap();
        let input = paths(&["a.js", "vendor/b.js", "c.css", "d.png", "vendor/e.css", "f/g.js"]);
        let out = filter.apply(&input);
        assert_eq!(out, vec!["a.js", "c.css", "f/g.js"]);
        for p in &out {
            assert!(input.contains(p));
            assert!(filter.includes(p));
            assert!(!filter.excludes(p));
        }
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = PathFilter::new("**/*.{js", None, false).unwrap_err();
        assert!(matches!(err, SelectionError::InvalidPattern { ref pattern, .. } if pattern == "**/*.{js"));
    }
}
