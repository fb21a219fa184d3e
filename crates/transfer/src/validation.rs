use crate::TransferError;

/// Validates a dist-relative path before it becomes an object key.
///
/// Paths are `/`-separated the way the dist scanner produces them, so the
/// check is the same on every platform. Rejects:
/// - Empty paths and empty segments (`assets//app.js`, trailing `/`)
/// - Absolute paths (`/etc/passwd`) and drive prefixes (`C:/`, `C:app.js`)
/// - Backslash separators (`assets\app.js`, `\\server\share`)
/// - `.` and `..` segments, which would produce non-canonical or escaping keys
pub fn validate_object_path(file_path: &str) -> Result<(), TransferError> {
    let invalid = |reason: &str| {
        Err(TransferError::InvalidRequest(format!(
            "{reason}: {file_path:?}"
        )))
    };

    if file_path.is_empty() {
        return invalid("empty path");
    }
    if file_path.starts_with('/') || has_drive_prefix(file_path) {
        return invalid("absolute path not allowed");
    }
    if file_path.contains('\\') {
        return invalid("backslash separator not allowed");
    }

    for segment in file_path.split('/') {
        match segment {
            "" => return invalid("empty path segment"),
            "." => return invalid("current directory segment not allowed"),
            ".." => return invalid("parent directory traversal not allowed"),
            _ => {}
        }
    }

    Ok(())
}

fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_path() {
        assert!(validate_object_path("").is_err());
        assert!(validate_object_path("assets//app.js").is_err());
        assert!(validate_object_path("assets/").is_err());
    }

    #[test]
    fn rejects_parent_dir_traversal() {
        assert!(validate_object_path("../secrets.env").is_err());
        assert!(validate_object_path("assets/../../escape.js").is_err());
    }

    #[test]
    fn rejects_current_dir_segments() {
        assert!(validate_object_path("./assets/app.js").is_err());
        assert!(validate_object_path("assets/./app.js").is_err());
    }

    #[test]
    fn rejects_absolute_path() {
        assert!(validate_object_path("/etc/passwd").is_err());
    }

    #[test]
    fn rejects_windows_paths() {
        assert!(validate_object_path("C:/dist/app.js").is_err());
        assert!(validate_object_path("c:app.js").is_err());
        assert!(validate_object_path("assets\\app.js").is_err());
        assert!(validate_object_path("\\\\server\\share\\app.js").is_err());
    }

    #[test]
    fn error_names_the_path() {
        let err = validate_object_path("assets/../app.js").unwrap_err();
        assert!(err.to_string().contains("assets/../app.js"));
    }

    #[test]
    fn accepts_dist_paths() {
        assert!(validate_object_path("index.html").is_ok());
        assert!(validate_object_path("assets/images/logo.png").is_ok());
        assert!(validate_object_path(".well-known/security.txt").is_ok());
        assert!(validate_object_path("assets/app..js").is_ok());
        assert!(validate_object_path("fonts/a:b.woff2").is_ok());
    }
}
