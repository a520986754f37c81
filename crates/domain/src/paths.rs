//! Subpath helpers and reserved path markers
//!
//! Subpaths are hierarchical paths within a space. The backend expects runs
//! of `/` collapsed to a single separator and represents the space root by
//! the reserved `__root__` marker.

/// Reserved literal the backend uses for the root of a space.
pub const ROOT_SUBPATH: &str = "__root__";

/// The space holding management records (users, roles, spaces listing).
pub const MANAGEMENT_SPACE: &str = "management";

/// Collapse any run of consecutive `/` separators into one.
pub fn normalize_subpath(subpath: &str) -> String {
    let mut out = String::with_capacity(subpath.len());
    let mut last_was_sep = false;
    for ch in subpath.chars() {
        if ch == '/' {
            if !last_was_sep {
                out.push('/');
            }
            last_was_sep = true;
        } else {
            out.push(ch);
            last_was_sep = false;
        }
    }
    out
}

/// Normalize a subpath for use in an entry URL: an empty or root (`/`)
/// subpath maps to the reserved [`ROOT_SUBPATH`] marker.
pub fn effective_subpath(subpath: &str) -> String {
    let normalized = normalize_subpath(subpath);
    if normalized.is_empty() || normalized == "/" {
        ROOT_SUBPATH.to_string()
    } else {
        normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_repeated_separators() {
        assert_eq!(normalize_subpath("a//b///c"), "a/b/c");
        assert_eq!(normalize_subpath("/a/b/"), "/a/b/");
        assert_eq!(normalize_subpath("////"), "/");
    }

    #[test]
    fn leaves_clean_paths_untouched() {
        assert_eq!(normalize_subpath("a/b/c"), "a/b/c");
        assert_eq!(normalize_subpath(""), "");
    }

    #[test]
    fn empty_and_root_map_to_root_marker() {
        assert_eq!(effective_subpath(""), ROOT_SUBPATH);
        assert_eq!(effective_subpath("/"), ROOT_SUBPATH);
        assert_eq!(effective_subpath("///"), ROOT_SUBPATH);
    }

    #[test]
    fn non_root_subpath_is_only_normalized() {
        assert_eq!(effective_subpath("posts//2024"), "posts/2024");
    }
}
