//! Ref name and path prefix normalization.

/// Removes any leading run of `*` and `/` characters, e.g. `*/main` -> `main`.
pub fn strip_ref_decorations(git_ref: &str) -> &str {
    git_ref.trim_start_matches(['*', '/'])
}

/// Removes a leading `prefix` directory from `path`.
///
/// The prefix only matches whole path segments: it must be followed by `/`
/// or the end of the string. Unmatched paths are returned unchanged.
pub fn relativize_path<'a>(path: &'a str, prefix: &str) -> &'a str {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return path;
    }
    match path.strip_prefix(prefix) {
        Some(rest) if rest.is_empty() => rest,
        Some(rest) => rest.strip_prefix('/').unwrap_or(path),
        None => path,
    }
}

/// Rebuilds a relative path from its segments, dropping empty and `.`
/// segments: `./app//ci/` -> `app/ci`.
pub fn normalize_path(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Trims surrounding whitespace and leading decorations, so `" */main "` and
/// `main` name the same ref.
pub fn normalize_ref(git_ref: &str) -> &str {
    strip_ref_decorations(git_ref.trim())
}
