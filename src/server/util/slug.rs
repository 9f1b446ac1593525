/// Lowercase, hyphen-separated slug with non-ASCII letters transliterated.
///
/// Titles with no usable characters fall back to `course`.
pub fn slugify(title: &str) -> String {
    let slug = ::slug::slugify(title);

    if slug.is_empty() {
        "course".to_string()
    } else {
        slug
    }
}

/// Candidate slug for the `attempt`-th collision: `base`, `base-2`, `base-3`, ...
pub fn with_suffix(base: &str, attempt: u32) -> String {
    if attempt <= 1 {
        base.to_string()
    } else {
        format!("{}-{}", base, attempt)
    }
}
