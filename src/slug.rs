/// Derive a URL-safe slug from a display name.
///
/// Lowercases the input, turns every run of characters outside `[a-z0-9-]`
/// into a single hyphen, collapses repeated hyphens, and trims hyphens from
/// both ends. Tag slugs are regenerated with this whenever a tag is renamed.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_hyphen = true; // suppress a leading hyphen

    for c in name.chars().flat_map(|c| c.to_lowercase()) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

/// Check the station-slug grammar: non-empty, lowercase letters, digits,
/// and hyphens only. Stations receive their slug from the admin request, so
/// this is validated rather than derived.
pub fn is_valid(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
