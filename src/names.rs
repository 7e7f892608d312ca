//! Logger names are dotted paths (`app.net.http`); these helpers answer
//! hierarchy questions about them.

/// Name of the root logger. The empty string is accepted as an alias.
pub const ROOT: &str = "root";

/// `true` for both spellings of the root logger's name.
#[must_use]
pub fn is_root(name: &str) -> bool {
    name.is_empty() || name == ROOT
}

/// Normalizes the empty alias to [`ROOT`] and Rust module paths (`a::b`) to dotted form.
#[must_use]
pub fn normalize(name: &str) -> String {
    if is_root(name) {
        ROOT.to_string()
    } else {
        name.replace("::", ".")
    }
}

/// First segment of a dotted name, e.g. `"app"` for `"app.net.http"`.
#[must_use]
pub fn root_name(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}

/// Whether `name` is `hierarchy` itself or one of its descendants.
///
/// The root hierarchy contains every logger.
#[must_use]
pub fn is_in_hierarchy(hierarchy: &str, name: &str) -> bool {
    if is_root(hierarchy) {
        return true;
    }
    name == hierarchy
        || (name.len() > hierarchy.len()
            && name.starts_with(hierarchy)
            && name.as_bytes()[hierarchy.len()] == b'.')
}

/// Parent of a dotted name; the root has none, top-level names have the root.
#[must_use]
pub fn parent(name: &str) -> Option<&str> {
    if is_root(name) {
        return None;
    }
    Some(name.rsplit_once('.').map_or(ROOT, |(parent, _)| parent))
}

/// `name` followed by each ancestor up to and including the root.
pub fn ancestry(name: &str) -> impl Iterator<Item = &str> {
    std::iter::successors(Some(name), |n| parent(n))
}
