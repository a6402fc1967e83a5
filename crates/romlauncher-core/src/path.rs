//! Library-root relative path conversion.
//!
//! Persisted favorites and history store paths relative to the library root so
//! that they survive the content directory moving. Paths are `/`-separated
//! strings rather than [`std::path::Path`] because console roots such as
//! `sdmc:/roms` are not native paths on the host.

/// Path separator used in content paths and persisted files.
pub const SEPARATOR: char = '/';

/// Bidirectional mapping between absolute content paths and paths relative to
/// the library root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathConverter {
    root: String,
}

impl PathConverter {
    /// Create a converter for the given library root.
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }

    /// The library root.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Strip the library root from `absolute`, if it is rooted there.
    ///
    /// The prefix must end on a path boundary, so `/roms` does not strip
    /// `/romsets/a.nes`. A single leading separator is removed from the result.
    pub fn strip_root<'a>(&self, absolute: &'a str) -> Option<&'a str> {
        let rest = absolute.strip_prefix(self.root.as_str())?;
        let on_boundary = self.root.is_empty()
            || self.root.ends_with(SEPARATOR)
            || rest.is_empty()
            || rest.starts_with(SEPARATOR);
        if !on_boundary {
            return None;
        }
        Some(rest.strip_prefix(SEPARATOR).unwrap_or(rest))
    }

    /// Convert an absolute path to a root-relative one.
    ///
    /// Paths outside the root are returned unchanged.
    pub fn to_relative(&self, absolute: &str) -> String {
        match self.strip_root(absolute) {
            Some(relative) => relative.to_string(),
            None => {
                tracing::debug!(path = absolute, root = %self.root, "path outside library root, keeping it verbatim");
                absolute.to_string()
            }
        }
    }

    /// Convert a root-relative path to an absolute one.
    ///
    /// A path that already starts with the root, or is absolute on its own
    /// (see [`is_absolute`]), is returned unchanged.
    pub fn to_absolute(&self, relative: &str) -> String {
        if relative.starts_with(self.root.as_str()) || is_absolute(relative) {
            return relative.to_string();
        }
        join(&self.root, relative)
    }
}

/// Whether `path` is absolute: it starts with a separator or with a mount
/// prefix such as `sdmc:/` or `usb:/`.
pub fn is_absolute(path: &str) -> bool {
    if path.starts_with(SEPARATOR) {
        return true;
    }
    match path.split_once(':') {
        Some((mount, rest)) => {
            !mount.is_empty() && !mount.contains(SEPARATOR) && rest.starts_with(SEPARATOR)
        }
        None => false,
    }
}

/// Join a directory and a name with exactly one separator between them.
pub fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        return name.to_string();
    }
    let name = name.strip_prefix(SEPARATOR).unwrap_or(name);
    if dir.ends_with(SEPARATOR) {
        format!("{dir}{name}")
    } else {
        format!("{dir}{SEPARATOR}{name}")
    }
}

/// The final component of a path.
pub fn file_name(path: &str) -> &str {
    match path.rfind(SEPARATOR) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Everything before the last separator, or `None` when there is none.
pub fn parent(path: &str) -> Option<&str> {
    path.rfind(SEPARATOR).map(|idx| &path[..idx])
}

/// The file name without its extension.
///
/// A leading dot (hidden file) is not treated as an extension separator.
pub fn file_stem(path: &str) -> &str {
    let name = file_name(path);
    match name.rfind('.') {
        Some(0) | None => name,
        Some(idx) => &name[..idx],
    }
}

/// The extension of the final component, without the dot.
pub fn extension(path: &str) -> Option<&str> {
    let name = file_name(path);
    match name.rfind('.') {
        Some(0) | None => None,
        Some(idx) => Some(&name[idx + 1..]),
    }
}
