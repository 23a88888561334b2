//! Path canonicalization.
//!
//! VFS paths are plain strings: absolute, `/`-separated, no trailing slash
//! except the root, no `.` segments and no `..` left unresolved.

/// A normalized path plus whether `..` tried to climb above the root.
///
/// Climbing above the root is not an error; the extra `..` segments are
/// dropped. `clamped` records that it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPath {
    pub path: String,
    pub clamped: bool,
}

impl NormalizedPath {
    /// Borrow the path string.
    pub fn as_str(&self) -> &str {
        &self.path
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path)
    }
}

/// Normalize `input` against the working directory `cwd`.
///
/// Relative inputs get `cwd + "/"` prepended. Empty and `.` segments are
/// dropped, `..` pops one segment (or is ignored at the root).
pub fn normalize(cwd: &str, input: &str) -> NormalizedPath {
    let joined;
    let full = if input.starts_with('/') {
        input
    } else {
        joined = format!("{cwd}/{input}");
        joined.as_str()
    };

    let mut stack: Vec<&str> = Vec::new();
    let mut clamped = false;
    for segment in full.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if stack.pop().is_none() {
                    clamped = true;
                }
            }
            name => stack.push(name),
        }
    }

    NormalizedPath {
        path: format!("/{}", stack.join("/")),
        clamped,
    }
}

/// The last segment of a normalized path, or `""` for the root.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or("")
}

/// The directory part of a normalized path. The root is its own parent.
pub fn parent(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => "/",
        Some(idx) => &path[..idx],
    }
}

/// Join a normalized directory and a single name.
pub fn path_join(dir: &str, name: &str) -> String {
    if dir == "/" {
        format!("/{name}")
    } else {
        format!("{dir}/{name}")
    }
}

/// The single segment below `dir` that `path` names, if `path` is an
/// immediate child of `dir`. Both must already be normalized.
pub(crate) fn child_name<'a>(dir: &str, path: &'a str) -> Option<&'a str> {
    let rest = if dir == "/" {
        path.strip_prefix('/')?
    } else {
        path.strip_prefix(dir)?.strip_prefix('/')?
    };
    if rest.is_empty() || rest.contains('/') {
        None
    } else {
        Some(rest)
    }
}
