use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Remove the leading component from an archive entry path.
///
/// Release archives carry one top-level wrapper directory around the whole
/// payload; stripping it lands the payload directly under the destination.
/// Returns `None` when nothing remains, which identifies the wrapper entry
/// itself.
pub fn strip_wrapper(path: &Path) -> Option<PathBuf> {
    let components: Vec<_> = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if components.len() <= 1 {
        return None;
    }
    Some(components[1..].iter().collect())
}

/// Resolve an entry's relative path strictly under `dest_root`.
///
/// `.` components are dropped and `..` components resolved while walking;
/// an absolute entry or a `..` that would climb above the root fails with
/// [`Error::PathEscape`]. The result always has `dest_root` as a strict
/// prefix.
pub fn resolve_under(dest_root: &Path, relative: &Path) -> Result<PathBuf> {
    let mut resolved = dest_root.to_path_buf();

    for component in relative.components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if resolved == dest_root {
                    return Err(escape(dest_root, relative));
                }
                resolved.pop();
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(escape(dest_root, relative));
            }
        }
    }

    if resolved == dest_root || !resolved.starts_with(dest_root) {
        return Err(escape(dest_root, relative));
    }
    Ok(resolved)
}

fn escape(dest_root: &Path, relative: &Path) -> Error {
    Error::PathEscape {
        entry: relative.to_path_buf(),
        resolved: dest_root.join(relative),
    }
}
