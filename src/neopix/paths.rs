//! Path resolution for user-supplied paths.
//!
//! Pure path arithmetic: nothing here touches the filesystem, so symlinks are
//! not followed and the result may name a path that does not exist yet.

use std::path::{Component, Path, PathBuf};

/// Resolve `input` against the process's current working directory.
pub fn resolve_path<P: AsRef<Path>>(input: P) -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
    resolve_path_from(&cwd, input)
}

/// Resolve `input` against `cwd`. Absolute inputs are returned unchanged.
pub fn resolve_path_from<P: AsRef<Path>>(cwd: &Path, input: P) -> PathBuf {
    let input = input.as_ref();
    if input.is_absolute() {
        return input.to_path_buf();
    }
    normalize(&cwd.join(input))
}

/// Lexically collapse `.` and `..` segments.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root
                if !matches!(
                    out.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                ) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_input_is_unchanged() {
        let resolved = resolve_path_from(Path::new("/work"), "/tmp/./shots/../a.png");
        assert_eq!(resolved, PathBuf::from("/tmp/./shots/../a.png"));
    }

    #[test]
    fn relative_input_joins_cwd() {
        let resolved = resolve_path_from(Path::new("/work"), "shots/a.png");
        assert_eq!(resolved, PathBuf::from("/work/shots/a.png"));
    }

    #[test]
    fn dot_segments_are_collapsed() {
        let resolved = resolve_path_from(Path::new("/work/ci"), "./../shots/./a.png");
        assert_eq!(resolved, PathBuf::from("/work/shots/a.png"));
    }

    #[test]
    fn parent_segments_stop_at_root() {
        let resolved = resolve_path_from(Path::new("/work"), "../../../a.png");
        assert_eq!(resolved, PathBuf::from("/a.png"));
    }

    #[test]
    fn trailing_separator_and_current_dir() {
        assert_eq!(resolve_path_from(Path::new("/work"), "./"), PathBuf::from("/work"));
        assert_eq!(resolve_path_from(Path::new("/work"), ""), PathBuf::from("/work"));
    }
}
