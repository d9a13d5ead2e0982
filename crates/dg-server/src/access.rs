//! Root containment for file access.
//!
//! Report paths go back to the browser and come back as query parameters,
//! so nothing about them can be trusted. A requested path is only served if
//! its canonical form lies inside the canonical form of a configured root.
//! Containment is decided before existence, so a path outside the roots is
//! denied whether or not it exists.

use std::io;
use std::path::{Component, Path, PathBuf};

use camino::Utf8Path;

use crate::error::ViewError;

/// Resolves `requested` to a canonical regular file inside one of `roots`.
///
/// Roots that cannot be canonicalized (missing, unreadable) are skipped.
///
/// # Errors
///
/// - [`ViewError::MissingParameter`] if `requested` is empty
/// - [`ViewError::AccessDenied`] if it resolves outside every root, or if
///   it does not exist and its deepest existing ancestor is outside them
/// - [`ViewError::NotFound`] if a path inside a root does not exist or is
///   not a file
pub async fn resolve_within_roots<'a>(
    requested: &str,
    roots: impl IntoIterator<Item = &'a Utf8Path>,
) -> Result<PathBuf, ViewError> {
    if requested.is_empty() {
        return Err(ViewError::MissingParameter("file"));
    }

    let canonical = tokio::fs::canonicalize(requested).await;
    let anchor = match &canonical {
        Ok(path) => Some(path.clone()),
        Err(_) => existing_ancestor(Path::new(requested)).await,
    };

    let mut inside = false;
    if let Some(anchor) = &anchor {
        for root in roots {
            let root = tokio::fs::canonicalize(root).await;
            if root.is_ok_and(|root| is_within(anchor, &root)) {
                inside = true;
                break;
            }
        }
    }
    if !inside {
        return Err(ViewError::AccessDenied(requested.to_owned()));
    }

    let resolved = match canonical {
        Ok(path) => path,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ViewError::NotFound(requested.to_owned()));
        }
        Err(e) => return Err(ViewError::Io(e)),
    };

    let metadata = tokio::fs::metadata(&resolved).await?;
    if !metadata.is_file() {
        return Err(ViewError::NotFound(requested.to_owned()));
    }

    Ok(resolved)
}

/// Canonical form of the deepest ancestor of `path` that exists.
///
/// `None` when nothing resolves, or when the unresolved tail contains `..`
/// and so could still climb out of the ancestor.
async fn existing_ancestor(path: &Path) -> Option<PathBuf> {
    for ancestor in path.ancestors().skip(1) {
        let Ok(canonical) = tokio::fs::canonicalize(ancestor).await else {
            continue;
        };
        let tail = path.strip_prefix(ancestor).ok()?;
        if tail.components().any(|c| c == Component::ParentDir) {
            return None;
        }
        return Some(canonical);
    }
    None
}

/// Component-wise prefix test on already canonical paths.
fn is_within(path: &Path, root: &Path) -> bool {
    path.starts_with(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use std::fs;
    use tempfile::TempDir;

    fn utf8(path: &Path) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(path.to_path_buf()).unwrap()
    }

    #[test]
    fn test_is_within_is_component_wise() {
        assert!(is_within(Path::new("/srv/docs/a.pdf"), Path::new("/srv/docs")));
        assert!(!is_within(Path::new("/srv/docs2/a.pdf"), Path::new("/srv/docs")));
    }

    #[tokio::test]
    async fn test_file_inside_root() {
        let dir = TempDir::new().unwrap();
        let root = utf8(dir.path());
        let file = root.join("202401_Invoice.pdf");
        fs::write(&file, "x").unwrap();

        let resolved = resolve_within_roots(file.as_str(), [root.as_path()]).await.unwrap();
        assert_eq!(resolved, fs::canonicalize(&file).unwrap());
    }

    #[tokio::test]
    async fn test_traversal_outside_root_is_denied() {
        let dir = TempDir::new().unwrap();
        let base = utf8(dir.path());
        let root = base.join("docs");
        fs::create_dir_all(&root).unwrap();
        fs::write(base.join("secret.txt"), "x").unwrap();

        let sneaky = format!("{root}/../secret.txt");
        let err = resolve_within_roots(&sneaky, [root.as_path()]).await.unwrap_err();
        assert!(matches!(err, ViewError::AccessDenied(_)));
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let root = utf8(dir.path());
        let missing = root.join("nope.pdf");

        let err = resolve_within_roots(missing.as_str(), [root.as_path()]).await.unwrap_err();
        assert!(matches!(err, ViewError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_missing_file_outside_root_is_denied() {
        let dir = TempDir::new().unwrap();
        let base = utf8(dir.path());
        let root = base.join("docs");
        fs::create_dir_all(&root).unwrap();
        fs::write(base.join("secret.txt"), "x").unwrap();

        // Existing and missing files next to the root answer the same way.
        for name in ["secret.txt", "nope.txt", "gone/nope.txt"] {
            let outside = base.join(name);
            let err = resolve_within_roots(outside.as_str(), [root.as_path()]).await.unwrap_err();
            assert!(matches!(err, ViewError::AccessDenied(_)), "{name}: {err:?}");
        }
    }

    #[tokio::test]
    async fn test_missing_traversal_is_denied() {
        let dir = TempDir::new().unwrap();
        let root = utf8(dir.path()).join("docs");
        fs::create_dir_all(&root).unwrap();

        for sneaky in [
            format!("{root}/../nope.txt"),
            format!("{root}/missing/../../nope.txt"),
        ] {
            let err = resolve_within_roots(&sneaky, [root.as_path()]).await.unwrap_err();
            assert!(matches!(err, ViewError::AccessDenied(_)), "{sneaky}: {err:?}");
        }
    }

    #[tokio::test]
    async fn test_missing_file_in_missing_subfolder_is_not_found() {
        let dir = TempDir::new().unwrap();
        let root = utf8(dir.path());
        let missing = root.join("2024/202401_Invoice.pdf");

        let err = resolve_within_roots(missing.as_str(), [root.as_path()]).await.unwrap_err();
        assert!(matches!(err, ViewError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_directory_is_not_found() {
        let dir = TempDir::new().unwrap();
        let root = utf8(dir.path());
        fs::create_dir_all(root.join("sub")).unwrap();

        let sub = root.join("sub");
        let err = resolve_within_roots(sub.as_str(), [root.as_path()]).await.unwrap_err();
        assert!(matches!(err, ViewError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_empty_parameter() {
        let err = resolve_within_roots("", std::iter::empty()).await.unwrap_err();
        assert!(matches!(err, ViewError::MissingParameter("file")));
    }
}
