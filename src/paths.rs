//! Path resolution for command line inputs.

use crate::error::Result;
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Expand a leading `~` and make the path absolute against the current directory
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(path);
    Ok(expanded.absolutize()?.into_owned())
}

/// Replace a leading `~` component with the home directory, if known
pub fn expand_tilde(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_become_absolute() {
        let resolved = resolve_path(Path::new("project/./build")).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("project/build"));
    }

    #[test]
    fn parent_components_are_collapsed() {
        let resolved = resolve_path(Path::new("/srv/fw/../board")).unwrap();
        assert_eq!(resolved, PathBuf::from("/srv/board"));
    }

    #[test]
    fn tilde_expands_to_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~/fw")), home.join("fw"));
        }
        assert_eq!(expand_tilde(Path::new("/abs/~x")), PathBuf::from("/abs/~x"));
    }
}
