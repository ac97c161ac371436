//! Config file location.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Config file name inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Application directory under the user config root.
const APP_DIR: &str = "tmdbv3";

/// Resolves the config file path.
///
/// Lookup order:
/// 1. `{dir}/config.toml` when `--dir` is given.
/// 2. `$XDG_CONFIG_HOME/tmdbv3/config.toml` when set and non-empty.
/// 3. `$HOME/.config/tmdbv3/config.toml`.
///
/// # Errors
///
/// Returns an error if none of the above can be determined.
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    let xdg_config_home = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);
    let home = std::env::var_os("HOME").map(PathBuf::from);
    config_path_from(dir.map(PathBuf::as_path), xdg_config_home.as_deref(), home.as_deref())
}

/// Env-free core of [`resolve_config_path`].
fn config_path_from(
    dir: Option<&Path>,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf> {
    if let Some(dir) = dir {
        return Ok(dir.join(CONFIG_FILE));
    }

    let config_root = match (xdg_config_home, home) {
        (Some(xdg), _) if !xdg.as_os_str().is_empty() => xdg.to_path_buf(),
        (_, Some(home)) if !home.as_os_str().is_empty() => home.join(".config"),
        _ => bail!("cannot locate config directory: neither XDG_CONFIG_HOME nor HOME is set"),
    };
    Ok(config_root.join(APP_DIR).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_dir_overrides_env() {
        // Arrange
        let dir = Path::new("/srv/tmdb");

        // Act
        let path = config_path_from(
            Some(dir),
            Some(Path::new("/xdg")),
            Some(Path::new("/home/u")),
        )
        .unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/srv/tmdb/config.toml"));
    }

    #[test]
    fn test_xdg_config_home() {
        // Arrange & Act
        let path =
            config_path_from(None, Some(Path::new("/xdg")), Some(Path::new("/home/u"))).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/xdg/tmdbv3/config.toml"));
    }

    #[test]
    fn test_empty_xdg_falls_back_to_home() {
        // Arrange & Act
        let path =
            config_path_from(None, Some(Path::new("")), Some(Path::new("/home/u"))).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/home/u/.config/tmdbv3/config.toml"));
    }

    #[test]
    fn test_no_location_available() {
        // Arrange & Act
        let result = config_path_from(None, None, None);

        // Assert
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("cannot locate config directory")
        );
    }

    #[test]
    fn test_resolve_with_dir() {
        // Arrange
        let dir = PathBuf::from("/tmp/movies");

        // Act
        let path = resolve_config_path(Some(&dir)).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/tmp/movies/config.toml"));
    }
}
