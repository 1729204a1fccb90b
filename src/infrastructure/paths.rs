//! Filesystem locations for preferences and traces.

use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "MARQUEE_DATA_DIR";

/// File name of the preferences document inside the data directory.
pub const PREFERENCES_FILE: &str = "preferences.json";

/// Returns the data directory for Marquee storage.
///
/// Resolution order: `$MARQUEE_DATA_DIR`, then `$HOME/.local/share/marquee`,
/// then `.marquee` in the working directory.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    resolve_data_dir(
        std::env::var_os(DATA_DIR_ENV).map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

fn resolve_data_dir(override_dir: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    override_dir
        .filter(|dir| !dir.as_os_str().is_empty())
        .or_else(|| home.map(|h| h.join(".local").join("share").join("marquee")))
        .unwrap_or_else(|| PathBuf::from(".marquee"))
}

/// Path of the preferences file within `data_dir`.
#[must_use]
pub fn preferences_path(data_dir: &Path) -> PathBuf {
    data_dir.join(PREFERENCES_FILE)
}

/// Expands a leading `~` to `$HOME`. Paths without one are returned as is.
///
/// # Examples
///
/// ```
/// use marquee::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    expand_with_home(path, std::env::var_os("HOME").map(PathBuf::from).as_deref())
}

fn expand_with_home(path: &str, home: Option<&Path>) -> PathBuf {
    match (path, home) {
        ("~", Some(home)) => home.to_path_buf(),
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_prefers_override() {
        let dir = resolve_data_dir(Some("/srv/marquee".into()), Some("/home/ana".into()));
        assert_eq!(dir, PathBuf::from("/srv/marquee"));

        let dir = resolve_data_dir(Some(PathBuf::new()), Some("/home/ana".into()));
        assert_eq!(dir, PathBuf::from("/home/ana/.local/share/marquee"));

        assert_eq!(resolve_data_dir(None, None), PathBuf::from(".marquee"));
    }

    #[test]
    fn tilde_expansion() {
        let home = Path::new("/home/ana");
        assert_eq!(expand_with_home("~", Some(home)), PathBuf::from("/home/ana"));
        assert_eq!(
            expand_with_home("~/movies.json", Some(home)),
            PathBuf::from("/home/ana/movies.json")
        );
        assert_eq!(expand_with_home("~/x", None), PathBuf::from("~/x"));
        assert_eq!(expand_with_home("rel/x", Some(home)), PathBuf::from("rel/x"));
    }
}
