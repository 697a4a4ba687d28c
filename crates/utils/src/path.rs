use std::path::{Path, PathBuf};

use color_eyre::Result;

/// `<base>/<app_name>/<app_name>.log`
#[must_use]
pub fn log_path_in(base: &Path, app_name: &str) -> PathBuf {
    base.join(app_name).join(format!("{app_name}.log"))
}

/// Log file location under the user cache directory, with its folder created.
///
/// # Errors
///
/// Returns an error if the cache directory cannot be determined or created.
pub async fn create_log_path(app_name: &str) -> Result<PathBuf> {
    let base = dirs::cache_dir().ok_or_else(|| color_eyre::eyre::eyre!("Failed to get cache directory"))?;
    let log_path = log_path_in(&base, app_name);
    if let Some(dir) = log_path.parent() {
        tokio::fs::create_dir_all(dir).await?;
    }
    Ok(log_path)
}

/// Base name of a folder, or the whole path when it has none (e.g. `/`).
#[must_use]
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.to_string_lossy().into_owned(), |name| name.to_string_lossy().into_owned())
}

/// Re-roots `path` from `from` onto `to` if `path` is `from` or lies beneath it.
#[must_use]
pub fn rebase(path: &Path, from: &Path, to: &Path) -> Option<PathBuf> {
    path.strip_prefix(from).ok().map(|rest| {
        if rest.as_os_str().is_empty() {
            to.to_path_buf()
        } else {
            to.join(rest)
        }
    })
}
