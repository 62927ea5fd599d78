//! Options file persistence for scroll-mirror
//!
//! Optional glue for embedders that want to remember the user's axis choices
//! between runs. The mirror itself keeps no state on disk; this module only
//! loads and saves [`MirrorOptions`] in the platform-specific configuration
//! directory, falling back to defaults whenever the file is missing or
//! unreadable. Compiled with the `persistence` feature (on by default).

use crate::config::MirrorOptions;
use crate::error::{Error, Result, ResultExt};
use crate::LOG_TAG;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Application name used for the config directory
const APP_NAME: &str = "scroll-mirror";

/// Options file name
const OPTIONS_FILE_NAME: &str = "options.json";

/// Temporary file name used during atomic writes
const OPTIONS_TEMP_NAME: &str = "options.json.tmp";

// ─────────────────────────────────────────────────────────────────────────────
// Platform-Specific Directory Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Get the platform-specific configuration directory for the crate.
///
/// - **Windows**: `%APPDATA%\scroll-mirror\`
/// - **macOS**: `~/Library/Application Support/scroll-mirror/`
/// - **Linux**: `~/.config/scroll-mirror/`
///
/// # Errors
///
/// Returns `Error::ConfigDirNotFound` if the config directory cannot be determined.
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(Error::ConfigDirNotFound)
}

/// Get the full path to the options file.
pub fn get_options_file_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(OPTIONS_FILE_NAME))
}

// ─────────────────────────────────────────────────────────────────────────────
// Load Options
// ─────────────────────────────────────────────────────────────────────────────

/// Load options from the default location, falling back to defaults.
///
/// A missing or empty file silently yields defaults; an unreadable or
/// corrupted file logs a warning first.
pub fn load_options() -> MirrorOptions {
    get_options_file_path()
        .and_then(|path| load_options_from(&path))
        .unwrap_or_warn_default(MirrorOptions::default(), "Failed to load options")
}

/// Load options from an explicit path.
///
/// # Errors
///
/// - `Error::ConfigLoad`: the file exists but could not be read
/// - `Error::ConfigParse`: the file is not valid options JSON
pub fn load_options_from(path: &Path) -> Result<MirrorOptions> {
    if !path.exists() {
        debug!(
            "{} Options file not found at {}, using defaults",
            LOG_TAG,
            path.display()
        );
        return Ok(MirrorOptions::default());
    }

    let contents = fs::read_to_string(path).map_err(|e| Error::ConfigLoad {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    if contents.trim().is_empty() {
        debug!("{} Options file is empty, using defaults", LOG_TAG);
        return Ok(MirrorOptions::default());
    }

    let options = MirrorOptions::from_json(&contents).map_err(|e| {
        warn!(
            "{} Options file at {} contains invalid JSON: {}",
            LOG_TAG,
            path.display(),
            e
        );
        Error::ConfigParse {
            message: format!("Failed to parse options file: {}", e),
            source: Some(Box::new(e)),
        }
    })?;

    info!("{} Options loaded from {}", LOG_TAG, path.display());
    Ok(options)
}

// ─────────────────────────────────────────────────────────────────────────────
// Save Options
// ─────────────────────────────────────────────────────────────────────────────

/// Save options to the default location.
pub fn save_options(options: &MirrorOptions) -> Result<()> {
    save_options_to(options, &get_options_file_path()?)
}

/// Save options to an explicit path, creating parent directories.
///
/// The write goes to a temporary sibling file first, which then replaces
/// the target.
pub fn save_options_to(options: &MirrorOptions, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            debug!("{} Creating config directory: {}", LOG_TAG, dir.display());
            fs::create_dir_all(dir).map_err(|e| Error::ConfigSave {
                path: dir.to_path_buf(),
                source: Box::new(e),
            })?;
        }
    }

    let json = serde_json::to_string_pretty(options).map_err(|e| Error::ConfigSave {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    let temp_path = path.with_file_name(OPTIONS_TEMP_NAME);
    fs::write(&temp_path, &json).map_err(|e| Error::ConfigSave {
        path: temp_path.clone(),
        source: Box::new(e),
    })?;

    fs::rename(&temp_path, path).map_err(|e| Error::ConfigSave {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    info!("{} Options saved to {}", LOG_TAG, path.display());
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Helper holding a temporary options file location.
    struct TestEnv {
        _temp_dir: TempDir,
        options_file: PathBuf,
    }

    impl TestEnv {
        fn new() -> Self {
            let temp_dir = TempDir::new().expect("Failed to create temp dir");
            let options_file = temp_dir.path().join(APP_NAME).join(OPTIONS_FILE_NAME);
            Self {
                _temp_dir: temp_dir,
                options_file,
            }
        }

        fn write_options(&self, content: &str) {
            fs::create_dir_all(self.options_file.parent().unwrap()).unwrap();
            fs::write(&self.options_file, content).expect("Failed to write options");
        }
    }

    #[test]
    fn test_get_options_file_path() {
        // Headless environments may have no config dir at all.
        if let Ok(path) = get_options_file_path() {
            assert!(path.to_string_lossy().contains(APP_NAME));
            assert!(path.to_string_lossy().ends_with(OPTIONS_FILE_NAME));
        }
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let env = TestEnv::new();
        let options = load_options_from(&env.options_file).unwrap();
        assert_eq!(options, MirrorOptions::default());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let env = TestEnv::new();
        env.write_options("   \n");
        let options = load_options_from(&env.options_file).unwrap();
        assert_eq!(options, MirrorOptions::default());
    }

    #[test]
    fn test_corrupted_file_returns_parse_error() {
        let env = TestEnv::new();
        env.write_options("{ not json }");
        let result = load_options_from(&env.options_file);
        assert!(matches!(result, Err(Error::ConfigParse { .. })));
    }

    #[test]
    fn test_save_creates_directory_and_loads_back() {
        let env = TestEnv::new();
        let options = MirrorOptions::vertical_only();

        save_options_to(&options, &env.options_file).unwrap();
        assert!(env.options_file.exists());
        assert!(!env.options_file.with_file_name(OPTIONS_TEMP_NAME).exists());

        let loaded = load_options_from(&env.options_file).unwrap();
        assert_eq!(loaded, options);
    }

    #[test]
    fn test_saved_file_is_pretty_json() {
        let env = TestEnv::new();
        save_options_to(&MirrorOptions::default(), &env.options_file).unwrap();

        let contents = fs::read_to_string(&env.options_file).unwrap();
        assert!(contents.contains("\"vertical\": true"));
        assert!(contents.contains("\"horizontal\": true"));
    }

    #[test]
    fn test_load_options_graceful_fallback() {
        // Whatever the state of the real config dir, this never panics.
        let _ = load_options();
    }
}
