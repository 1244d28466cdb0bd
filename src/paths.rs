/// Platform-specific location of the post-stamp configuration file
///
/// Follows the XDG Base Directory specification on Unix-like systems.
use std::path::PathBuf;

const PROJECT_DIR_NAME: &str = "post-stamp";

/// Platform-agnostic path utilities
pub struct PlatformPaths;

impl PlatformPaths {
    /// Get the appropriate config directory for the current platform
    ///
    /// - Windows: %APPDATA%
    /// - macOS: ~/Library/Application Support
    /// - Linux/Unix: $XDG_CONFIG_HOME or ~/.config
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            std::env::var("APPDATA")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("."))
        } else if cfg!(target_os = "macos") {
            std::env::var("HOME")
                .map(|home| PathBuf::from(home).join("Library/Application Support"))
                .unwrap_or_else(|_| PathBuf::from("."))
        } else {
            std::env::var("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .or_else(|_| std::env::var("HOME").map(|home| PathBuf::from(home).join(".config")))
                .unwrap_or_else(|_| PathBuf::from("."))
        }
    }

    /// Returns: {config_dir}/post-stamp
    pub fn project_config_dir() -> PathBuf {
        Self::config_dir().join(PROJECT_DIR_NAME)
    }

    /// Returns: {config_dir}/post-stamp/config.toml
    pub fn default_config_path() -> PathBuf {
        Self::project_config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_not_empty() {
        let dir = PlatformPaths::config_dir();
        assert!(!dir.as_os_str().is_empty());
    }

    #[test]
    fn test_project_config_dir_is_subdirectory() {
        let base = PlatformPaths::config_dir();
        let project = PlatformPaths::project_config_dir();
        assert!(project.starts_with(&base));
        assert!(project.ends_with("post-stamp"));
    }

    #[test]
    fn test_default_config_path() {
        let path = PlatformPaths::default_config_path();
        assert!(path.to_string_lossy().contains("post-stamp"));
        assert!(path.ends_with("config.toml"));
    }
}
