use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "typerace";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn project() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", APP_NAME)
    }

    pub fn config_path() -> PathBuf {
        Self::project()
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("typerace_config.json"))
    }

    pub fn history_path() -> PathBuf {
        Self::project()
            .map(|pd| pd.data_local_dir().join("history.csv"))
            .unwrap_or_else(|| PathBuf::from("typerace_history.csv"))
    }

    pub fn log_path() -> PathBuf {
        Self::project()
            .map(|pd| pd.data_local_dir().join("typerace.log"))
            .unwrap_or_else(|| PathBuf::from("typerace.log"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_have_expected_file_names() {
        assert!(AppDirs::config_path().ends_with("config.json"));
        assert!(AppDirs::history_path().ends_with("history.csv"));
        assert!(AppDirs::log_path().ends_with("typerace.log"));
    }
}
