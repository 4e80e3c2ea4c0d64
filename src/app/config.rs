use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const DEFAULT_STATIC_URL_PATH: &str = "/static";
const DEFAULT_STATIC_FOLDER: &str = "static";

// Explicit replacement for the host's ambient app context:
// - static_url_path: URL prefix static files are served under
// - static_folder: where those files live on disk
// - root_path: base for relative paths
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticConfig {
    #[serde(default = "default_static_url_path")]
    pub static_url_path: String,
    #[serde(default = "default_static_folder")]
    pub static_folder: PathBuf,
    pub root_path: PathBuf,
}

impl StaticConfig {
    /// Conventional layout: `/static` served from `<root>/static`.
    pub fn new(root_path: impl Into<PathBuf>) -> Self {
        let root_path = root_path.into();
        Self {
            static_url_path: DEFAULT_STATIC_URL_PATH.into(),
            static_folder: root_path.join(DEFAULT_STATIC_FOLDER),
            root_path,
        }
    }

    pub fn with_static_url_path(mut self, static_url_path: impl Into<String>) -> Self {
        self.static_url_path = static_url_path.into();
        self
    }

    pub fn with_static_folder(mut self, static_folder: impl Into<PathBuf>) -> Self {
        self.static_folder = static_folder.into();
        self
    }
}

fn default_static_url_path() -> String {
    DEFAULT_STATIC_URL_PATH.into()
}

fn default_static_folder() -> PathBuf {
    PathBuf::from(DEFAULT_STATIC_FOLDER)
}
