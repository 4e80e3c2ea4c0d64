pub mod file_changed;
pub mod format;

use serde::{Deserialize, Serialize};

use crate::app::StaticConfig;
use crate::types::VersionedError;

pub use file_changed::{FileChangedDriver, ResolvedAsset};
pub use format::FormatTemplate;

pub const DEFAULT_FORMAT: &str = "/version-%(version)s/%(path)s";

/// Strategy turning a logical asset path into a version-stamped path.
pub trait Driver: Send + Sync {
    fn version(&self, stream: &str) -> Result<String, VersionedError>;
}

/// Builds a driver once the host application's layout is known.
pub type DriverConstructor =
    fn(&DriverOptions, &StaticConfig) -> Result<Box<dyn Driver>, VersionedError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverOptions {
    /// Template with `%(version)s` and `%(path)s` placeholders.
    pub format: String,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.into(),
        }
    }
}

impl DriverOptions {
    pub fn with_format(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }
}
