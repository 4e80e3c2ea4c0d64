use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::app::StaticConfig;
use crate::driver::{Driver, DriverOptions, FormatTemplate};
use crate::types::{VersionToken, VersionedError};

/// Where a logical path landed on disk, and the value substituted for
/// `%(path)s`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAsset {
    pub file: PathBuf,
    pub path: String,
}

/// Versions assets by their last-modified time.
///
/// The token is read from disk on every call; nothing is cached.
#[derive(Debug, Clone)]
pub struct FileChangedDriver {
    format: FormatTemplate,
    config: StaticConfig,
}

impl FileChangedDriver {
    pub fn new(options: &DriverOptions, config: StaticConfig) -> Result<Self, VersionedError> {
        Ok(Self {
            format: FormatTemplate::parse(&options.format)?,
            config,
        })
    }

    /// [`crate::driver::DriverConstructor`] for this driver.
    pub fn construct(
        options: &DriverOptions,
        config: &StaticConfig,
    ) -> Result<Box<dyn Driver>, VersionedError> {
        Ok(Box::new(Self::new(options, config.clone())?))
    }

    /// Map a logical path to an existing regular file.
    ///
    /// A path that exists as given is used verbatim. Otherwise it is read as
    /// a URL under the static mount: the first occurrence of the mount
    /// prefix becomes the static folder, and the placeholder value loses its
    /// leading `/`. Relative results are anchored at the application root.
    pub fn resolve(&self, stream: &str) -> Result<ResolvedAsset, VersionedError> {
        let (candidate, path) = if Path::new(stream).exists() {
            (PathBuf::from(stream), stream.to_string())
        } else {
            let folder = self.config.static_folder.to_string_lossy();
            let candidate = stream.replacen(self.config.static_url_path.as_str(), &folder, 1);
            let path = stream.strip_prefix('/').unwrap_or(stream);
            (PathBuf::from(candidate), path.to_string())
        };

        let file = if candidate.is_absolute() {
            candidate
        } else {
            self.config.root_path.join(candidate)
        };

        if !file.is_file() {
            return Err(VersionedError::NoSuchFile(file));
        }

        Ok(ResolvedAsset { file, path })
    }
}

impl Driver for FileChangedDriver {
    fn version(&self, stream: &str) -> Result<String, VersionedError> {
        let asset = self.resolve(stream)?;
        let mtime = fs::metadata(&asset.file)?.modified()?;
        let token = VersionToken::from_mtime(mtime)
            .ok_or_else(|| VersionedError::InvalidMtime(asset.file.clone()))?;

        debug!(
            stream,
            file = %asset.file.display(),
            version = %token,
            "stamped asset path"
        );

        Ok(self.format.render(&token, &asset.path))
    }
}
