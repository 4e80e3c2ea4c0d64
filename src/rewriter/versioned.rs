use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::app::{Application, TemplateFilter};
use crate::driver::{Driver, DriverConstructor, DriverOptions, FileChangedDriver};
use crate::types::VersionedError;

/// Name the rewriter is registered under in a template filter registry.
pub const FILTER_NAME: &str = "versioned";

/// Template-facing path rewriter.
///
/// Holds the driver options until [`Versioned::init_app`] provides an
/// application, then owns exactly one driver for the rest of its life.
/// Reads after initialization take no locks.
pub struct Versioned {
    constructor: DriverConstructor,
    options: DriverOptions,
    driver: OnceLock<Box<dyn Driver>>,
}

impl Versioned {
    /// Rewriter backed by [`FileChangedDriver`].
    pub fn new(options: DriverOptions) -> Self {
        Self::with_driver(FileChangedDriver::construct, options)
    }

    pub fn with_driver(constructor: DriverConstructor, options: DriverOptions) -> Self {
        Self {
            constructor,
            options,
            driver: OnceLock::new(),
        }
    }

    /// Construct and bind to `app` in one step.
    pub fn with_app<A>(app: &mut A, options: DriverOptions) -> Result<Arc<Self>, VersionedError>
    where
        A: Application + ?Sized,
    {
        let versioned = Arc::new(Self::new(options));
        versioned.init_app(app)?;
        Ok(versioned)
    }

    /// Build the driver from `app`'s static layout and register this
    /// rewriter as the `versioned` filter.
    ///
    /// Neither step overwrites: a driver built by an earlier call is kept,
    /// and an existing `versioned` filter stays registered.
    pub fn init_app<A>(self: &Arc<Self>, app: &mut A) -> Result<(), VersionedError>
    where
        A: Application + ?Sized,
    {
        if self.driver.get().is_none() {
            let driver = (self.constructor)(&self.options, app.static_config())?;
            if self.driver.set(driver).is_err() {
                debug!("driver initialized concurrently; keeping the first");
            }
        } else {
            debug!("driver already initialized; keeping the first");
        }

        let filter: Arc<dyn TemplateFilter> = self.clone();
        if !app.template_filters().insert_if_absent(FILTER_NAME, filter) {
            debug!(name = FILTER_NAME, "template filter already registered; skipping");
        }
        Ok(())
    }

    /// Stamp `stream` with its version. Driver errors pass through as-is.
    pub fn version(&self, stream: &str) -> Result<String, VersionedError> {
        self.driver
            .get()
            .ok_or(VersionedError::NotInitialized)?
            .version(stream)
    }

    pub fn is_initialized(&self) -> bool {
        self.driver.get().is_some()
    }
}

impl TemplateFilter for Versioned {
    fn filter(&self, value: &str) -> Result<String, VersionedError> {
        self.version(value)
    }
}

impl fmt::Debug for Versioned {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Versioned")
            .field("options", &self.options)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
