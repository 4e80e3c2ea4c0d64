//! Cache-busting asset paths for server-rendered templates.
//!
//! `versioned-assets` rewrites a static asset reference such as
//! `/static/css/app.css` into `/version-20210304T153000/static/css/app.css`,
//! where the token is the file's last-modified time in local time. A
//! [`Versioned`] rewriter is bound to a host application once and then
//! exposed to templates as the `versioned` filter.
//!
//! Version strategies are pluggable through the [`driver::Driver`] trait;
//! [`driver::FileChangedDriver`] is the default.

pub mod app;
pub mod driver;
pub mod rewriter;
pub mod types;

pub use app::{App, Application, FilterRegistry, StaticConfig, TemplateFilter};
pub use driver::{Driver, DriverOptions, FileChangedDriver};
pub use rewriter::{Versioned, FILTER_NAME};
pub use types::{VersionToken, VersionedError};
