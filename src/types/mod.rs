pub mod error;
pub mod version_token;

pub use error::VersionedError;
pub use version_token::{VersionToken, TOKEN_FORMAT};
