pub mod versioned;

pub use versioned::{Versioned, FILTER_NAME};
