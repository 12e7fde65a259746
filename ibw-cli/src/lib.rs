pub mod commands;
pub mod error;
pub mod summary;

pub use commands::*;
pub use error::*;
pub use summary::*;
