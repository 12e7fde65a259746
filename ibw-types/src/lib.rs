pub mod data_type;
pub mod dataset;
pub mod endian;
pub mod error;
pub mod header;
pub mod shape;

pub use data_type::*;
pub use dataset::*;
pub use endian::*;
pub use error::*;
pub use header::*;
pub use shape::*;
