//! The operations a request can name.

mod registry;

pub use registry::Operation;
