//! The request loop and its wire format.

pub mod dispatcher;
pub mod protocol;

pub use dispatcher::{Session, SessionState, SessionStats};
pub use protocol::{DELIMITER, Request, Response, SENTINEL};
