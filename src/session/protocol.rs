use std::io::{self, Write};

use crate::foundation::error::Status;

/// Token separator inside a request line.
pub const DELIMITER: &str = ", ";
/// Line that ends the session without a response.
pub const SENTINEL: &str = "quit";

/// One decoded request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request<'a> {
    /// The sentinel.
    Quit,
    /// Blank line: the empty token list.
    Empty,
    /// First token is not shaped like a command name.
    Malformed,
    /// `name` plus positional arguments, verbatim.
    Command { name: &'a str, args: Vec<&'a str> },
}

impl<'a> Request<'a> {
    /// Decode a line whose terminator has already been stripped.
    pub fn parse(line: &'a str) -> Self {
        if line == SENTINEL {
            return Request::Quit;
        }
        if line.trim().is_empty() {
            return Request::Empty;
        }
        let mut tokens = line.split(DELIMITER);
        let name = tokens.next().unwrap_or_default();
        if !is_command_name(name) {
            return Request::Malformed;
        }
        Request::Command {
            name,
            args: tokens.collect(),
        }
    }
}

fn is_command_name(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// What gets written back for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// `200` followed by the base64 PNG line.
    Success(String),
    /// `400`
    BadRequest,
    /// `404`
    NotFound,
}

impl Response {
    pub fn status(&self) -> Status {
        match self {
            Response::Success(_) => Status::Ok,
            Response::BadRequest => Status::BadRequest,
            Response::NotFound => Status::NotFound,
        }
    }

    /// Write the response lines. Does not flush.
    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.status())?;
        if let Response::Success(payload) = self {
            writeln!(out, "{payload}")?;
        }
        Ok(())
    }
}
