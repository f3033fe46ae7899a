/// Convenience result type used across mathpipe.
pub type MathpipeResult<T> = Result<T, MathpipeError>;

/// Top-level error taxonomy used by the parser, the symbolic engine and the renderer.
///
/// None of the messages carried here ever reach the protocol stream; the dispatcher only
/// writes the numeric [`Status`] returned by [`MathpipeError::status`].
#[derive(thiserror::Error, Debug)]
pub enum MathpipeError {
    /// Malformed expression text.
    #[error("parse error at byte {offset}: {message}")]
    Parse {
        /// Byte offset into the argument text.
        offset: usize,
        /// Human-readable reason.
        message: String,
    },

    /// A name outside the symbol environment was used while unbound names are rejected,
    /// or a name was used in a position its kind does not allow.
    #[error("unbound name: {0}")]
    Unbound(String),

    /// Wrong number of arguments for an operation.
    #[error("arity error: `{op}` takes {expected} argument(s), got {got}")]
    Arity {
        /// Command name.
        op: &'static str,
        /// Required argument count.
        expected: usize,
        /// Received argument count.
        got: usize,
    },

    /// Symbolic evaluation failed (non-symbol variable, unsupported construct).
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// The typesetting/rasterization toolchain failed or produced unusable output.
    #[error("render error: {0}")]
    Render(String),

    /// A toolchain process exceeded its time budget and was killed.
    #[error("render timeout: `{program}` did not finish within {secs}s")]
    Timeout {
        /// Program that was killed.
        program: String,
        /// Budget that was exceeded.
        secs: u64,
    },

    /// Invalid runtime configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MathpipeError {
    /// Build a [`MathpipeError::Parse`] value.
    pub fn parse(offset: usize, msg: impl Into<String>) -> Self {
        Self::Parse {
            offset,
            message: msg.into(),
        }
    }

    /// Build a [`MathpipeError::Unbound`] value.
    pub fn unbound(msg: impl Into<String>) -> Self {
        Self::Unbound(msg.into())
    }

    /// Build a [`MathpipeError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`MathpipeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`MathpipeError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Protocol status this error is reported as.
    ///
    /// Parse, evaluation and rendering failures share one wire status.
    pub fn status(&self) -> Status {
        match self {
            Self::Parse { .. }
            | Self::Unbound(_)
            | Self::Arity { .. }
            | Self::Evaluation(_)
            | Self::Render(_)
            | Self::Timeout { .. }
            | Self::Config(_)
            | Self::Other(_) => Status::BadRequest,
        }
    }
}

/// Numeric response status written as the first line of every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// `200`: followed by one payload line.
    Ok,
    /// `400`: malformed request, operation failure or rendering failure.
    BadRequest,
    /// `404`: unknown command.
    NotFound,
}

impl Status {
    /// Wire code.
    pub fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::BadRequest => 400,
            Self::NotFound => 404,
        }
    }

    /// Inverse of [`Status::code`].
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            200 => Some(Self::Ok),
            400 => Some(Self::BadRequest),
            404 => Some(Self::NotFound),
            _ => None,
        }
    }

    /// `true` for `200`.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
