use std::io::{self, BufRead, Write};

use tracing::{debug, info_span, warn};

use crate::foundation::error::MathpipeResult;
use crate::ops::Operation;
use crate::render::Renderer;
use crate::session::protocol::{Request, Response};
use crate::symbols::SymbolEnv;

/// Dispatcher lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Stopped,
}

/// Outcome counts for one session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct SessionStats {
    /// Request lines answered (the sentinel is not counted).
    pub requests: u64,
    pub ok: u64,
    pub bad_request: u64,
    pub not_found: u64,
}

impl SessionStats {
    fn record(&mut self, response: &Response) {
        self.requests += 1;
        match response {
            Response::Success(_) => self.ok += 1,
            Response::BadRequest => self.bad_request += 1,
            Response::NotFound => self.not_found += 1,
        }
    }
}

/// Sequential request loop over one input/output stream pair.
#[derive(Debug)]
pub struct Session {
    env: SymbolEnv,
    renderer: Renderer,
    state: SessionState,
    stats: SessionStats,
}

impl Session {
    pub fn new(env: SymbolEnv, renderer: Renderer) -> Self {
        Self {
            env,
            renderer,
            state: SessionState::Running,
            stats: SessionStats::default(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Handle one line (terminator already stripped).
    ///
    /// Returns `None` for the sentinel, which also stops the session; every other line gets
    /// exactly one response.
    pub fn handle(&mut self, line: &str) -> Option<Response> {
        let seq = self.stats.requests + 1;
        let _span = info_span!("request", seq).entered();

        let response = match Request::parse(line) {
            Request::Quit => {
                debug!("sentinel received");
                self.state = SessionState::Stopped;
                return None;
            }
            Request::Empty => {
                warn!("empty request");
                Response::BadRequest
            }
            Request::Malformed => {
                warn!(line, "malformed command token");
                Response::BadRequest
            }
            Request::Command { name, args } => match Operation::from_name(name) {
                None => {
                    warn!(command = name, "unknown command");
                    Response::NotFound
                }
                Some(op) => match self.execute(op, &args) {
                    Ok(payload) => Response::Success(payload),
                    Err(e) => {
                        warn!(op = op.name(), error = %e, "request failed");
                        Response::BadRequest
                    }
                },
            },
        };
        debug!(status = %response.status(), "responding");
        self.stats.record(&response);
        Some(response)
    }

    fn execute(&self, op: Operation, args: &[&str]) -> MathpipeResult<String> {
        let expr = op.apply(&self.env, args)?;
        let artifact = self.renderer.render(&expr)?;
        Ok(artifact.to_base64())
    }

    /// Serve requests from `input` until the sentinel or end of input.
    ///
    /// Only an I/O failure on either stream ends the loop early. Output is flushed after every
    /// response.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        mut output: W,
    ) -> io::Result<SessionStats> {
        let mut buf = Vec::new();
        while self.state == SessionState::Running {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                debug!("end of input");
                self.state = SessionState::Stopped;
                break;
            }
            let line = String::from_utf8_lossy(strip_terminator(&buf));
            if let Some(response) = self.handle(&line) {
                response.write_to(&mut output)?;
                output.flush()?;
            }
        }
        Ok(self.stats)
    }
}

fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
#[path = "../../tests/unit/session/dispatcher.rs"]
mod tests;
