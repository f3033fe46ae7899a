//! Runtime configuration.
//!
//! Precedence, highest first: command-line flags, the TOML file given by `--config`, built-in
//! defaults. Every field is optional in the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{MathpipeError, MathpipeResult};
use crate::symbols::UnboundPolicy;

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Typesetting toolchain and theme.
    pub render: RenderConfig,
    /// Symbol environment policy.
    pub symbols: SymbolsConfig,
    /// Log destination and level.
    pub logging: LoggingConfig,
}

/// Typesetting toolchain and visual theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// TeX-to-DVI program.
    pub latex: String,
    /// DVI-to-PNG program.
    pub dvipng: String,
    /// Output resolution passed to `dvipng -D`.
    pub dpi: u32,
    /// Base font size of the standalone document.
    pub font_size_pt: u32,
    /// Page color, RGB.
    pub background: [u8; 3],
    /// `xcolor` name of the text color.
    pub foreground: String,
    /// Budget for each toolchain process.
    pub timeout_secs: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            latex: "latex".to_owned(),
            dvipng: "dvipng".to_owned(),
            dpi: 200,
            font_size_pt: 12,
            background: [54, 57, 63],
            foreground: "white".to_owned(),
            timeout_secs: 30,
        }
    }
}

impl RenderConfig {
    /// Per-process timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Symbol environment policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SymbolsConfig {
    /// What happens to names outside the predeclared environment.
    pub unbound: UnboundPolicy,
}

/// Log destination and level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Append logs to this file instead of stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            file: None,
        }
    }
}

impl Config {
    /// Parse a TOML document.
    pub fn from_toml_str(src: &str) -> MathpipeResult<Self> {
        let cfg: Self =
            toml::from_str(src).map_err(|e| MathpipeError::config(format!("invalid TOML: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> MathpipeResult<Self> {
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_toml_str(&src)
    }

    /// Reject values the renderer cannot work with.
    pub fn validate(&self) -> MathpipeResult<()> {
        let r = &self.render;
        if r.dpi == 0 {
            return Err(MathpipeError::config("render.dpi must be non-zero"));
        }
        if r.font_size_pt == 0 {
            return Err(MathpipeError::config("render.font_size_pt must be non-zero"));
        }
        if r.timeout_secs == 0 {
            return Err(MathpipeError::config("render.timeout_secs must be non-zero"));
        }
        if r.latex.trim().is_empty() || r.dvipng.trim().is_empty() {
            return Err(MathpipeError::config(
                "render.latex and render.dvipng must name a program",
            ));
        }
        // Spliced verbatim into the TeX preamble.
        if r.foreground.is_empty() || !r.foreground.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(MathpipeError::config(format!(
                "render.foreground must be a plain xcolor name, got '{}'",
                r.foreground
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
