use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::foundation::config::RenderConfig;
use crate::foundation::error::{MathpipeError, MathpipeResult};

const JOB_NAME: &str = "texput";
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Turns a complete LaTeX document into PNG bytes.
pub trait Rasterizer: Send {
    fn rasterize(&self, document: &str) -> MathpipeResult<Vec<u8>>;
}

/// Rasterizer backed by the system `latex` and `dvipng` programs.
///
/// Every call works in a fresh temporary directory that is removed on return, so concurrent
/// renders never share files.
#[derive(Clone, Debug)]
pub struct LatexToolchain {
    latex: String,
    dvipng: String,
    dpi: u32,
    timeout: Duration,
}

impl LatexToolchain {
    pub fn from_config(cfg: &RenderConfig) -> Self {
        Self {
            latex: cfg.latex.clone(),
            dvipng: cfg.dvipng.clone(),
            dpi: cfg.dpi,
            timeout: cfg.timeout(),
        }
    }

    /// Programs this toolchain invokes, in order.
    pub fn programs(&self) -> [&str; 2] {
        [&self.latex, &self.dvipng]
    }
}

impl Rasterizer for LatexToolchain {
    #[tracing::instrument(level = "debug", skip_all, fields(bytes = document.len()))]
    fn rasterize(&self, document: &str) -> MathpipeResult<Vec<u8>> {
        use anyhow::Context as _;

        let dir = tempfile::Builder::new()
            .prefix("mathpipe-")
            .tempdir()
            .context("failed to create render scratch directory")?;
        let tex = dir.path().join(format!("{JOB_NAME}.tex"));
        std::fs::write(&tex, document)
            .with_context(|| format!("failed to write '{}'", tex.display()))?;

        let mut latex = Command::new(&self.latex);
        latex.args([
            "-no-shell-escape",
            "-halt-on-error",
            "-interaction=nonstopmode",
        ]);
        latex.arg(format!("{JOB_NAME}.tex"));
        run_bounded(&mut latex, dir.path(), &self.latex, self.timeout)?;

        let mut dvipng = Command::new(&self.dvipng);
        dvipng.args(["-q", "-D", &self.dpi.to_string(), "-o"]);
        dvipng.arg(format!("{JOB_NAME}.png"));
        dvipng.arg(format!("{JOB_NAME}.dvi"));
        run_bounded(&mut dvipng, dir.path(), &self.dvipng, self.timeout)?;

        let png = dir.path().join(format!("{JOB_NAME}.png"));
        let bytes = std::fs::read(&png).map_err(|e| {
            MathpipeError::render(format!("{} produced no image: {e}", self.dvipng))
        })?;
        tracing::debug!(png_bytes = bytes.len(), "rasterized");
        Ok(bytes)
    }
}

/// Run `cmd` in `dir`, killing it once `timeout` elapses.
fn run_bounded(
    cmd: &mut Command,
    dir: &Path,
    program: &str,
    timeout: Duration,
) -> MathpipeResult<()> {
    cmd.current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|e| {
        MathpipeError::render(format!(
            "failed to spawn {program} (is it installed and on PATH?): {e}"
        ))
    })?;

    // Drained while waiting; a full pipe would stall the child.
    let stdout_drain = drain(child.stdout.take());
    let stderr_drain = drain(child.stderr.take());

    let status = match wait_with_deadline(&mut child, program, timeout) {
        Ok(status) => status,
        Err(e) => {
            let _ = child.kill();
            let _ = child.wait();
            return Err(e);
        }
    };
    let stdout = join_drain(stdout_drain, program)?;
    let stderr = join_drain(stderr_drain, program)?;

    if !status.success() {
        // `latex` reports errors on stdout.
        let mut log = String::from_utf8_lossy(&stderr).into_owned();
        log.push_str(&String::from_utf8_lossy(&stdout));
        tracing::debug!(program, %status, log = %tail(&log, 2048), "toolchain step failed");
        return Err(MathpipeError::render(format!(
            "{program} exited with status {status}"
        )));
    }
    Ok(())
}

fn wait_with_deadline(
    child: &mut Child,
    program: &str,
    timeout: Duration,
) -> MathpipeResult<ExitStatus> {
    let deadline = Instant::now() + timeout;
    loop {
        let polled = child.try_wait().map_err(|e| {
            MathpipeError::render(format!("failed to wait for {program} to finish: {e}"))
        })?;
        if let Some(status) = polled {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            tracing::warn!(program, secs = timeout.as_secs(), "killing toolchain process");
            return Err(MathpipeError::Timeout {
                program: program.to_owned(),
                secs: timeout.as_secs(),
            });
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

type Drain = Option<JoinHandle<std::io::Result<Vec<u8>>>>;

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Drain {
    pipe.map(|mut pipe| {
        std::thread::spawn(move || {
            let mut bytes = Vec::new();
            pipe.read_to_end(&mut bytes)?;
            Ok(bytes)
        })
    })
}

fn join_drain(handle: Drain, program: &str) -> MathpipeResult<Vec<u8>> {
    match handle {
        Some(handle) => handle
            .join()
            .map_err(|_| MathpipeError::render(format!("{program} output drain thread panicked")))?
            .map_err(|e| MathpipeError::render(format!("{program} output read failed: {e}"))),
        None => Ok(Vec::new()),
    }
}

fn tail(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut start = s.len() - max;
    while !s.is_char_boundary(start) {
        start += 1;
    }
    &s[start..]
}

/// In-process rasterizer that records every document and answers with a solid placeholder PNG.
///
/// Intended for tests and for driving sessions without a TeX installation.
#[derive(Clone, Debug, Default)]
pub struct InMemoryRasterizer {
    documents: std::sync::Arc<std::sync::Mutex<Vec<String>>>,
    fail: bool,
}

impl InMemoryRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A rasterizer whose every call fails like a TeX error would.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Documents seen so far, oldest first. Clones share the same record.
    pub fn documents(&self) -> Vec<String> {
        match self.documents.lock() {
            Ok(docs) => docs.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Rasterizer for InMemoryRasterizer {
    fn rasterize(&self, document: &str) -> MathpipeResult<Vec<u8>> {
        match self.documents.lock() {
            Ok(mut docs) => docs.push(document.to_owned()),
            Err(poisoned) => poisoned.into_inner().push(document.to_owned()),
        }
        if self.fail {
            return Err(MathpipeError::render("latex exited with status 1"));
        }
        let img = image::RgbaImage::from_pixel(4, 2, image::Rgba([54, 57, 63, 255]));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png)
            .map_err(|e| MathpipeError::render(format!("placeholder encode failed: {e}")))?;
        Ok(out.into_inner())
    }
}

/// Return `true` when `program` can be invoked from `PATH`.
///
/// Both TeX engines and `dvipng` accept `--version`.
pub fn is_program_on_path(program: &str) -> bool {
    Command::new(program)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
