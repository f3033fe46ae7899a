use std::{
    fs::OpenOptions,
    io,
    path::PathBuf,
    process::ExitCode,
    sync::Mutex,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt::writer::BoxMakeWriter};

use mathpipe::{Config, Renderer, Session, SymbolEnv, UnboundPolicy, render::is_program_on_path};

#[derive(Parser, Debug)]
#[command(name = "mathpipe", version, about)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Rasterization resolution (dvipng -D).
    #[arg(long, global = true)]
    dpi: Option<u32>,

    /// Per-process toolchain budget in seconds.
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// TeX-to-DVI program.
    #[arg(long, global = true)]
    latex: Option<String>,

    /// DVI-to-PNG program.
    #[arg(long, global = true)]
    dvipng: Option<String>,

    /// What to do with names outside the predeclared symbols.
    #[arg(long, value_enum, global = true)]
    unbound: Option<UnboundChoice>,

    /// Log filter directive, e.g. `info` or `mathpipe=debug`. `RUST_LOG` wins when set.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Append logs to this file instead of stderr.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Answer requests on stdin/stdout until `quit` or end of input (default).
    Serve,
    /// Check that the typesetting programs can be found.
    Doctor,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum UnboundChoice {
    AutoBind,
    Reject,
}

impl From<UnboundChoice> for UnboundPolicy {
    fn from(choice: UnboundChoice) -> Self {
        match choice {
            UnboundChoice::AutoBind => UnboundPolicy::AutoBind,
            UnboundChoice::Reject => UnboundPolicy::Reject,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let cfg = load_config(&cli)?;
    init_logging(&cfg)?;
    tracing::debug!(?cfg, "configuration");

    match cli.cmd.unwrap_or(Command::Serve) {
        Command::Serve => cmd_serve(&cfg),
        Command::Doctor => Ok(cmd_doctor(&cfg)),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut cfg = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => Config::default(),
    };

    if let Some(dpi) = cli.dpi {
        cfg.render.dpi = dpi;
    }
    if let Some(secs) = cli.timeout_secs {
        cfg.render.timeout_secs = secs;
    }
    if let Some(latex) = &cli.latex {
        cfg.render.latex = latex.clone();
    }
    if let Some(dvipng) = &cli.dvipng {
        cfg.render.dvipng = dvipng.clone();
    }
    if let Some(choice) = cli.unbound {
        cfg.symbols.unbound = choice.into();
    }
    if let Some(level) = &cli.log_level {
        cfg.logging.level = level.clone();
    }
    if let Some(file) = &cli.log_file {
        cfg.logging.file = Some(file.clone());
    }

    cfg.validate().context("invalid configuration")?;
    Ok(cfg)
}

fn init_logging(cfg: &Config) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.logging.level))
        .with_context(|| format!("invalid log level '{}'", cfg.logging.level))?;

    // stdout carries the protocol; logs never go there.
    let writer = match &cfg.logging.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("open log file '{}'", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(io::stderr),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(cfg.logging.file.is_none())
        .try_init()
        .map_err(|e| anyhow::anyhow!("install log subscriber: {e}"))
}

fn cmd_serve(cfg: &Config) -> anyhow::Result<ExitCode> {
    let env = SymbolEnv::standard(cfg.symbols.unbound);
    let renderer = Renderer::from_config(&cfg.render);
    let mut session = Session::new(env, renderer);

    tracing::info!(
        latex = %cfg.render.latex,
        dvipng = %cfg.render.dvipng,
        dpi = cfg.render.dpi,
        "serving"
    );
    let stdin = io::stdin();
    let stdout = io::stdout();
    let stats = session
        .run(stdin.lock(), stdout.lock())
        .context("protocol stream I/O failed")?;

    tracing::info!(
        requests = stats.requests,
        ok = stats.ok,
        bad_request = stats.bad_request,
        not_found = stats.not_found,
        "session finished"
    );
    Ok(ExitCode::SUCCESS)
}

fn cmd_doctor(cfg: &Config) -> ExitCode {
    let mut all_found = true;
    for program in [&cfg.render.latex, &cfg.render.dvipng] {
        let found = is_program_on_path(program);
        all_found &= found;
        println!("{program}: {}", if found { "found" } else { "NOT FOUND" });
    }
    if all_found {
        ExitCode::SUCCESS
    } else {
        eprintln!("mathpipe needs a TeX distribution providing latex and dvipng on PATH");
        ExitCode::FAILURE
    }
}
