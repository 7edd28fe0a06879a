use crate::{
    analyzer::DocumentAnalyzer,
    config::Config,
    detect::LinguaDetector,
    engine::{Engine, PdfEngine},
    util::ensure_dir,
};
use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "doc-lingo")]
#[command(about = "Detect scanned PDFs and the languages of their text")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,

    /// Path to config TOML. If omitted, uses ./doc-lingo.toml if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Doctor {},
    Analyze {
        #[arg(long)]
        input: PathBuf,
    },
    Batch {
        #[arg(long)]
        manifest: Option<PathBuf>,
        #[arg(long)]
        input_folder: Option<PathBuf>,
        #[arg(long)]
        out_dir: Option<PathBuf>,
        #[arg(long)]
        checkpoint: Option<PathBuf>,
    },
}

pub fn dispatch(args: Args) -> Result<()> {
    let mut cfg = match resolve_config_path(args.config.as_deref()) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };

    if let Command::Batch {
        manifest,
        input_folder,
        out_dir,
        checkpoint,
    } = &args.cmd
    {
        apply_override(&mut cfg.paths.manifest, manifest.as_deref());
        apply_override(&mut cfg.paths.input_folder, input_folder.as_deref());
        apply_override(&mut cfg.paths.out_dir, out_dir.as_deref());
        apply_override(&mut cfg.paths.checkpoint_file, checkpoint.as_deref());
    }

    let _guard = init_logging(&args, &cfg)?;

    match &args.cmd {
        Command::Doctor {} => doctor(&cfg),
        Command::Analyze { input } => analyze(&cfg, input),
        Command::Batch { .. } => batch(&cfg),
    }
}

fn apply_override(slot: &mut String, value: Option<&Path>) {
    if let Some(v) = value {
        *slot = v.display().to_string();
    }
}

fn resolve_config_path(user: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = user {
        return Some(p.to_path_buf());
    }
    let default = PathBuf::from("doc-lingo.toml");
    default.exists().then_some(default)
}

fn init_logging(args: &Args, cfg: &Config) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(cfg.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stdout_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .boxed()
    };

    let (file_layer, guard) = match resolve_log_path(cfg) {
        Some(path) => {
            let parent = path.parent().unwrap_or_else(|| Path::new("."));
            ensure_dir(parent)?;
            let file = std::fs::File::create(&path)
                .with_context(|| format!("create log file: {}", path.display()))?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

fn resolve_log_path(cfg: &Config) -> Option<PathBuf> {
    if !cfg.logging.write_to_file {
        return None;
    }
    if !cfg.logging.file_path.is_empty() {
        return Some(PathBuf::from(&cfg.logging.file_path));
    }
    Some(PathBuf::from(&cfg.paths.out_dir).join("doc-lingo.log"))
}

fn doctor(cfg: &Config) -> Result<()> {
    let engine = PdfEngine::new(cfg);
    let diag = engine.doctor()?;
    println!("{}", serde_json::to_string_pretty(&diag)?);
    Ok(())
}

fn analyze(cfg: &Config, input: &Path) -> Result<()> {
    let detector = LinguaDetector::new(&cfg.detection)?;
    let analyzer = DocumentAnalyzer::new(cfg, PdfEngine::new(cfg), detector);

    let result = analyzer
        .analyze_document(input)
        .ok_or_else(|| anyhow!("could not analyze {}", input.display()))?;
    println!("{}", result.render(cfg.output.result_format)?);
    Ok(())
}

fn batch(cfg: &Config) -> Result<()> {
    let detector = LinguaDetector::new(&cfg.detection)?;
    let mut analyzer = DocumentAnalyzer::new(cfg, PdfEngine::new(cfg), detector);

    info!(
        "batch manifest={} input_folder={} out_dir={}",
        cfg.paths.manifest, cfg.paths.input_folder, cfg.paths.out_dir
    );
    let summary = analyzer.analyze_batch()?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
