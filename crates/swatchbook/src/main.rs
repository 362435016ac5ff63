//! swatchbook: browse a UI theme's defaults dictionary as an HTML report.
//!
//! The binary is thin glue around `swatchbook-render`: it picks a dictionary
//! (a built-in demo theme or a YAML theme file), picks a classification
//! policy, and hands both to the report engine.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use swatchbook::themes;
use swatchbook_render::{generate_report, theme, BucketPolicy, Dictionary, SuffixPolicy};

#[derive(Parser, Debug)]
#[command(
    name = "swatchbook",
    version,
    about = "Render a UI theme's defaults dictionary as a browsable HTML report"
)]
struct Cli {
    /// Directory the report and its images are written under.
    #[arg(default_value = "output")]
    output_root: PathBuf,

    /// Built-in theme name, or a path to a YAML theme file.
    #[arg(long, default_value = themes::DEFAULT_THEME)]
    theme: String,

    /// Key-classification policy used to group rows into tables.
    #[arg(long, value_enum, default_value_t = Policy::Suffix)]
    policy: Policy,

    /// Increase log verbosity (repeatable).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum Policy {
    /// Two buckets: keys ending in "UI", and everything else.
    Suffix,
    /// Per-component buckets plus primary/secondary color tables.
    Component,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (name, defaults) = load_theme(&cli.theme)?;
    tracing::debug!(theme = %name, keys = defaults.len(), "loaded defaults dictionary");
    let policy: Box<dyn BucketPolicy> = match cli.policy {
        Policy::Suffix => Box::new(SuffixPolicy),
        Policy::Component => Box::new(themes::component_policy()),
    };

    let path = generate_report(&defaults, &name, &cli.output_root, policy.as_ref())
        .with_context(|| format!("generating report for theme '{}'", name))?;
    println!("Report written to {}", path.display());
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolves a `--theme` argument: built-in names first, then the filesystem.
fn load_theme(spec: &str) -> Result<(String, Dictionary)> {
    if let Some(defaults) = themes::builtin(spec) {
        return Ok((spec.to_string(), defaults));
    }

    let path = Path::new(spec);
    if path.exists() {
        let source = fs::read_to_string(path)
            .with_context(|| format!("reading theme file {}", path.display()))?;
        let defaults = theme::from_yaml(&source)
            .with_context(|| format!("parsing theme file {}", path.display()))?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "theme".to_string());
        return Ok((name, defaults));
    }

    bail!(
        "unknown theme '{}': not a built-in ({}) and not a readable file",
        spec,
        themes::BUILTIN_NAMES.join(", ")
    )
}
