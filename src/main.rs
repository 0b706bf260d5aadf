//! Command-line driver: recover the secret from each share document given

use anyhow::{Context, bail};
use clap::Parser;
use shamir_recover::{
    Classification, Config, Outcome, SearchMode, SecretReconstructor, ShareDocument,
    candidate_count, report,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shamir-recover")]
#[command(version, about = "Recover Shamir secrets from JSON share documents with corrupted shares")]
struct Cli {
    /// Share documents to process
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Evaluate candidate subsets in parallel
    #[arg(long)]
    parallel: bool,

    /// Give up after trying this many candidate subsets
    #[arg(long, value_name = "N")]
    candidate_limit: Option<u64>,

    /// Count every share on the recovered polynomial as consistent
    #[arg(long)]
    on_polynomial: bool,

    /// Print the outcome as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Directory for the coefficient reports
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Do not write coefficient reports
    #[arg(long)]
    no_save: bool,
}

impl Cli {
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = Config::new();
        if self.parallel {
            config = config.with_mode(SearchMode::Parallel);
        }
        if self.on_polynomial {
            config = config.with_classification(Classification::OnPolynomial);
        }
        if let Some(limit) = self.candidate_limit {
            config = config.with_candidate_limit(limit)?;
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config()?;

    let mut failed = 0;
    for file in &cli.files {
        if let Err(err) = process(&cli, &config, file) {
            error!(file = %file.display(), "{err:#}");
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{failed} of {} documents failed", cli.files.len());
    }
    Ok(())
}

fn process(cli: &Cli, config: &Config, path: &Path) -> anyhow::Result<()> {
    let document = ShareDocument::from_path(path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    let shares = document.shares().context("failed to decode shares")?;

    let reconstructor = SecretReconstructor::builder(document.threshold())
        .with_config(config.clone())
        .build()?;

    info!(
        file = %path.display(),
        shares = shares.len(),
        threshold = document.threshold(),
        candidates = ?candidate_count(shares.len(), document.threshold()),
        "searching for a consistent subset"
    );
    let outcome = reconstructor.reconstruct(&shares)?;

    let saved = match &outcome {
        Outcome::Found(found) if !cli.no_save => Some(report::save_coefficients(
            &cli.out_dir,
            path,
            found.polynomial(),
        )?),
        Outcome::Found(_) => None,
        Outcome::NoValidPolynomial => {
            info!(file = %path.display(), "no valid polynomial");
            None
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        writeln!(out, "{}", report::to_json(&outcome)?)?;
    } else {
        report::write_summary_with_report(
            &mut out,
            &path.display().to_string(),
            &outcome,
            saved.as_deref(),
        )?;
    }

    Ok(())
}
