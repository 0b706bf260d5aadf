//! Text and JSON rendering of reconstruction outcomes

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::Result;
use crate::polynomial::Polynomial;
use crate::reconstruct::Outcome;

const REPORT_PREFIX: &str = "correct_keys_";

/// Writes one `Coefficient a_i = ...` line per coefficient, then the secret
pub fn write_coefficients<W: Write>(out: &mut W, polynomial: &Polynomial) -> Result<()> {
    for (i, coeff) in polynomial.coefficients().iter().enumerate() {
        writeln!(out, "Coefficient a_{i} = {coeff}")?;
    }
    writeln!(out, "Secret (constant term c): {}", polynomial.secret())?;
    Ok(())
}

/// Writes the full human-readable summary for one input
///
/// # Example
/// ```
/// use shamir_recover::{reconstruct, report, Share};
///
/// let shares = vec![Share::new(1, 3), Share::new(2, 6), Share::new(8, 99)];
/// let outcome = reconstruct(&shares, 2).unwrap();
///
/// let mut out = Vec::new();
/// report::write_summary(&mut out, "line.json", &outcome).unwrap();
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.contains("Secret (constant term c): 0"));
/// assert!(text.contains("x = 8, y = 99"));
/// ```
pub fn write_summary<W: Write>(out: &mut W, label: &str, outcome: &Outcome) -> Result<()> {
    write_summary_with_report(out, label, outcome, None)
}

/// Like [`write_summary`], announcing the saved coefficient report between
/// the coefficients and the wrong keys
pub fn write_summary_with_report<W: Write>(
    out: &mut W,
    label: &str,
    outcome: &Outcome,
    saved: Option<&Path>,
) -> Result<()> {
    let Some(found) = outcome.found() else {
        writeln!(out, "No valid polynomial found in {label}")?;
        return Ok(());
    };

    writeln!(out, "File: {label}")?;
    write_coefficients(out, found.polynomial())?;
    if let Some(path) = saved {
        writeln!(out, "Correct keys saved to: {}", path.display())?;
    }
    writeln!(out, "Wrong keys:")?;
    for share in found.wrong_shares() {
        writeln!(out, "{share}")?;
    }
    writeln!(out, "-----")?;
    Ok(())
}

/// Path of the coefficient report for `source` inside `dir`
pub fn report_path(dir: &Path, source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_else(|| "shares".into());
    dir.join(format!("{REPORT_PREFIX}{stem}.txt"))
}

/// Writes the coefficient report for `source` into `dir`, creating `dir` if needed
pub fn save_coefficients(dir: &Path, source: &Path, polynomial: &Polynomial) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = report_path(dir, source);

    let mut writer = BufWriter::new(File::create(&path)?);
    write_coefficients(&mut writer, polynomial)?;
    writer.flush()?;

    info!(path = %path.display(), "saved coefficient report");
    Ok(path)
}

/// Pretty-printed JSON for an outcome
pub fn to_json(outcome: &Outcome) -> Result<String> {
    Ok(serde_json::to_string_pretty(outcome)?)
}
