//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use polycrete_core::{MixtureResult, MoldRecord};
use serde_json::json;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Report a newly stored mold
    pub fn print_added(&self, mold: &MoldRecord) {
        match self.format {
            OutputFormat::Human => {
                println!(
                    "Added {} ({} ml) [{}]",
                    mold.name,
                    mold.volume_ml,
                    short_id(&mold.id)
                );
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(mold).unwrap_or_default()
                );
            }
            OutputFormat::Quiet => println!("{}", mold.id),
        }
    }

    /// Print the mold list with the derived batch totals
    pub fn print_molds(&self, molds: &[MoldRecord], total_volume_ml: f64, total_mass_g: f64) {
        match self.format {
            OutputFormat::Human => {
                if molds.is_empty() {
                    println!("No molds recorded.");
                    return;
                }
                for mold in molds {
                    let marker = if mold.active { "*" } else { " " };
                    println!(
                        "{} [{}] {:<24} {:>9.1} ml  {}",
                        marker,
                        short_id(&mold.id),
                        mold.name,
                        mold.volume_ml,
                        mold.created_at.format("%Y-%m-%d")
                    );
                }
                println!();
                println!("Active volume: {:.1} ml", total_volume_ml);
                println!("Batch mass:    {:.1} g", total_mass_g);
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "molds": molds,
                        "total_volume_ml": total_volume_ml,
                        "total_mass_g": total_mass_g,
                    }))
                    .unwrap_or_default()
                );
            }
            OutputFormat::Quiet => {
                for mold in molds {
                    println!("{}", mold.id);
                }
            }
        }
    }

    /// Print the mixture breakdown
    pub fn print_mixture(&self, mixture: &MixtureResult, total_mass_g: f64) {
        match self.format {
            OutputFormat::Human => {
                println!("Batch mass:   {:.1} g", total_mass_g);
                println!();
                println!("Water:        {:>6} g", mixture.water);
                println!("Bond:         {:>6} g", mixture.bond);
                println!("White cement: {:>6} g", mixture.white_cement);
                println!("Putty:        {:>6} g", mixture.putty);
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(mixture).unwrap_or_default()
                );
            }
            OutputFormat::Quiet => {
                println!(
                    "{} {} {} {}",
                    mixture.water, mixture.bond, mixture.white_cement, mixture.putty
                );
            }
        }
    }

    /// Print a status message (suppressed in quiet mode)
    pub fn message(&self, text: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", text),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({ "message": text }))
                        .unwrap_or_default()
                );
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// Shortened id for display
fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
