// CLI output formatting with consistent styling using indicatif and colored.
// Diagnostics go through tracing on stderr; everything the user is meant to read is printed here.

use crate::core::PackageSummary;
use crate::transform::{BatchTransformTool, TransformRequest};
use colored::Colorize as _;
use indicatif::{ProgressBar, ProgressStyle};
use msi_localizer_config::LocaleEntry;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const PD_TICK: Duration = Duration::from_millis(100);

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "MSI_LOCALIZER_LOG";

static E2E_MODE: AtomicBool = AtomicBool::new(false);

/// Enable E2E mode for deterministic output (no colors, fixed durations, hidden progress bars).
pub fn set_e2e_mode(enabled: bool) {
    E2E_MODE.store(enabled, Ordering::SeqCst);
    if enabled {
        colored::control::set_override(false);
    }
}

pub fn is_e2e() -> bool {
    E2E_MODE.load(Ordering::SeqCst)
}

fn format_duration(duration: Duration) -> String {
    if is_e2e() {
        "[DURATION]".to_string()
    } else {
        // whole milliseconds keep humantime from printing nanoseconds
        let rounded = Duration::from_millis(duration.as_millis() as u64);
        humantime::format_duration(rounded).to_string()
    }
}

/// Install the stderr log subscriber.
///
/// `MSI_LOCALIZER_LOG` wins over `verbose`; without either only warnings are shown.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_ansi(!is_e2e())
        .try_init();
}

pub fn create_spinner(msg: &str) -> ProgressBar {
    if is_e2e() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(PD_TICK);
    pb
}

pub fn print_header() {
    println!("{}", "MSI Localization Packager".dimmed());
}

pub fn print_anchor(root: &Path) {
    println!("{} {}", "Anchor root".dimmed(), root.display());
}

pub fn print_legacy_scripts_ignored(legacy: &Path, tool: &Path) {
    eprintln!(
        "{} {} {}",
        "Ignoring legacy scripts directory".yellow(),
        legacy.display().to_string().white().bold(),
        format!("(using {})", tool.display()).dimmed()
    );
}

pub fn print_master_ready(master_package: &Path, bytes: u64) {
    println!(
        "{} {} ({} bytes)",
        "Master package".dimmed(),
        master_package.display().to_string().green(),
        bytes.to_string().cyan()
    );
}

pub fn print_applying(index: usize, total: usize, locale: &LocaleEntry) {
    println!(
        "{} {} {}",
        format!("[{}/{}]", index + 1, total).dimmed(),
        "Applying".dimmed(),
        locale.to_string().green()
    );
}

pub fn print_applied(locale: &LocaleEntry, duration: Duration) {
    println!(
        "{} {}",
        format!("{} applied in", locale.culture_name).dimmed(),
        format_duration(duration).green()
    );
}

pub fn print_stopped_at(culture: &str, master_package: &Path) {
    eprintln!(
        "{} {} {}",
        "Stopped at".red(),
        culture.white().bold(),
        format!("(master package left at {})", master_package.display()).dimmed()
    );
}

pub fn print_summary(summary: &PackageSummary) {
    println!(
        "{} {} culture(s) into {} in {}",
        "Done:".green(),
        summary.applied.len().to_string().cyan(),
        summary.master_package.display(),
        format_duration(summary.duration).green()
    );
}

pub fn print_dry_run(tool: &BatchTransformTool, requests: &[TransformRequest]) {
    println!(
        "{} {} invocation(s) would run",
        "Dry run:".yellow(),
        requests.len()
    );
    for request in requests {
        println!("  {}", tool.command_line(request));
    }
}

pub fn print_locales(locales: &[LocaleEntry]) {
    for locale in locales {
        println!(
            "{:<8} {}",
            locale.culture_name.green(),
            locale.culture_code.to_string().cyan()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_drops_sub_millisecond_noise() {
        if is_e2e() {
            return;
        }
        assert_eq!(format_duration(Duration::from_micros(1_500_250)), "1s 500ms");
    }
}
