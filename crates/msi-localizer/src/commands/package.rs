//! Package command implementation.

use crate::anchor::{RootSource, resolve_anchor};
use crate::commands::load_config;
use crate::core::{BuildLayout, CliError};
use crate::packager::{Packager, PackagerEvents};
use crate::transform::BatchTransformTool;
use crate::utils::ui;
use clap::Args;
use indicatif::ProgressBar;
use msi_localizer_config::LocaleEntry;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Arguments for packaging a multilingual installer.
#[derive(Debug, Clone, Args)]
pub struct PackageArgs {
    /// Installer build output directory, holding one directory per culture.
    #[arg(required_unless_present = "list_locales")]
    pub build_dir: Option<PathBuf>,

    /// Former scripts directory argument. Accepted for existing callers and ignored.
    #[arg(value_name = "LEGACY_SCRIPTS_DIR")]
    pub legacy_scripts_dir: Option<PathBuf>,

    /// Anchor root the transform tool path is resolved against.
    /// Overrides `anchor_root` and the executable location.
    #[arg(long, env = "MSI_LOCALIZER_ROOT")]
    pub root: Option<PathBuf>,

    /// Transform tool, relative to the anchor root unless absolute.
    #[arg(long)]
    pub tool: Option<PathBuf>,

    /// Configuration file (defaults to ./localize.toml when present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verify the base package and show the invocations without running them.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the configured locales and exit.
    #[arg(long)]
    pub list_locales: bool,
}

/// Renders packager progress on the terminal.
#[derive(Default)]
struct ConsoleEvents {
    spinner: RefCell<Option<ProgressBar>>,
}

impl PackagerEvents for ConsoleEvents {
    fn on_copy_start(&self, from: &Path, _to: &Path) {
        let msg = format!("Copying {}", from.display());
        *self.spinner.borrow_mut() = Some(ui::create_spinner(&msg));
    }

    fn on_master_ready(&self, master_package: &Path, bytes: u64) {
        if let Some(pb) = self.spinner.borrow_mut().take() {
            pb.finish_and_clear();
        }
        ui::print_master_ready(master_package, bytes);
    }

    fn on_locale_start(&self, index: usize, total: usize, locale: &LocaleEntry) {
        ui::print_applying(index, total, locale);
    }

    fn on_locale_done(&self, locale: &LocaleEntry, duration: Duration) {
        ui::print_applied(locale, duration);
    }
}

impl Drop for ConsoleEvents {
    fn drop(&mut self) {
        if let Some(pb) = self.spinner.get_mut().take() {
            pb.finish_and_clear();
        }
    }
}

/// Run the package command.
pub fn run_package(args: PackageArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;

    if args.list_locales {
        ui::print_locales(&config.locales);
        return Ok(());
    }

    let build_dir = args
        .build_dir
        .ok_or_else(|| CliError::Other("a build directory is required".to_string()))?;

    ui::print_header();

    let source = RootSource::select(args.root, config.anchor_root.clone())?;
    let root = resolve_anchor(&source, config.anchor_depth, &config.anchor_marker)?;
    ui::print_anchor(&root);

    let tool_path = match &args.tool {
        Some(tool) => root.join(tool),
        None => config.resolve_tool(&root),
    };

    if let Some(legacy) = &args.legacy_scripts_dir {
        tracing::warn!(legacy = %legacy.display(), "legacy scripts directory argument is ignored");
        ui::print_legacy_scripts_ignored(legacy, &tool_path);
    }

    let layout = BuildLayout::new(&build_dir, &config)?;
    tracing::debug!(?layout, tool = %tool_path.display(), "resolved build layout");

    let tool = BatchTransformTool::new(tool_path);
    let events = ConsoleEvents::default();
    let packager = Packager::new(&layout, &config.locales, &tool).with_events(&events);

    if args.dry_run {
        packager.verify_base()?;
        ui::print_dry_run(&tool, &packager.plan());
        return Ok(());
    }

    let summary = packager.run().inspect_err(|err| {
        if let Some(culture) = err.failed_culture() {
            ui::print_stopped_at(culture, &layout.master_package());
        }
    })?;
    ui::print_summary(&summary);

    Ok(())
}
