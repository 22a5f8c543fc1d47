//! The packaging procedure.
//!
//! Copies the base-culture package into the master directory, then hands the
//! master package to the transform tool once per locale. Locales are applied
//! strictly one after another since every invocation edits the same file.
//! The first failure ends the run; nothing already done is undone.

use crate::core::{
    BasePackageMissingError, BuildLayout, CliError, CopyVerificationError, PackageSummary,
};
use crate::transform::{TransformRequest, TransformTool};
use msi_localizer_config::LocaleEntry;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Progress notifications, used by the CLI to render output.
pub trait PackagerEvents {
    fn on_copy_start(&self, _from: &Path, _to: &Path) {}
    fn on_master_ready(&self, _master_package: &Path, _bytes: u64) {}
    fn on_locale_start(&self, _index: usize, _total: usize, _locale: &LocaleEntry) {}
    fn on_locale_done(&self, _locale: &LocaleEntry, _duration: Duration) {}
}

/// Ignores every event.
pub struct NoEvents;

impl PackagerEvents for NoEvents {}

pub struct Packager<'a> {
    layout: &'a BuildLayout,
    locales: &'a [LocaleEntry],
    tool: &'a dyn TransformTool,
    events: &'a dyn PackagerEvents,
}

impl<'a> Packager<'a> {
    pub fn new(
        layout: &'a BuildLayout,
        locales: &'a [LocaleEntry],
        tool: &'a dyn TransformTool,
    ) -> Self {
        Self {
            layout,
            locales,
            tool,
            events: &NoEvents,
        }
    }

    pub fn with_events(mut self, events: &'a dyn PackagerEvents) -> Self {
        self.events = events;
        self
    }

    /// The invocations a run would make, in order.
    pub fn plan(&self) -> Vec<TransformRequest> {
        let source_dir = self.layout.base_dir();
        let target_dir = self.layout.master_dir();

        self.locales
            .iter()
            .map(|locale| TransformRequest {
                source_dir: source_dir.clone(),
                package_name: self.layout.package_name.clone(),
                locale: locale.clone(),
                target_dir: target_dir.clone(),
            })
            .collect()
    }

    /// Fails unless the base package is an existing regular file.
    pub fn verify_base(&self) -> Result<PathBuf, CliError> {
        let base = self.layout.base_package();
        if !base.is_file() {
            return Err(BasePackageMissingError {
                expected_path: base,
                culture: self.layout.base_culture.clone(),
            }
            .into());
        }
        Ok(base)
    }

    /// Create the master directory and any missing parents.
    pub fn prepare_master(&self) -> Result<PathBuf, CliError> {
        let master_dir = self.layout.master_dir();
        fs_err::create_dir_all(&master_dir)?;
        Ok(master_dir)
    }

    /// Copy the base package over the master package. Returns the bytes copied.
    pub fn copy_base_to_master(&self) -> Result<u64, CliError> {
        let from = self.layout.base_package();
        let to = self.layout.master_package();

        self.events.on_copy_start(&from, &to);
        let bytes = fs_err::copy(&from, &to)?;
        tracing::info!(from = %from.display(), to = %to.display(), bytes, "copied base package");

        Ok(bytes)
    }

    /// Fails unless the master package is now an existing regular file.
    pub fn verify_copy(&self) -> Result<PathBuf, CliError> {
        let target = self.layout.master_package();
        if !target.is_file() {
            return Err(CopyVerificationError { target }.into());
        }
        Ok(target)
    }

    /// Apply every locale in order, stopping at the first failure.
    pub fn apply_locales(&self) -> Result<Vec<LocaleEntry>, CliError> {
        let requests = self.plan();
        let total = requests.len();
        let mut applied = Vec::with_capacity(total);

        for (index, request) in requests.iter().enumerate() {
            self.events.on_locale_start(index, total, &request.locale);
            let start = Instant::now();

            self.tool.apply_transform(request)?;

            self.events.on_locale_done(&request.locale, start.elapsed());
            applied.push(request.locale.clone());
        }

        Ok(applied)
    }

    /// Run the whole procedure.
    pub fn run(&self) -> Result<PackageSummary, CliError> {
        let start = Instant::now();

        self.verify_base()?;
        self.prepare_master()?;
        let bytes = self.copy_base_to_master()?;
        let master_package = self.verify_copy()?;
        self.events.on_master_ready(&master_package, bytes);

        let applied = self.apply_locales()?;

        Ok(PackageSummary {
            master_package,
            applied,
            duration: start.elapsed(),
        })
    }
}
