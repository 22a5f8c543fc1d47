use clap::Parser;
use msi_localizer::commands::{PackageArgs, run_package};
use msi_localizer::utils::ui;
use miette::Result as MietteResult;

#[derive(Parser)]
#[command(name = "msi-localizer")]
#[command(about = "Build a multilingual MSI by embedding culture transforms into a master copy")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    package: PackageArgs,

    /// Log debug output to stderr (MSI_LOCALIZER_LOG takes precedence).
    #[arg(short, long)]
    verbose: bool,

    /// Deterministic output for end-to-end tests.
    #[arg(long, hide = true)]
    e2e: bool,
}

fn main() -> MietteResult<()> {
    let cli = Cli::parse();

    if cli.e2e {
        ui::set_e2e_mode(true);
    }

    let e2e = ui::is_e2e();
    miette::set_hook(Box::new(move |_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(!e2e)
                .unicode(!e2e)
                .context_lines(2)
                .tab_width(4)
                .color(!e2e)
                .wrap_lines(!e2e)
                .build(),
        )
    }))
    .ok();

    ui::init_logging(cli.verbose);

    run_package(cli.package).map_err(miette::Report::new)
}
