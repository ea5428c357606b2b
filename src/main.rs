use anyhow::Result;
use clap::Parser;
use console::style;
use log::error;
use scan_importer::component::ScanImporter;
use scan_importer::config::{Args, RunConfig, UserSettings};
use scan_importer::init;
use scan_importer::tools::expand_slide_tokens;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    init::init(args.verbose);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            error!("{e:#}");
            eprintln!("{} {:#}", style("錯誤:").red().bold(), e);
            ExitCode::from(1)
        }
    }
}

fn run(args: &Args) -> Result<bool> {
    let settings = UserSettings::load(args.settings.as_deref())?;
    let config = RunConfig::resolve(args, settings)?;
    let slides = expand_slide_tokens(&args.slides);

    let summary = ScanImporter::new(config, slides).run()?;
    ScanImporter::print_summary(&summary);

    Ok(summary.is_success())
}
