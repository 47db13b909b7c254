use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use vercheck::cli::{self, CheckArgs};
use vercheck::{config, logging, ui};

#[derive(clap::Parser)]
#[command(
    name = "vercheck",
    version,
    about = "Check that a release tag matches the version declared in project metadata"
)]
struct Args {
    #[arg(help = "The version tag to compare against")]
    tag_version: String,

    #[arg(
        help = "Metadata module (.py), metadata file, or directory containing a *.egg-info or *.dist-info directory"
    )]
    filename: Option<PathBuf>,

    #[arg(
        long,
        conflicts_with = "filename",
        help = "Only check that the tag is a valid version"
    )]
    check_only: bool,

    #[arg(
        long,
        help = "Run the metadata module to read its version (trusted input only)"
    )]
    execute: bool,

    #[arg(long, help = "Prefix stripped from the tag before comparison, e.g. 'v'")]
    tag_prefix: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Log extraction details to stderr")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(e.exit_code());
        }
    };

    let check_args = CheckArgs {
        tag: args.tag_version,
        path: args.filename,
        check_only: args.check_only,
        execute: args.execute,
        tag_prefix: args.tag_prefix,
    };

    let report = match cli::run_check(&check_args, &config) {
        Ok(report) => report,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(e.exit_code());
        }
    };

    cli::report(&report);
    if !report.is_success() {
        std::process::exit(report.exit_code());
    }

    Ok(())
}
