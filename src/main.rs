use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use foxyrules::runner::{RemoteFilterList, RunOptions, Runner};
use foxyrules::Settings;

/// Convert gfwlist and custom URL rules into a FoxyProxy configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Refresh patterns from the remote gfwlist
    #[arg(long)]
    update_gfw: bool,

    /// Merge custom URLs from the local rule file
    #[arg(long)]
    add_custom: bool,

    /// Read comma or space separated URLs from standard input
    #[arg(short, long)]
    interactive: bool,

    /// Merge a pattern list previously written with --export-patterns
    #[arg(long, value_name = "FILE")]
    import_patterns: Option<PathBuf>,

    /// Also write the converted gfwlist patterns as a bare JSON array
    #[arg(long, value_name = "FILE")]
    export_patterns: Option<PathBuf>,

    /// Output file path, overrides the default naming
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Existing FoxyProxy configuration to extend
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Local rule file with one URL per line
    #[arg(short, long, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Path to the settings file
    #[arg(short, long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::init_from_env(Env::default().default_filter_or(default_level));

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut settings = Settings::load(args.settings.as_deref())?;
    if let Some(config) = args.config {
        settings.files.config_path = config;
    }
    if let Some(rules) = args.rules {
        settings.files.rule_file = rules;
    }

    let options = RunOptions {
        update_gfw: args.update_gfw,
        add_custom: args.add_custom,
        interactive: args.interactive,
        import_patterns: args.import_patterns,
        export_patterns: args.export_patterns,
        output: args.output,
    };

    if options.interactive {
        eprint!("Enter URLs to add (separated by commas or spaces): ");
    }

    let source = RemoteFilterList::from_settings(&settings);
    let today = chrono::Local::now().date_naive();
    let runner = Runner::new(&settings, source, today);
    let report = runner.run(&options, &mut io::stdin().lock())?;

    info!(
        "Done: {} added, {} duplicates, {} invalid",
        report.added, report.duplicates, report.invalid
    );
    if let Some(e) = report.source_error {
        if report.added == 0 {
            anyhow::bail!("filter-list refresh failed and no rules were merged: {}", e);
        }
    }
    Ok(())
}
