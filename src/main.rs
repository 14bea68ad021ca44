use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use log::{debug, info, LevelFilter};

use vmstat_report::app::ReportApp;
use vmstat_report::config::{resolve_inputs, Cli, Config};
use vmstat_report::data::category::CategoryTables;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    info!("VMStat Report Tool starting ...");
    debug!("Debug level set");

    let config = Config::from_cli(cli);
    debug!("Configuration: {}", serde_json::to_string(&config)?);

    let tables = CategoryTables::standard();
    debug!("Selected categories: {:?}", tables.selected_names());

    let cwd = std::env::current_dir().context("getting current directory")?;
    let files = resolve_inputs(&config.files, &cwd);
    if files.is_empty() {
        Cli::command()
            .print_help()
            .context("printing usage")?;
        return Ok(());
    }

    let app = ReportApp::new(config, &tables);
    let summary = app.run(&files);
    info!(
        "Done. {} report(s) written, {} file(s) skipped.",
        summary.written, summary.skipped
    );
    Ok(())
}
