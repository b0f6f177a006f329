use agentlens::cli::{Cli, OutputFormat};
use agentlens::config::DashboardConfig;
use agentlens::csv_output::CsvOutput;
use agentlens::dashboard::DashboardReport;
use agentlens::filter::{FilterOptions, RowFilter};
use agentlens::ingest;
use agentlens::json_output::{JsonOutput, JsonSelection};
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Resolve configuration: file (if any), then CLI overrides
fn load_config(args: &Cli) -> Result<DashboardConfig> {
    let mut config = match &args.config {
        Some(path) => DashboardConfig::from_toml(path)?,
        None => DashboardConfig::default(),
    };

    if let Some(top) = args.top {
        config.top_n = top;
    }
    config.validate().map_err(anyhow::Error::msg)?;

    Ok(config)
}

fn print_filter_options(options: &FilterOptions) {
    println!("Task categories:");
    for t in &options.task_categories {
        println!("  {}", t);
    }
    println!("Deployment environments:");
    for e in &options.deployment_environments {
        println!("  {}", e);
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let config = load_config(&args)?;
    let dataset = ingest::load_dataset(&args.dataset)?;

    if args.list_filters {
        print_filter_options(&FilterOptions::from_rows(&dataset.rows));
        return Ok(());
    }

    let filter = RowFilter::from_selection(&args.task, &args.env);
    let rows = filter.apply(&dataset.rows);
    tracing::debug!(total = dataset.rows.len(), selected = rows.len(), "applied filter");

    let report = DashboardReport::compute(&rows, dataset.rejected, &config);

    match args.format {
        OutputFormat::Text => print!("{}", report.to_report_string()),
        OutputFormat::Json => {
            let selection = JsonSelection {
                task_category: filter.task_category().map(str::to_string),
                deployment_environment: filter.deployment_environment().map(str::to_string),
            };
            println!("{}", JsonOutput::new(selection, report).to_json()?);
        }
        OutputFormat::Csv => print!("{}", CsvOutput::from_report(&report).to_csv()?),
    }

    Ok(())
}
