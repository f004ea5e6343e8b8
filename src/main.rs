use anyhow::Result;
use clap::Parser;
use medir::{cli::Cli, extract, report};
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

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    // CLI overrides replace the compiled-in tracked list wholesale
    let names: Vec<String> = if args.cost_centres.is_empty() {
        extract::TRACKED_COST_CENTRES
            .iter()
            .map(|s| s.to_string())
            .collect()
    } else {
        args.cost_centres.clone()
    };

    let config = report::ReportConfig {
        names,
        format: args.format,
    };

    let mut all_parsed = true;
    for path in &args.paths {
        if !report::report_path(path, &config)? {
            all_parsed = false;
        }
    }

    if args.strict && !all_parsed {
        anyhow::bail!("one or more profiling reports failed to parse");
    }
    Ok(())
}
