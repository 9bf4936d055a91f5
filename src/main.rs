//! phonelist-kit - bulk editing for large phone number lists
//!
//! Main entry point for the command-line application.

use clap::Parser;
use colored::*;
use crossbeam_channel::bounded;
use std::process;
use std::thread;
use std::time::Instant;

use phonelist_kit::cli::{Args, Command};
use phonelist_kit::prefixes::PrefixTable;
use phonelist_kit::processor::{Processor, ProcessorConfig, Request};
use phonelist_kit::progress::{
    drive_progress_bar, print_banner, print_bullet, print_error, print_header, print_info,
    print_success, print_warning,
};
use phonelist_kit::validate::validate_file;

/// Progress events buffered between the worker and the bar
const PROGRESS_QUEUE: usize = 1024;

fn main() {
    let args = Args::parse();

    // RUST_LOG, when set, wins over the flags
    let default_level = if args.verbose {
        "debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    if let Err(e) = run(args) {
        print_error(&format!("{}", e));

        let mut source = e.source();
        while let Some(err) = source {
            print_error(&format!("  Caused by: {}", err));
            source = err.source();
        }

        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    if !args.quiet {
        print_banner();
    }

    match &args.command {
        Command::Validate { inputs } => return validate_inputs(inputs.iter().map(|p| p.as_path()), args.quiet),
        Command::Countries { ambiguous } => {
            list_countries(*ambiguous);
            return Ok(());
        }
        _ => {}
    }

    let Some(request) = args.request() else {
        return Ok(());
    };

    let config = ProcessorConfig::from_args(&args)?;

    if args.verbose && !args.quiet {
        print_config(&request, &config);
    }

    if args.validate {
        // Directory inputs are expanded later; only plain files are sampled
        validate_inputs(request.inputs().into_iter().filter(|p| p.is_file()), args.quiet)?;
    }

    let started = Instant::now();
    let (tx, rx) = bounded(PROGRESS_QUEUE);
    let processor = Processor::new(config).with_progress(tx);

    let worker = thread::spawn(move || processor.run(&request));
    drive_progress_bar(rx, args.quiet);

    let summary = worker
        .join()
        .map_err(|_| anyhow::anyhow!("Worker thread panicked"))??;

    if !args.quiet {
        summary.stats.print_summary(&summary.outputs, started.elapsed());
    }

    Ok(())
}

/// Sample each file and fail on the first that is not a phone list
fn validate_inputs<'a, I>(paths: I, quiet: bool) -> anyhow::Result<()>
where
    I: IntoIterator<Item = &'a std::path::Path>,
{
    for path in paths {
        let result = validate_file(path)?;
        if !quiet {
            print_success(&format!(
                "{}: {}/{} sampled lines look like phone numbers",
                path.display(),
                result.plausible,
                result.sampled
            ));
        }
    }
    Ok(())
}

/// Print the built-in prefix table
fn list_countries(ambiguous_only: bool) {
    let table = PrefixTable::builtin();

    if !ambiguous_only {
        print_header("Countries");
        for country in table.countries() {
            println!(
                "  {} {} ({}) +{}  {} areas",
                "•".cyan(),
                country.name(),
                country.iso(),
                country.calling_codes().join(", +"),
                country.areas().len()
            );
        }
        println!();
        print_info(&format!("{} countries", table.len()));
    }

    let ambiguous = table.ambiguous_prefixes();
    if ambiguous.is_empty() {
        if ambiguous_only {
            print_success("No ambiguous prefixes");
        }
        return;
    }

    print_header("Ambiguous prefixes (first claimant wins)");
    for entry in &ambiguous {
        let scope = match &entry.country {
            Some(country) => format!("{} area", country),
            None => "calling code".to_string(),
        };
        print_bullet(&format!(
            "{} {}: {}",
            scope,
            entry.prefix,
            entry.claimants.join(" / ")
        ));
    }
    print_warning(&format!("{} ambiguous prefixes", ambiguous.len()));
}

/// Print configuration summary
fn print_config(request: &Request, config: &ProcessorConfig) {
    print_header("Configuration");

    print_info(&format!("Operation:    {}", request.name()));
    for input in request.inputs() {
        print_info(&format!("Input:        {:?}", input));
    }
    print_info(&format!("Buffer size:  {} MB", config.buffer_size / (1024 * 1024)));
    print_info(&format!("Flush every:  {} lines", config.flush_every));
    print_info(&format!("Max line:     {} MB", config.max_line_len / (1024 * 1024)));
}
