//! # covergrid
//!
//! **CLI Binary**
//!
//! Entry point for the `covergrid` command-line application.
//!
//! ## Responsibilities
//! * Parse command line arguments
//! * Merge request files, settings files and flags
//! * Print reports and map failures to exit codes
//!
//! Counting itself lives in `covergrid-core`.

pub mod cli;
mod error_hints;

use anyhow::{Context, Result, bail};
use clap::Parser;

use covergrid_core::{
    AgreementReport, CountSettings, CoverageReport, CoverageRequest, check_agreement,
    count_with_settings,
};
use covergrid_settings::read_request;

use cli::{Cli, Commands, OutputFormat, QueryArgs};

/// Entry point used by the `covergrid` binary.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Count(args) => {
            let request = resolve_request(&args)?;
            let settings = resolve_settings(&args)?;
            let report = count_with_settings(&request, &settings)?;
            print_count(&report, args.format)?;
        }
        Commands::Check(args) => {
            let request = resolve_request(&args)?;
            let settings = resolve_settings(&args)?;
            let report = check_agreement(&request, &settings)?;
            print_check(&report, args.format)?;
            if !report.agrees {
                bail!(
                    "closed form counted {} cells but enumeration counted {}",
                    report.analytic.unwrap_or_default(),
                    report.enumerated
                );
            }
        }
    }
    Ok(())
}

/// Render an error chain with any matching hints.
pub fn format_error(err: &anyhow::Error) -> String {
    error_hints::format(err)
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Ignore a logger that is already installed.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .try_init();
}

/// Build the request: `--input` first, then explicit flags on top.
///
/// Flags override scalar fields; `--marker` values are appended after the
/// file's markers.
pub fn resolve_request(args: &QueryArgs) -> Result<CoverageRequest> {
    let base = match &args.input {
        Some(path) => Some(
            read_request(path)
                .with_context(|| format!("Failed to load request from {}", path.display()))?,
        ),
        None => None,
    };

    let pick = |flag: Option<i64>, from_file: Option<i64>, name: &str| {
        flag.or(from_file)
            .with_context(|| format!("Missing --{name} (or `{name}` in --input)"))
    };
    let width = pick(args.width, base.as_ref().map(|r| r.width), "width")?;
    let height = pick(args.height, base.as_ref().map(|r| r.height), "height")?;
    let threshold = pick(args.threshold, base.as_ref().map(|r| r.threshold), "threshold")?;

    let mut markers = base.map(|r| r.markers).unwrap_or_default();
    markers.extend(args.markers.iter().copied());

    log::debug!(
        "request: {width}x{height}, n={threshold}, {} raw markers",
        markers.len()
    );
    Ok(CoverageRequest::new(width, height, threshold, markers))
}

/// Build the settings: defaults, then `--config`, then flags.
pub fn resolve_settings(args: &QueryArgs) -> Result<CountSettings> {
    let mut settings = match &args.config {
        Some(path) => CountSettings::from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => CountSettings::default(),
    };
    if let Some(strategy) = args.strategy {
        settings.strategy = strategy;
    }
    if let Some(limit) = args.enumeration_limit {
        settings.enumeration_limit = limit;
        settings.unbounded_enumeration = false;
    }
    if args.no_enumeration_limit {
        settings.unbounded_enumeration = true;
    }
    Ok(settings)
}

fn print_count(report: &CoverageReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            println!("{}", report.cells);
            log::info!(
                "path: {}, markers: {} kept, {} discarded",
                report.path,
                report.markers,
                report.discarded
            );
            if let Some(reason) = &report.fallback {
                log::info!("fallback: {reason}");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}

fn print_check(report: &AgreementReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            match (report.analytic, &report.infeasible) {
                (Some(cells), _) => println!("analytic: {cells}"),
                (None, Some(reason)) => println!("analytic: skipped ({reason})"),
                (None, None) => println!("analytic: skipped"),
            }
            println!("enumerated: {}", report.enumerated);
            println!("agrees: {}", if report.agrees { "yes" } else { "no" });
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use covergrid_core::{Point, Strategy};

    fn args() -> QueryArgs {
        QueryArgs {
            width: Some(10),
            height: Some(8),
            threshold: Some(3),
            ..Default::default()
        }
    }

    #[test]
    fn flags_alone_make_a_request() {
        let mut a = args();
        a.markers = vec![Point::new(1, 2)];
        let req = resolve_request(&a).unwrap();
        assert_eq!(req, CoverageRequest::new(10, 8, 3, vec![Point::new(1, 2)]));
    }

    #[test]
    fn missing_dimension_is_reported_by_name() {
        let a = QueryArgs {
            height: None,
            ..args()
        };
        let err = resolve_request(&a).unwrap_err();
        assert!(err.to_string().contains("--height"));
    }

    #[test]
    fn limit_flag_overrides_unbounded_default() {
        let a = QueryArgs {
            enumeration_limit: Some(7),
            strategy: Some(Strategy::Enumerate),
            ..args()
        };
        let settings = resolve_settings(&a).unwrap();
        assert_eq!(settings.limit(), Some(7));
        assert_eq!(settings.strategy, Strategy::Enumerate);
    }

    #[test]
    fn no_limit_flag_disables_guard() {
        let a = QueryArgs {
            no_enumeration_limit: true,
            ..args()
        };
        assert_eq!(resolve_settings(&a).unwrap().limit(), None);
    }
}
