//! `docket` - reporting and maintenance CLI over JSON snapshots

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::{value_parser, Arg, ArgAction, Command};
use docket_engine::{conversion_stats, deadlines_within, derive_stage, group_by_state, summary_stats};
use docket_record::{Employee, Role};
use docket_service::{DocketService, ServiceConfig};
use docket_store::{MemoryStore, PatentStore, TimelineLog};
use std::path::PathBuf;

mod snapshot;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Command::new("docket")
        .version("0.1.0")
        .about("Patent docket reporting over JSON snapshots")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("report")
                .about("Summary, conversion, and state distribution")
                .arg(
                    Arg::new("snapshot")
                        .long("snapshot")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Path to a patents snapshot JSON file"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("deadlines")
                .about("Patents with deadlines inside the window")
                .arg(
                    Arg::new("snapshot")
                        .long("snapshot")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Path to a patents snapshot JSON file"),
                )
                .arg(
                    Arg::new("window")
                        .long("window")
                        .default_value("7")
                        .value_parser(value_parser!(u32))
                        .help("Window in days, endpoints inclusive"),
                )
                .arg(
                    Arg::new("today")
                        .long("today")
                        .value_parser(value_parser!(String))
                        .help("Override today's date (YYYY-MM-DD)"),
                ),
        )
        .subcommand(
            Command::new("verify-log")
                .about("Verify sealed timeline chains")
                .arg(
                    Arg::new("log")
                        .long("log")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Path to a sealed-events JSON file"),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Dry-run a bulk upload against a snapshot")
                .arg(
                    Arg::new("rows")
                        .long("rows")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Path to a decoded rows JSON file"),
                )
                .arg(
                    Arg::new("snapshot")
                        .long("snapshot")
                        .value_parser(value_parser!(PathBuf))
                        .help("Existing patents to check duplicates against"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output the report as JSON"),
                ),
        );

    let matches = cli.get_matches();

    match matches.subcommand() {
        Some(("report", args)) => {
            let path = args.get_one::<PathBuf>("snapshot").unwrap();
            let snapshot = snapshot::load_snapshot(path)?;

            let summary = summary_stats(&snapshot.patents);
            let conversion = conversion_stats(&snapshot.patents);
            let states = group_by_state(&snapshot.patents);

            if args.get_flag("json") {
                let out = serde_json::json!({
                    "summary": summary,
                    "conversion": conversion,
                    "states": states,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("Patents: {}", summary.total);
                println!("  completed:        {}", summary.completed);
                println!("  in progress:      {}", summary.in_progress);
                println!("  pending approval: {}", summary.pending_approval);
                println!("  not started:      {}", summary.not_started);
                println!(
                    "  withdrawn:        {} ({:.1}%)",
                    summary.withdrawn,
                    summary.withdrawn_pct()
                );
                println!();
                println!(
                    "PS -> CS conversion: {}/{} ({:.1}%)",
                    conversion.converted, conversion.ps_completed, conversion.percentage
                );
                println!();
                println!("By state ({} with address):", states.grouped_total);
                for (state, count) in &states.groups {
                    println!(
                        "  {state}: {count} ({:.1}%)",
                        states.percentage(state)
                    );
                }
            }
        }
        Some(("deadlines", args)) => {
            let path = args.get_one::<PathBuf>("snapshot").unwrap();
            let window = *args.get_one::<u32>("window").unwrap();
            let today = match args.get_one::<String>("today") {
                Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")?,
                None => Utc::now().date_naive(),
            };

            let snapshot = snapshot::load_snapshot(path)?;
            let near = deadlines_within(&snapshot.patents, today, window);

            println!("{} patents due within {window} days of {today}", near.len());
            for patent in near {
                println!(
                    "  {} - {} [{}]",
                    patent.tracking_id,
                    patent.title,
                    derive_stage(patent).label()
                );
            }
        }
        Some(("verify-log", args)) => {
            let path = args.get_one::<PathBuf>("log").unwrap();
            let sealed = snapshot::load_sealed(path)?;
            let count = sealed.len();

            let log = TimelineLog::from_sealed(sealed);
            match log.verify_integrity() {
                Ok(()) => {
                    println!("Log integrity: VALID");
                    println!("Events checked: {count}");
                }
                Err(e) => {
                    println!("Log integrity: INVALID ({e})");
                    std::process::exit(1);
                }
            }
        }
        Some(("import", args)) => {
            let rows_path = args.get_one::<PathBuf>("rows").unwrap();
            let rows = snapshot::load_rows(rows_path)?;

            let store = MemoryStore::new();
            if let Some(snap_path) = args.get_one::<PathBuf>("snapshot") {
                let snapshot = snapshot::load_snapshot(snap_path)?;
                for patent in snapshot.patents {
                    store.create_patent(patent).await?;
                }
            }

            let service = DocketService::new(ServiceConfig::new(), store);
            let operator = Employee::new("import operator", Role::Admin, "ops@example.invalid");
            let report = service.import_rows(&operator, rows).await?;

            if args.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "Rows: {} accepted, {} rejected of {}",
                    report.accepted(),
                    report.errors.len(),
                    report.total_rows
                );
                for err in &report.errors {
                    println!("  row {}: {}", err.row, err.message);
                }
            }
            std::process::exit(if report.is_clean() { 0 } else { 1 });
        }
        _ => unreachable!("arg_required_else_help"),
    }

    Ok(())
}
