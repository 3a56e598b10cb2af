//! # Dialect Assist Host
//!
//! Runs an event script against the simulation host and prints the final
//! render snapshot as JSON.

use assistd::commands::contributed_commands;
use assistd::logging::{init_logging, parse_level};
use assistd::RuntimeConfig;
use std::env;
use std::path::PathBuf;
use std::process;
use tracing::Level;

struct Options {
    runtime: RuntimeConfig,
    log_level: Level,
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("assistd");

    let options = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage(program);
        process::exit(1);
    });

    if let Err(e) = init_logging(options.log_level) {
        eprintln!("Failed to initialise logging: {}", e);
        process::exit(1);
    }

    let snapshot = assistd::run(&options.runtime).unwrap_or_else(|e| {
        eprintln!("Runtime error: {}", e);
        process::exit(1);
    });

    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialise snapshot: {}", e);
            process::exit(1);
        }
    }
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut script = None;
    let mut runtime = RuntimeConfig::default();
    let mut log_level = Level::WARN;
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--script" | "-s" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --script".to_string());
                }
                script = Some(PathBuf::from(&args[i]));
            }
            "--settings" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --settings".to_string());
                }
                runtime.settings = Some(PathBuf::from(&args[i]));
            }
            "--log-level" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --log-level".to_string());
                }
                log_level = parse_level(&args[i])?;
            }
            "--max-steps" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --max-steps".to_string());
                }
                runtime.max_steps = args[i]
                    .parse()
                    .map_err(|_| format!("Invalid max-steps value: {}", args[i]))?;
            }
            "--help" | "-h" => {
                print_usage(args.first().map(String::as_str).unwrap_or("assistd"));
                process::exit(0);
            }
            other => {
                return Err(format!("Unknown option: {}", other));
            }
        }
        i += 1;
    }

    runtime.script = script.ok_or_else(|| "Missing required --script".to_string())?;
    Ok(Options { runtime, log_level })
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} --script <FILE> [OPTIONS]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --script <FILE>      Event script to run");
    eprintln!("      --settings <FILE>    Settings overrides (JSON)");
    eprintln!("      --log-level <LEVEL>  Log level for stderr (default: warn; RUST_LOG wins)");
    eprintln!("      --max-steps <N>      Stop after N events (0 = unlimited)");
    eprintln!("  -h, --help               Print this help");
    eprintln!();
    eprintln!("Registered commands (driven by `jump`, `back`, `lens` and `status` events):");
    for command in contributed_commands() {
        eprintln!("  {}", command.title);
        eprintln!("      {}", command.id);
        eprintln!("      {}", command.description);
    }
}
