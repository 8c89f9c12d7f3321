//! `ledge` command-line entry point.
//!
//! ## CLI Subcommands
//!
//! - `ledge` or `ledge demo` - Guided tour of the API (default)
//! - `ledge config show` - Effective configuration
//! - `ledge config defaults` - Documented defaults
//! - `ledge version`, `ledge help`

use std::process::ExitCode;
use std::sync::Arc;

use ledge::cli::{config_cmd, run_demo, DemoOptions};
use ledge::config as ledge_config;
use ledge::telemetry::init_logging;
use ledge::Ledge;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("demo");

    match command {
        "demo" | "" => {
            let cfg = ledge_config::load();
            if let Err(e) = init_logging(&cfg.log) {
                eprintln!("Logging setup failed: {}", e);
                return ExitCode::FAILURE;
            }
            let opts = DemoOptions::from_args(args.get(2..).unwrap_or_default());
            let ledge = Arc::new(Ledge::new(["juicebox", "A"]));
            run_demo(ledge, &opts);
            ExitCode::SUCCESS
        }
        "config" => {
            let subcommand = args.get(2).map(|s| s.as_str()).unwrap_or("show");
            match subcommand {
                "show" => {
                    config_cmd::run_show();
                    ExitCode::SUCCESS
                }
                "defaults" => {
                    config_cmd::run_defaults();
                    ExitCode::SUCCESS
                }
                _ => {
                    eprintln!("Unknown config subcommand: {}", subcommand);
                    print_usage();
                    ExitCode::FAILURE
                }
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "version" | "--version" | "-V" => {
            println!("ledge {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!(
        "ledge - gated diagnostics and latency statistics v{}

USAGE:
    ledge [COMMAND] [OPTIONS]

COMMANDS:
    demo         Walk through the API (default when no command given)
    config       Show configuration (show, defaults)
    version      Show version information
    help         Show this help message

DEMO OPTIONS:
    --no-fatal     Skip the final [PANIC]
    --fast         Shorten simulated work tenfold
    --threads N    Threads for the concurrent section

ENVIRONMENT:
    LEDGE_GLOBAL_DEBUG   Initial process-wide debug gate (default: true)
    LEDGE_GLOBAL_STATS   Initial process-wide stats gate (default: true)
    LEDGE_DEBUG          Initial instance debug gate (default: false)
    LEDGE_STATS          Initial instance stats gate (default: false)
    LEDGE_COLOR          ANSI colors (default: true, false if NO_COLOR is set)
    LEDGE_TIMESTAMPS     Timestamp prefix (default: true)
    LEDGE_LOG            tracing filter (default: info)
    LEDGE_LOG_FORMAT     json or pretty (default: pretty)

EXIT CODES:
    0  Success
    1  Failure
  101  Fatal ([PANIC]) raised by the demo
",
        version
    );
}
