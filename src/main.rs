//! Checkers room server.
//!
//! Reads one JSON request per line from stdin and writes one JSON outbound
//! event per line to stdout. A transport bridge in front of the process
//! tags each request with its client id and fans the events back out.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use tracing::{error, info, warn};

use checkers::config::{self, Invocation, ServerConfig};
use checkers::protocol::parser::{encode_outbound, parse_request};
use checkers::server::Server;

/// Runs the main protocol loop until stdin closes.
fn main() -> ExitCode {
    let config = match ServerConfig::from_args(std::env::args().skip(1)) {
        Ok(Invocation::Run(config)) => config,
        Ok(Invocation::Help) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{}", e);
            print_usage();
            return ExitCode::FAILURE;
        }
    };
    config::init_tracing(config.log_filter.as_deref());
    info!(seed = ?config.seed, "checkers server ready");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut server = Server::new(&config);

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                error!(error = %e, "failed to read stdin");
                break;
            }
        };

        let inbound = match parse_request(&line) {
            Ok(Some(inbound)) => inbound,
            Ok(None) => continue,
            Err(e) => {
                warn!(error = %e, "skipping malformed line");
                continue;
            }
        };

        for outbound in server.handle(inbound) {
            match encode_outbound(&outbound) {
                Ok(encoded) => {
                    if writeln!(out, "{}", encoded).is_err() {
                        return ExitCode::FAILURE;
                    }
                }
                Err(e) => error!(error = %e, "failed to encode event"),
            }
        }
        if out.flush().is_err() {
            return ExitCode::FAILURE;
        }
    }

    info!("stdin closed, shutting down");
    ExitCode::SUCCESS
}

fn print_usage() {
    eprintln!("Usage: checkers [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --seed N              Seed for room ids and color assignment (default: entropy)");
    eprintln!("  --mandatory-captures  Default rooms to mandatory captures");
    eprintln!("  --log FILTER          Log filter, e.g. debug (default: $CHECKERS_LOG, $RUST_LOG, info)");
    eprintln!("  --help                Show this help");
}
