//! # nsprobe
//!
//! Finds the authoritative name servers of a domain by walking its
//! delegations, and checks ACME DNS-01 TXT records against them.

mod bootstrap;
mod di;

use bootstrap::{init_logging, load_config};
use clap::{Parser, Subcommand};
use di::UseCases;
use nsprobe_application::use_cases::{PropagationReport, TxtOutcome};
use nsprobe_domain::CliOverrides;
use std::process::ExitCode;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "nsprobe")]
#[command(version)]
#[command(about = "Authoritative name server discovery for DNS-01 validation")]
struct Cli {
    /// Path to configuration file (default: nsprobe.toml when present)
    #[arg(short = 'c', long, global = true)]
    config: Option<String>,

    /// Default DNS server: IP, host name or [System]. Repeatable.
    #[arg(long = "dns-server", global = true)]
    dns_servers: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Per-query timeout in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Public suffix list file (default: built-in rules)
    #[arg(long, global = true)]
    public_suffix_list: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Discover the authoritative zone and name servers of each domain
    Discover {
        #[arg(required = true)]
        domains: Vec<String>,

        /// Validation round; selects the starting default resolver
        #[arg(long, default_value_t = 0)]
        round: u32,
    },

    /// Check that a TXT record is served by every authoritative name server
    CheckTxt {
        /// Record name, e.g. _acme-challenge.example.com
        name: String,

        /// Expected TXT value
        value: String,

        /// Maximum number of checks
        #[arg(long, default_value_t = 5)]
        attempts: u32,

        /// Delay between checks
        #[arg(long, default_value_t = 10)]
        interval_secs: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        log_level: cli.log_level,
        dns_servers: cli.dns_servers,
        query_timeout_ms: cli.timeout_ms,
        public_suffix_list: cli.public_suffix_list,
    };
    let config = load_config(cli.config.as_deref(), overrides)?;
    init_logging(&config);

    info!(
        config_file = cli.config.as_deref().unwrap_or("default"),
        dns_servers = ?config.validation.dns_servers,
        query_timeout_ms = config.validation.query_timeout_ms,
        retries = config.validation.retries,
        "Configuration loaded"
    );

    let use_cases = UseCases::new(di::build_pool(&config)?);

    let success = match cli.command {
        Command::Discover { domains, round } => discover(&use_cases, &domains, round).await,
        Command::CheckTxt {
            name,
            value,
            attempts,
            interval_secs,
        } => {
            check_txt(
                &use_cases,
                &name,
                &value,
                attempts,
                Duration::from_secs(interval_secs),
            )
            .await?
        }
    };

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn discover(use_cases: &UseCases, domains: &[String], round: u32) -> bool {
    let mut success = true;

    for (domain, result) in use_cases.discover.execute_many(domains, round).await {
        match result {
            Ok(zone) => {
                let servers: Vec<String> = zone.resolvers.iter().map(|r| r.to_string()).collect();
                println!("{}\t{}\t{}", domain, zone.zone, servers.join(", "));
            }
            Err(e) => {
                eprintln!("{}\terror: {}", domain, e);
                success = false;
            }
        }
    }

    success
}

async fn check_txt(
    use_cases: &UseCases,
    name: &str,
    value: &str,
    attempts: u32,
    interval: Duration,
) -> anyhow::Result<bool> {
    let report = use_cases
        .check_txt
        .wait_until_visible(name, value, attempts, interval)
        .await?;

    print_report(&report);
    Ok(report.is_visible())
}

fn print_report(report: &PropagationReport) {
    println!(
        "{} (zone {}): {}/{} servers",
        report.record,
        report.zone,
        report.found_count(),
        report.servers.len()
    );
    for server in &report.servers {
        let outcome = match &server.outcome {
            TxtOutcome::Found => "found".to_string(),
            TxtOutcome::Missing(values) if values.is_empty() => "missing".to_string(),
            TxtOutcome::Missing(values) => format!("missing (has {})", values.join(", ")),
            TxtOutcome::Failed(reason) => format!("failed: {}", reason),
        };
        println!("  {}\t{}", server.target, outcome);
    }
}
