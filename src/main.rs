// SPDX-License-Identifier: PMPL-1.0-or-later

//! dragnet: decode case flyers and bring criminal organizations down
//!
//! Loads the organizations of a case, decodes every flyer to a nickname,
//! arrests the matching member with a cascade through their underlings,
//! and writes the case report.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dragnet::cipher::{self, FlyerCipher};
use dragnet::config::CaseConfig;
use dragnet::department::{self, PoliceDepartment};
use dragnet::organization;
use dragnet::report::{self, ReportOutputFormat};
use dragnet::storage;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "dragnet")]
#[command(version)]
#[command(about = "Decode case flyers and cascade arrests through criminal organizations")]
#[command(long_about = None)]
struct Cli {
    /// Debug-level logging (overridden by DRAGNET_LOG / RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full case: load organizations, work every flyer, report
    Run {
        /// Case directory holding the organization and flyer folders
        #[arg(value_name = "CASE_DIR")]
        case: PathBuf,

        /// Captain in charge (overrides case.yaml)
        #[arg(short, long)]
        captain: Option<String>,

        /// Case config file (default: <CASE_DIR>/case.yaml if present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Report file or directory
        #[arg(short, long, default_value = storage::DEFAULT_RESULTS_DIR)]
        output: PathBuf,

        /// Report format (default: from the output extension, else text)
        #[arg(short, long, value_enum)]
        format: Option<ReportOutputFormat>,

        /// Print the report without writing it to disk
        #[arg(long)]
        no_save: bool,
    },

    /// Decode a single flyer without arresting anyone
    Decode {
        /// Flyer file
        #[arg(value_name = "FLYER")]
        flyer: PathBuf,

        /// Case directory whose organizations pick the leader key
        #[arg(long, conflicts_with = "key", required_unless_present = "key")]
        case: Option<PathBuf>,

        /// Use this leader key directly
        #[arg(long)]
        key: Option<usize>,
    },

    /// Print the digit root of a number
    Digiroot {
        #[arg(value_name = "NUMBER")]
        number: String,
    },

    /// Parse an organization file and print its hierarchy
    Inspect {
        #[arg(value_name = "ORG_FILE")]
        file: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "dragnet=debug" } else { "dragnet=info" };
    let filter = EnvFilter::try_from_env("DRAGNET_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            case,
            captain,
            config,
            output,
            format,
            no_save,
        } => {
            let config = CaseConfig::load(&case, config.as_deref())?.with_captain(captain);
            println!("Opening case: {}", case.display());

            let department = department::run_case(&case, &config)?;
            let case_report = department.report();
            report::print_report(&case_report);

            if !no_save {
                let format = storage::resolve_format(format, &output);
                storage::persist_report(&case_report, &output, &case, format)?;
            }
        }

        Commands::Decode { flyer, case, key } => {
            let nickname = match (key, case) {
                (Some(key), _) => {
                    let file = File::open(&flyer)
                        .with_context(|| format!("opening {}", flyer.display()))?;
                    FlyerCipher::open(BufReader::new(file))?.reveal(key)?
                }
                (None, Some(case)) => {
                    let config = CaseConfig::load(&case, None)?;
                    let mut department = PoliceDepartment::new(config.captain.clone());
                    department.set_up_organizations(&config.organizations_path(&case))?;
                    department.decipher_message(&flyer)?
                }
                (None, None) => anyhow::bail!("either --case or --key is required"),
            };
            println!("{}", nickname.bold());
        }

        Commands::Digiroot { number } => {
            println!("{}", cipher::digit_root(&number)?);
        }

        Commands::Inspect { file } => {
            let org = organization::parse_file(&file)
                .with_context(|| format!("malformed organization {}", file.display()))?;
            print!("{}", org);
            println!(
                "{} members, leader key {}",
                org.member_count(),
                org.leader_key()
            );
        }
    }

    Ok(())
}
