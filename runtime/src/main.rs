// Copyright 2026 WCL Importer Contributors
// SPDX-License-Identifier: MIT

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use wcl_importer::cli;
use wcl_importer::cli::sample_cmd::DEFAULT_SAMPLE_FILE;
use wcl_importer::cli::serve::ServeOptions;
use wcl_importer::logging::{self, LogFormat};

#[derive(Parser)]
#[command(
    name = "wcl-importer",
    about = "Import Warcraft Logs class/spec statistics into Azure Data Lake",
    version,
    after_help = "Run 'wcl-importer <command> --help' for details on each command."
)]
struct Cli {
    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Log level filter (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Log line format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP trigger
    Serve {
        /// Port to listen on (default: FUNCTIONS_CUSTOMHANDLER_PORT or 7071)
        #[arg(long)]
        port: Option<u16>,
        /// Address to bind
        #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
        bind: IpAddr,
        /// Function key required on the trigger (default: WCL_FUNCTION_KEY)
        #[arg(long)]
        function_key: Option<String>,
        /// Write snapshots under this directory instead of Data Lake
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Run one import and print the result envelope
    Run {
        /// Write the snapshot under this directory instead of Data Lake
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Scrape and print records without publishing
    Scrape {
        /// Also save the records as JSON to this file
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// List the tables on the statistics page
    Probe {
        /// Save the first 10,000 characters of the page to this file
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Write the reference dataset to a JSON file
    Sample {
        /// Output file
        #[arg(long, short, default_value = DEFAULT_SAMPLE_FILE)]
        output: PathBuf,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    cli::output::set_json(cli.json);
    cli::output::set_quiet(cli.quiet);
    logging::init(&cli.log_level, cli.log_format);

    let result = match cli.command {
        Commands::Serve {
            port,
            bind,
            function_key,
            out_dir,
        } => {
            cli::serve::run(ServeOptions {
                port,
                bind,
                function_key,
                out_dir,
            })
            .await
        }
        Commands::Run { out_dir } => cli::run_cmd::run(out_dir.as_deref()).await,
        Commands::Scrape { output } => cli::scrape_cmd::run(output.as_deref()).await,
        Commands::Probe { save } => cli::probe_cmd::run(save.as_deref()).await,
        Commands::Sample { output } => cli::sample_cmd::run(&output),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "wcl-importer", &mut std::io::stdout());
            Ok(())
        }
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        if cli::output::is_json() {
            cli::output::print_json(&serde_json::json!({
                "error": true,
                "message": format!("{e:#}"),
            }));
        } else {
            eprintln!("  Error: {e:#}");
        }
        std::process::exit(1);
    }

    result
}
