mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::lending::{LoanArgs, MortgageArgs};
use commands::retirement::Retirement401kArgs;
use commands::savings::CompoundInterestArgs;

/// Personal-finance calculators
#[derive(Parser)]
#[command(
    name = "fincalc",
    version,
    about = "Personal-finance calculators",
    long_about = "A CLI for the site's financial calculators with decimal precision. \
                  Supports compound interest, loan amortization, mortgage payments \
                  and 401(k) projections. Amounts accept $ and thousands separators; \
                  rates accept either decimals (0.075) or percentages (7.5%)."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Grow a balance with compound interest and monthly contributions
    CompoundInterest(CompoundInterestArgs),
    /// Level-payment loan with full amortization schedule
    Loan(LoanArgs),
    /// Monthly mortgage payment including tax, insurance and PMI
    Mortgage(MortgageArgs),
    /// Project a 401(k) balance with employer match
    #[command(name = "retirement-401k")]
    Retirement401k(Retirement401kArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::CompoundInterest(args) => commands::savings::run_compound_interest(args),
        Commands::Loan(args) => commands::lending::run_loan(args),
        Commands::Mortgage(args) => commands::lending::run_mortgage(args),
        Commands::Retirement401k(args) => commands::retirement::run_401k(args),
        Commands::Version => {
            println!("fincalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
