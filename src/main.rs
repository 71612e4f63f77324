//! TDS Engine CLI
//!
//! Manages payees and payers, records payments and prints the resulting
//! TDS certificates.
//!
//! # Usage
//!
//! ```bash
//! tds payer add --name "Acme Ltd" --pan AAACA1111A --tan MUMA12345B
//! tds payee add --name "Ravi Kumar" --pan ABCDE1234F --category individual
//! tds pay --payer 1 --payee 1 --type professional --amount 50000 --date 2024-04-01
//! tds records
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `info` to control logging verbosity
//! - `TDS_DATA_DIR`: Directory of the record files (default: current directory)

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use std::str::FromStr;
use tds_engine::{
    Amount, EngineError, Payee, PayeeCategory, PayeeUpdate, Payer, PayerUpdate, PaymentRequest,
    PaymentType, RecordStore, Result, StorePaths, TdsEngine,
};

#[derive(Parser)]
#[command(name = "tds", version, about = "TDS computation and certificate generation")]
struct Cli {
    /// Directory holding payees.txt, payers.txt and tds_records.txt
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage payers (deductors)
    #[command(subcommand)]
    Payer(PayerCommand),

    /// Manage payees
    #[command(subcommand)]
    Payee(PayeeCommand),

    /// Make a payment and generate its TDS certificate
    Pay {
        /// Payer position as listed
        #[arg(long)]
        payer: usize,

        /// Payee position as listed
        #[arg(long)]
        payee: usize,

        /// professional, rent, contractor or salary (or 1-4)
        #[arg(long = "type", value_parser = parse_payment_type)]
        kind: PaymentType,

        /// Gross amount in INR; the monthly amount for salary
        #[arg(long, value_parser = parse_amount)]
        amount: Amount,

        /// Payment date, YYYY-MM-DD
        #[arg(long)]
        date: String,
    },

    /// Show saved TDS certificates
    Records,
}

#[derive(Subcommand)]
enum PayerCommand {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        pan: String,
        #[arg(long)]
        tan: String,
    },
    List,
    Edit {
        index: usize,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        pan: Option<String>,
        #[arg(long)]
        tan: Option<String>,
    },
    Delete {
        index: usize,
    },
}

#[derive(Subcommand)]
enum PayeeCommand {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        pan: String,
        /// individual or company (or 1-2)
        #[arg(long, value_parser = parse_category)]
        category: PayeeCategory,
    },
    List,
    Edit {
        index: usize,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        pan: Option<String>,
        #[arg(long, value_parser = parse_category)]
        category: Option<PayeeCategory>,
    },
    Delete {
        index: usize,
    },
}

fn parse_category(s: &str) -> std::result::Result<PayeeCategory, String> {
    PayeeCategory::from_str(s).map_err(|e| e.to_string())
}

fn parse_payment_type(s: &str) -> std::result::Result<PaymentType, String> {
    PaymentType::from_str(s).map_err(|e| e.to_string())
}

fn parse_amount(s: &str) -> std::result::Result<Amount, String> {
    Amount::from_str(s).map_err(|_| {
        EngineError::InvalidAmount {
            value: s.to_string(),
        }
        .to_string()
    })
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = cli
        .data_dir
        .map(StorePaths::new)
        .unwrap_or_else(StorePaths::from_env);
    let mut engine = TdsEngine::new(RecordStore::new(paths));

    match cli.command {
        Command::Payer(command) => run_payer(&mut engine, command),
        Command::Payee(command) => run_payee(&mut engine, command),
        Command::Pay {
            payer,
            payee,
            kind,
            amount,
            date,
        } => {
            let certificate = engine.make_payment(PaymentRequest {
                payer,
                payee,
                kind,
                gross: amount,
                date,
            })?;
            println!();
            print!("{}", certificate);
            println!("Certificate saved to file successfully.");
            Ok(())
        }
        Command::Records => {
            match engine.certificates() {
                Some(ledger) => {
                    println!("=== SAVED TDS CERTIFICATES ===");
                    print!("{}", ledger);
                }
                None => println!("No records found."),
            }
            Ok(())
        }
    }
}

fn run_payer(engine: &mut TdsEngine, command: PayerCommand) -> Result<()> {
    match command {
        PayerCommand::Add { name, pan, tan } => {
            engine.add_payer(Payer::new(name, pan, tan))?;
            println!("Payer added!");
        }
        PayerCommand::List => {
            let payers = engine.payers()?;
            if payers.is_empty() {
                println!("No payers found.");
            }
            for (i, payer) in payers.iter().enumerate() {
                println!("{}. {}", i + 1, payer);
            }
        }
        PayerCommand::Edit {
            index,
            name,
            pan,
            tan,
        } => {
            let payer = engine.edit_payer(
                index,
                PayerUpdate {
                    name,
                    tax_id: pan,
                    deductor_id: tan,
                },
            )?;
            println!("Payer updated: {}", payer);
        }
        PayerCommand::Delete { index } => {
            let payer = engine.delete_payer(index)?;
            println!("Payer deleted: {}", payer.name);
        }
    }
    Ok(())
}

fn run_payee(engine: &mut TdsEngine, command: PayeeCommand) -> Result<()> {
    match command {
        PayeeCommand::Add {
            name,
            pan,
            category,
        } => {
            engine.add_payee(Payee::new(name, pan, category))?;
            println!("Payee added!");
        }
        PayeeCommand::List => {
            let payees = engine.payees()?;
            if payees.is_empty() {
                println!("No payees found.");
            }
            for (i, payee) in payees.iter().enumerate() {
                println!("{}. {}", i + 1, payee);
            }
        }
        PayeeCommand::Edit {
            index,
            name,
            pan,
            category,
        } => {
            let payee = engine.edit_payee(
                index,
                PayeeUpdate {
                    name,
                    tax_id: pan,
                    category,
                },
            )?;
            println!("Payee updated: {}", payee);
        }
        PayeeCommand::Delete { index } => {
            let payee = engine.delete_payee(index)?;
            println!("Payee deleted: {}", payee.name);
        }
    }
    Ok(())
}
