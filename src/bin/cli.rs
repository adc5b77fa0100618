use tally::{
    Filter, RecordId, Snapshot, Standing, Tracker, TrackerConfig, ValidationError, View,
    backend::{BackendError, CookieStore, JarFile}};

use std::{path::PathBuf, process};
use colored::Colorize;
use clap::{Args, Parser, Subcommand};
use log::debug;

#[derive(Parser, Debug)]
#[clap(version, about, propagate_version = true)]
struct Cli {
    /// Cookie jar file to keep the ledger in (overrides the config file)
    #[clap(short, long, value_parser)]
    jar: Option<PathBuf>,

    /// TOML configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Action to perform
    #[clap(subcommand)]
    action: Subcommands,
}

#[derive(Debug, Subcommand)]
enum Subcommands {
    /// Record a new income or expense
    Add(AddTransaction),
    /// Delete a transaction by id
    Remove(RemoveTransaction),
    /// List transactions
    List(ListTransactions),
    /// Show totals and balance
    Summary
}

#[derive(Args, Debug)]
struct AddTransaction {
    /// income or expense
    #[clap(short='t', long="type", value_parser, default_value_t = String::from("income"))]
    kind: String,

    #[clap(short, long, value_parser)]
    description: String,

    #[clap(short, long, value_parser, allow_hyphen_values = true)]
    amount: String
}

#[derive(Args, Debug)]
struct RemoveTransaction {
    /// Id of the transaction, as shown by `list`
    #[clap(value_parser)]
    id: RecordId
}

#[derive(Args, Debug)]
struct ListTransactions {
    /// all, income or expense
    #[clap(short, long, value_parser, default_value_t = Filter::All)]
    filter: Filter
}

/// Prints every snapshot to the terminal.
struct Terminal;

impl Terminal {
    fn print_records(snapshot: &Snapshot) {
        if snapshot.records.is_empty() {
            println!("{}", "No transactions yet.".dimmed());
            return;
        }
        for record in &snapshot.records {
            let line = if record.is_income() {
                record.to_string().green()
            } else {
                record.to_string().red()
            };
            println!("{:>15}  {}", record.id.to_string().dimmed(), line);
        }
    }

    fn print_summary(snapshot: &Snapshot) {
        let summary = &snapshot.summary;
        let color = match summary.standing() {
            Standing::Deficit => colored::ColoredString::red,
            Standing::Surplus => colored::ColoredString::green,
            Standing::Even => colored::ColoredString::blue
        };
        let fmt_balance = color(format!("${:.2}", summary.balance).bold());

        println!("{}: ${:.2}", "Income".bold(), summary.total_income);
        println!("{}: ${:.2}", "Expenses".bold(), summary.total_expenses);
        println!("{}: {}", "Balance".bold(), fmt_balance);
    }
}

impl View for Terminal {
    fn render(&mut self, snapshot: &Snapshot) {
        debug!("rendering {} transactions ({})", snapshot.records.len(), snapshot.filter);
        Terminal::print_records(snapshot);
        println!();
        Terminal::print_summary(snapshot);
    }

    fn alert(&mut self, error: &ValidationError) {
        eprintln!("{} {}", "Please enter a valid description and amount:".red(), error);
    }

    fn warn(&mut self, error: &BackendError) {
        eprintln!("{} {}", "Warning: changes were not saved:".yellow(), error);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Cli::parse();

    let config = match &args.config {
        Some(path) => TrackerConfig::read(path)?,
        None => TrackerConfig::default()
    };
    let jar_path = args.jar.unwrap_or(config.jar);

    let jar = JarFile::open(&jar_path, config.cookie.max_size);
    let store = CookieStore::new(jar, config.cookie);
    let mut tracker = Tracker::open(store, Terminal);

    match args.action {
        Subcommands::Add(add) => {
            if tracker.submit(&add.kind, &add.description, &add.amount).is_err() {
                process::exit(1);
            }
        },
        Subcommands::Remove(remove) => {
            if tracker.delete(remove.id) == 0 {
                eprintln!("no transaction with id {}", remove.id);
            }
        },
        Subcommands::List(list) => {
            tracker.filter_changed(list.filter);
        },
        Subcommands::Summary => {
            Terminal::print_summary(&tracker.snapshot());
        }
    }

    return Ok(());
}
