use anyhow::Result;

use crate::config::Config;
use crate::report;
use crate::store;
use crate::util::format_amount;

pub(crate) enum Command {
    Serve,
    Summary,
    Help,
    Version,
}

impl Command {
    pub(crate) fn parse(args: &[String]) -> Result<Self> {
        match args.get(1).map(String::as_str) {
            None | Some("serve") => Ok(Self::Serve),
            Some("summary") | Some("s") => Ok(Self::Summary),
            Some("--help") | Some("-h") | Some("help") => Ok(Self::Help),
            Some("--version") | Some("-V") | Some("version") => Ok(Self::Version),
            Some(other) => {
                print_usage();
                anyhow::bail!("Unknown command: {other}");
            }
        }
    }
}

/// Everything except `serve`, which needs the async runtime.
pub(crate) fn as_cli(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Summary => cli_summary(config),
        Command::Help => {
            print_usage();
            Ok(())
        }
        Command::Version => {
            println!("expense-dashboard {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Command::Serve => anyhow::bail!("serve is not a one-shot command"),
    }
}

fn print_usage() {
    println!("Expense Dashboard — single-user expense tracker");
    println!();
    println!("Usage: expense-dashboard [command]");
    println!();
    println!("Commands:");
    println!("  serve (default)               Start the web dashboard");
    println!("  summary                       Print totals by category and by month");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Environment:");
    println!("  EXPENSES_FILE                 Ledger file (default: expenses.csv; .db for SQLite)");
    println!("  EXPENSES_ADDR                 Listen address (default: 127.0.0.1:5000)");
}

fn cli_summary(config: &Config) -> Result<()> {
    let ledger = store::open_store(&config.ledger_path);
    let records = ledger.load()?;

    println!("Expense Dashboard — {}", ledger.describe());
    println!("{}", "─".repeat(40));
    println!("  Expenses:   {}", records.len());
    println!("  Total:      {}", format_amount(report::total(&records)?));

    let categories = report::by_category(&records)?;
    if !categories.is_empty() {
        println!();
        println!("By Category:");
        for (name, amount) in &categories {
            println!("  {name:<24} {}", format_amount(*amount));
        }
    }

    let months = report::by_month(&records)?;
    if !months.is_empty() {
        println!();
        println!("By Month:");
        for (month, amount) in &months {
            println!("  {:<24} {}", month.to_string(), format_amount(*amount));
        }
    }

    Ok(())
}
