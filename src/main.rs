//! Loan dashboard CLI
//!
//! Loads a loan book from CSV and reports the blended cost of debt, total
//! interest per loan, rate sensitivity and per-loan amortization schedules.
//! Set RUST_LOG=debug for engine diagnostics.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use loan_intelligence::{
    amortization::AmortizationSchedule,
    loan::load_loans,
    portfolio::total_interest_by_loan,
    AmortizationEngine, DashboardConfig, DateRoll, LoanStore, PortfolioSummary,
    SensitivityAnalyzer,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "loan-dashboard", version, about = "Loan book analytics")]
struct Cli {
    /// Loan book CSV (Name,Principal,Rate,Term (Years),Start Date[,Status])
    #[arg(long, short)]
    loans: PathBuf,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Schedule date convention (overrides the config file)
    #[arg(long, value_enum)]
    date_roll: Option<RollArg>,

    /// Close these loans before reporting (repeatable)
    #[arg(long = "close", value_name = "NAME")]
    close: Vec<String>,

    /// Emit JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Loan table, WACC and total interest per loan
    Summary,
    /// Monthly amortization schedule for one loan
    Schedule {
        #[arg(long)]
        name: String,
        /// Write `<name>_monthly_payments.csv` instead of printing
        #[arg(long)]
        export: bool,
        /// Export directory (overrides the config file)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// WACC as every active loan's rate is swept across a grid
    Sensitivity {
        #[arg(long)]
        start: Option<f64>,
        #[arg(long)]
        stop: Option<f64>,
        #[arg(long)]
        step: Option<f64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RollArg {
    SameDay,
    MonthEnd,
}

impl From<RollArg> for DateRoll {
    fn from(arg: RollArg) -> Self {
        match arg {
            RollArg::SameDay => DateRoll::SameDay,
            RollArg::MonthEnd => DateRoll::MonthEnd,
        }
    }
}

#[derive(Serialize)]
struct SummaryResponse<'a> {
    summary: PortfolioSummary,
    loans: &'a [loan_intelligence::LoanRecord],
    total_interest: Vec<(String, f64)>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DashboardConfig::from_json_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    if let Some(roll) = cli.date_roll {
        config.date_roll = roll.into();
    }

    let mut store = load_loans(&cli.loans)
        .with_context(|| format!("Failed to load loans from {}", cli.loans.display()))?;
    for name in &cli.close {
        store.close_loan(name);
    }

    match cli.command {
        Command::Summary => print_summary(&store, cli.json),
        Command::Schedule { name, export, out_dir } => {
            let loan = store.require(&name)?;
            let schedule = AmortizationEngine::new(config.date_roll).generate_schedule(loan)?;
            if export {
                let dir = out_dir.unwrap_or(config.export_dir);
                let path = schedule
                    .export_csv(&dir)
                    .with_context(|| format!("Failed to export schedule to {}", dir.display()))?;
                println!("Schedule written to: {}", path.display());
                Ok(())
            } else {
                print_schedule(&schedule, cli.json)
            }
        }
        Command::Sensitivity { start, stop, step } => {
            config.sweep_start = start.unwrap_or(config.sweep_start);
            config.sweep_stop = stop.unwrap_or(config.sweep_stop);
            config.sweep_step = step.unwrap_or(config.sweep_step);
            config.validate()?;

            let curve = SensitivityAnalyzer::new(store.list_loans()).sweep_config(&config);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&curve)?);
            } else {
                println!("{:>10} {:>10}", "Rate (%)", "WACC (%)");
                println!("{}", "-".repeat(21));
                for point in &curve {
                    println!("{:>10.2} {:>10.4}", point.rate, point.wacc);
                }
            }
            Ok(())
        }
    }
}

fn print_summary(store: &LoanStore, json: bool) -> Result<()> {
    let loans = store.list_loans();
    let summary = PortfolioSummary::from_records(loans);
    let interest = total_interest_by_loan(loans);

    if json {
        let response = SummaryResponse { summary, loans, total_interest: interest };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if loans.is_empty() {
        println!("No loans available.");
        return Ok(());
    }

    println!("{:<20} {:>14} {:>8} {:>6} {:>12} {:>14} {:>8}",
        "Name", "Principal", "Rate", "Term", "Start", "Balance", "Status");
    println!("{}", "-".repeat(88));
    for loan in loans {
        println!("{:<20} {:>14.2} {:>7.2}% {:>6} {:>12} {:>14.2} {:>8}",
            loan.name,
            loan.principal,
            loan.annual_rate_percent,
            loan.term_years,
            loan.start_date.to_string(),
            loan.remaining_balance,
            loan.status.as_str(),
        );
    }

    println!("\nWACC: {:.2}%", summary.wacc);
    println!("  Active loans: {} of {}", summary.active_count, summary.loan_count);
    println!("  Active balance: ${:.2}", summary.total_active_balance);

    println!("\nTotal Interest:");
    for (name, total) in &interest {
        println!("  {:<20} ${:>14.2}", name, total);
    }
    Ok(())
}

fn print_schedule(schedule: &AmortizationSchedule, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(schedule)?);
        return Ok(());
    }

    println!("Schedule for '{}' ({} months):", schedule.loan_name, schedule.len());
    println!("{:>5} {:>12} {:>14} {:>14} {:>16}",
        "Month", "Date", "Principal", "Interest", "Balance");
    println!("{}", "-".repeat(65));
    for row in &schedule.rows {
        println!("{:>5} {:>12} {:>14.2} {:>14.2} {:>16.2}",
            row.period,
            row.date.to_string(),
            row.principal_payment,
            row.interest_payment,
            row.remaining_balance,
        );
    }

    let summary = schedule.summary();
    println!("\nSummary:");
    println!("  Monthly Payment: ${:.2}", summary.monthly_payment);
    println!("  Total Principal: ${:.2}", summary.total_principal);
    println!("  Total Interest: ${:.2}", summary.total_interest);
    println!("  Final Balance: {:.6}", summary.final_balance);
    Ok(())
}
