//! Schedule command implementation.
//!
//! Prints the amortization schedule of the deal's loan.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use luntra_analytics::report::format_money;
use luntra_analytics::{AmortizationRow, AmortizationSchedule, YearlySummary};

use crate::cli::OutputFormat;
use crate::commands::DealArgs;
use crate::context::Context;
use crate::output::{print_header, print_info, print_output, KeyValue};

/// Arguments for the schedule command.
#[derive(Args, Debug)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub deal: DealArgs,

    /// Roll the schedule up by loan year
    #[arg(short, long)]
    pub yearly: bool,

    /// Only show the first N rows
    #[arg(short, long)]
    pub limit: Option<usize>,
}

#[derive(Serialize, Tabled)]
struct MonthlyRow {
    #[tabled(rename = "Month")]
    period: u32,
    #[tabled(rename = "Payment")]
    payment: String,
    #[tabled(rename = "Interest")]
    interest: String,
    #[tabled(rename = "Principal")]
    principal: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

impl From<&AmortizationRow> for MonthlyRow {
    fn from(row: &AmortizationRow) -> Self {
        Self {
            period: row.period,
            payment: format_money(row.payment),
            interest: format_money(row.interest),
            principal: format_money(row.principal),
            balance: format_money(row.remaining_balance),
        }
    }
}

#[derive(Serialize, Tabled)]
struct YearRow {
    #[tabled(rename = "Year")]
    year: u32,
    #[tabled(rename = "Paid")]
    paid: String,
    #[tabled(rename = "Interest")]
    interest: String,
    #[tabled(rename = "Principal")]
    principal: String,
    #[tabled(rename = "Ending Balance")]
    balance: String,
}

impl From<&YearlySummary> for YearRow {
    fn from(year: &YearlySummary) -> Self {
        Self {
            year: year.year,
            paid: format_money(year.total_payment),
            interest: format_money(year.total_interest),
            principal: format_money(year.total_principal),
            balance: format_money(year.ending_balance),
        }
    }
}

/// Execute the schedule command.
pub fn execute(args: ScheduleArgs, ctx: &Context) -> Result<()> {
    let deal = args.deal.resolve(ctx)?;
    let schedule = AmortizationSchedule::for_deal(&deal.inputs)?;
    let limit = args.limit.unwrap_or(usize::MAX);

    if schedule.rows.is_empty() {
        print_info("No loan to amortize.");
        return Ok(());
    }

    match ctx.format {
        OutputFormat::Table => {
            print_header("Loan Summary");
            print_output(&summary_rows(&schedule), ctx.format)?;

            if args.yearly {
                print_header("Yearly Amortization");
                let rows: Vec<YearRow> = schedule
                    .yearly_summary()
                    .iter()
                    .take(limit)
                    .map(YearRow::from)
                    .collect();
                print_output(&rows, ctx.format)?;
            } else {
                print_header("Monthly Amortization");
                let rows: Vec<MonthlyRow> =
                    schedule.rows.iter().take(limit).map(MonthlyRow::from).collect();
                print_output(&rows, ctx.format)?;
            }
        }
        OutputFormat::Json => {
            if args.yearly {
                let years: Vec<_> = schedule.yearly_summary().into_iter().take(limit).collect();
                println!("{}", serde_json::to_string_pretty(&years)?);
            } else {
                let rows: Vec<_> = schedule.rows.iter().take(limit).collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            }
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            if args.yearly {
                for year in schedule.yearly_summary().iter().take(limit) {
                    wtr.serialize(year)?;
                }
            } else {
                for row in schedule.rows.iter().take(limit) {
                    wtr.serialize(row)?;
                }
            }
            wtr.flush()?;
        }
        OutputFormat::Minimal => {
            println!(
                "payment={} months={} total_interest={}",
                schedule.scheduled_payment,
                schedule.rows.len(),
                schedule.total_interest()
            );
        }
    }

    Ok(())
}

fn summary_rows(schedule: &AmortizationSchedule) -> Vec<KeyValue> {
    vec![
        KeyValue::from_money("Loan Amount", schedule.loan_amount),
        KeyValue::new("Rate", format!("{}%", schedule.annual_rate_percent.normalize())),
        KeyValue::new("Term", format!("{} years", schedule.term_years)),
        KeyValue::from_money("Monthly Payment", schedule.scheduled_payment),
        KeyValue::from_money("Total Interest", schedule.total_interest()),
        KeyValue::from_money("Total Paid", schedule.total_paid()),
    ]
}
