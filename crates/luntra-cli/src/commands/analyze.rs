//! Analyze command implementation.
//!
//! Computes the deal metrics and, on request, the expense breakdown and
//! screening ratios.

use anyhow::Result;
use clap::Args;

use luntra_analytics::{analyze, DealAnalysis};

use crate::cli::OutputFormat;
use crate::commands::DealArgs;
use crate::context::Context;
use crate::output::{format_ratio, print_flat, print_header, print_output, KeyValue};

/// Arguments for the analyze command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub deal: DealArgs,

    /// Show the monthly expense breakdown and screening ratios
    #[arg(short, long)]
    pub all: bool,
}

/// Execute the analyze command.
pub fn execute(args: AnalyzeArgs, ctx: &Context) -> Result<()> {
    let deal = args.deal.resolve(ctx)?;
    let analysis = analyze(&deal.inputs)?;
    let precision = ctx.precision();

    match ctx.format {
        OutputFormat::Table => {
            print_header(&format!("Deal Metrics ({})", analysis.inputs.model_type));
            println!("{}", analysis.inputs.model_type.narrative());
            print_output(&metric_rows(&analysis, precision), ctx.format)?;

            if args.all {
                print_header("Monthly Operating Expenses");
                print_output(&expense_rows(&analysis), ctx.format)?;

                print_header("Screening Ratios");
                print_output(&ratio_rows(&analysis, precision), ctx.format)?;
            }
        }
        OutputFormat::Json | OutputFormat::Csv => {
            let map = if args.all {
                analysis.to_flat_map()
            } else {
                analysis.metrics.to_flat_map()
            };
            print_flat(&map, ctx.format)?;
        }
        OutputFormat::Minimal => {
            let m = &analysis.metrics;
            println!(
                "cash_flow={} cap_rate={} coc={} one_percent={}",
                m.monthly_cash_flow.round_dp(2),
                format_ratio(m.cap_rate, precision),
                format_ratio(m.cash_on_cash_return, precision),
                if m.one_percent_rule_pass { "pass" } else { "fail" }
            );
        }
    }

    Ok(())
}

fn metric_rows(analysis: &DealAnalysis, precision: u32) -> Vec<KeyValue> {
    let m = &analysis.metrics;
    vec![
        KeyValue::from_money("Down Payment", m.down_payment_amount),
        KeyValue::from_money("Loan Amount", m.loan_amount),
        KeyValue::from_money("Principal & Interest", m.principal_and_interest),
        KeyValue::from_money("PITI", m.monthly_piti),
        KeyValue::separator(),
        KeyValue::from_money("Effective Gross Income", m.effective_gross_income),
        KeyValue::from_money("Operating Expenses", m.operating_expenses),
        KeyValue::from_money("Net Operating Income", m.net_operating_income),
        KeyValue::from_money("Monthly Cash Flow", m.monthly_cash_flow),
        KeyValue::from_money("Annual Cash Flow", m.annual_cash_flow),
        KeyValue::separator(),
        KeyValue::from_money("Closing Costs", m.closing_costs),
        KeyValue::from_money("Total Cash Invested", m.total_cash_invested),
        KeyValue::from_ratio("Cap Rate", m.cap_rate, precision),
        KeyValue::from_ratio("Cash-on-Cash Return", m.cash_on_cash_return, precision),
        KeyValue::from_check("1% Rule", m.one_percent_rule_pass),
    ]
}

fn expense_rows(analysis: &DealAnalysis) -> Vec<KeyValue> {
    let mut rows: Vec<KeyValue> = analysis
        .expenses
        .items()
        .into_iter()
        .map(|(label, amount)| KeyValue::from_money(label, amount))
        .collect();
    rows.push(KeyValue::from_money("Total", analysis.expenses.total()));
    rows
}

fn ratio_rows(analysis: &DealAnalysis, precision: u32) -> Vec<KeyValue> {
    let s = &analysis.supplementary;
    vec![
        KeyValue::from_percent_scale("Loan-to-Value", s.loan_to_value_percent, precision),
        KeyValue::from_multiple("Gross Rent Multiplier", s.gross_rent_multiplier),
        KeyValue::from_multiple("Debt Service Coverage", s.debt_service_coverage),
        KeyValue::from_percent_scale("Rent-to-Price", s.rent_to_price_percent, precision),
        KeyValue::from_percent_scale(
            "Break-even Occupancy",
            s.break_even_occupancy_percent,
            precision,
        ),
        KeyValue::from_money("Net Housing Cost", s.net_housing_cost),
        KeyValue::from_percent_scale(
            "Housing Cost Offset",
            s.housing_cost_offset_percent,
            precision,
        ),
    ]
}
