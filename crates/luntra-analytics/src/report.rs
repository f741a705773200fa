//! Plain-text deal report.
//!
//! The report is the document an export collaborator (PDF, e-mail, print)
//! lays out. Undefined ratios always render as `N/A`.

use chrono::{DateTime, Utc};
use luntra_core::Ratio;
use rust_decimal::Decimal;
use std::fmt::Write as _;

use crate::analysis::DealAnalysis;

/// Formats an amount as currency with thousands separators, e.g. `-$1,234.50`.
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{}", if negative { "-" } else { "" }, grouped, frac)
}

/// Formats a fractional ratio as a percentage with two decimals, or `N/A`.
pub fn format_ratio_percent(ratio: Ratio) -> String {
    match ratio.as_percent() {
        Ratio::Defined(v) => format!("{:.2}%", v),
        Ratio::Undefined => "N/A".to_string(),
    }
}

/// Formats a ratio already on a 0-100 scale, or `N/A`.
pub fn format_percent_scale(ratio: Ratio) -> String {
    match ratio {
        Ratio::Defined(v) => format!("{:.2}%", v),
        Ratio::Undefined => "N/A".to_string(),
    }
}

/// Formats a plain multiple (e.g. DSCR 1.25x), or `N/A`.
pub fn format_multiple(ratio: Ratio) -> String {
    match ratio {
        Ratio::Defined(v) => format!("{:.2}x", v),
        Ratio::Undefined => "N/A".to_string(),
    }
}

/// A deal report with free-text notes.
///
/// # Example
///
/// ```rust
/// use luntra_analytics::{analyze, DealReport};
/// use luntra_core::DealInputs;
/// use rust_decimal_macros::dec;
///
/// let inputs = DealInputs::builder().monthly_rent(dec!(1200)).build().unwrap();
/// let report = DealReport::new(analyze(&inputs).unwrap())
///     .with_note("Seller credit not yet confirmed");
///
/// let text = report.render();
/// assert!(text.contains("Cap Rate"));
/// assert!(text.contains("N/A"));
/// assert!(text.contains("Seller credit"));
/// ```
#[derive(Debug, Clone)]
pub struct DealReport {
    analysis: DealAnalysis,
    title: String,
    notes: Vec<String>,
    generated_at: DateTime<Utc>,
}

impl DealReport {
    /// Creates a report for an analysis.
    pub fn new(analysis: DealAnalysis) -> Self {
        Self {
            analysis,
            title: "Luntra Deal Report".to_string(),
            notes: Vec::new(),
            generated_at: Utc::now(),
        }
    }

    /// Sets the report title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Appends a free-text note. Blank notes are ignored.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        if !note.trim().is_empty() {
            self.notes.push(note.trim().to_string());
        }
        self
    }

    /// Fixes the generation timestamp.
    #[must_use]
    pub fn generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = at;
        self
    }

    /// The analysis this report describes.
    pub fn analysis(&self) -> &DealAnalysis {
        &self.analysis
    }

    /// Renders the report as Markdown-flavoured plain text.
    pub fn render(&self) -> String {
        let a = &self.analysis;
        let i = &a.inputs;
        let m = &a.metrics;
        let s = &a.supplementary;

        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = writeln!(out, "# {}", self.title);
        let _ = writeln!(out);
        let _ = writeln!(out, "Generated: {}", self.generated_at.format("%Y-%m-%d %H:%M UTC"));
        let _ = writeln!(out, "Model: {}", i.model_type);
        let _ = writeln!(out, "{}", i.model_type.narrative());

        section(&mut out, "Deal Inputs");
        row(&mut out, "Purchase Price", format_money(i.purchase_price));
        row(&mut out, "Down Payment", i.down_payment_percent.to_string());
        row(&mut out, "Interest Rate", i.interest_rate_percent.to_string());
        row(&mut out, "Loan Term", format!("{} years", i.loan_term_years));
        row(&mut out, "Monthly Rent", format_money(i.monthly_rent));
        row(&mut out, "Vacancy", i.vacancy_percent.to_string());
        row(&mut out, "Closing Costs", i.closing_cost_percent.to_string());

        section(&mut out, "Financing");
        row(&mut out, "Down Payment", format_money(m.down_payment_amount));
        row(&mut out, "Loan Amount", format_money(m.loan_amount));
        row(&mut out, "Principal & Interest", format_money(m.principal_and_interest));
        row(&mut out, "PITI", format_money(m.monthly_piti));
        row(&mut out, "Closing Costs", format_money(m.closing_costs));
        row(&mut out, "Total Cash Invested", format_money(m.total_cash_invested));

        section(&mut out, "Monthly Operating Expenses");
        for (label, amount) in a.expenses.items() {
            row(&mut out, label, format_money(amount));
        }
        row(&mut out, "Total", format_money(m.operating_expenses));

        section(&mut out, "Income & Returns");
        row(&mut out, "Effective Gross Income", format_money(m.effective_gross_income));
        row(&mut out, "Net Operating Income", format_money(m.net_operating_income));
        row(&mut out, "Monthly Cash Flow", format_money(m.monthly_cash_flow));
        row(&mut out, "Annual Cash Flow", format_money(m.annual_cash_flow));
        row(&mut out, "Cap Rate", format_ratio_percent(m.cap_rate));
        row(&mut out, "Cash-on-Cash Return", format_ratio_percent(m.cash_on_cash_return));
        row(
            &mut out,
            "1% Rule",
            if m.one_percent_rule_pass { "PASS" } else { "FAIL" }.to_string(),
        );

        section(&mut out, "Screening Ratios");
        row(&mut out, "Loan-to-Value", format_percent_scale(s.loan_to_value_percent));
        row(&mut out, "Gross Rent Multiplier", format_multiple(s.gross_rent_multiplier));
        row(&mut out, "Debt Service Coverage", format_multiple(s.debt_service_coverage));
        row(&mut out, "Break-even Occupancy", format_percent_scale(s.break_even_occupancy_percent));
        row(&mut out, "Net Housing Cost", format_money(s.net_housing_cost));
        row(&mut out, "Housing Cost Offset", format_percent_scale(s.housing_cost_offset_percent));

        if !self.notes.is_empty() {
            section(&mut out, "Notes");
            for note in &self.notes {
                let _ = writeln!(out, "- {note}");
            }
        }

        out
    }
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "## {title}");
    let _ = writeln!(out);
}

fn row(out: &mut String, label: &str, value: String) {
    let _ = writeln!(out, "{label:<26}{value:>16}");
}
