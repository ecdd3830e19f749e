//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the service and model code stay free of presentation concerns
//! - the CLI and TUI print identical numbers

use crate::app::pipeline::Estimate;
use crate::breakdown::{CostBreakdown, ILLUSTRATIVE_NOTICE};
use crate::domain::Profile;
use crate::models::ModelInfo;

/// Width of the longest breakdown bar, in characters.
const BAR_WIDTH: usize = 24;

/// Format an amount as `$12,345.67` (negative amounts as `-$1,234.00`).
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac:02}")
}

/// One-line profile description.
pub fn format_profile(p: &Profile) -> String {
    format!(
        "age {} | {} | bmi {:.1} | dependents {} | smoker {} | {}",
        p.age,
        p.sex.as_str(),
        p.bmi,
        p.dependents,
        p.smoker.as_str(),
        p.region.as_str()
    )
}

/// Full estimate summary (profile, estimated cost, optional breakdown).
pub fn format_estimate(estimate: &Estimate) -> String {
    let mut out = String::new();

    out.push_str("=== medinsure - Insurance Cost Estimate ===\n");
    out.push_str(&format!("Profile: {}\n", format_profile(&estimate.profile)));
    out.push_str(&format!(
        "Estimated annual cost: {}\n",
        format_currency(estimate.prediction.annual_cost)
    ));

    if let Some(breakdown) = &estimate.breakdown {
        out.push('\n');
        out.push_str(&format_breakdown(breakdown));
    }

    out
}

/// Breakdown table with a small proportional bar per factor.
pub fn format_breakdown(breakdown: &CostBreakdown) -> String {
    let mut out = String::new();
    out.push_str("Cost factors breakdown\n");
    out.push_str(&format!("({ILLUSTRATIVE_NOTICE})\n"));

    let max_abs = breakdown
        .factors
        .iter()
        .map(|f| f.impact.abs())
        .fold(0.0_f64, f64::max);

    for f in &breakdown.factors {
        out.push_str(&format!(
            "  {:<11} {:>11}  {}\n",
            f.factor.display_name(),
            format_currency(f.impact),
            bar(f.impact, max_abs)
        ));
    }

    out
}

fn bar(value: f64, max_abs: f64) -> String {
    if max_abs <= 0.0 || value == 0.0 {
        return String::new();
    }
    let len = ((value.abs() / max_abs) * BAR_WIDTH as f64).round().max(1.0) as usize;
    let ch = if value < 0.0 { '-' } else { '#' };
    std::iter::repeat_n(ch, len).collect()
}

/// Model description for `medinsure inspect`.
pub fn format_model_info(info: &ModelInfo) -> String {
    let mut out = String::new();
    out.push_str(&format!("Model: {}\n", info.name));
    out.push_str(&format!("Kind: {} ({})\n", info.kind, info.detail));
    out.push_str(&format!("Features ({}):\n", info.features.len()));
    for (i, f) in info.features.iter().enumerate() {
        out.push_str(&format!("{:>3}) {f}\n", i + 1));
    }
    out
}

/// Closing line of every about text.
pub const ESTIMATE_DISCLAIMER: &str =
    "This is an estimate only. Actual premiums may vary based on additional factors.";

/// Heading and bullet lines of the "About This Prediction" text.
pub const ABOUT_SECTIONS: [(&str, &[&str]); 2] = [
    (
        "How it works",
        &[
            "The estimate comes from a gradient-boosted model trained on historical insurance data.",
            "It weighs age, BMI, smoking status, dependents, gender and region.",
        ],
    ),
    (
        "Tips to reduce costs",
        &[
            "Maintain a healthy BMI (18.5-24.9).",
            "Quit smoking; it is the largest single factor.",
            "Consider plans with higher deductibles.",
            "Compare plans across regions.",
        ],
    ),
];

/// Plain-text about page for `medinsure about`.
pub fn format_about() -> String {
    let mut out = String::from("About This Prediction\n");
    for (heading, items) in ABOUT_SECTIONS {
        out.push_str(&format!("\n{heading}\n"));
        for item in items {
            out.push_str(&format!("  - {item}\n"));
        }
    }
    out.push_str(&format!("\n{ESTIMATE_DISCLAIMER}\n"));
    out
}
