//! Plain-text report of approved claims.

use std::fmt::Write;

use crate::db::models::Claim;

const REPORT_WIDTH: usize = 72;
const TITLE: &str = "Approved Claims";

fn banner(out: &mut String, ch: char) {
    out.extend(std::iter::repeat(ch).take(REPORT_WIDTH));
    out.push('\n');
}

/// Render the approved-claims report. Rows follow the order of `claims`.
pub fn render_approved_report(claims: &[Claim], currency_symbol: &str) -> String {
    let mut out = String::new();
    let rate_header = format!("Rate ({currency_symbol})");
    let total_header = format!("Total ({currency_symbol})");

    banner(&mut out, '=');
    let _ = writeln!(out, "{TITLE:^REPORT_WIDTH$}");
    banner(&mut out, '=');
    let _ = writeln!(
        out,
        "{:<6} {:>10} {:>12} {:>14}  {}",
        "ID", "Hours", rate_header, total_header, "Submitted At"
    );
    banner(&mut out, '-');

    for claim in claims {
        let _ = writeln!(
            out,
            "{:<6} {:>10} {:>12.2} {:>14.2}  {}",
            claim.id,
            claim.hours_worked,
            claim.hourly_rate,
            claim.total_amount,
            claim.submitted_at_text()
        );
    }

    let grand_total: f64 = claims.iter().map(|claim| claim.total_amount).sum();
    banner(&mut out, '=');
    let _ = writeln!(out, "Claims: {}", claims.len());
    let _ = writeln!(out, "Grand total: {currency_symbol}{grand_total:.2}");
    let _ = writeln!(out, "End of Report");
    banner(&mut out, '=');

    out
}
