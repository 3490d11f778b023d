//! Renderers for [`StatementData`].

use crate::StatementData;
use rust_decimal::Decimal;
use std::fmt::Write as _;
use std::str::FromStr;
use thiserror::Error;

/// Errors from the presentation layer.
#[derive(Debug, Error)]
pub enum StatementError {
    #[error("unknown output format: {0}")]
    UnknownFormat(String),
    #[error("failed to encode statement as json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Presentation formats for a statement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
    Json,
}

impl FromStr for OutputFormat {
    type Err = StatementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "html" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            _ => Err(StatementError::UnknownFormat(s.to_string())),
        }
    }
}

/// Format cents as dollars with two decimals, e.g. 65000 -> "USD 650.00".
pub fn usd(cents: u64) -> String {
    let dollars = Decimal::from_i128_with_scale(i128::from(cents), 2);
    format!("USD {dollars:.2}")
}

/// Plain-text statement.
///
/// The header and performance lines end in `" \n"`, the totals in `"\n"`;
/// existing consumers compare this output byte for byte.
pub fn render(data: &StatementData) -> String {
    let mut out = format!("Statement for {} \n", data.customer);
    for perf in &data.performances {
        let _ = writeln!(
            out,
            "{}: {} ({} seats) ",
            perf.play.name,
            usd(perf.amount),
            perf.audience
        );
    }
    let _ = writeln!(out, "Amount owed is {}", usd(data.total_amount));
    let _ = writeln!(out, "You earned {} credits", data.total_volume_credits);
    out
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// HTML statement: a heading, one table row per performance, and the totals.
pub fn render_html(data: &StatementData) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "<h1>Statement for {}</h1>", escape_html(&data.customer));
    out.push_str("<table>\n");
    out.push_str("<tr><th>play</th><th>seats</th><th>cost</th></tr>\n");
    for perf in &data.performances {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&perf.play.name),
            perf.audience,
            usd(perf.amount)
        );
    }
    out.push_str("</table>\n");
    let _ = writeln!(out, "<p>Amount owed is <em>{}</em></p>", usd(data.total_amount));
    let _ = writeln!(
        out,
        "<p>You earned <em>{}</em> credits</p>",
        data.total_volume_credits
    );
    out
}

/// Render in the requested format. Only JSON encoding can fail.
pub fn render_as(format: OutputFormat, data: &StatementData) -> Result<String, StatementError> {
    match format {
        OutputFormat::Text => Ok(render(data)),
        OutputFormat::Html => Ok(render_html(data)),
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(data)?;
            out.push('\n');
            Ok(out)
        }
    }
}
