#![deny(warnings)]

//! Command-line front end: load a play catalog and invoices from JSON and
//! print one statement per invoice.

mod config;

use anyhow::{Context, Result};
use playbill_core::{validate_catalog, validate_invoice, Catalog, Invoice};
use playbill_statement::{build_statement, render_as, OutputFormat};
use std::io::Write;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Output for one invoice. A pricing failure prints its message in place of
/// the statement; only validation and encoding problems abort the run.
fn run_invoice(invoice: &Invoice, catalog: &Catalog, format: OutputFormat) -> Result<String> {
    validate_invoice(invoice).with_context(|| format!("invoice for {:?}", invoice.customer))?;
    match build_statement(invoice, catalog) {
        Ok(data) => Ok(render_as(format, &data)?),
        Err(e) => {
            warn!(customer = %invoice.customer, error = %e, "statement aborted");
            Ok(format!("{e}\n"))
        }
    }
}

fn main() -> Result<()> {
    // Logging goes to stderr; stdout carries the statements.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!(
        git_sha = env!("PLAYBILL_GIT_SHA"),
        build_date = env!("PLAYBILL_BUILD_DATE"),
        "starting playbill"
    );

    let env_config = std::env::var_os(config::CONFIG_ENV).map(Into::into);
    let settings = config::settings_from(std::env::args().skip(1), env_config)?;
    info!(?settings, "resolved settings");

    let catalog = playbill_loader::load_catalog(&settings.plays)?;
    validate_catalog(&catalog).context("invalid play catalog")?;
    let invoices = playbill_loader::load_invoices(&settings.invoices)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for invoice in &invoices {
        let text = run_invoice(invoice, &catalog, settings.format)?;
        out.write_all(text.as_bytes())?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use playbill_core::{Genre, Play, RawPerformance};

    fn catalog() -> Catalog {
        let mut c = Catalog::new();
        c.insert("hamlet", Play::new("Hamlet", Genre::Tragedy));
        c.insert("foo", Play::new("Foo", "baz"));
        c
    }

    fn invoice(customer: &str, id: &str) -> Invoice {
        Invoice {
            customer: customer.to_string(),
            performances: vec![RawPerformance::new(id, 20)],
        }
    }

    #[test]
    fn prints_statement() {
        let out = run_invoice(&invoice("Acme", "hamlet"), &catalog(), OutputFormat::Text).unwrap();
        assert!(out.starts_with("Statement for Acme \n"));
        assert!(out.contains("Hamlet: USD 400.00 (20 seats) \n"));
    }

    #[test]
    fn prints_pricing_error_instead_of_statement() {
        let out = run_invoice(&invoice("Acme", "foo"), &catalog(), OutputFormat::Html).unwrap();
        assert_eq!(out, "error: unknown performance type baz\n");
    }

    #[test]
    fn blank_customer_aborts() {
        assert!(run_invoice(&invoice(" ", "hamlet"), &catalog(), OutputFormat::Text).is_err());
    }
}
