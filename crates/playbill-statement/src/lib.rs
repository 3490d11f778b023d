#![deny(warnings)]

//! Statement pipeline: enrich each performance of an invoice with its play,
//! price and credits, aggregate the totals, then render.
//!
//! The catalog is always passed in explicitly; nothing here keeps state
//! between calls.

mod render;

pub use playbill_pricing::PricingError;
pub use render::{render, render_as, render_html, usd, OutputFormat, StatementError};

use playbill_core::{Catalog, Invoice, Play, PlayId, RawPerformance};
use playbill_pricing::{amount_for, volume_credits_for};
use serde::Serialize;
use tracing::{debug, warn};

/// A performance with its resolved play and computed figures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedPerformance {
    #[serde(rename = "playID")]
    pub play_id: PlayId,
    pub audience: u32,
    pub play: Play,
    /// Amount owed in cents.
    pub amount: u64,
    pub volume_credits: u64,
}

/// Everything a renderer needs for one invoice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementData {
    pub customer: String,
    /// In invoice order.
    pub performances: Vec<EnrichedPerformance>,
    /// Sum of all performance amounts, in cents.
    pub total_amount: u64,
    pub total_volume_credits: u64,
}

fn enrich(perf: &RawPerformance, catalog: &Catalog) -> Result<EnrichedPerformance, PricingError> {
    let play = catalog.resolve(perf.play_id.as_str());
    let amount = match amount_for(&play.genre, perf.audience) {
        Ok(amount) => amount,
        Err(e) => {
            warn!(play_id = %perf.play_id, genre = %play.genre, "cannot price performance");
            return Err(e);
        }
    };
    let volume_credits = volume_credits_for(&play.genre, perf.audience);
    debug!(
        play_id = %perf.play_id,
        audience = perf.audience,
        amount,
        volume_credits,
        "priced performance"
    );
    Ok(EnrichedPerformance {
        play_id: perf.play_id.clone(),
        audience: perf.audience,
        play: play.clone(),
        amount,
        volume_credits,
    })
}

/// Build the statement data for an invoice.
///
/// Stops at the first performance that cannot be priced and returns that
/// error; no partial statement is produced.
pub fn build_statement(invoice: &Invoice, catalog: &Catalog) -> Result<StatementData, PricingError> {
    let mut performances = Vec::with_capacity(invoice.performances.len());
    let mut total_amount = 0u64;
    let mut total_volume_credits = 0u64;
    for perf in &invoice.performances {
        let enriched = enrich(perf, catalog)?;
        total_amount += enriched.amount;
        total_volume_credits += enriched.volume_credits;
        performances.push(enriched);
    }
    Ok(StatementData {
        customer: invoice.customer.clone(),
        performances,
        total_amount,
        total_volume_credits,
    })
}

/// Build and render the plain-text statement for an invoice.
pub fn statement(invoice: &Invoice, catalog: &Catalog) -> Result<String, PricingError> {
    build_statement(invoice, catalog).map(|data| render(&data))
}
