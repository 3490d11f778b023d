#![deny(warnings)]

//! Pricing and loyalty rules for performances.
//!
//! Both engines are pure functions over a genre and an audience size:
//! - `amount_for`: amount owed in cents, failing on genres without a tariff
//! - `volume_credits_for`: loyalty credits, defined for every genre
//!
//! All arithmetic is integer; amounts are in minor currency units.

use playbill_core::Genre;
use thiserror::Error;

/// Errors produced by the pricing engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PricingError {
    /// No tariff exists for this genre. An empty string means the play id
    /// did not resolve in the catalog.
    #[error("error: unknown performance type {0}")]
    UnknownGenre(String),
}

/// Tragedy tariff: flat base plus a surcharge per seat beyond the threshold.
pub const TRAGEDY_BASE: u64 = 40_000;
pub const TRAGEDY_THRESHOLD: u64 = 30;
pub const TRAGEDY_PER_SEAT_OVER: u64 = 1_000;

/// Comedy tariff: base, a large-audience bonus, and a per-seat charge.
pub const COMEDY_BASE: u64 = 30_000;
pub const COMEDY_THRESHOLD: u64 = 20;
pub const COMEDY_LARGE_AUDIENCE_FEE: u64 = 10_000;
pub const COMEDY_PER_SEAT_OVER: u64 = 500;
pub const COMEDY_PER_SEAT: u64 = 300;

/// Seats above this count earn one credit each, whatever the genre.
pub const CREDIT_THRESHOLD: u64 = 30;
/// Comedies earn an extra credit for every this many attendees.
pub const COMEDY_CREDIT_DIVISOR: u64 = 5;

/// Amount owed for one performance, in cents.
///
/// Example:
/// assert_eq!(amount_for(&Genre::Tragedy, 55).unwrap(), 65_000);
/// assert_eq!(amount_for(&Genre::Comedy, 35).unwrap(), 58_000);
pub fn amount_for(genre: &Genre, audience: u32) -> Result<u64, PricingError> {
    let audience = u64::from(audience);
    match genre {
        Genre::Tragedy => {
            let mut amount = TRAGEDY_BASE;
            if audience > TRAGEDY_THRESHOLD {
                amount += TRAGEDY_PER_SEAT_OVER * (audience - TRAGEDY_THRESHOLD);
            }
            Ok(amount)
        }
        Genre::Comedy => {
            let mut amount = COMEDY_BASE;
            if audience > COMEDY_THRESHOLD {
                amount +=
                    COMEDY_LARGE_AUDIENCE_FEE + COMEDY_PER_SEAT_OVER * (audience - COMEDY_THRESHOLD);
            }
            amount += COMEDY_PER_SEAT * audience;
            Ok(amount)
        }
        Genre::Unknown(raw) => Err(PricingError::UnknownGenre(raw.clone())),
    }
}

/// Volume credits earned by one performance. Never fails.
///
/// Example:
/// assert_eq!(volume_credits_for(&Genre::Comedy, 35), 12);
pub fn volume_credits_for(genre: &Genre, audience: u32) -> u64 {
    let audience = u64::from(audience);
    let mut credits = audience.saturating_sub(CREDIT_THRESHOLD);
    if *genre == Genre::Comedy {
        credits += audience / COMEDY_CREDIT_DIVISOR;
    }
    credits
}
