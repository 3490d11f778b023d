#![deny(warnings)]

//! Core domain models for theatrical billing.
//!
//! This crate defines the serializable catalog and invoice types shared by the
//! pricing, statement and loader crates, plus validation helpers for basic
//! invariants. Nothing here performs IO.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Identifier of a play in the catalog, e.g. "hamlet".
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayId(pub String);

impl PlayId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PlayId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Genre of a play. Drives both pricing and loyalty rules.
///
/// Anything other than "tragedy" or "comedy" is kept verbatim in `Unknown`
/// so pricing can report the offending value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Genre {
    Tragedy,
    Comedy,
    Unknown(String),
}

impl Genre {
    pub fn as_str(&self) -> &str {
        match self {
            Genre::Tragedy => "tragedy",
            Genre::Comedy => "comedy",
            Genre::Unknown(raw) => raw,
        }
    }
}

impl From<String> for Genre {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "tragedy" => Genre::Tragedy,
            "comedy" => Genre::Comedy,
            _ => Genre::Unknown(raw),
        }
    }
}

impl From<&str> for Genre {
    fn from(raw: &str) -> Self {
        Genre::from(raw.to_string())
    }
}

impl From<Genre> for String {
    fn from(genre: Genre) -> Self {
        match genre {
            Genre::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A play record as stored in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    /// Display name, e.g. "Hamlet".
    pub name: String,
    /// Genre; stored under the `type` key in catalog JSON.
    #[serde(rename = "type")]
    pub genre: Genre,
}

/// Returned by [`Catalog::resolve`] for ids that are not in the catalog.
static UNRESOLVED_PLAY: Play = Play {
    name: String::new(),
    genre: Genre::Unknown(String::new()),
};

impl Play {
    pub fn new(name: impl Into<String>, genre: impl Into<Genre>) -> Self {
        Self {
            name: name.into(),
            genre: genre.into(),
        }
    }

    /// The empty play: no name and an empty unknown genre.
    pub fn unresolved() -> &'static Play {
        &UNRESOLVED_PLAY
    }
}

/// Catalog of plays keyed by id. Read-only while statements are computed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    plays: BTreeMap<PlayId, Play>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a play. Returns the previous entry for `id`, if any.
    pub fn insert(&mut self, id: impl Into<String>, play: Play) -> Option<Play> {
        self.plays.insert(PlayId::new(id), play)
    }

    pub fn get(&self, id: &str) -> Option<&Play> {
        self.plays.get(id)
    }

    /// Resolve a play id.
    ///
    /// A miss is not an error here: it yields [`Play::unresolved`], whose empty
    /// genre is rejected later by pricing.
    pub fn resolve(&self, id: &str) -> &Play {
        self.get(id).unwrap_or(Play::unresolved())
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlayId, &Play)> {
        self.plays.iter()
    }
}

impl FromIterator<(PlayId, Play)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (PlayId, Play)>>(iter: I) -> Self {
        Self {
            plays: iter.into_iter().collect(),
        }
    }
}

/// One performance line of an invoice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPerformance {
    #[serde(rename = "playID")]
    pub play_id: PlayId,
    pub audience: u32,
}

impl RawPerformance {
    pub fn new(play_id: impl Into<String>, audience: u32) -> Self {
        Self {
            play_id: PlayId::new(play_id),
            audience,
        }
    }
}

/// A customer's invoice. Performance order is the order of the report lines.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub customer: String,
    pub performances: Vec<RawPerformance>,
}

/// Validation errors for catalog and invoice invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Catalog keys must not be blank.
    #[error("play id must not be blank")]
    BlankPlayId,
    /// Every catalogued play needs a name to print.
    #[error("play {0} has a blank name")]
    BlankPlayName(String),
    /// An invoice must name its customer.
    #[error("invoice customer must not be blank")]
    BlankCustomer,
}

/// Validate a single catalog entry.
pub fn validate_play(id: &PlayId, play: &Play) -> Result<(), ValidationError> {
    if id.0.trim().is_empty() {
        return Err(ValidationError::BlankPlayId);
    }
    if play.name.trim().is_empty() {
        return Err(ValidationError::BlankPlayName(id.0.clone()));
    }
    Ok(())
}

/// Validate every entry of a catalog.
pub fn validate_catalog(catalog: &Catalog) -> Result<(), ValidationError> {
    for (id, play) in catalog.iter() {
        validate_play(id, play)?;
    }
    Ok(())
}

/// Validate an invoice.
///
/// Play ids are deliberately not checked against a catalog: unknown ids are
/// reported by pricing as an unknown genre.
pub fn validate_invoice(invoice: &Invoice) -> Result<(), ValidationError> {
    if invoice.customer.trim().is_empty() {
        return Err(ValidationError::BlankCustomer);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn catalog() -> Catalog {
        let mut c = Catalog::new();
        c.insert("hamlet", Play::new("Hamlet", Genre::Tragedy));
        c.insert("as-like", Play::new("As You Like It", Genre::Comedy));
        c
    }

    #[test]
    fn resolve_known_play() {
        let c = catalog();
        let play = c.resolve("hamlet");
        assert_eq!(play.name, "Hamlet");
        assert_eq!(play.genre, Genre::Tragedy);
    }

    #[test]
    fn resolve_missing_play_is_empty() {
        let c = catalog();
        let play = c.resolve("macbeth");
        assert!(play.name.is_empty());
        assert_eq!(play.genre, Genre::Unknown(String::new()));
        assert_eq!(play.genre.as_str(), "");
        assert!(c.get("macbeth").is_none());
    }

    #[test]
    fn catalog_json_uses_type_key() {
        let json = r#"{
            "hamlet": {"name": "Hamlet", "type": "tragedy"},
            "bar": {"name": "Bar", "type": "baz"}
        }"#;
        let c: Catalog = serde_json::from_str(json).unwrap();
        assert_eq!(c.len(), 2);
        assert_eq!(c.resolve("hamlet").genre, Genre::Tragedy);
        assert_eq!(c.resolve("bar").genre, Genre::Unknown("baz".to_string()));

        let back = serde_json::to_value(&c).unwrap();
        assert_eq!(back["bar"]["type"], "baz");
        assert_eq!(back["hamlet"]["type"], "tragedy");
    }

    #[test]
    fn invoice_json_uses_play_id_key() {
        let json = r#"{
            "customer": "BigCo",
            "performances": [
                {"playID": "hamlet", "audience": 55},
                {"playID": "as-like", "audience": 35}
            ]
        }"#;
        let inv: Invoice = serde_json::from_str(json).unwrap();
        assert_eq!(inv.customer, "BigCo");
        assert_eq!(inv.performances[0], RawPerformance::new("hamlet", 55));
        assert_eq!(inv.performances[1].play_id.as_str(), "as-like");
    }

    #[test]
    fn negative_audience_is_rejected_at_parse() {
        let json = r#"{"customer": "X", "performances": [{"playID": "a", "audience": -1}]}"#;
        assert!(serde_json::from_str::<Invoice>(json).is_err());
    }

    #[test]
    fn validation_rules() {
        assert!(validate_catalog(&catalog()).is_ok());

        let mut bad = catalog();
        bad.insert("nameless", Play::new("  ", Genre::Comedy));
        assert_eq!(
            validate_catalog(&bad),
            Err(ValidationError::BlankPlayName("nameless".to_string()))
        );
        assert_eq!(
            validate_play(&PlayId::new(""), &Play::new("X", Genre::Comedy)),
            Err(ValidationError::BlankPlayId)
        );

        let inv = Invoice {
            customer: " ".to_string(),
            performances: vec![RawPerformance::new("missing", 10)],
        };
        assert_eq!(validate_invoice(&inv), Err(ValidationError::BlankCustomer));

        // Unknown play ids are not a validation concern.
        let inv = Invoice {
            customer: "BigCo".to_string(),
            performances: vec![RawPerformance::new("missing", 10)],
        };
        assert!(validate_invoice(&inv).is_ok());
    }

    proptest! {
        #[test]
        fn unknown_genre_text_is_preserved(raw in "[a-z ]{0,12}") {
            prop_assume!(raw != "tragedy" && raw != "comedy");
            let genre = Genre::from(raw.clone());
            prop_assert_eq!(genre.as_str(), raw.as_str());
            prop_assert_eq!(String::from(genre), raw);
        }
    }
}
