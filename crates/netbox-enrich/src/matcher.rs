//! Fuzzy manufacturer matching.
//!
//! Scores manufacturer names against a vendor string (typically the vendor
//! behind a MAC address OUI) with case-insensitive Jaro-Winkler similarity.

use crate::fields::{label, FieldRef};
use crate::records::ManufacturerMatch;
use serde_json::Value;

/// Minimum similarity for a manufacturer to be accepted
pub const AUTOPOPULATE_FUZZY_THRESHOLD: f64 = 0.75;

/// Name reported when nothing scores above the threshold
pub const UNIDENTIFIED: &str = "Unidentified";

/// Case-insensitive Jaro-Winkler similarity in [0, 1]
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::jaro_winkler(&a.to_lowercase(), &b.to_lowercase())
}

/// Running best match over a stream of raw manufacturer objects
#[derive(Debug, Clone)]
pub struct BestMatch {
    query: String,
    best: Option<ManufacturerMatch>,
}

impl BestMatch {
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into(), best: None }
    }

    /// Score one manufacturer; only a strictly better score replaces the
    /// current best, so the first of several equal scores wins
    pub fn consider(&mut self, manufacturer: &Value) {
        let Some(name) = label(manufacturer) else {
            return;
        };
        let score = similarity(&name, &self.query);

        if self.best.as_ref().is_some_and(|best| score <= best.score) {
            return;
        }

        let raw = FieldRef::of(Some(manufacturer));
        self.best = Some(ManufacturerMatch {
            name,
            id: raw.id(),
            url: raw.url(),
            score,
        });
    }

    /// The best match, or "Unidentified" carrying the best score when no
    /// manufacturer reached the threshold
    pub fn finish(self) -> ManufacturerMatch {
        match self.best {
            Some(best) if best.score >= AUTOPOPULATE_FUZZY_THRESHOLD => best,
            best => ManufacturerMatch {
                name: UNIDENTIFIED.to_string(),
                id: None,
                url: None,
                score: best.map_or(0.0, |b| b.score),
            },
        }
    }
}

/// Pick the best manufacturer for `query` from an in-memory list
pub fn best_match<'a, I>(query: &str, manufacturers: I) -> ManufacturerMatch
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut matcher = BestMatch::new(query);
    for manufacturer in manufacturers {
        matcher.consider(manufacturer);
    }
    matcher.finish()
}
