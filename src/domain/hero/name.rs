// src/domain/hero/name.rs
//
// Hero name canonicalization
//
// Every hero is keyed by a canonical identifier: the display name lower-cased with
// everything except ASCII letters removed ("Kel'Thuzad" -> "kelthuzad",
// "Lt. Morales" -> "ltmorales"). Replays, the catalog and stored ban flags all
// meet on this key.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::OnceLock;

/// Replays label Lúcio with the accented letter, which canonicalizes to this value
const MISLABELED_LUCIO: &str = "lcio";
const LUCIO: &str = "lucio";

fn non_letters() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^a-z]+").unwrap())
}

/// Canonicalize a free-form hero name.
///
/// Pure and idempotent. Any input yields some canonical string, even when it names
/// no known hero.
pub fn canonicalize(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let cleaned = non_letters().replace_all(&lowered, "");

    if cleaned == MISLABELED_LUCIO {
        return LUCIO.to_string();
    }
    cleaned.into_owned()
}

/// Canonical hero identifier.
///
/// Can only be built through [`canonicalize`], so holding one guarantees the value
/// contains lowercase ASCII letters only.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct HeroId(String);

impl HeroId {
    pub fn canonicalize(raw: &str) -> Self {
        Self(canonicalize(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HeroId {
    fn from(raw: &str) -> Self {
        Self::canonicalize(raw)
    }
}

impl From<String> for HeroId {
    fn from(raw: String) -> Self {
        Self::canonicalize(&raw)
    }
}

impl From<HeroId> for String {
    fn from(id: HeroId) -> Self {
        id.0
    }
}

impl AsRef<str> for HeroId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for HeroId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HeroId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
