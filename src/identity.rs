//! Identity normalization and dedup key derivation.
//!
//! Guests fill the intake form free-hand, so the same person shows up as
//! "João Silva", "joao  silva" or "JOÃO SILVA". These helpers reduce a name
//! or an RG number to a canonical comparison key before hashing.

use sha2::{Digest, Sha256};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercase, NFD-decompose and drop combining marks, keep only `a-z` and
/// spaces, collapse whitespace runs and trim.
///
/// An empty result means the name carries no usable identity signal and
/// must not be used as a dedup key.
pub fn normalize_name(name: &str) -> String {
    let mut cleaned = String::with_capacity(name.len());
    for c in name.to_lowercase().nfd() {
        if is_combining_mark(c) {
            continue;
        }
        if c.is_ascii_lowercase() {
            cleaned.push(c);
        } else if c.is_whitespace() {
            cleaned.push(' ');
        }
    }
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep only decimal digits. Empty result means no usable key.
pub fn normalize_id(id_string: &str) -> String {
    id_string.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Dedup keys for a guest identity: one per usable fragment, in the form
/// `name:<digest>` / `rg:<digest>`.
///
/// The digest is SHA-256 truncated to 16 hex chars; enough to keep the
/// per-dashboard sets small, with a collision risk that is negligible at
/// shift scale.
pub fn dedup_keys(guest_name: &str, rg: Option<&str>) -> Vec<String> {
    let mut keys = Vec::with_capacity(2);
    let norm_name = normalize_name(guest_name);
    if !norm_name.is_empty() {
        keys.push(format!("name:{}", short_hash(&norm_name)));
    }
    if let Some(rg) = rg {
        let norm_rg = normalize_id(rg);
        if !norm_rg.is_empty() {
            keys.push(format!("rg:{}", short_hash(&norm_rg)));
        }
    }
    keys
}

fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    digest
        .iter()
        .take(8)
        .map(|b| format!("{:02x}", b))
        .collect()
}
