//! Response normalization — the front-desk house rules.
//!
//! Converts an accepted raw answer (or explicit absence) plus the original
//! query into the final user-facing string. First matching rule wins:
//!
//! 1. address-keyword query → the canonical address, whatever was said
//! 2. absent or blank answer → the fixed apology
//! 3. over 30 words → keep the first two ". "-delimited sentences
//! 4. missing terminal punctuation → append a period

/// Fixed apology used when every strategy yields absence.
pub const APOLOGY_REPLY: &str = "I'm sorry, I couldn't find that right now. You may try visiting our website or calling the school directly.";

/// Canonical address reply for location questions.
pub const SCHOOL_ADDRESS_REPLY: &str =
    "The school is located opposite Medanta Hospital, on Shaheed Path, Lucknow.";

/// Keywords that force the canonical address reply, matched against the
/// lowercased query. Overlaps the orchestrator's intercept set and adds
/// the bare words, so provider answers to location questions are
/// overwritten even when the intercept missed them.
const ADDRESS_KEYWORDS: &[&str] = &["location", "address", "where is", "kahan", "kaha"];

/// Replies longer than this many words get cut down to two sentences.
const MAX_REPLY_WORDS: usize = 30;

/// Whether the query asks for the school's location.
pub fn is_address_query(query: &str) -> bool {
    let lower = query.to_lowercase();
    ADDRESS_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Normalize a raw answer into the final reply.
pub fn normalize(response: Option<&str>, query: &str) -> String {
    // Address questions win over everything, including absence — the
    // intercept path feeds absence through here expecting the address.
    if is_address_query(query) {
        return SCHOOL_ADDRESS_REPLY.to_string();
    }

    let Some(response) = response else {
        return APOLOGY_REPLY.to_string();
    };
    let response = response.trim();
    if response.is_empty() {
        return APOLOGY_REPLY.to_string();
    }

    // Shorten long replies to two sentences.
    if response.split_whitespace().count() > MAX_REPLY_WORDS {
        let kept: Vec<&str> = response.split(". ").take(2).collect();
        return format!("{}.", kept.join(". ").trim_end());
    }

    if !response.ends_with(['.', '!', '?']) {
        return format!("{response}.");
    }

    response.to_string()
}
