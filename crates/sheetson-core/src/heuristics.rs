//! Hand-tuned heuristic tables for the row classifier.
//!
//! These lists are tied to a specific family of test-report workbooks and
//! are kept as data rather than inline conditions so they can be adjusted
//! without touching the classifier's control flow.

/// Reserved key for rows observed before any section header
pub const NO_SECTION_KEY: &str = "sin_seccion";

/// Reserved key collecting key/value pairs that failed key validation
pub const MISC_VALUES_KEY: &str = "valores_miscelaneos";

/// Reserved key wrapping verbatim rows in the no-section bucket
pub const VALUES_KEY: &str = "valores";

/// Maximum character length for a usable metadata key
pub const MAX_KEY_LEN: usize = 50;

/// Section keys that always carry a table, even when the row after the
/// candidate header is inconclusive
pub const TABLE_SECTION_NAMES: [&str; 3] = [
    "error_de_relación_de_corriente_en_%_a_%_de_corriente_nominal",
    "fase_en_min_a_%_de_la_corriente_nominal",
    "datos_medidos",
];

/// Low-information tokens that never act as metadata keys: affirmations,
/// negations, status words, and a few literals known to be values
pub const NON_KEY_LITERALS: [&str; 8] = [
    "ok",
    "si",
    "no",
    "desactivado",
    "protección",
    "ubicación",
    "colombia",
    "g3.2",
];

/// Suffixes marking a key as a true label even when its value is absent
pub const LABEL_SUFFIXES: [&str; 3] = ["_id", "_name", "_code"];

/// Normalize text for use as a section key or table header:
/// trim, lowercase, spaces to underscores
pub fn normalize_key(text: &str) -> String {
    text.trim().to_lowercase().replace(' ', "_")
}

/// Lowercased, trimmed form used by the literal and suffix screens.
///
/// Deliberately narrower than [`normalize_key`]: the original heuristics
/// compare these tokens before underscore substitution.
pub fn fold_token(text: &str) -> String {
    text.trim().to_lowercase()
}
