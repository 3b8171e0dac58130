//! Contact-field normalization for Canadian public-body records.
//!
//! All helpers are best-effort: input that does not have the expected shape is
//! passed through (trimmed, or digit-stripped for phones) rather than rejected.

use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

/// Canadian postal code, uppercase only, optional whitespace between halves.
const POSTAL_CODE_PATTERN: &str = r"\b[A-Z][0-9][A-Z]\s*[0-9][A-Z][0-9]\b";

static POSTAL_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(POSTAL_CODE_PATTERN).expect("valid regex"));

/// Trailing `, PROV POSTAL` segment of an address.
static ADDRESS_TAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"[\s,]+(AB|BC|MB|ON|NB|NL|NS|NT|NU|PE|QC|SK|YT)[\s,]+({POSTAL_CODE_PATTERN})\z"
    ))
    .expect("valid regex")
});

/// Canada Post letter rules: no D, F, I, O, Q, U anywhere; no W or Z first.
static CANONICAL_POSTAL_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A[ABCEGHJ-NPRSTVXY][0-9][ABCEGHJ-NPRSTV-Z] [0-9][ABCEGHJ-NPRSTV-Z][0-9]\z")
        .expect("valid regex")
});

/// Formats a phone number as `AAA-BBB-CCCC`.
///
/// Every non-digit is dropped first. Anything other than exactly ten digits is
/// returned as the bare digit string.
pub fn format_phone(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == 10 {
        format!("{}-{}-{}", &digits[..3], &digits[3..6], &digits[6..])
    } else {
        digits
    }
}

/// Trims an address and rewrites a trailing province and postal code as
/// ` PROV  POSTAL` (Canada Post mailing format). The postal code is copied
/// verbatim.
pub fn format_address(input: &str) -> String {
    let trimmed = input.trim();
    ADDRESS_TAIL_RE
        .replace(trimmed, " ${1}  ${2}")
        .into_owned()
}

/// Normalizes a postal code to `A1A 1A1`: uppercase, whitespace removed,
/// single space after the forward sortation area. Strings that are not six
/// characters after compaction are returned compacted and uppercased.
pub fn format_postal_code(input: &str) -> String {
    let compact: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();
    if compact.len() == 6 && compact.is_ascii() {
        format!("{} {}", &compact[..3], &compact[3..])
    } else {
        compact
    }
}

/// Checks the first postal code found in `input` against Canada Post's
/// structural rules.
///
/// Returns `None`, after logging a warning, when `input` contains no postal
/// code at all.
pub fn is_valid_postal_code(input: &str) -> Option<bool> {
    match POSTAL_CODE_RE.find(input) {
        Some(found) => {
            let postal_code = format_postal_code(found.as_str());
            Some(CANONICAL_POSTAL_CODE_RE.is_match(&postal_code))
        }
        None => {
            warn!("Missing or invalid postal code in {input}");
            None
        }
    }
}
