//! Pre-compiled name patterns.
//!
//! Each pattern is compiled once per process and cached. Digits are spelled
//! `[0-9]` rather than `\d` because `\d` matches any Unicode decimal digit.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::ClassifyError;

/// Full-name pattern for the strict convention: `YYYYMM_<category>.<ext>`.
///
/// Captures: 1 = period, 2 = category, 3 = extension with its dot.
pub const STRICT_NAME: &str = r"^([0-9]{6})_([^.]+)(\.[^.]+)$";

/// Prefix pattern for the lenient convention: the name starts with six digits.
pub const LENIENT_PREFIX: &str = r"^([0-9]{6})";

/// A `digits-digits` pair, used for display badges.
pub const BADGE: &str = r"[0-9]+-[0-9]+";

static STRICT_NAME_RE: OnceLock<Regex> = OnceLock::new();
static LENIENT_PREFIX_RE: OnceLock<Regex> = OnceLock::new();
static BADGE_RE: OnceLock<Regex> = OnceLock::new();

/// Returns the compiled strict name pattern.
pub fn strict_name() -> Result<&'static Regex, ClassifyError> {
    cached(&STRICT_NAME_RE, "strict name", STRICT_NAME)
}

/// Returns the compiled lenient prefix pattern.
pub fn lenient_prefix() -> Result<&'static Regex, ClassifyError> {
    cached(&LENIENT_PREFIX_RE, "lenient prefix", LENIENT_PREFIX)
}

/// Returns the compiled badge pattern.
pub fn badge() -> Result<&'static Regex, ClassifyError> {
    cached(&BADGE_RE, "badge", BADGE)
}

fn cached(
    cell: &'static OnceLock<Regex>,
    name: &'static str,
    pattern: &str,
) -> Result<&'static Regex, ClassifyError> {
    if let Some(re) = cell.get() {
        return Ok(re);
    }
    let re = Regex::new(pattern).map_err(|source| ClassifyError::PatternCompile { name, source })?;
    Ok(cell.get_or_init(|| re))
}
