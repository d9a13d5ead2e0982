//! Display badges.
//!
//! Some document names carry a reference such as `12-3` in their last
//! underscore segment (`202401_Payroll 12-3.xlsx`). The last such pair is
//! shown next to a complete cell. Badges never influence classification or aggregation.

use regex::Regex;

use crate::error::ClassifyError;
use crate::patterns;

/// Finds the last `digits-digits` pair in a category segment.
///
/// # Examples
///
/// ```
/// use dg_classify::BadgeExtractor;
///
/// let badges = BadgeExtractor::new()?;
/// assert_eq!(badges.extract("Payroll 1-2 rev 12-3"), Some("12-3"));
/// assert_eq!(badges.extract("Invoice"), None);
/// # Ok::<(), dg_classify::ClassifyError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BadgeExtractor {
    re: &'static Regex,
}

impl BadgeExtractor {
    /// Creates an extractor backed by the cached badge pattern.
    pub fn new() -> Result<Self, ClassifyError> {
        Ok(Self {
            re: patterns::badge()?,
        })
    }

    /// Returns the last badge in `segment`, if any.
    #[must_use]
    pub fn extract<'s>(&self, segment: &'s str) -> Option<&'s str> {
        self.re.find_iter(segment).last().map(|m| m.as_str())
    }

    /// Returns the badge of a file name, looking only at the segment between
    /// the last `_` and the last `.`.
    ///
    /// Names without an `_`, or with nothing between it and the extension,
    /// carry no badge.
    ///
    /// ```
    /// use dg_classify::BadgeExtractor;
    ///
    /// let badges = BadgeExtractor::new()?;
    /// assert_eq!(badges.for_name("202401_Payroll 12-3.xlsx"), Some("12-3"));
    /// assert_eq!(badges.for_name("202401_Payroll 12-3_final.xlsx"), None);
    /// assert_eq!(badges.for_name("202401 Payroll 12-3.xlsx"), None);
    /// # Ok::<(), dg_classify::ClassifyError>(())
    /// ```
    #[must_use]
    pub fn for_name<'s>(&self, name: &'s str) -> Option<&'s str> {
        let dot = name.rfind('.')?;
        let underscore = name.rfind('_')?;
        if dot <= underscore + 1 {
            return None;
        }
        self.extract(name.get(underscore + 1..dot)?)
    }

    /// Formats a badge the way the grid shows it (`12-3` becomes `12,3`).
    #[must_use]
    pub fn display(badge: &str) -> String {
        badge.replacen('-', ",", 1)
    }
}
