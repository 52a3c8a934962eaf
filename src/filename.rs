//! Filename metadata extraction.
//!
//! Payslip files are named `<employee_id>_<YYYYMM>.pdf`: one or more
//! alphanumeric characters, an underscore, exactly six ASCII digits, and
//! a lowercase `.pdf` extension. Anything else yields no metadata, which
//! is an expected outcome rather than an error.

use regex::Regex;
use std::sync::LazyLock;

/// Pattern for payslip filenames. Case-sensitive on the extension;
/// no extra separators or suffixes are permitted between tokens.
static PAYSLIP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<emp>[A-Za-z0-9]+)_(?P<period>[0-9]{6})\.pdf$")
        .expect("Invalid payslip filename pattern")
});

/// Identity extracted from a payslip filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayslipMeta {
    /// Employee identifier, e.g. `EMP001`.
    pub employee_id: String,
    /// Pay period as `YYYYMM`, e.g. `202501`.
    pub period: String,
}

/// Parse a base filename into payslip metadata.
///
/// Returns `None` when the name does not match the pattern.
pub fn parse_meta(name: &str) -> Option<PayslipMeta> {
    let captures = PAYSLIP_PATTERN.captures(name)?;
    Some(PayslipMeta {
        employee_id: captures["emp"].to_string(),
        period: captures["period"].to_string(),
    })
}
