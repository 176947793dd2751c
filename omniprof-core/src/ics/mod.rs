//! ICS import and export.
//!
//! Handles the subset of RFC 5545 that calendar exports (Pronote and
//! friends) rely on: VEVENT blocks with SUMMARY, DESCRIPTION, DTSTART and
//! DTEND.

mod generate;
mod parse;
mod text;

pub use generate::generate_ics;
pub use parse::{parse_ics_datetime, parse_events};

use crate::config::OmniprofConfig;

/// MIME type to serve generated documents with.
pub const ICS_MIME_TYPE: &str = "text/calendar";

/// UTC date-time format used for DTSTART/DTEND values.
pub(crate) const ICS_DATETIME_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Calendar-level values embedded in generated documents.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarMetadata {
    /// Product name in PRODID (e.g. "OmniProf")
    pub product: String,
    /// Language tag at the end of PRODID (e.g. "FR")
    pub locale: String,
    /// Domain appended to event ids to build UIDs
    pub uid_domain: String,
}

impl CalendarMetadata {
    pub fn prodid(&self) -> String {
        format!("-//{}//NONSGML v1.0//{}", self.product, self.locale)
    }
}

impl Default for CalendarMetadata {
    fn default() -> Self {
        CalendarMetadata {
            product: "OmniProf".to_string(),
            locale: "FR".to_string(),
            uid_domain: "omniprof.app".to_string(),
        }
    }
}

impl From<&OmniprofConfig> for CalendarMetadata {
    fn from(config: &OmniprofConfig) -> Self {
        CalendarMetadata {
            product: config.product.clone(),
            locale: config.locale.clone(),
            uid_domain: config.uid_domain.clone(),
        }
    }
}
