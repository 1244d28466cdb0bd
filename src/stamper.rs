//! Date decision policy and in-place rewrite of a post's date line

use crate::clock::{Clock, SystemClock};
use crate::error::UpdateError;
use crate::front_matter::FrontMatterFormat;
use chrono::{DateTime, FixedOffset, NaiveDate};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static FILENAME_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4}-\d{2}-\d{2})-").expect("valid filename date pattern"));

/// Whether a changed document gets a new timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StampDecision {
    /// Filename date lies before today
    Skip {
        filename_date: NaiveDate,
        today: NaiveDate,
    },
    /// Filename date is today or later, or absent
    Proceed { filename_date: Option<NaiveDate> },
}

/// Result of handling one content-changed document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated { timestamp: String },
    Skipped {
        filename_date: NaiveDate,
        today: NaiveDate,
    },
    MissingFrontMatter,
}

/// Date carried by a `YYYY-MM-DD-title.md` style file name
pub fn filename_date(path: &Path) -> Option<NaiveDate> {
    let name = path.file_name()?.to_str()?;
    let caps = FILENAME_DATE.captures(name)?;
    NaiveDate::parse_from_str(caps.get(1)?.as_str(), "%Y-%m-%d").ok()
}

/// Decide from the file name alone whether the date should be rewritten
pub fn decide(path: &Path, today: NaiveDate) -> StampDecision {
    match filename_date(path) {
        Some(date) if date < today => StampDecision::Skip {
            filename_date: date,
            today,
        },
        filename_date => StampDecision::Proceed { filename_date },
    }
}

/// Render `YYYY-MM-DD HH:MM:SS ±HH00`.
///
/// Only whole offset hours are represented: the offset is floored to hours
/// and its minutes always print as `00`, so `+05:30` renders as `+0500` and
/// `-03:30` as `-0400`.
pub fn format_timestamp(now: &DateTime<FixedOffset>) -> String {
    let offset_hours = offset_hours(now);
    let sign = if offset_hours >= 0 { '+' } else { '-' };
    format!(
        "{} {}{:02}00",
        now.format("%Y-%m-%d %H:%M:%S"),
        sign,
        offset_hours.abs()
    )
}

fn offset_hours(now: &DateTime<FixedOffset>) -> i32 {
    now.offset().local_minus_utc().div_euclid(3600)
}

/// Rewrites the date line of posts whose content changed
pub struct DateUpdater<C = SystemClock> {
    format: FrontMatterFormat,
    clock: C,
}

impl DateUpdater<SystemClock> {
    pub fn new(format: FrontMatterFormat) -> Self {
        Self::with_clock(format, SystemClock)
    }
}

impl<C: Clock> DateUpdater<C> {
    pub fn with_clock(format: FrontMatterFormat, clock: C) -> Self {
        Self { format, clock }
    }

    pub fn format(&self) -> &FrontMatterFormat {
        &self.format
    }

    /// Apply the decision policy and, if it allows, stamp the current time
    /// into the document's header and write it back
    pub fn update(&self, path: &Path) -> Result<UpdateOutcome, UpdateError> {
        let now = self.clock.now();

        match decide(path, now.date_naive()) {
            StampDecision::Skip {
                filename_date,
                today,
            } => {
                tracing::info!(
                    "Filename date ({}) is earlier than current date ({}), skipping date update",
                    filename_date,
                    today
                );
                return Ok(UpdateOutcome::Skipped {
                    filename_date,
                    today,
                });
            }
            StampDecision::Proceed {
                filename_date: None,
            } => {
                tracing::info!("No date found in filename, will update date");
            }
            StampDecision::Proceed { .. } => {}
        }

        let content = fs::read_to_string(path).map_err(|e| UpdateError::ReadFailed {
            file: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let timestamp = format_timestamp(&now);
        tracing::debug!("Current time: {}", timestamp);
        tracing::debug!("UTC offset: {} seconds", now.offset().local_minus_utc());
        tracing::debug!("Offset hours: {}", offset_hours(&now));
        tracing::debug!("Timezone: {}", &timestamp[timestamp.len() - 5..]);

        let Some(stamped) = self.format.stamp(&content, &timestamp) else {
            tracing::warn!("No front matter found in {}", path.display());
            return Ok(UpdateOutcome::MissingFrontMatter);
        };

        fs::write(path, stamped).map_err(|e| UpdateError::WriteFailed {
            file: path.display().to_string(),
            reason: e.to_string(),
        })?;

        tracing::info!("Updated date in {} to {}", path.display(), timestamp);
        Ok(UpdateOutcome::Updated { timestamp })
    }
}
