//! Header text composition

use crate::config::HeaderConfig;
use crate::constants::FALLBACK_DATE_FORMAT;
use crate::types::{DatePosition, DateSource};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use std::fmt::Write;
use std::path::Path;

/// Timestamps available to the date part
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateInputs {
    pub now: DateTime<Local>,
    pub file_modified: Option<DateTime<Local>>,
}

impl DateInputs {
    pub fn now() -> Self {
        Self {
            now: Local::now(),
            file_modified: None,
        }
    }

    /// Current time plus the modification time of `path`, when readable
    pub fn for_file(path: &Path) -> Self {
        let file_modified = std::fs::metadata(path)
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::<Local>::from);
        Self {
            now: Local::now(),
            file_modified,
        }
    }
}

/// Build the header string for one file
pub fn compose(config: &HeaderConfig, filename_stem: &str, dates: &DateInputs) -> String {
    let base = if config.use_custom {
        config.custom_text.trim()
    } else if config.use_filename {
        filename_stem.trim()
    } else {
        ""
    };

    let date = config.use_date.then(|| {
        let when = match config.date_source {
            DateSource::Today => dates.now,
            DateSource::FileModified => dates.file_modified.unwrap_or(dates.now),
        };
        format_date(&when, &config.date_format)
    });

    let date_at = |position: DatePosition| {
        date.as_deref()
            .filter(|_| config.date_position == position)
            .unwrap_or("")
    };

    let parts = [
        date_at(DatePosition::Prefix),
        if config.use_prefix { config.prefix_text.trim() } else { "" },
        base,
        if config.use_suffix { config.suffix_text.trim() } else { "" },
        date_at(DatePosition::Suffix),
    ];

    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Stem of a path's file name, e.g. `report` for `/a/report.pdf`
pub fn filename_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Format with a strftime pattern, falling back to `%d/%m/%Y` when it is invalid
pub fn format_date(when: &DateTime<Local>, pattern: &str) -> String {
    try_format(when, pattern)
        .or_else(|| try_format(when, FALLBACK_DATE_FORMAT))
        .unwrap_or_default()
}

fn try_format(when: &DateTime<Local>, pattern: &str) -> Option<String> {
    if pattern.trim().is_empty() {
        return None;
    }
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        log::debug!("Invalid date pattern '{}'", pattern);
        return None;
    }
    let mut out = String::new();
    write!(out, "{}", when.format_with_items(items.into_iter())).ok()?;
    Some(out)
}
