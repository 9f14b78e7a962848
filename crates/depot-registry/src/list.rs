//! Listing output: table rows, quiet ids, and relative-age labels.

use chrono::{DateTime, Utc};

use crate::index::Registry;

/// One row of `depot list` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub repository: String,
    pub tag: String,
    pub short_id: String,
    pub kind: String,
    pub created: String,
    pub size: String,
}

/// Tag shown for a dangling artifact.
pub const NONE_TAG: &str = "<none>";

/// Build the list rows: one per (repository, tag), and exactly one
/// `<none>` row for a dangling artifact.
pub fn rows(registry: &Registry, now: DateTime<Utc>) -> Vec<ListRow> {
    let mut out = Vec::new();
    for repo in &registry.repositories {
        for artifact in &repo.artifacts {
            if artifact.is_dangling() {
                out.push(ListRow {
                    repository: repo.repository.clone(),
                    tag: NONE_TAG.to_string(),
                    short_id: artifact.short_id().to_string(),
                    kind: artifact.kind.clone(),
                    created: elapsed_label(&artifact.created, now),
                    size: artifact.size.clone(),
                });
            }
            for tag in &artifact.tags {
                out.push(ListRow {
                    repository: repo.repository.clone(),
                    tag: tag.clone(),
                    short_id: artifact.short_id().to_string(),
                    kind: artifact.kind.clone(),
                    created: elapsed_label(&artifact.created, now),
                    size: artifact.size.clone(),
                });
            }
        }
    }
    out
}

/// Quiet listing: one short id per artifact, regardless of tag count.
pub fn quiet_ids(registry: &Registry) -> Vec<String> {
    registry
        .repositories
        .iter()
        .flat_map(|r| r.artifacts.iter())
        .map(|a| a.short_id().to_string())
        .collect()
}

/// Render the rows as an aligned table with a fixed header.
pub fn format_table(rows: &[ListRow]) -> String {
    let header = [
        "REPOSITORY",
        "TAG",
        "ARTIFACT ID",
        "ARTIFACT TYPE",
        "CREATED",
        "SIZE",
    ];
    let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
    let cells: Vec<[&str; 6]> = rows
        .iter()
        .map(|r| {
            [
                r.repository.as_str(),
                r.tag.as_str(),
                r.short_id.as_str(),
                r.kind.as_str(),
                r.created.as_str(),
                r.size.as_str(),
            ]
        })
        .collect();
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.len());
        }
    }

    let mut out = String::new();
    let write_row = |out: &mut String, row: &[&str; 6]| {
        for (i, (cell, w)) in row.iter().zip(&widths).enumerate() {
            if i > 0 {
                out.push_str("    ");
            }
            out.push_str(cell);
            // pad all but the last column
            if i < row.len() - 1 {
                for _ in cell.len()..*w {
                    out.push(' ');
                }
            }
        }
        out.push('\n');
    };

    write_row(&mut out, &header);
    for row in &cells {
        write_row(&mut out, row);
    }
    out
}

/// Elapsed time since `created` in a human-friendly label.
///
/// Largest whole unit wins, with calendar-ish arithmetic: a week is
/// seven days, a month four weeks, a year twelve months. Days keep
/// winning until two full weeks have passed, so 7-13 days render as
/// days. Labels that fail to parse render as `unknown` rather than
/// failing the listing.
pub fn elapsed_label(created: &str, now: DateTime<Utc>) -> String {
    let created = match DateTime::parse_from_rfc2822(created) {
        Ok(t) => t.with_timezone(&Utc),
        Err(_) => return "unknown".to_string(),
    };
    let elapsed = (now - created).num_seconds().max(0) as f64;

    let minutes = elapsed / 60.0;
    let hours = minutes / 60.0;
    let days = hours / 24.0;
    let weeks = days / 7.0;
    let months = weeks / 4.0;
    let years = months / 12.0;

    let (value, unit) = if years.trunc() > 0.0 {
        (years, "year")
    } else if months.trunc() > 0.0 {
        (months, "month")
    } else if weeks.trunc() > 1.0 {
        (weeks, "week")
    } else if days.trunc() > 0.0 {
        (days, "day")
    } else if hours.trunc() > 0.0 {
        (hours, "hour")
    } else if minutes.trunc() > 0.0 {
        (minutes, "minute")
    } else {
        (elapsed, "second")
    };

    let value = value as i64;
    format!("{} {} ago", value, plural(value, unit))
}

/// Pluralize a unit label when the magnitude exceeds one.
fn plural(value: i64, label: &str) -> String {
    if value > 1 {
        format!("{label}s")
    } else {
        label.to_string()
    }
}
