//! The payload handed to whatever renders the history page.
//!
//! Markup generation is left to the renderer; this module fixes the data it
//! receives: page title, back link, and the display records (most recent
//! first) decorated with human-readable times and per-row actions.

use chrono::Datelike;
use serde::Serialize;

use crate::history::{DisplayRecord, HistoryConfig};
use crate::revision::Revision;
use crate::slug::post_path;
use crate::types::{DbId, Timestamp};

/// Link from the history page back to the post itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostLink {
    pub url: String,
    pub label: &'static str,
}

/// How a row's attribution line should read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditedLabel {
    /// "Edited {when} by {who}".
    Edited,
    /// "Original post by {who} {when}".
    Original,
}

/// One row of the history page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevisionView {
    #[serde(flatten)]
    pub record: DisplayRecord,
    pub edited_when: String,
    pub edited_label: EditedLabel,
    /// Render the "content unchanged" note instead of a content diff.
    pub content_unchanged: bool,
    pub can_revert: bool,
    pub can_delete: bool,
}

/// Everything the renderer needs for the history page of one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryPage {
    pub post_id: DbId,
    pub title: String,
    pub back_link: Option<PostLink>,
    /// Revision pages should not be indexed by search engines.
    pub noindex: bool,
    pub revisions: Vec<RevisionView>,
}

/// Assemble the page from display-ordered records.
///
/// `live` is the current revision of the post; it determines the back link.
pub fn assemble_page(
    post_id: DbId,
    live: &Revision,
    records: Vec<DisplayRecord>,
    now: Timestamp,
    config: &HistoryConfig,
) -> HistoryPage {
    let back_link = post_path(live.post_type, live.post_id, live.parent_id, &live.title).map(
        |url| PostLink {
            url,
            label: "Back to post",
        },
    );

    let revisions = records
        .into_iter()
        .map(|record| RevisionView {
            edited_when: format_when(record.edited_at, now, config.full_date_days),
            edited_label: if record.sequence_id == 0 {
                EditedLabel::Original
            } else {
                EditedLabel::Edited
            },
            content_unchanged: record.diff_content.is_none(),
            can_revert: !record.is_current,
            can_delete: !record.is_current,
            record,
        })
        .collect();

    HistoryPage {
        post_id,
        title: format!("Edit history for post #{post_id}"),
        back_link,
        noindex: true,
        revisions,
    }
}

/// Describe when something happened relative to `now`.
///
/// Within `full_date_days` the result is relative ("3 hours ago"); beyond
/// that, or for timestamps in the future, it is a date ("Mar 4" in the
/// current year, "Mar 4, 2019" otherwise).
pub fn format_when(at: Timestamp, now: Timestamp, full_date_days: i64) -> String {
    let age = now.signed_duration_since(at);
    if age >= chrono::Duration::zero() && age < chrono::Duration::days(full_date_days) {
        return format!("{} ago", describe_interval(age.num_seconds()));
    }
    if at.year() == now.year() {
        at.format("%b %-d").to_string()
    } else {
        at.format("%b %-d, %Y").to_string()
    }
}

fn describe_interval(seconds: i64) -> String {
    const UNITS: [(i64, &str); 5] = [
        (7 * 24 * 3600, "week"),
        (24 * 3600, "day"),
        (3600, "hour"),
        (60, "minute"),
        (1, "second"),
    ];

    for (size, name) in UNITS {
        if seconds >= size {
            let n = seconds / size;
            let plural = if n == 1 { "" } else { "s" };
            return format!("{n} {name}{plural}");
        }
    }
    "0 seconds".to_string()
}
