//! Revision sequencing: turn an oldest-first list of revisions into diffed,
//! attributed display records.
//!
//! Record `i` shows how revision `i` differs from revision `i - 1` and is
//! attributed to the predecessor's timestamp and author. Record 0 has no
//! predecessor: it shows its own text and takes the attribution of the last
//! revision, which carries the post's creation time and original author.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::access::AccessPolicy;
use crate::censor::BlockWords;
use crate::diff::{self, escape_html, DiffLimits};
use crate::error::CoreError;
use crate::revision::Revision;
use crate::roles::PermitLevel;
use crate::types::{DbId, RevisionIndex, Timestamp};

/// Default number of days within which dates are shown as relative times.
pub const DEFAULT_FULL_DATE_DAYS: i64 = 7;

/// Settings read once at startup and passed to every history request.
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    pub block_words: BlockWords,
    /// Edits older than this many days show a full date instead of "3 days ago".
    pub full_date_days: i64,
    pub diff_limits: DiffLimits,
    pub access: AccessPolicy,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            block_words: BlockWords::default(),
            full_date_days: DEFAULT_FULL_DATE_DAYS,
            diff_limits: DiffLimits::default(),
            access: AccessPolicy::default(),
        }
    }
}

impl HistoryConfig {
    /// Load settings from environment variables, falling back to defaults.
    ///
    /// | Env Var                     | Default   |
    /// |-----------------------------|-----------|
    /// | `BLOCKED_WORDS`             | (none)    |
    /// | `SHOW_FULL_DATE_DAYS`       | `7`       |
    /// | `EDIT_HISTORY_VIEW_PERMS`   | `users`   |
    /// | `EDIT_HISTORY_REVERT_PERMS` | `editors` |
    /// | `DIFF_MAX_TOKENS`           | `10000`   |
    /// | `DIFF_TIMEOUT_MS`           | `1000`    |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let block_words = match lookup("BLOCKED_WORDS") {
            Some(list) => BlockWords::parse(&list)?,
            None => defaults.block_words,
        };
        let full_date_days = match lookup("SHOW_FULL_DATE_DAYS") {
            Some(value) => parse_number("SHOW_FULL_DATE_DAYS", &value)?,
            None => defaults.full_date_days,
        };
        let max_tokens = match lookup("DIFF_MAX_TOKENS") {
            Some(value) => parse_number("DIFF_MAX_TOKENS", &value)?,
            None => defaults.diff_limits.max_tokens,
        };
        let timeout = match lookup("DIFF_TIMEOUT_MS") {
            Some(value) => Duration::from_millis(parse_number("DIFF_TIMEOUT_MS", &value)?),
            None => defaults.diff_limits.timeout,
        };
        let view = match lookup("EDIT_HISTORY_VIEW_PERMS") {
            Some(value) => parse_level("EDIT_HISTORY_VIEW_PERMS", &value)?,
            None => defaults.access.view,
        };
        let revert = match lookup("EDIT_HISTORY_REVERT_PERMS") {
            Some(value) => parse_level("EDIT_HISTORY_REVERT_PERMS", &value)?,
            None => defaults.access.revert,
        };

        Ok(Self {
            block_words,
            full_date_days,
            diff_limits: DiffLimits {
                max_tokens,
                timeout,
            },
            access: AccessPolicy { view, revert },
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, CoreError> {
    value
        .trim()
        .parse()
        .map_err(|_| CoreError::Validation(format!("{key} must be a number, got '{value}'")))
}

fn parse_level(key: &str, value: &str) -> Result<PermitLevel, CoreError> {
    PermitLevel::parse(value.trim())
        .ok_or_else(|| CoreError::Validation(format!("{key} is not a permission level: '{value}'")))
}

/// One revision as it appears on the history page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRecord {
    /// Position in the oldest-first sequence; also the revert index.
    pub sequence_id: RevisionIndex,
    /// Title markup. Never contains raw user markup.
    pub diff_title: String,
    /// Content markup, or `None` when the content is identical to the
    /// predecessor's.
    pub diff_content: Option<String>,
    pub edited_at: Timestamp,
    /// `None` for anonymous authors.
    pub edited_by_handle: Option<String>,
    pub is_current: bool,
}

/// Build display records for `revisions` (oldest first).
///
/// Fails with [`CoreError::NoHistory`] when there is only the live revision,
/// and with [`CoreError::NotFound`] when there are no revisions at all.
/// `handles` maps author ids to display handles; ids missing from the map
/// are shown as anonymous.
pub fn sequence(
    post_id: DbId,
    revisions: &[Revision],
    handles: &HashMap<DbId, String>,
    config: &HistoryConfig,
) -> Result<Vec<DisplayRecord>, CoreError> {
    let Some(last) = revisions.last() else {
        return Err(CoreError::NotFound {
            entity: "post",
            id: post_id,
        });
    };
    if revisions.len() == 1 {
        return Err(CoreError::NoHistory { post_id });
    }

    let handle_of = |rev: &Revision| rev.user_id.and_then(|id| handles.get(&id).cloned());
    let texts: Vec<(String, String)> = revisions
        .iter()
        .map(|rev| {
            (
                config.block_words.apply(&rev.title),
                config.block_words.apply(&rev.content),
            )
        })
        .collect();

    let mut records = Vec::with_capacity(revisions.len());
    let (first_title, first_content) = &texts[0];
    records.push(DisplayRecord {
        sequence_id: 0,
        diff_title: escape_html(first_title.trim()),
        diff_content: Some(escape_html(first_content)),
        // Backfilled once the pass is complete.
        edited_at: revisions[0].updated_at,
        edited_by_handle: None,
        is_current: false,
    });

    // One alignment budget for the whole page, not per pair.
    let deadline = Instant::now().checked_add(config.diff_limits.timeout);
    let max_tokens = config.diff_limits.max_tokens;

    let last_index = revisions.len() - 1;
    for i in 1..revisions.len() {
        let (prev_title, prev_content) = &texts[i - 1];
        let (title, content) = &texts[i];

        let diff_title = if prev_title == title {
            escape_html(title.trim())
        } else {
            diff_or_replace(post_id, i, "title", prev_title, title, max_tokens, deadline)
        };
        let diff_content = if prev_content == content {
            None
        } else {
            Some(diff_or_replace(
                post_id,
                i,
                "content",
                prev_content,
                content,
                max_tokens,
                deadline,
            ))
        };

        let predecessor = &revisions[i - 1];
        records.push(DisplayRecord {
            sequence_id: i,
            diff_title,
            diff_content,
            edited_at: predecessor.updated_at,
            edited_by_handle: handle_of(predecessor),
            is_current: i == last_index,
        });
    }

    records[0].edited_at = last.updated_at;
    records[0].edited_by_handle = handle_of(last);

    Ok(records)
}

/// Reorder sequenced records most-recent-first for display.
pub fn into_display_order(mut records: Vec<DisplayRecord>) -> Vec<DisplayRecord> {
    records.reverse();
    records
}

fn diff_or_replace(
    post_id: DbId,
    index: RevisionIndex,
    field: &'static str,
    old: &str,
    new: &str,
    max_tokens: usize,
    deadline: Option<Instant>,
) -> String {
    if deadline.is_some_and(|d| Instant::now() >= d) {
        tracing::warn!(
            post_id,
            revision = index,
            field,
            "Diff budget exhausted, rendering as full replacement"
        );
        return diff::render_replacement(old, new).trim().to_string();
    }

    let markup = match diff::diff_until(old, new, max_tokens, deadline) {
        Ok(markup) => markup,
        Err(overflow) => {
            tracing::warn!(
                post_id,
                revision = index,
                field,
                tokens = overflow.tokens,
                limit = overflow.limit,
                "Diff input too large, rendering as full replacement"
            );
            diff::render_replacement(old, new)
        }
    };
    markup.trim().to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
