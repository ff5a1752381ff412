//! Word-level text diff rendered as inline `<ins>` / `<del>` markup.
//!
//! Text is split into word, whitespace and punctuation tokens, aligned with
//! a longest-common-subsequence style diff, and rendered against the new
//! text: matched tokens stay plain, removed tokens are wrapped in `<del>`,
//! added tokens in `<ins>`. All text is HTML-escaped before it is wrapped,
//! so the only markup in the output is the markup added here.

use std::time::{Duration, Instant};

use serde::Serialize;
use similar::{Algorithm, DiffTag};

/// Maximum number of tokens on either side before the diff is refused.
pub const DEFAULT_MAX_TOKENS: usize = 10_000;

/// Wall-clock budget for a single alignment.
pub const DEFAULT_DIFF_TIMEOUT: Duration = Duration::from_secs(1);

// ---------------------------------------------------------------------------
// Limits and errors
// ---------------------------------------------------------------------------

/// Bounds on the work a single diff may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffLimits {
    /// Token cap applied to each side independently.
    pub max_tokens: usize,
    /// Past this deadline the alignment settles for a coarser result.
    pub timeout: Duration,
}

impl Default for DiffLimits {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: DEFAULT_DIFF_TIMEOUT,
        }
    }
}

/// Returned when an input is too large to align within [`DiffLimits`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Diff input has {tokens} tokens, limit is {limit}")]
pub struct DiffOverflow {
    pub tokens: usize,
    pub limit: usize,
}

// ---------------------------------------------------------------------------
// Segments
// ---------------------------------------------------------------------------

/// The status of a run of text in a diff.
///
/// - `Added`     -- present only in the new text.
/// - `Removed`   -- present only in the old text.
/// - `Unchanged` -- present in both, in the same relative order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffStatus {
    Added,
    Removed,
    Unchanged,
}

/// A maximal run of raw (unescaped) text sharing one [`DiffStatus`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffSegment {
    pub status: DiffStatus,
    pub text: String,
}

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Word,
    Space,
    Punct,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_alphanumeric() || c == '_' {
            Self::Word
        } else if c.is_whitespace() {
            Self::Space
        } else {
            Self::Punct
        }
    }
}

/// Split `text` into diff tokens.
///
/// Runs of word characters and runs of whitespace form single tokens; every
/// other character is a token of its own. Concatenating the tokens always
/// reproduces `text`.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut prev: Option<CharClass> = None;

    for (idx, c) in text.char_indices() {
        let class = CharClass::of(c);
        if let Some(prev) = prev {
            if prev != class || class == CharClass::Punct {
                tokens.push(&text[start..idx]);
                start = idx;
            }
        }
        prev = Some(class);
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

// ---------------------------------------------------------------------------
// Alignment
// ---------------------------------------------------------------------------

/// Align `old` against `new` and return the typed segments.
///
/// Segments appear in new-text order with removals placed where they were
/// cut. Within a replaced region the removal comes first.
pub fn diff_segments(
    old: &str,
    new: &str,
    limits: &DiffLimits,
) -> Result<Vec<DiffSegment>, DiffOverflow> {
    let deadline = Instant::now().checked_add(limits.timeout);
    diff_segments_until(old, new, limits.max_tokens, deadline)
}

/// Like [`diff_segments`], but against an absolute deadline.
///
/// Once `deadline` passes the alignment stops refining and reports the
/// remaining differences as coarse removals and additions. The result is
/// still a valid diff of the two inputs.
pub fn diff_segments_until(
    old: &str,
    new: &str,
    max_tokens: usize,
    deadline: Option<Instant>,
) -> Result<Vec<DiffSegment>, DiffOverflow> {
    let old_tokens = tokenize(old);
    let new_tokens = tokenize(new);

    let tokens = old_tokens.len().max(new_tokens.len());
    if tokens > max_tokens {
        return Err(DiffOverflow {
            tokens,
            limit: max_tokens,
        });
    }

    let ops = similar::capture_diff_slices_deadline(
        Algorithm::Myers,
        &old_tokens,
        &new_tokens,
        deadline,
    );

    let mut segments: Vec<DiffSegment> = Vec::with_capacity(ops.len());
    for op in ops {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => push_segment(
                &mut segments,
                DiffStatus::Unchanged,
                &new_tokens[new_range],
            ),
            DiffTag::Delete => {
                push_segment(&mut segments, DiffStatus::Removed, &old_tokens[old_range])
            }
            DiffTag::Insert => {
                push_segment(&mut segments, DiffStatus::Added, &new_tokens[new_range])
            }
            DiffTag::Replace => {
                push_segment(&mut segments, DiffStatus::Removed, &old_tokens[old_range]);
                push_segment(&mut segments, DiffStatus::Added, &new_tokens[new_range]);
            }
        }
    }
    Ok(segments)
}

/// Append tokens to the last segment when the status matches.
fn push_segment(segments: &mut Vec<DiffSegment>, status: DiffStatus, tokens: &[&str]) {
    if tokens.iter().all(|t| t.is_empty()) {
        return;
    }
    match segments.last_mut() {
        Some(last) if last.status == status => last.text.extend(tokens.iter().copied()),
        _ => segments.push(DiffSegment {
            status,
            text: tokens.concat(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Diff `old` against `new` and render inline markup.
pub fn diff(old: &str, new: &str, limits: &DiffLimits) -> Result<String, DiffOverflow> {
    diff_segments(old, new, limits).map(|segments| render_segments(&segments))
}

/// Diff against an absolute deadline and render inline markup.
pub fn diff_until(
    old: &str,
    new: &str,
    max_tokens: usize,
    deadline: Option<Instant>,
) -> Result<String, DiffOverflow> {
    diff_segments_until(old, new, max_tokens, deadline).map(|segments| render_segments(&segments))
}

/// Render segments as escaped text with `<ins>` / `<del>` spans.
pub fn render_segments(segments: &[DiffSegment]) -> String {
    let mut out = String::new();
    for segment in segments {
        let text = escape_html(&segment.text);
        match segment.status {
            DiffStatus::Unchanged => out.push_str(&text),
            DiffStatus::Removed => {
                out.push_str("<del>");
                out.push_str(&text);
                out.push_str("</del>");
            }
            DiffStatus::Added => {
                out.push_str("<ins>");
                out.push_str(&text);
                out.push_str("</ins>");
            }
        }
    }
    out
}

/// Render `old` as wholly removed and `new` as wholly added.
///
/// Used in place of [`diff`] when the inputs exceed the limits.
pub fn render_replacement(old: &str, new: &str) -> String {
    let mut segments = Vec::with_capacity(2);
    push_segment(&mut segments, DiffStatus::Removed, &[old]);
    push_segment(&mut segments, DiffStatus::Added, &[new]);
    render_segments(&segments)
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
