use crate::{Error, Result};
use orgpop_types::RawEvent;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static HEADING_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\*+\s+(.*)").unwrap());

static TIMESTAMP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(\d{4})-(\d{2})-(\d{2})[^>]*>").unwrap());

static TRAILING_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+\S+$").unwrap());

/// Heading state for a single file's scan.
///
/// A fresh value is built per file; heading text never leaks across file
/// boundaries.
#[derive(Debug, Default)]
struct HeadingContext {
    current: String,
}

impl HeadingContext {
    /// Update the current heading if `line` is a heading line.
    ///
    /// Tag stripping is best-effort: it removes at most the last
    /// whitespace-delimited token, so a lone-word heading survives intact
    /// and a trailing `:tag:` run loses only its final token.
    fn observe(&mut self, line: &str) {
        if let Some(caps) = HEADING_REGEX.captures(line) {
            let heading = caps.get(1).map_or("", |m| m.as_str());
            self.current = TRAILING_TAG_REGEX.replace(heading, "").into_owned();
        }
    }
}

/// Parse the first bracketed timestamp on a line, if any.
///
/// Everything between the day of month and the closing bracket (weekday,
/// time of day, repeater) is ignored. Only the first match on a line is
/// recognized.
fn parse_timestamp(line: &str) -> Option<(i32, u32, u32)> {
    let caps = TIMESTAMP_REGEX.captures(line)?;
    let year = caps.get(1)?.as_str().parse().ok()?;
    let month = caps.get(2)?.as_str().parse().ok()?;
    let day = caps.get(3)?.as_str().parse().ok()?;
    Some((year, month, day))
}

/// Scan lines in file order and collect every recognized event.
///
/// The heading and timestamp checks are independent: a line may update the
/// heading context, emit an event under the current heading, or both.
pub fn extract_lines<'a, I>(lines: I) -> Vec<RawEvent>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut context = HeadingContext::default();
    let mut events = Vec::new();

    for line in lines {
        context.observe(line);
        if let Some((year, month, day)) = parse_timestamp(line)
            && let Some(event) = RawEvent::new(year, month, day, context.current.clone())
        {
            events.push(event);
        }
    }

    events
}

/// Read and scan one outline file.
pub fn extract_file(path: &Path) -> Result<Vec<RawEvent>> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(extract_lines(text.lines()))
}
