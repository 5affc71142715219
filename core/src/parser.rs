//! Turns the raw corpus into posts.
//!
//! The corpus is a strict sequence of line triplets:
//!
//! ```text
//! New feature X
//! Posted On: Jan 2, 2006
//! Launches today
//! ```
//!
//! Record boundaries are purely positional; no line is skipped or reordered.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use time::macros::format_description;
use time::{Date, OffsetDateTime};
use tracing::warn;

use crate::{Post, RecapError, Result, ZERO_DATE};

/// Label in front of the date on the second line of every record.
pub const DATE_LABEL: &str = "Posted On: ";

/// Parses a date line such as `Posted On: Jan 2, 2006` into midnight UTC of that day.
/// A line without the label is parsed as-is.
pub fn parse_posted_on(line: &str) -> Result<OffsetDateTime> {
    let raw = line.strip_prefix(DATE_LABEL).unwrap_or(line);
    let format = format_description!("[month repr:short] [day padding:none], [year]");
    let date = Date::parse(raw, &format)
        .map_err(|source| RecapError::Parse { input: raw.to_string(), source })?;
    Ok(date.midnight().assume_utc())
}

/// Incremental record parser. Feed lines in order; every third line completes a post.
#[derive(Debug, Default)]
pub struct RecordParser {
    current: Post,
    line_index: usize,
}

impl RecordParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, line: &str) -> Option<Post> {
        match self.line_index % 3 {
            0 => self.current.title = line.to_string(),
            1 => {
                self.current.date = parse_posted_on(line).unwrap_or_else(|err| {
                    warn!(line = self.line_index + 1, %err, "failed to parse post date");
                    ZERO_DATE
                })
            }
            _ => self.current.description = line.to_string(),
        }
        self.line_index += 1;
        if self.line_index % 3 == 0 {
            Some(std::mem::take(&mut self.current))
        } else {
            None
        }
    }

    /// Flushes a trailing partial record, if any.
    ///
    /// The partial record keeps its date and description but loses its title, which turns it
    /// into a sentinel that the store and the index skip.
    pub fn finish(self) -> Option<Post> {
        if self.line_index % 3 == 0 {
            return None;
        }
        let mut partial = self.current;
        warn!(title = %partial.title, lines = self.line_index % 3, "dropping truncated trailing record");
        partial.title.clear();
        Some(partial)
    }
}

/// Parses an in-memory sequence of lines.
pub fn parse_lines<I, S>(lines: I) -> Vec<Post>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = RecordParser::new();
    let mut posts: Vec<Post> = lines
        .into_iter()
        .filter_map(|line| parser.push_line(line.as_ref()))
        .collect();
    posts.extend(parser.finish());
    posts
}

pub fn parse_reader<R: BufRead>(reader: R) -> Result<Vec<Post>> {
    let mut parser = RecordParser::new();
    let mut posts = Vec::new();
    for line in reader.lines() {
        if let Some(post) = parser.push_line(&line?) {
            posts.push(post);
        }
    }
    posts.extend(parser.finish());
    Ok(posts)
}

pub fn read_corpus(path: &Path) -> Result<Vec<Post>> {
    let f = File::open(path)?;
    parse_reader(BufReader::new(f))
}
