//! Row batches in JSON Lines format, from disk or over HTTP.
//!
//! Each non-blank line is one dataset row (see [`SourceRow`]).

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};

use reqwest::blocking::Response;

use crate::config::is_remote;
use crate::error::{HarvesterError, Result};
use crate::http::{create_client, open};
use crate::types::SourceRow;

/// Short display name of a batch input (last path or URL segment).
///
/// # Examples
/// ```
/// use ruslaw_harvester::source::batch_name;
///
/// assert_eq!(batch_name("https://example.org/data/ruslawod_01.jsonl"), "ruslawod_01.jsonl");
/// assert_eq!(batch_name("batches/ruslawod_02.jsonl"), "ruslawod_02.jsonl");
/// ```
#[must_use]
pub fn batch_name(input: &str) -> &str {
    input
        .trim_end_matches('/')
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(input)
}

/// Decode one line as UTF-8, borrowing it when it is valid.
///
/// Invalid sequences are replaced with U+FFFD and logged.
fn decode_line<'a>(bytes: &'a [u8], batch: &str, line: usize) -> Cow<'a, str> {
    let text = String::from_utf8_lossy(bytes);
    if let Cow::Owned(_) = text {
        tracing::warn!(batch, line, "Invalid UTF-8 replaced in row");
    }
    text
}

/// Read JSON Lines rows from `reader`, one line at a time.
///
/// Blank lines are skipped. The first malformed line aborts the batch with
/// its 1-based line number.
pub fn read_batch<R: BufRead>(mut reader: R, batch: &str) -> Result<Vec<SourceRow>> {
    let mut rows = Vec::new();
    let mut buf = Vec::new();
    let mut line = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line += 1;

        let text = decode_line(&buf, batch, line);
        if text.trim().is_empty() {
            continue;
        }
        let row = serde_json::from_str::<SourceRow>(&text).map_err(|source| {
            HarvesterError::InvalidRow {
                batch: batch.to_string(),
                line,
                source,
            }
        })?;
        rows.push(row);
    }

    Ok(rows)
}

/// Parse JSON Lines text already in memory.
pub fn parse_batch(text: &str, batch: &str) -> Result<Vec<SourceRow>> {
    read_batch(text.as_bytes(), batch)
}

/// Open a remote batch for streaming.
pub fn open_remote(url: &str) -> Result<Response> {
    let client = create_client()?;
    open(&client, url).map_err(|e| match e {
        HarvesterError::Http(source) => HarvesterError::BatchDownload {
            url: url.to_string(),
            source,
        },
        other => other,
    })
}

/// Load all rows of a batch from a local path or an HTTP(S) URL.
pub fn load_batch(input: &str) -> Result<Vec<SourceRow>> {
    let batch = batch_name(input);
    let rows = if is_remote(input) {
        tracing::info!(url = input, "Downloading batch");
        read_batch(BufReader::new(open_remote(input)?), batch)?
    } else {
        read_batch(BufReader::new(File::open(input)?), batch)?
    };

    tracing::info!(batch, rows = rows.len(), "Loaded batch");
    Ok(rows)
}
