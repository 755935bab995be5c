//! Delimited text decoding.

use std::collections::BTreeMap;

use crate::error::{IngestError, IngestResult};
use crate::models::{Cell, Row, RowTable};

const DELIMITERS: [u8; 4] = [b';', b',', b'\t', b'|'];

/// Decodes CSV bytes into rows of text cells.
///
/// Records may have different lengths; the caller pads them.
pub(super) fn decode_csv(bytes: &[u8]) -> IngestResult<RowTable> {
    let content = decode_text(bytes);
    let delimiter = sniff_delimiter(&content);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    reader
        .records()
        .map(|record| {
            record
                .map(|record| record.iter().map(field_to_cell).collect::<Row>())
                .map_err(|e| IngestError::ParsingFailed {
                    message: e.to_string(),
                })
        })
        .collect()
}

/// Reads the bytes as UTF-8, falling back to Windows-1252.
///
/// A leading byte-order mark is dropped.
pub(super) fn decode_text(bytes: &[u8]) -> String {
    match String::from_utf8(bytes.to_vec()) {
        Ok(text) => match text.strip_prefix('\u{feff}') {
            Some(stripped) => stripped.to_string(),
            None => text,
        },
        Err(e) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(e.as_bytes());
            decoded.into_owned()
        }
    }
}

/// Lines sampled when sniffing the delimiter.
const SNIFF_LINES: usize = 10;

/// Picks the delimiter that splits the opening lines most consistently.
///
/// Each candidate counts fields on the first non-blank lines. Its score is the
/// best `field count * lines with that count` over counts above one, so a title
/// line without separators does not decide the outcome. Ties go to the earlier
/// candidate (`;`, `,`, tab, `|`); with no candidate splitting any line, `,` is
/// used.
pub(super) fn sniff_delimiter(content: &str) -> u8 {
    let sample: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(SNIFF_LINES)
        .collect();

    let mut best = b',';
    let mut best_score = 0;

    for delimiter in DELIMITERS {
        let mut frequency: BTreeMap<usize, usize> = BTreeMap::new();
        for line in &sample {
            let fields = count_fields(line, delimiter);
            if fields > 1 {
                *frequency.entry(fields).or_default() += 1;
            }
        }

        let score = frequency
            .iter()
            .map(|(fields, lines)| fields * lines)
            .max()
            .unwrap_or(0);

        if score > best_score {
            best = delimiter;
            best_score = score;
        }
    }

    best
}

fn count_fields(line: &str, delimiter: u8) -> usize {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes())
        .records()
        .next()
        .and_then(|record| record.ok())
        .map_or(1, |record| record.len())
}

fn field_to_cell(field: &str) -> Cell {
    if field.trim().is_empty() {
        Cell::Empty
    } else {
        Cell::Text(field.to_string())
    }
}
