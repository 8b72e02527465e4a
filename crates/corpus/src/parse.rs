//! Line-oriented parsers for the corpus files.
//!
//! The vector and word parsers keep one slot per physical line (`None` for a
//! blank line) so [`pair_records`] can join the two files by line number.

use crate::error::CorpusError;
use crate::types::CorpusEntry;

/// Parse one comma-separated vector. `line_no` is 1-based and only used for errors.
pub fn parse_vector_line(line: &str, line_no: usize) -> Result<Vec<f64>, CorpusError> {
    let trimmed = line.trim();
    // Tolerate a single trailing comma from CSV writers.
    let trimmed = trimmed.strip_suffix(',').unwrap_or(trimmed);
    if trimmed.is_empty() {
        return Err(CorpusError::parse(line_no, "empty vector"));
    }
    trimmed
        .split(',')
        .map(|field| parse_component(field, line_no))
        .collect()
}

fn parse_component(field: &str, line_no: usize) -> Result<f64, CorpusError> {
    let field = field.trim();
    if field.is_empty() {
        return Err(CorpusError::parse(line_no, "empty vector component"));
    }
    let value: f64 = field
        .parse()
        .map_err(|_| CorpusError::parse(line_no, format!("expected a number, got `{field}`")))?;
    if !value.is_finite() {
        return Err(CorpusError::parse(
            line_no,
            format!("non-finite vector component `{field}`"),
        ));
    }
    Ok(value)
}

/// Parse the numeric vector file. Blank lines become `None`.
pub fn parse_vectors(text: &str) -> Result<Vec<Option<Vec<f64>>>, CorpusError> {
    strip_bom(text)
        .lines()
        .enumerate()
        .map(|(i, line)| {
            if line.trim().is_empty() {
                Ok(None)
            } else {
                parse_vector_line(line, i + 1).map(Some)
            }
        })
        .collect()
}

/// Parse the word file. Words are trimmed; blank lines become `None`.
pub fn parse_words(text: &str) -> Vec<Option<String>> {
    strip_bom(text)
        .lines()
        .map(|line| {
            let word = line.trim();
            (!word.is_empty()).then(|| word.to_string())
        })
        .collect()
}

/// Parse the single-file `word,v1,v2,...` layout. Blank lines are skipped.
pub fn parse_combined(text: &str) -> Result<Vec<CorpusEntry>, CorpusError> {
    let mut entries = Vec::new();
    for (i, line) in strip_bom(text).lines().enumerate() {
        let line_no = i + 1;
        if line.trim().is_empty() {
            continue;
        }
        let (label, rest) = line
            .split_once(',')
            .ok_or_else(|| CorpusError::parse(line_no, "record has a label but no vector"))?;
        let word = label.trim();
        if word.is_empty() {
            return Err(CorpusError::parse(line_no, "record has an empty label"));
        }
        let vector = parse_vector_line(rest, line_no)?;
        entries.push(CorpusEntry {
            index: entries.len(),
            word: word.to_string(),
            vector,
        });
    }
    Ok(entries)
}

/// Join vector line N with word line N.
///
/// Trailing blank lines in either file are ignored. A line blank in both files
/// is dropped and the following entries are renumbered; a line blank in only one
/// file, or differing record counts, is an [`CorpusError::Alignment`].
pub fn pair_records(
    mut vectors: Vec<Option<Vec<f64>>>,
    mut words: Vec<Option<String>>,
) -> Result<Vec<CorpusEntry>, CorpusError> {
    trim_trailing_blanks(&mut vectors);
    trim_trailing_blanks(&mut words);

    if vectors.len() != words.len() {
        return Err(CorpusError::Alignment(format!(
            "{} vector lines but {} word lines",
            vectors.len(),
            words.len()
        )));
    }

    let mut entries = Vec::with_capacity(vectors.len());
    for (i, (vector, word)) in vectors.into_iter().zip(words).enumerate() {
        match (vector, word) {
            (Some(vector), Some(word)) => entries.push(CorpusEntry {
                index: entries.len(),
                word,
                vector,
            }),
            (None, None) => continue,
            (Some(_), None) => {
                return Err(CorpusError::Alignment(format!(
                    "line {} has a vector but no word",
                    i + 1
                )))
            }
            (None, Some(word)) => {
                return Err(CorpusError::Alignment(format!(
                    "line {} has word `{word}` but no vector",
                    i + 1
                )))
            }
        }
    }
    Ok(entries)
}

fn trim_trailing_blanks<T>(lines: &mut Vec<Option<T>>) {
    while matches!(lines.last(), Some(None)) {
        lines.pop();
    }
}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}
