use csv::StringRecord;

use crate::import::model::FatalInputError;

/// Cheap up-front check of the fatal input conditions, for paths that need
/// the verdict without materializing a full table (e.g. the escalation
/// controller before a registry miss).
pub fn ensure_parseable(content: &str) -> Result<(), FatalInputError> {
    let line_count = content.lines().filter(|l| !l.trim().is_empty()).count();
    if line_count < 2 {
        return Err(FatalInputError::TooFewLines(line_count));
    }
    let header_line = content
        .lines()
        .find(|l| !l.trim().is_empty())
        .unwrap_or("");
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(header_line.as_bytes());
    match rdr.records().next() {
        Some(Ok(rec)) if rec.len() >= 2 => Ok(()),
        _ => Err(FatalInputError::UnsplittableHeader),
    }
}

/// An in-memory view of one CSV export: trimmed headers plus data records.
/// Per-record csv errors are collected rather than aborting the file.
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    lower_headers: Vec<String>,
    records: Vec<StringRecord>,
    record_errors: Vec<(usize, String)>,
}

impl Table {
    pub fn parse(content: &str) -> Result<Table, FatalInputError> {
        ensure_parseable(content)?;

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let headers: Vec<String> = rdr
            .headers()
            .map_err(|_| FatalInputError::UnsplittableHeader)?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        if headers.len() < 2 {
            return Err(FatalInputError::UnsplittableHeader);
        }
        let lower_headers = headers.iter().map(|h| h.to_lowercase()).collect();

        let mut records = Vec::new();
        let mut record_errors = Vec::new();
        for (i, record_res) in rdr.records().enumerate() {
            // Header counts as the first row, so data starts at 2.
            let row_num = i + 2;
            match record_res {
                Ok(r) => records.push(r),
                Err(e) => record_errors.push((row_num, format!("{e}"))),
            }
        }

        Ok(Table {
            headers,
            lower_headers,
            records,
            record_errors,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Index of the first alias present in the header, compared
    /// case-insensitively against trimmed header cells.
    pub fn col(&self, aliases: &[&str]) -> Option<usize> {
        for alias in aliases {
            if let Some(i) =
                self.lower_headers.iter().position(|h| h.as_str() == *alias)
            {
                return Some(i);
            }
        }
        None
    }

    pub fn data_row_count(&self) -> usize {
        self.records.len() + self.record_errors.len()
    }

    pub fn record_errors(&self) -> &[(usize, String)] {
        &self.record_errors
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.records.iter().enumerate().map(move |(i, record)| Row {
            table: self,
            record,
            row_num: i + 2,
        })
    }
}

/// One data row, addressed through resolved column indices.
pub struct Row<'t> {
    table: &'t Table,
    record: &'t StringRecord,
    row_num: usize,
}

impl<'t> Row<'t> {
    pub fn row_num(&self) -> usize {
        self.row_num
    }

    /// Cell at the resolved column, or "" when the column is absent or the
    /// row is short.
    pub fn get(&self, col: Option<usize>) -> &'t str {
        col.and_then(|i| self.record.get(i)).unwrap_or("").trim()
    }

    /// (header, cell) pairs for fingerprinting. Short rows yield "" cells.
    pub fn pairs(&self) -> Vec<(&'t str, &'t str)> {
        self.table
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.as_str(), self.record.get(i).unwrap_or("").trim()))
            .collect()
    }
}
