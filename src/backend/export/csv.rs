//! RFC 4180 CSV formatting
//!
//! Rows end in CRLF. A field is quoted when it contains a comma, a double
//! quote, CR or LF; quotes inside a quoted field are doubled.

use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};

const LINE_END: &str = "\r\n";

/// Quote a field when RFC 4180 requires it
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Builds a CSV document row by row
#[derive(Debug, Clone)]
pub struct CsvWriter {
    columns: usize,
    out: String,
}

impl CsvWriter {
    /// Start a document with its header row
    pub fn new(headers: &[&str]) -> Self {
        let mut writer = Self {
            columns: headers.len(),
            out: String::new(),
        };
        writer.push_line(headers.iter().copied());
        writer
    }

    /// Append a data row
    ///
    /// Short rows are padded with empty fields so every line has as many
    /// fields as the header.
    pub fn row<I, S>(&mut self, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fields: Vec<String> = fields.into_iter().map(|f| f.as_ref().to_string()).collect();
        if fields.len() < self.columns {
            fields.resize(self.columns, String::new());
        }
        self.push_line(fields.iter().map(String::as_str));
    }

    fn push_line<'a>(&mut self, fields: impl Iterator<Item = &'a str>) {
        let line: Vec<String> = fields.map(escape_field).collect();
        self.out.push_str(&line.join(","));
        self.out.push_str(LINE_END);
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// A finished CSV document served as a download
#[derive(Debug, Clone)]
pub struct CsvFile {
    pub filename: String,
    pub body: String,
}

impl CsvFile {
    pub fn new(filename: impl Into<String>, body: String) -> Self {
        Self {
            filename: filename.into(),
            body,
        }
    }
}

impl IntoResponse for CsvFile {
    fn into_response(self) -> Response {
        let disposition = format!("attachment; filename=\"{}\"", self.filename);
        let disposition = HeaderValue::from_str(&disposition)
            .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

        (
            [
                (header::CONTENT_TYPE, HeaderValue::from_static("text/csv; charset=utf-8")),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.body,
        )
            .into_response()
    }
}
