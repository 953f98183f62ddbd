//! Export helpers for CSV and JSON artifacts.

pub mod matches {
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    const HEADER: [&str; 6] = [
        "query_position",
        "query_time",
        "primary_index",
        "primary_time",
        "offset_us",
        "status",
    ];

    /// CSV writer over a file or stdout.
    pub type MatchWriter = csv::Writer<Box<dyn Write>>;

    /// Create a CSV writer for the target path, handling stdout (`-`) by convention.
    pub fn writer_for_path(path: &Path) -> io::Result<MatchWriter> {
        let sink: Box<dyn Write> = if path == Path::new("-") {
            Box::new(BufWriter::new(io::stdout()))
        } else {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            Box::new(BufWriter::new(File::create(path)?))
        };
        Ok(csv::WriterBuilder::new().has_headers(false).from_writer(sink))
    }

    /// Write the standard match CSV header.
    pub fn write_header<W: Write>(writer: &mut csv::Writer<W>) -> csv::Result<()> {
        writer.write_record(HEADER)
    }

    /// Outcome of one query element.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Status {
        Matched,
        Unmatched,
        Failed,
    }

    impl Status {
        pub fn label(self) -> &'static str {
            match self {
                Status::Matched => "matched",
                Status::Unmatched => "unmatched",
                Status::Failed => "failed",
            }
        }
    }

    /// CSV row emitted by the match exporter.
    #[derive(Debug, Clone)]
    pub struct Record<'a> {
        pub query_position: usize,
        pub query_time: &'a str,
        pub primary_index: Option<usize>,
        pub primary_time: Option<&'a str>,
        /// Signed primary minus query offset, in microseconds.
        pub offset_us: Option<f64>,
        pub status: Status,
    }

    impl<'a> Record<'a> {
        /// Serialize the record to CSV, matching the standard header ordering.
        /// Missing values are written as empty fields; text fields are quoted as needed.
        pub fn write_to<W: Write>(&self, writer: &mut csv::Writer<W>) -> csv::Result<()> {
            let position = self.query_position.to_string();
            let index = self.primary_index.map(|i| i.to_string()).unwrap_or_default();
            let offset = self
                .offset_us
                .map(|v| format!("{v:.3}"))
                .unwrap_or_default();
            writer.write_record([
                position.as_str(),
                self.query_time,
                index.as_str(),
                self.primary_time.unwrap_or_default(),
                offset.as_str(),
                self.status.label(),
            ])
        }
    }
}

pub mod summary {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::fs::{self, File};
    use std::io;
    use std::path::Path;

    /// Tallies of a matching run, as written to the JSON sidecar.
    #[derive(Debug, Clone, Serialize)]
    pub struct Tallies {
        pub total: usize,
        pub matched: usize,
        pub unique_matched: usize,
        pub unmatched: usize,
        pub ambiguous: usize,
        pub failed: usize,
    }

    /// Metadata describing the inputs of a matching run.
    #[derive(Debug)]
    pub struct Metadata<'a> {
        pub primary_source: &'a str,
        pub query_source: &'a str,
        pub primary_len: usize,
        pub tolerance_us: f64,
        pub allow_duplicates: bool,
    }

    #[derive(Serialize)]
    struct SummarySidecar<'a> {
        primary_source: &'a str,
        query_source: &'a str,
        primary_len: usize,
        tolerance_us: f64,
        allow_duplicates: bool,
        #[serde(flatten)]
        tallies: &'a Tallies,
    }

    /// Write the JSON summary sidecar for a matching run.
    pub fn write_summary(output: &Path, meta: &Metadata<'_>, tallies: &Tallies) -> io::Result<()> {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let sidecar = SummarySidecar {
            primary_source: meta.primary_source,
            query_source: meta.query_source,
            primary_len: meta.primary_len,
            tolerance_us: meta.tolerance_us,
            allow_duplicates: meta.allow_duplicates,
            tallies,
        };

        to_writer_pretty(File::create(output)?, &sidecar)?;
        Ok(())
    }
}
