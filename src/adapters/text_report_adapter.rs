//! Plain-text report adapter.

use crate::domain::error::BacksimError;
use crate::domain::summary::Summary;
use crate::ports::report_port::ReportPort;
use std::fs;
use std::path::PathBuf;

/// Writes the summary as plain text, either to a file or to stdout.
pub struct TextReportAdapter {
    output: Option<PathBuf>,
}

impl TextReportAdapter {
    pub fn to_stdout() -> Self {
        Self { output: None }
    }

    pub fn to_file(path: PathBuf) -> Self {
        Self { output: Some(path) }
    }
}

impl ReportPort for TextReportAdapter {
    fn write(&self, summary: &Summary) -> Result<(), BacksimError> {
        match &self.output {
            Some(path) => {
                fs::write(path, format!("{summary}\n"))?;
            }
            None => println!("{summary}"),
        }
        Ok(())
    }
}
