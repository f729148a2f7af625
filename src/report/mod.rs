mod builder;
mod section;

pub use builder::{build_report, ReportBuilder};
pub use section::{CompanySection, CompanySummary, UserEntry};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Output encoding of a generated report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Complete top-up report, ordered by company id
#[derive(Debug, Serialize)]
pub struct Report {
    pub companies: Vec<CompanySection>,
}

impl Report {
    pub fn lines(&self) -> Vec<String> {
        self.companies.iter().flat_map(CompanySection::lines).collect()
    }

    pub fn summaries(&self) -> Vec<CompanySummary> {
        self.companies.iter().map(CompanySection::summary).collect()
    }

    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Text => Ok(render_text(&self.lines())),
            ReportFormat::Json => {
                let mut out = serde_json::to_string_pretty(self)?;
                out.push('\n');
                Ok(out)
            }
        }
    }
}

/// Join report lines, terminating each with a newline.
pub fn render_text(lines: &[String]) -> String {
    let mut out = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}
