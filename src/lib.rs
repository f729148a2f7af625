pub mod config;
pub mod error;
pub mod records;
pub mod report;

pub use config::Config;
pub use error::{Result, TopupError};
pub use records::{load_companies, load_users, Amount, CompanyId, CompanyRecord, UserRecord};
pub use report::{build_report, render_text, Report, ReportBuilder, ReportFormat};
