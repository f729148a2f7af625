use std::collections::{HashMap, HashSet};

use crate::records::{CompanyId, CompanyRecord, JoinKey, UserRecord};

use super::section::{CompanySection, UserEntry};
use super::Report;

/// Joins users to their companies and produces the top-up report.
///
/// Active users are indexed by company id once at construction; each company
/// then looks up its own group instead of scanning every user.
pub struct ReportBuilder<'a> {
    companies: Vec<&'a CompanyRecord>,
    users_by_company: HashMap<JoinKey, Vec<&'a UserRecord>>,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(companies: &'a [CompanyRecord], users: &'a [UserRecord]) -> Self {
        // Stable sort: ties and missing ids keep their input order
        let mut sorted: Vec<&CompanyRecord> = companies.iter().collect();
        sorted.sort_by(|a, b| CompanyId::compare_missing_last(a.id.as_ref(), b.id.as_ref()));

        let mut users_by_company: HashMap<JoinKey, Vec<&UserRecord>> = HashMap::new();
        for user in users.iter().filter(|u| u.active_status()) {
            if let Some(company_id) = &user.company_id {
                users_by_company
                    .entry(company_id.join_key())
                    .or_default()
                    .push(user);
            }
        }
        for group in users_by_company.values_mut() {
            group.sort_by(|a, b| a.sort_name().cmp(b.sort_name()));
        }

        let known: HashSet<JoinKey> = sorted
            .iter()
            .filter_map(|c| c.id.as_ref().map(CompanyId::join_key))
            .collect();
        let orphaned: usize = users_by_company
            .iter()
            .filter(|(key, _)| !known.contains(*key))
            .map(|(_, group)| group.len())
            .sum();
        if orphaned > 0 {
            log::debug!("{orphaned} active user(s) reference no known company");
        }

        Self {
            companies: sorted,
            users_by_company,
        }
    }

    /// Company sections in report order. Companies without an id are dropped.
    pub fn sections(&self) -> Vec<CompanySection> {
        self.companies
            .iter()
            .filter_map(|company| match &company.id {
                Some(id) => Some(self.section(company, id)),
                None => {
                    log::debug!("Skipping company '{}': no id", company.name());
                    None
                }
            })
            .collect()
    }

    pub fn report(&self) -> Report {
        Report {
            companies: self.sections(),
        }
    }

    /// Report text, one entry per output line.
    pub fn build(&self) -> Vec<String> {
        self.report().lines()
    }

    fn section(&self, company: &CompanyRecord, id: &CompanyId) -> CompanySection {
        let top_up = company.top_up();
        let mut section = CompanySection {
            id: id.clone(),
            name: company.name().to_string(),
            users_emailed: Vec::new(),
            users_not_emailed: Vec::new(),
            total_top_up: Default::default(),
        };

        let users = self
            .users_by_company
            .get(&id.join_key())
            .map(Vec::as_slice)
            .unwrap_or_default();

        for user in users {
            let entry = UserEntry::new(user, top_up);
            if user.email_status() && company.email_status() {
                section.users_emailed.push(entry);
            } else {
                section.users_not_emailed.push(entry);
            }
            section.total_top_up += top_up;
        }

        section
    }
}

/// Build the report lines for `companies` and `users`.
pub fn build_report(companies: &[CompanyRecord], users: &[UserRecord]) -> Vec<String> {
    ReportBuilder::new(companies, users).build()
}
