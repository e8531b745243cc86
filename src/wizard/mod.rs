//! DNS posture validation for a mail host and its domains.
//!
//! The public entry point is [`validate`], which runs every registered check
//! against the mail host and each domain using the system resolver, and
//! returns a [`Report`] of ordered [`Row`] findings. [`validate_with`] is the
//! injection seam for callers supplying their own resolver or DKIM status
//! source.

mod checks;
mod dkim;
mod error;
mod resolver;
mod types;

pub use dkim::{DkimStatus, DkimStatusLookup, DnsDkimStatus};
pub use error::WizardError;
pub use resolver::{DnsLookup, SrvRecord, SystemResolver};
pub use types::{
    Domain, ExpectedHostIps, RecordType, Report, ReportSummary, Row, RowScope, RowStatus,
};

use checks::{DomainScope, HostScope, registered_checks};
use resolver::{normalize_domain, normalize_mail_host};

/// Validate `mail_host` and `domains` against `expected` using the system
/// resolver and the DNS-backed DKIM status source.
pub fn validate(
    mail_host: &str,
    expected: &ExpectedHostIps,
    domains: &[Domain],
) -> Result<Report, WizardError> {
    let resolver = SystemResolver::from_system_conf()?;
    validate_with(&resolver, &DnsDkimStatus, mail_host, expected, domains)
}

/// Validate with injected collaborators.
///
/// Mail-host rows come first, then one group per domain in input order. Each
/// group is sorted by check priority descending; ties keep registration
/// order. The ordering is imposed here, never by lookup completion order.
pub fn validate_with<R>(
    resolver: &R,
    dkim: &dyn DkimStatusLookup,
    mail_host: &str,
    expected: &ExpectedHostIps,
    domains: &[Domain],
) -> Result<Report, WizardError>
where
    R: DnsLookup,
{
    let host = normalize_mail_host(mail_host)?;
    let expected_all = expected.union();
    let checks = registered_checks();

    let mut rows = Vec::new();

    let host_scope = HostScope {
        mail_host: &host,
        expected,
        expected_all: &expected_all,
    };
    let mut group = Vec::new();
    for check in &checks {
        for row in check.check_mail_host(resolver, &host_scope) {
            group.push((check.priority(), row));
        }
    }
    append_sorted(&mut rows, group);

    for domain in domains {
        let name = normalize_domain(domain.name())?;
        let domain_scope = DomainScope {
            mail_host: &host,
            name: &name,
            domain,
            expected_all: &expected_all,
            dkim,
        };
        let mut group = Vec::new();
        for check in &checks {
            for row in check.check_domain(resolver, &domain_scope) {
                group.push((check.priority(), row));
            }
        }
        append_sorted(&mut rows, group);
    }

    let summary = ReportSummary::from_rows(&rows);
    Ok(Report {
        mail_host: host,
        rows,
        summary,
    })
}

fn append_sorted(rows: &mut Vec<Row>, mut group: Vec<(u32, Row)>) {
    // Stable: equal priorities keep registration order.
    group.sort_by(|a, b| b.0.cmp(&a.0));
    rows.extend(group.into_iter().map(|(_, row)| row));
}
