use super::{Check, DomainScope, domain_row, intersects};
use crate::wizard::resolver::{DnsLookup, normalize_hostname};
use crate::wizard::types::{RecordType, Row, RowStatus};

pub(crate) struct MxRecordCheck;

impl Check for MxRecordCheck {
    fn priority(&self) -> u32 {
        70
    }

    fn check_domain(&self, resolver: &dyn DnsLookup, scope: &DomainScope<'_>) -> Vec<Row> {
        let targets = resolver.lookup_mx(scope.name);
        let expected = vec![scope.mail_host.to_string()];

        if targets.is_empty() {
            return vec![domain_row(
                RowStatus::Error,
                scope.name,
                RecordType::Mx,
                expected,
                Vec::new(),
                "No MX records found",
            )];
        }

        let host = normalize_hostname(scope.mail_host);
        if targets.iter().any(|target| normalize_hostname(target) == host) {
            return vec![domain_row(
                RowStatus::Ok,
                scope.name,
                RecordType::Mx,
                expected,
                targets,
                "MX points to mail host",
            )];
        }

        // No direct match; an MX target resolving onto an expected address
        // still counts.
        for target in &targets {
            let mut addresses = resolver.lookup_a(target);
            addresses.extend(resolver.lookup_aaaa(target));
            if intersects(&addresses, scope.expected_all) {
                let message = format!(
                    "MX host {} resolves to expected host IPs",
                    normalize_hostname(target)
                );
                return vec![domain_row(
                    RowStatus::Ok,
                    scope.name,
                    RecordType::Mx,
                    expected,
                    targets.clone(),
                    message,
                )];
            }
        }

        vec![domain_row(
            RowStatus::Error,
            scope.name,
            RecordType::Mx,
            expected,
            targets,
            "No MX record points to the mail host",
        )]
    }
}
