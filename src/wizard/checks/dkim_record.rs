use super::{Check, DomainScope, domain_row};
use crate::wizard::resolver::DnsLookup;
use crate::wizard::types::{RecordType, Row, RowStatus};

/// Delegates to the DKIM status service instead of querying DNS itself.
/// Domains without DKIM enabled are skipped entirely; the service is never
/// consulted for them.
pub(crate) struct DkimRecordCheck;

impl Check for DkimRecordCheck {
    fn priority(&self) -> u32 {
        50
    }

    fn check_domain(&self, resolver: &dyn DnsLookup, scope: &DomainScope<'_>) -> Vec<Row> {
        if !scope.domain.dkim_enabled() {
            return Vec::new();
        }

        let status = scope.dkim.dkim_status(resolver, scope.domain);
        let subject = format!("{}._domainkey.{}", scope.domain.dkim_selector(), scope.name);
        let expected = vec!["Valid DKIM record".to_string()];

        let row = if !status.record_found {
            domain_row(
                RowStatus::Error,
                subject,
                RecordType::Txt,
                expected,
                vec![String::new()],
                "DKIM record missing or empty",
            )
        } else if !status.record_valid {
            domain_row(
                RowStatus::Error,
                subject,
                RecordType::Txt,
                expected,
                vec![status.current_record],
                "DKIM record mismatch",
            )
        } else {
            domain_row(
                RowStatus::Ok,
                subject,
                RecordType::Txt,
                expected,
                vec![status.current_record],
                "DKIM record valid",
            )
        };
        vec![row]
    }
}
