use super::{Check, DomainScope, domain_row, starts_with_ignore_ascii_case};
use crate::wizard::resolver::DnsLookup;
use crate::wizard::types::{RecordType, Row, RowStatus};

pub(crate) struct SpfRecordCheck;

impl Check for SpfRecordCheck {
    fn priority(&self) -> u32 {
        60
    }

    fn check_domain(&self, resolver: &dyn DnsLookup, scope: &DomainScope<'_>) -> Vec<Row> {
        let records = resolver.lookup_txt(scope.name);
        let matching: Vec<String> = records
            .iter()
            .map(|record| record.trim())
            .filter(|record| starts_with_ignore_ascii_case(record, "v=spf1"))
            .map(str::to_string)
            .collect();

        let expected = vec!["v=spf1 ...".to_string()];
        let row = if matching.is_empty() {
            domain_row(
                RowStatus::Error,
                scope.name,
                RecordType::Txt,
                expected,
                records,
                "No valid SPF policy found",
            )
        } else {
            domain_row(
                RowStatus::Ok,
                scope.name,
                RecordType::Txt,
                expected,
                matching,
                "SPF policy found",
            )
        };
        vec![row]
    }
}
