use super::{Check, DomainScope, domain_row, starts_with_ignore_ascii_case};
use crate::wizard::resolver::{DnsLookup, fqdn};
use crate::wizard::types::{RecordType, Row, RowStatus};

pub(crate) struct DmarcRecordCheck;

impl Check for DmarcRecordCheck {
    fn priority(&self) -> u32 {
        40
    }

    fn check_domain(&self, resolver: &dyn DnsLookup, scope: &DomainScope<'_>) -> Vec<Row> {
        let name = fqdn("_dmarc", scope.name);
        let records = resolver.lookup_txt(&name);
        let matching: Vec<String> = records
            .iter()
            .map(|record| record.trim())
            .filter(|record| starts_with_ignore_ascii_case(record, "v=dmarc1"))
            .map(str::to_string)
            .collect();

        let expected = vec!["v=DMARC1 ...".to_string()];
        let row = if matching.is_empty() {
            domain_row(
                RowStatus::Error,
                name,
                RecordType::Txt,
                expected,
                records,
                "DMARC policy missing",
            )
        } else {
            domain_row(
                RowStatus::Ok,
                name,
                RecordType::Txt,
                expected,
                matching,
                "DMARC policy found",
            )
        };
        vec![row]
    }
}
