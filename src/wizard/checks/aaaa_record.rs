use super::a_record::NO_EXPECTED_ADDRESSES;
use super::{Check, HostScope, host_row, intersects};
use crate::wizard::resolver::DnsLookup;
use crate::wizard::types::{RecordType, Row, RowStatus};

pub(crate) struct AaaaRecordCheck;

impl Check for AaaaRecordCheck {
    fn priority(&self) -> u32 {
        90
    }

    fn check_mail_host(&self, resolver: &dyn DnsLookup, scope: &HostScope<'_>) -> Vec<Row> {
        let addresses = resolver.lookup_aaaa(scope.mail_host);
        let ipv6 = scope.expected.ipv6();

        if ipv6.is_empty() && scope.expected_all.is_empty() {
            return vec![host_row(
                RowStatus::Warning,
                scope.mail_host,
                RecordType::Aaaa,
                vec![NO_EXPECTED_ADDRESSES.to_string()],
                addresses,
                "No expected host IPs available for validation",
            )];
        }

        let other_family = resolver.lookup_a(scope.mail_host);
        let (status, message) = if intersects(&addresses, ipv6) {
            (RowStatus::Ok, "AAAA record matches expected IP(s)")
        } else if ipv6.is_empty() && intersects(&addresses, scope.expected_all) {
            (RowStatus::Ok, "Mail host resolves to expected IP(s)")
        } else if intersects(&other_family, scope.expected_all) {
            (
                RowStatus::Warning,
                "No matching AAAA record, but other address records match",
            )
        } else {
            (RowStatus::Error, "No matching AAAA record for expected IP(s)")
        };

        let expected = if ipv6.is_empty() {
            scope.expected_all.to_vec()
        } else {
            ipv6.to_vec()
        };
        vec![host_row(
            status,
            scope.mail_host,
            RecordType::Aaaa,
            expected,
            addresses,
            message,
        )]
    }
}
