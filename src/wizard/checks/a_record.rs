use super::{Check, HostScope, host_row, intersects};
use crate::wizard::resolver::DnsLookup;
use crate::wizard::types::{RecordType, Row, RowStatus};

pub(crate) const NO_EXPECTED_ADDRESSES: &str = "(no expected addresses)";

pub(crate) struct ARecordCheck;

impl Check for ARecordCheck {
    fn priority(&self) -> u32 {
        100
    }

    fn check_mail_host(&self, resolver: &dyn DnsLookup, scope: &HostScope<'_>) -> Vec<Row> {
        let addresses = resolver.lookup_a(scope.mail_host);
        let ipv4 = scope.expected.ipv4();

        if ipv4.is_empty() && scope.expected_all.is_empty() {
            return vec![host_row(
                RowStatus::Warning,
                scope.mail_host,
                RecordType::A,
                vec![NO_EXPECTED_ADDRESSES.to_string()],
                addresses,
                "No expected host IPs available for validation",
            )];
        }

        let other_family = resolver.lookup_aaaa(scope.mail_host);
        let (status, message) = if intersects(&addresses, ipv4) {
            (RowStatus::Ok, "A record matches expected IP(s)")
        } else if ipv4.is_empty() && intersects(&addresses, scope.expected_all) {
            (RowStatus::Ok, "Mail host resolves to expected IP(s)")
        } else if intersects(&other_family, scope.expected_all) {
            (
                RowStatus::Warning,
                "No matching A record, but other address records match",
            )
        } else {
            (RowStatus::Error, "No matching A record for expected IP(s)")
        };

        let expected = if ipv4.is_empty() {
            scope.expected_all.to_vec()
        } else {
            ipv4.to_vec()
        };
        vec![host_row(
            status,
            scope.mail_host,
            RecordType::A,
            expected,
            addresses,
            message,
        )]
    }
}
