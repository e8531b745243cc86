use super::{Check, HostScope, host_row};
use crate::wizard::resolver::{DnsLookup, normalize_hostname};
use crate::wizard::types::{RecordType, Row, RowStatus};

/// The only check that fans out: one row per expected address, IPv4 first.
pub(crate) struct PtrRecordCheck;

impl Check for PtrRecordCheck {
    fn priority(&self) -> u32 {
        80
    }

    fn check_mail_host(&self, resolver: &dyn DnsLookup, scope: &HostScope<'_>) -> Vec<Row> {
        let host = normalize_hostname(scope.mail_host);
        let mut rows = Vec::new();
        for ip in scope
            .expected
            .ipv4()
            .iter()
            .chain(scope.expected.ipv6().iter())
        {
            let names = resolver.lookup_ptr(ip);
            let matched = names.iter().any(|name| normalize_hostname(name) == host);
            let (status, message) = if matched {
                (RowStatus::Ok, "PTR resolves to mail host")
            } else {
                (RowStatus::Error, "PTR does not resolve to mail host")
            };
            rows.push(host_row(
                status,
                ip,
                RecordType::Ptr,
                vec![scope.mail_host.to_string()],
                names,
                message,
            ));
        }
        rows
    }
}
