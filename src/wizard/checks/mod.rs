pub(crate) mod a_record;
pub(crate) mod aaaa_record;
pub(crate) mod autodiscovery;
pub(crate) mod dkim_record;
pub(crate) mod dmarc_record;
pub(crate) mod mx_record;
pub(crate) mod ptr_record;
pub(crate) mod spf_record;

use super::dkim::DkimStatusLookup;
use super::resolver::DnsLookup;
use super::types::{Domain, ExpectedHostIps, RecordType, Row, RowScope, RowStatus};

/// Inputs shared by every mail-host check.
pub(crate) struct HostScope<'a> {
    pub mail_host: &'a str,
    pub expected: &'a ExpectedHostIps,
    pub expected_all: &'a [String],
}

/// Inputs shared by every domain check. `name` is the normalized form of
/// `domain.name()`.
pub(crate) struct DomainScope<'a> {
    pub mail_host: &'a str,
    pub name: &'a str,
    pub domain: &'a Domain,
    pub expected_all: &'a [String],
    pub dkim: &'a dyn DkimStatusLookup,
}

/// One DNS validation rule. Both entry points default to a no-op empty list
/// so the orchestrator can iterate every check uniformly against both scopes.
pub(crate) trait Check {
    /// Higher priorities sort first within a scope; ties keep registration
    /// order.
    fn priority(&self) -> u32;

    fn check_mail_host(&self, resolver: &dyn DnsLookup, scope: &HostScope<'_>) -> Vec<Row> {
        let _ = (resolver, scope);
        Vec::new()
    }

    fn check_domain(&self, resolver: &dyn DnsLookup, scope: &DomainScope<'_>) -> Vec<Row> {
        let _ = (resolver, scope);
        Vec::new()
    }
}

/// The fixed registration list. No discovery mechanism: this literal is the
/// single source of check ordering.
pub(crate) fn registered_checks() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(a_record::ARecordCheck),
        Box::new(aaaa_record::AaaaRecordCheck),
        Box::new(ptr_record::PtrRecordCheck),
        Box::new(mx_record::MxRecordCheck),
        Box::new(spf_record::SpfRecordCheck),
        Box::new(autodiscovery::AutodiscoveryRecordCheck),
        Box::new(dkim_record::DkimRecordCheck),
        Box::new(dmarc_record::DmarcRecordCheck),
    ]
}

pub(crate) fn intersects(left: &[String], right: &[String]) -> bool {
    left.iter().any(|l| right.iter().any(|r| l == r))
}

pub(crate) fn starts_with_ignore_ascii_case(input: &str, prefix: &str) -> bool {
    input
        .get(..prefix.len())
        .map(|head| head.eq_ignore_ascii_case(prefix))
        .unwrap_or(false)
}

pub(crate) fn host_row(
    status: RowStatus,
    subject: impl Into<String>,
    record_type: RecordType,
    expected_values: Vec<String>,
    actual_values: Vec<String>,
    message: impl Into<String>,
) -> Row {
    Row {
        scope: RowScope::MailHost,
        subject: subject.into(),
        record_type,
        expected_values,
        actual_values,
        status,
        message: message.into(),
    }
}

pub(crate) fn domain_row(
    status: RowStatus,
    subject: impl Into<String>,
    record_type: RecordType,
    expected_values: Vec<String>,
    actual_values: Vec<String>,
    message: impl Into<String>,
) -> Row {
    Row {
        scope: RowScope::Domain,
        subject: subject.into(),
        record_type,
        expected_values,
        actual_values,
        status,
        message: message.into(),
    }
}
