use super::{Check, DomainScope, domain_row, intersects};
use crate::wizard::resolver::{DnsLookup, SrvRecord, fqdn, normalize_hostname};
use crate::wizard::types::{RecordType, Row, RowStatus};

/// Client auto-configuration bundle. Always emits its 8 rows in the same
/// order, found or not; callers iterate the result by index. Absence of any
/// autodiscovery record is a convenience gap, never worse than WARNING.
pub(crate) struct AutodiscoveryRecordCheck;

impl Check for AutodiscoveryRecordCheck {
    fn priority(&self) -> u32 {
        60
    }

    fn check_domain(&self, resolver: &dyn DnsLookup, scope: &DomainScope<'_>) -> Vec<Row> {
        vec![
            address_hint(resolver, scope, "autoconfig"),
            address_hint(resolver, scope, "autodiscover"),
            service_alias(resolver, scope, "imap"),
            service_alias(resolver, scope, "smtp"),
            mailconf_hint(resolver, scope),
            service_srv(resolver, scope, "_imaps._tcp", 993, scope.mail_host),
            service_srv(resolver, scope, "_submission._tcp", 465, scope.mail_host),
            service_srv(
                resolver,
                scope,
                "_autodiscover._tcp",
                443,
                &fqdn("autodiscover", scope.name),
            ),
        ]
    }
}

fn address_hint(resolver: &dyn DnsLookup, scope: &DomainScope<'_>, label: &str) -> Row {
    let name = fqdn(label, scope.name);
    let addresses = resolver.lookup_a(&name);
    let (status, message) = if intersects(&addresses, scope.expected_all) {
        (
            RowStatus::Ok,
            format!("{label} host resolves to expected IP(s)"),
        )
    } else {
        (
            RowStatus::Warning,
            format!("{label} A record missing or not pointing at expected IP(s)"),
        )
    };
    domain_row(
        status,
        name,
        RecordType::A,
        scope.expected_all.to_vec(),
        addresses,
        message,
    )
}

fn service_alias(resolver: &dyn DnsLookup, scope: &DomainScope<'_>, label: &str) -> Row {
    let name = fqdn(label, scope.name);
    let addresses = resolver.lookup_a(&name);
    let mut matched = intersects(&addresses, scope.expected_all);
    let mut actual = addresses;
    if !matched {
        let aliases = resolver.lookup_cname(&name);
        for target in &aliases {
            if intersects(&resolver.lookup_a(target), scope.expected_all) {
                matched = true;
                break;
            }
        }
        if actual.is_empty() {
            actual = aliases;
        }
    }

    let (status, message) = if matched {
        (
            RowStatus::Ok,
            format!("{label} host resolves to expected IP(s)"),
        )
    } else {
        (
            RowStatus::Warning,
            format!("{label} record missing or does not resolve to expected IP(s)"),
        )
    };
    domain_row(
        status,
        name,
        RecordType::AOrCname,
        scope.expected_all.to_vec(),
        actual,
        message,
    )
}

fn mailconf_hint(resolver: &dyn DnsLookup, scope: &DomainScope<'_>) -> Row {
    let records = resolver.lookup_txt(scope.name);
    let matching: Vec<String> = records
        .iter()
        .filter(|record| record.contains("mailconf="))
        .cloned()
        .collect();

    let expected = vec!["mailconf=<autoconfig url>".to_string()];
    if matching.is_empty() {
        domain_row(
            RowStatus::Warning,
            scope.name,
            RecordType::Txt,
            expected,
            records,
            "mailconf TXT hint missing",
        )
    } else {
        domain_row(
            RowStatus::Ok,
            scope.name,
            RecordType::Txt,
            expected,
            matching,
            "mailconf TXT hint found",
        )
    }
}

fn service_srv(
    resolver: &dyn DnsLookup,
    scope: &DomainScope<'_>,
    service: &str,
    port: u16,
    target: &str,
) -> Row {
    let name = fqdn(service, scope.name);
    let entries = resolver.lookup_srv(&name);
    let wanted = normalize_hostname(target);
    let matched = entries
        .iter()
        .any(|entry| entry.port == port && normalize_hostname(&entry.target) == wanted);

    let expected = vec![format!("{port} {wanted}")];
    let actual: Vec<String> = entries.iter().map(render_srv).collect();
    let (status, message) = if matched {
        (RowStatus::Ok, "SRV record points to expected service host")
    } else if entries.is_empty() {
        (RowStatus::Warning, "SRV record missing")
    } else {
        (
            RowStatus::Warning,
            "SRV record does not match expected service host",
        )
    };
    domain_row(status, name, RecordType::Srv, expected, actual, message)
}

fn render_srv(entry: &SrvRecord) -> String {
    format!(
        "{} {} {} {}",
        entry.priority, entry.weight, entry.port, entry.target
    )
}
