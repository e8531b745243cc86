use super::resolver::{DnsLookup, fqdn};
use super::types::Domain;

/// Published-record status for one domain's DKIM selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DkimStatus {
    pub record_found: bool,
    pub record_valid: bool,
    pub current_record: String,
}

impl DkimStatus {
    pub(crate) fn missing() -> Self {
        Self {
            record_found: false,
            record_valid: false,
            current_record: String::new(),
        }
    }
}

/// Status source consulted by the DKIM check. Only queried for domains that
/// have DKIM enabled.
pub trait DkimStatusLookup {
    fn dkim_status(&self, resolver: &dyn DnsLookup, domain: &Domain) -> DkimStatus;
}

/// DNS-backed status source: reads `<selector>._domainkey.<domain>` and
/// compares it against the record the domain is expected to publish. Without
/// a configured expectation the record is validated at the tag level instead
/// (`v=DKIM1`, non-empty `p=`).
#[derive(Debug, Default, Clone, Copy)]
pub struct DnsDkimStatus;

impl DkimStatusLookup for DnsDkimStatus {
    fn dkim_status(&self, resolver: &dyn DnsLookup, domain: &Domain) -> DkimStatus {
        let name = fqdn(
            &format!("{}._domainkey", domain.dkim_selector()),
            domain.name(),
        );
        let records = resolver.lookup_txt(&name);
        let current = records
            .iter()
            .map(|record| record.trim())
            .find(|record| !record.is_empty())
            .unwrap_or("")
            .to_string();
        if current.is_empty() {
            return DkimStatus::missing();
        }

        let valid = match domain.dkim_record() {
            Some(expected) => squash_whitespace(&current) == squash_whitespace(expected),
            None => has_valid_tags(&current),
        };
        DkimStatus {
            record_found: true,
            record_valid: valid,
            current_record: current,
        }
    }
}

fn squash_whitespace(record: &str) -> String {
    record.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn has_valid_tags(record: &str) -> bool {
    let mut version_ok = true;
    let mut has_public_key = false;

    for part in record.split(';') {
        let trimmed = part.trim();
        if trimmed.is_empty() {
            continue;
        }
        let mut pieces = trimmed.splitn(2, '=');
        let key = pieces.next().unwrap_or("").trim().to_ascii_lowercase();
        let value = pieces.next().map(str::trim).unwrap_or("");

        match key.as_str() {
            "v" => version_ok = value.eq_ignore_ascii_case("dkim1"),
            "p" => has_public_key = !value.is_empty(),
            _ => {}
        }
    }

    version_ok && has_public_key
}
