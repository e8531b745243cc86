use std::net::IpAddr;

use trust_dns_resolver::{
    Resolver,
    error::{ResolveError, ResolveErrorKind},
    proto::rr::{RData, RecordType},
};

use super::WizardError;

/// One SRV answer as returned by [`DnsLookup::lookup_srv`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SrvRecord {
    pub priority: u16,
    pub weight: u16,
    pub port: u16,
    pub target: String,
}

/// The lookup capability every check runs against.
///
/// All methods return an empty list when no records exist. Resolver-level
/// failures must also surface as empty lists; a check can therefore never
/// abort a validation run, it only routes absence into its own
/// WARNING/ERROR branches.
pub trait DnsLookup {
    fn lookup_a(&self, name: &str) -> Vec<String>;
    fn lookup_aaaa(&self, name: &str) -> Vec<String>;
    fn lookup_cname(&self, name: &str) -> Vec<String>;
    fn lookup_mx(&self, name: &str) -> Vec<String>;
    fn lookup_txt(&self, name: &str) -> Vec<String>;
    fn lookup_srv(&self, name: &str) -> Vec<SrvRecord>;
    fn lookup_ptr(&self, ip: &str) -> Vec<String>;
}

/// System-configured resolver (`/etc/resolv.conf`).
///
/// Answer sets are sorted before being returned so reports stay stable under
/// DNS round-robin rotation.
pub struct SystemResolver {
    inner: Resolver,
}

impl SystemResolver {
    pub fn from_system_conf() -> Result<Self, WizardError> {
        let inner = Resolver::from_system_conf().map_err(WizardError::resolver_init)?;
        Ok(Self { inner })
    }
}

impl DnsLookup for SystemResolver {
    fn lookup_a(&self, name: &str) -> Vec<String> {
        let Some(lookup) = absorb(self.inner.ipv4_lookup(name), "A", name) else {
            return Vec::new();
        };
        let mut addresses: Vec<String> = lookup.iter().map(|record| record.to_string()).collect();
        addresses.sort();
        addresses
    }

    fn lookup_aaaa(&self, name: &str) -> Vec<String> {
        let Some(lookup) = absorb(self.inner.ipv6_lookup(name), "AAAA", name) else {
            return Vec::new();
        };
        let mut addresses: Vec<String> = lookup.iter().map(|record| record.to_string()).collect();
        addresses.sort();
        addresses
    }

    fn lookup_cname(&self, name: &str) -> Vec<String> {
        let Some(lookup) = absorb(self.inner.lookup(name, RecordType::CNAME), "CNAME", name)
        else {
            return Vec::new();
        };
        let mut targets: Vec<String> = lookup
            .iter()
            .filter_map(|rdata| match rdata {
                RData::CNAME(target) => Some(target.to_utf8()),
                _ => None,
            })
            .collect();
        targets.sort();
        targets
    }

    fn lookup_mx(&self, name: &str) -> Vec<String> {
        let Some(lookup) = absorb(self.inner.mx_lookup(name), "MX", name) else {
            return Vec::new();
        };
        let mut records: Vec<(u16, String)> = lookup
            .iter()
            .map(|mx| (mx.preference(), mx.exchange().to_utf8()))
            .collect();
        records.sort();
        records.dedup();
        records.into_iter().map(|(_, exchange)| exchange).collect()
    }

    fn lookup_txt(&self, name: &str) -> Vec<String> {
        let Some(lookup) = absorb(self.inner.txt_lookup(name), "TXT", name) else {
            return Vec::new();
        };
        let mut records = Vec::new();
        for txt in lookup.iter() {
            let mut record = String::new();
            for piece in txt.txt_data().iter() {
                record.push_str(&String::from_utf8_lossy(piece));
            }
            records.push(record);
        }
        records.sort();
        records
    }

    fn lookup_srv(&self, name: &str) -> Vec<SrvRecord> {
        let Some(lookup) = absorb(self.inner.srv_lookup(name), "SRV", name) else {
            return Vec::new();
        };
        let mut records: Vec<SrvRecord> = lookup
            .iter()
            .map(|srv| SrvRecord {
                priority: srv.priority(),
                weight: srv.weight(),
                port: srv.port(),
                target: srv.target().to_utf8(),
            })
            .collect();
        records.sort();
        records
    }

    fn lookup_ptr(&self, ip: &str) -> Vec<String> {
        let Ok(address) = ip.trim().parse::<IpAddr>() else {
            return Vec::new();
        };
        let Some(lookup) = absorb(self.inner.reverse_lookup(address), "PTR", ip) else {
            return Vec::new();
        };
        let mut names: Vec<String> = lookup.iter().map(|ptr| ptr.to_utf8()).collect();
        names.sort();
        names
    }
}

fn absorb<T>(result: Result<T, ResolveError>, record_type: &str, name: &str) -> Option<T> {
    match result {
        Ok(lookup) => Some(lookup),
        Err(err) => {
            if !should_treat_as_empty(&err) {
                log_absorbed(record_type, name, &err);
            }
            None
        }
    }
}

fn should_treat_as_empty(err: &ResolveError) -> bool {
    matches!(err.kind(), ResolveErrorKind::NoRecordsFound { .. })
}

#[cfg(feature = "with-tracing")]
fn log_absorbed(record_type: &str, name: &str, err: &ResolveError) {
    tracing::debug!(record_type, name, error = %err, "lookup failed, treating as empty answer");
}

#[cfg(not(feature = "with-tracing"))]
fn log_absorbed(_record_type: &str, _name: &str, _err: &ResolveError) {}

/// Shared hostname normalization: trim, drop one trailing dot, lowercase.
/// Every comparing check goes through this single seam.
pub(crate) fn normalize_hostname(name: &str) -> String {
    let trimmed = name.trim();
    let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
    trimmed.to_ascii_lowercase()
}

pub(crate) fn fqdn(label: &str, domain: &str) -> String {
    let trimmed = label.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        domain.to_string()
    } else {
        format!("{}.{}", trimmed.to_ascii_lowercase(), domain)
    }
}

pub(crate) fn normalize_mail_host(input: &str) -> Result<String, WizardError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(WizardError::EmptyMailHost);
    }
    let ascii = idna::domain_to_ascii(trimmed).map_err(WizardError::idna)?;
    Ok(normalize_hostname(&ascii))
}

pub(crate) fn normalize_domain(input: &str) -> Result<String, WizardError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(WizardError::EmptyDomain);
    }
    let ascii = idna::domain_to_ascii(trimmed).map_err(WizardError::idna)?;
    Ok(normalize_hostname(&ascii))
}
