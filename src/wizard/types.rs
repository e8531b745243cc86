use std::fmt;

/// Which entity a finding is about.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowScope {
    MailHost,
    Domain,
}

impl RowScope {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MailHost => "MAIL_HOST",
            Self::Domain => "DOMAIN",
        }
    }
}

impl fmt::Display for RowScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Severity of a finding.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    Ok,
    Warning,
    Error,
}

impl RowStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for RowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// DNS RR type (or composite label) a finding refers to.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    A,
    #[cfg_attr(feature = "with-serde", serde(rename = "AAAA"))]
    Aaaa,
    #[cfg_attr(feature = "with-serde", serde(rename = "PTR"))]
    Ptr,
    #[cfg_attr(feature = "with-serde", serde(rename = "MX"))]
    Mx,
    #[cfg_attr(feature = "with-serde", serde(rename = "TXT"))]
    Txt,
    #[cfg_attr(feature = "with-serde", serde(rename = "SRV"))]
    Srv,
    #[cfg_attr(feature = "with-serde", serde(rename = "A/CNAME"))]
    AOrCname,
}

impl RecordType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Ptr => "PTR",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Srv => "SRV",
            Self::AOrCname => "A/CNAME",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One diagnostic finding. Fully determined by the emitting check and its
/// inputs: identical DNS answers always reproduce the same row.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub scope: RowScope,
    pub subject: String,
    pub record_type: RecordType,
    pub expected_values: Vec<String>,
    pub actual_values: Vec<String>,
    pub status: RowStatus,
    pub message: String,
}

/// Ordered aggregate of all rows from one validation run.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub mail_host: String,
    pub rows: Vec<Row>,
    pub summary: ReportSummary,
}

impl Report {
    pub fn has_errors(&self) -> bool {
        self.summary.error > 0
    }
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    pub ok: usize,
    pub warning: usize,
    pub error: usize,
}

impl ReportSummary {
    pub(crate) fn from_rows(rows: &[Row]) -> Self {
        let mut summary = Self {
            ok: 0,
            warning: 0,
            error: 0,
        };
        for row in rows {
            match row.status {
                RowStatus::Ok => summary.ok += 1,
                RowStatus::Warning => summary.warning += 1,
                RowStatus::Error => summary.error += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.ok + self.warning + self.error
    }
}

impl fmt::Display for ReportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ok, {} warning, {} error", self.ok, self.warning, self.error)
    }
}

/// The IPv4/IPv6 addresses the mail host is expected to resolve to, per the
/// caller's network configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedHostIps {
    ipv4: Vec<String>,
    ipv6: Vec<String>,
    resolved: bool,
}

impl ExpectedHostIps {
    pub fn resolved<I4, I6, S>(ipv4: I4, ipv6: I6) -> Self
    where
        I4: IntoIterator<Item = S>,
        I6: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ipv4: collect_addresses(ipv4),
            ipv6: collect_addresses(ipv6),
            resolved: true,
        }
    }

    /// Expectation for a host whose resolution itself failed.
    pub fn unresolved() -> Self {
        Self {
            ipv4: Vec::new(),
            ipv6: Vec::new(),
            resolved: false,
        }
    }

    pub fn ipv4(&self) -> &[String] {
        &self.ipv4
    }

    pub fn ipv6(&self) -> &[String] {
        &self.ipv6
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Union of both address families, used for wildcard matching.
    pub(crate) fn union(&self) -> Vec<String> {
        self.ipv4.iter().chain(self.ipv6.iter()).cloned().collect()
    }
}

fn collect_addresses<I, S>(addresses: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    addresses
        .into_iter()
        .map(|address| address.into().trim().to_string())
        .filter(|address| !address.is_empty())
        .collect()
}

/// Read-only view of a managed mail domain. The wizard never creates or
/// mutates domains; their lifecycle belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    name: String,
    dkim_enabled: bool,
    dkim_selector: String,
    dkim_record: Option<String>,
}

impl Domain {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dkim_enabled: false,
            dkim_selector: "default".to_string(),
            dkim_record: None,
        }
    }

    /// Enable DKIM validation with the current selector.
    pub fn with_dkim(mut self) -> Self {
        self.dkim_enabled = true;
        self
    }

    /// Enable DKIM validation under the given selector.
    pub fn with_dkim_selector(mut self, selector: impl Into<String>) -> Self {
        if let Some(normalized) = normalize_selector(selector.into()) {
            self.dkim_selector = normalized;
            self.dkim_enabled = true;
        }
        self
    }

    /// Record the domain is expected to publish under its DKIM selector.
    pub fn with_dkim_record(mut self, record: impl Into<String>) -> Self {
        self.dkim_record = Some(record.into().trim().to_string());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dkim_enabled(&self) -> bool {
        self.dkim_enabled
    }

    pub fn dkim_selector(&self) -> &str {
        &self.dkim_selector
    }

    pub fn dkim_record(&self) -> Option<&str> {
        self.dkim_record.as_deref()
    }
}

fn normalize_selector(input: String) -> Option<String> {
    let trimmed = input.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_ascii_lowercase())
}
