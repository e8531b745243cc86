#![forbid(unsafe_code)]
//! dnswizard_lib — validation de la posture DNS d'un hôte mail (MVP)

pub mod wizard;
pub use wizard::{
    DkimStatus, DkimStatusLookup, DnsDkimStatus, DnsLookup, Domain, ExpectedHostIps, RecordType,
    Report, ReportSummary, Row, RowScope, RowStatus, SrvRecord, SystemResolver, WizardError,
    validate, validate_with,
};
