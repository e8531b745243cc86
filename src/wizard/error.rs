use thiserror::Error;

/// Errors raised when preparing a validation run. DNS lookup failures are not
/// represented here; they are absorbed into empty answers (see the resolver).
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("mail host name is empty")]
    EmptyMailHost,
    #[error("domain name is empty")]
    EmptyDomain,
    #[error("domain IDNA conversion failed")]
    IdnaConversion {
        #[source]
        source: idna::Errors,
    },
    #[error("resolver initialization failed: {source}")]
    ResolverInit {
        #[source]
        source: std::io::Error,
    },
}

impl WizardError {
    pub(crate) fn idna(source: idna::Errors) -> Self {
        Self::IdnaConversion { source }
    }

    pub(crate) fn resolver_init(source: std::io::Error) -> Self {
        Self::ResolverInit { source }
    }
}
