//! Orchestration error type.

use aas_sdk_client::ClientError;
use aas_sdk_core::ReferenceType;
use std::fmt;

/// Result type alias for orchestration operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// The remote services an orchestration call may need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    /// AAS registry
    AasRegistry,
    /// AAS repository
    AasRepository,
    /// Submodel registry
    SubmodelRegistry,
    /// Submodel repository
    SubmodelRepository,
    /// Concept description repository
    ConceptDescriptionRepository,
    /// AAS discovery service
    Discovery,
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AasRegistry => "AAS registry",
            Self::AasRepository => "AAS repository",
            Self::SubmodelRegistry => "submodel registry",
            Self::SubmodelRepository => "submodel repository",
            Self::ConceptDescriptionRepository => "concept description repository",
            Self::Discovery => "discovery service",
        };
        f.write_str(name)
    }
}

/// Errors returned by [`crate::AasService`] and [`crate::SubmodelService`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// A configuration required by the code path was not supplied
    #[error("no {service} configured")]
    Configuration {
        /// Missing service
        service: ServiceKind,
    },

    /// An endpoint URL does not match `scheme://host[:port]/{resource}/{id}`
    #[error("invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint {
        /// Offending URL
        endpoint: String,
        /// What is wrong with it
        reason: String,
    },

    /// A reference cannot be walked into endpoints
    #[error("invalid reference: {reason}")]
    InvalidReference {
        /// What is wrong with it
        reason: String,
    },

    /// Only model references resolve to endpoints
    #[error("unsupported reference type: {reference_type}")]
    UnsupportedReferenceType {
        /// Type of the rejected reference
        reference_type: ReferenceType,
    },

    /// Every item of a batch lookup failed
    #[error("all {attempted} lookups failed")]
    Fetch {
        /// Number of items attempted
        attempted: usize,
        /// Failure per item identifier
        failures: Vec<(String, ServiceError)>,
    },

    /// Error reported by a registry, repository, or discovery client
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl ServiceError {
    /// Stable name of the error kind.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "ConfigurationError",
            Self::InvalidEndpoint { .. } => "InvalidEndpoint",
            Self::InvalidReference { .. } => "InvalidReference",
            Self::UnsupportedReferenceType { .. } => "UnsupportedReferenceType",
            Self::Fetch { .. } => "FetchError",
            Self::Client(_) => "ClientError",
        }
    }

    pub(crate) const fn missing(service: ServiceKind) -> Self {
        Self::Configuration { service }
    }

    pub(crate) fn invalid_endpoint(endpoint: &str, reason: impl Into<String>) -> Self {
        Self::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_types_match_taxonomy() {
        assert_eq!(
            ServiceError::missing(ServiceKind::Discovery).error_type(),
            "ConfigurationError"
        );
        assert_eq!(
            ServiceError::invalid_endpoint("x", "bad").error_type(),
            "InvalidEndpoint"
        );
        assert_eq!(
            ServiceError::Fetch {
                attempted: 0,
                failures: Vec::new()
            }
            .error_type(),
            "FetchError"
        );
    }

    #[test]
    fn client_errors_pass_through_unchanged() {
        let client = ClientError::Api {
            status: 404,
            message: "gone".to_string(),
        };
        let err = ServiceError::from(client.clone());
        assert_eq!(err.to_string(), client.to_string());
        assert_eq!(err, ServiceError::Client(client));
    }

    #[test]
    fn configuration_message_names_service() {
        let err = ServiceError::missing(ServiceKind::SubmodelRepository);
        assert_eq!(err.to_string(), "no submodel repository configured");
    }
}
