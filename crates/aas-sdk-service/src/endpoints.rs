//! Endpoint derivation and parsing.
//!
//! Endpoints handed out by this crate always have the form
//! `{basePath}/{shells|submodels}/{base64url(id)}`.

use crate::error::{ServiceError, ServiceResult};
use aas_sdk_client::{decode_id_base64url, encode_id_base64url, Configuration};
use aas_sdk_core::{AAS_INTERFACE, SUBMODEL_INTERFACE};
use regex::Regex;
use std::sync::OnceLock;

fn base_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(https?://[^/]+(?::\d+)?)").expect("static pattern"))
}

fn shell_endpoint_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(https?://[^/]+(?::\d+)?)/shells/([^/]+)$").expect("static pattern")
    })
}

fn submodel_endpoint_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(https?://[^/]+(?::\d+)?)/submodels/([^/]+)$").expect("static pattern")
    })
}

/// Scheme, host, and port of an absolute URL.
///
/// Any path on the URL is dropped, including a path prefix the server may
/// be mounted under.
#[must_use]
pub fn base_url_of(href: &str) -> Option<&str> {
    base_url_pattern()
        .captures(href)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// An endpoint split into host and decoded identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEndpoint {
    /// `scheme://host[:port]`
    pub base_url: String,
    /// Decoded identifier
    pub id: String,
}

/// Resource kinds addressable by endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resource {
    Shell,
    Submodel,
}

impl Resource {
    const fn segment(self) -> &'static str {
        match self {
            Self::Shell => "shells",
            Self::Submodel => "submodels",
        }
    }

    /// Interface tag of descriptor endpoints for this resource.
    pub(crate) const fn interface(self) -> &'static str {
        match self {
            Self::Shell => AAS_INTERFACE,
            Self::Submodel => SUBMODEL_INTERFACE,
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Self::Shell => shell_endpoint_pattern(),
            Self::Submodel => submodel_endpoint_pattern(),
        }
    }

    /// Endpoint of `id` in the repository behind `config`.
    pub(crate) fn endpoint(self, config: &Configuration, id: &str) -> String {
        config.url(&format!("/{}/{}", self.segment(), encode_id_base64url(id)))
    }

    pub(crate) fn parse(self, endpoint: &str) -> ServiceResult<ParsedEndpoint> {
        let captures = self.pattern().captures(endpoint).ok_or_else(|| {
            ServiceError::invalid_endpoint(
                endpoint,
                format!("expected scheme://host[:port]/{}/{{id}}", self.segment()),
            )
        })?;

        let base_url = captures[1].to_string();
        let id = decode_id_base64url(&captures[2])
            .map_err(|e| ServiceError::invalid_endpoint(endpoint, e.to_string()))?;

        Ok(ParsedEndpoint { base_url, id })
    }
}

/// Endpoint of a shell in the repository behind `config`.
#[must_use]
pub fn shell_endpoint(config: &Configuration, aas_id: &str) -> String {
    Resource::Shell.endpoint(config, aas_id)
}

/// Endpoint of a submodel in the repository behind `config`.
#[must_use]
pub fn submodel_endpoint(config: &Configuration, submodel_id: &str) -> String {
    Resource::Submodel.endpoint(config, submodel_id)
}

/// Split a shell endpoint into host and identifier.
///
/// # Errors
///
/// Returns [`ServiceError::InvalidEndpoint`] if the URL does not match
/// `scheme://host[:port]/shells/{id}` or the id is not base64url.
pub fn parse_shell_endpoint(endpoint: &str) -> ServiceResult<ParsedEndpoint> {
    Resource::Shell.parse(endpoint)
}

/// Split a submodel endpoint into host and identifier.
///
/// # Errors
///
/// Returns [`ServiceError::InvalidEndpoint`] if the URL does not match
/// `scheme://host[:port]/submodels/{id}` or the id is not base64url.
pub fn parse_submodel_endpoint(endpoint: &str) -> ServiceResult<ParsedEndpoint> {
    Resource::Submodel.parse(endpoint)
}
