//! Certificate store trait seams and wire types.
//!
//! Two backing stores exist: the uploaded-certificate store (server
//! certificates pushed by operators) and the managed certificate authority
//! (certificates issued asynchronously on request). Production wiring
//! supplies SDK-backed implementations; tests supply in-process stubs.
//! Implementations classify transport and API failures as
//! [`crate::errors::GantryError::Upstream`], preserving the original message.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Upload request for the uploaded-certificate store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadServerCertificate {
    /// Store-unique name for the uploaded certificate
    pub name: String,

    /// PEM-encoded certificate body
    pub body: String,

    /// PEM-encoded private key
    pub private_key: String,

    /// Optional PEM-encoded intermediate chain
    pub chain: Option<String>,
}

/// Metadata the uploaded-certificate store keeps per certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerCertificateMetadata {
    /// Full resource identifier assigned by the store
    pub arn: String,

    /// Store-assigned name (the upload name)
    pub name: String,

    /// Expiration of the stored certificate, when the store reports one
    pub expiration: Option<DateTime<Utc>>,
}

/// Issuance request for the certificate authority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueCertificate {
    /// Primary subject of the requested certificate
    pub domain_name: String,

    /// Additional subjects; only attached when non-empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_alternative_names: Option<Vec<String>>,
}

/// Summary entry from the authority's certificate listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateSummary {
    pub arn: String,
    pub domain_name: String,
}

/// Full description of an authority-issued certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateDetail {
    pub arn: String,
    pub domain_name: String,

    /// Absent while the issuance request is still pending
    pub not_after: Option<DateTime<Utc>>,
}

/// Uploaded-certificate store: server certificates by name.
#[async_trait]
pub trait CertificateStore: Send + Sync + std::fmt::Debug {
    /// Upload a server certificate, returning the stored metadata.
    async fn upload_server_certificate(
        &self,
        request: UploadServerCertificate,
    ) -> Result<ServerCertificateMetadata>;

    /// Delete a server certificate by name. Store rejections (unknown name,
    /// certificate still attached to a listener) surface verbatim.
    async fn delete_server_certificate(&self, name: &str) -> Result<()>;

    /// Enumerate metadata for every stored server certificate.
    async fn list_server_certificates(&self) -> Result<Vec<ServerCertificateMetadata>>;

    /// Fetch the PEM-encoded body of a stored server certificate.
    async fn get_server_certificate(&self, name: &str) -> Result<String>;
}

/// Managed certificate authority: asynchronous issuance by request.
#[async_trait]
pub trait CertificateAuthority: Send + Sync + std::fmt::Debug {
    /// Submit an issuance request, returning the request's resource
    /// identifier. The certificate itself is not yet valid when this
    /// returns.
    async fn request_certificate(&self, request: IssueCertificate) -> Result<String>;

    /// Enumerate summaries of all issuance requests.
    async fn list_certificates(&self) -> Result<Vec<CertificateSummary>>;

    /// Fetch the full description of an issuance request by identifier.
    async fn describe_certificate(&self, arn: &str) -> Result<CertificateDetail>;
}
