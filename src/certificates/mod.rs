//! # Certificate Management
//!
//! Translates between PEM-encoded certificate material and the two backing
//! certificate stores: operator-uploaded server certificates and
//! authority-issued certificates requested by domain. The unified
//! [`Certificate`] value is what higher-level orchestration code sees;
//! its `id` prefix distinguishes the two origins.
//!
//! Every operation is a single-shot call chain against the stores; there is
//! no partial-success mode, and per-item failures abort a listing wholly.

pub mod arn;
pub mod store;

use std::sync::Arc;

#[cfg(test)]
use std::sync::Mutex;

use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use x509_parser::pem::Pem;
use x509_parser::prelude::X509Certificate;

use crate::errors::{GantryError, Result};
use store::{CertificateAuthority, CertificateStore, IssueCertificate, UploadServerCertificate};

/// A certificate as exposed to the rest of the platform.
///
/// `id` encodes the origin: authority-issued certificates always carry the
/// [`arn::ISSUED_ID_PREFIX`] tag, uploaded ones never do. Callers must not
/// assume a single backing store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    /// Provider-specific identifier
    pub id: String,

    /// Primary subject common name (uploaded) or requested domain (issued)
    pub domain: String,

    /// Expiration; `None` for requested-but-not-yet-issued certificates
    pub expiration: Option<DateTime<Utc>>,
}

/// Manages TLS server certificates across the two backing stores.
#[derive(Debug, Clone)]
pub struct CertificateManager {
    store: Arc<dyn CertificateStore>,
    authority: Arc<dyn CertificateAuthority>,
}

impl CertificateManager {
    /// Create a manager over the given stores.
    pub fn new(store: Arc<dyn CertificateStore>, authority: Arc<dyn CertificateAuthority>) -> Self {
        Self { store, authority }
    }

    /// Upload a PEM-encoded certificate to the uploaded-certificate store.
    ///
    /// The first PEM block of `body` is re-encoded to normalize formatting
    /// before upload, and its subject common name becomes the certificate's
    /// domain. The upload name is derived from the current time; collisions
    /// are possible in principle but negligible at human-triggered call
    /// rates.
    pub async fn create(
        &self,
        body: &str,
        private_key: &str,
        chain: Option<&str>,
    ) -> Result<Certificate> {
        let block = first_pem_block(body)?;
        let normalized = encode_pem(&block.label, &block.contents);

        let domain = {
            let certificate = block.parse_x509().map_err(|err| {
                GantryError::invalid_input(format!("invalid X.509 certificate: {}", err))
            })?;
            subject_common_name(&certificate)
        };

        let name = format!("cert-{}", current_time().timestamp());
        let request = UploadServerCertificate {
            name,
            body: normalized,
            private_key: private_key.to_string(),
            chain: chain.filter(|chain| !chain.is_empty()).map(str::to_string),
        };

        let metadata = self.store.upload_server_certificate(request).await?;
        let id = arn::uploaded_certificate_id(&metadata.arn);
        info!(id = %id, domain = %domain, "uploaded server certificate");

        Ok(Certificate { id, domain, expiration: metadata.expiration })
    }

    /// Delete an uploaded certificate by id.
    ///
    /// Store rejections (unknown id, certificate still attached to a
    /// listener) surface verbatim as upstream errors.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store.delete_server_certificate(id).await?;
        info!(id = %id, "deleted server certificate");
        Ok(())
    }

    /// Request issuance of a certificate for the given domains.
    ///
    /// The first domain is the primary subject; any remaining domains become
    /// subject alternative names. Issuance is asynchronous, so the returned
    /// certificate carries no expiration.
    pub async fn generate(&self, domains: &[String]) -> Result<Certificate> {
        let (primary, alternates) = domains
            .split_first()
            .ok_or_else(|| GantryError::invalid_input("must specify at least one domain"))?;

        let request = IssueCertificate {
            domain_name: primary.clone(),
            subject_alternative_names: if alternates.is_empty() {
                None
            } else {
                Some(alternates.to_vec())
            },
        };

        let request_arn = self.authority.request_certificate(request).await?;
        let id = arn::issued_certificate_id(&request_arn);
        info!(id = %id, domain = %primary, "requested certificate issuance");

        Ok(Certificate { id, domain: primary.clone(), expiration: None })
    }

    /// Enumerate all certificates across both stores.
    ///
    /// Uploaded-store entries come first, then authority entries, each group
    /// in backing-store enumeration order. Any per-item failure aborts the
    /// whole listing; there are no partial results.
    ///
    /// Uploaded entries keep the store-assigned name as their id, while
    /// [`CertificateManager::create`] derives the id from the returned
    /// resource identifier; the two coincide for certificates this adapter
    /// uploaded, but the derivations are intentionally left distinct.
    pub async fn list(&self) -> Result<Vec<Certificate>> {
        let mut certificates = Vec::new();

        for metadata in self.store.list_server_certificates().await? {
            let body = self.store.get_server_certificate(&metadata.name).await?;

            // The body came from the store, not the caller: decode failures
            // here are upstream data problems, not invalid input.
            let block = first_pem_block(&body).map_err(|err| {
                GantryError::upstream(format!(
                    "stored certificate '{}' has an unreadable body: {}",
                    metadata.name, err
                ))
            })?;
            let domain = {
                let certificate = block.parse_x509().map_err(|err| {
                    GantryError::upstream(format!(
                        "stored certificate '{}' is not valid X.509: {}",
                        metadata.name, err
                    ))
                })?;
                subject_common_name(&certificate)
            };

            certificates.push(Certificate {
                id: metadata.name,
                domain,
                expiration: metadata.expiration,
            });
        }

        for summary in self.authority.list_certificates().await? {
            let detail = self.authority.describe_certificate(&summary.arn).await?;

            certificates.push(Certificate {
                id: arn::issued_certificate_id(&summary.arn),
                domain: summary.domain_name,
                expiration: detail.not_after,
            });
        }

        debug!(count = certificates.len(), "listed certificates");
        Ok(certificates)
    }
}

/// Decode the first PEM block from caller-supplied material.
fn first_pem_block(input: &str) -> Result<Pem> {
    match Pem::iter_from_buffer(input.as_bytes()).next() {
        Some(Ok(block)) => Ok(block),
        Some(Err(err)) => Err(GantryError::invalid_input(format!("malformed PEM block: {}", err))),
        None => Err(GantryError::invalid_input("no PEM block found")),
    }
}

/// Re-encode a decoded PEM block with canonical 64-column formatting.
fn encode_pem(label: &str, contents: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(contents);

    let mut out = format!("-----BEGIN {}-----\n", label);
    let mut rest = encoded.as_str();
    while !rest.is_empty() {
        let (line, tail) = rest.split_at(rest.len().min(64));
        out.push_str(line);
        out.push('\n');
        rest = tail;
    }
    out.push_str(&format!("-----END {}-----\n", label));
    out
}

/// Extract the subject common name, or an empty string when absent.
fn subject_common_name(certificate: &X509Certificate<'_>) -> String {
    certificate
        .subject()
        .iter_common_name()
        .next()
        .and_then(|attribute| attribute.as_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn current_time() -> DateTime<Utc> {
    #[cfg(test)]
    {
        if let Some(now) = NOW_OVERRIDE.lock().unwrap().as_ref() {
            return *now;
        }
    }
    Utc::now()
}

#[cfg(test)]
static NOW_OVERRIDE: Mutex<Option<DateTime<Utc>>> = Mutex::new(None);

#[cfg(test)]
pub(crate) fn set_mock_time(moment: Option<DateTime<Utc>>) {
    *NOW_OVERRIDE.lock().unwrap() = moment;
}
