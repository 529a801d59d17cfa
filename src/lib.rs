//! # Gantry
//!
//! Gantry is the cloud provider glue for the container platform: it
//! discovers the Docker daemon endpoint running on a cluster's
//! container-instance fleet, and manages TLS server certificates across the
//! provider's uploaded-certificate store and managed certificate authority.
//!
//! ## Architecture
//!
//! Two independent leaf adapters over four external collaborator APIs:
//!
//! ```text
//! DockerHostResolver ──► ClusterApi (orchestration)
//!        │          └──► ComputeApi (instance inventory)
//!        └──► bollard Docker client
//!
//! CertificateManager ──► CertificateStore (uploaded)
//!                   └──► CertificateAuthority (issued)
//! ```
//!
//! Every operation is a direct, single-shot request/response call with
//! light post-processing; there is no caching, no retry policy, and no
//! shared state between calls. Collaborators are trait objects so hosts
//! wire in SDK-backed implementations and tests wire in stubs.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use gantry::{CertificateManager, DockerHostResolver, Settings};
//!
//! #[tokio::main]
//! async fn main() -> gantry::Result<()> {
//!     let settings = Settings::from_env()?;
//!     gantry::observability::init_tracing(&settings)?;
//!
//!     let resolver = DockerHostResolver::new(cluster_api, compute_api, settings);
//!     let docker = resolver.docker_client(None).await?;
//!
//!     let certificates = CertificateManager::new(cert_store, cert_authority);
//!     for certificate in certificates.list().await? {
//!         println!("{} ({})", certificate.domain, certificate.id);
//!     }
//!     Ok(())
//! }
//! ```

pub mod certificates;
pub mod config;
pub mod docker;
pub mod errors;
pub mod observability;

// Re-export commonly used types and traits
pub use certificates::store::{CertificateAuthority, CertificateStore};
pub use certificates::{Certificate, CertificateManager};
pub use config::Settings;
pub use docker::fleet::{ClusterApi, ComputeApi};
pub use docker::{DockerHostResolver, DOCKER_PORT};
pub use errors::{GantryError, Result};
pub use observability::init_tracing;

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
