//! # Docker Host Discovery
//!
//! Resolves the endpoint of a Docker daemon running somewhere on the
//! cluster's container-instance fleet, and constructs Docker clients
//! against it.
//!
//! Resolution is a chain of single-shot inventory lookups: list the
//! cluster's container instances, pick one at random (load spreading, not
//! correctness), resolve its compute-instance description to a network
//! address, and format the daemon URL. Nothing is cached or retried; a
//! transient upstream failure surfaces immediately to the caller.

pub mod fleet;

use std::sync::Arc;

use bollard::{Docker, API_DEFAULT_VERSION};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::Settings;
use crate::errors::{GantryError, Result};
use fleet::{ClusterApi, ComputeApi, ContainerInstance};

pub use fleet::{ComputeInstance, Reservation};

/// TCP port the fleet's Docker daemons listen on
pub const DOCKER_PORT: u16 = 2376;

/// Request timeout, in seconds, for constructed Docker clients
const DOCKER_CLIENT_TIMEOUT_SECS: u64 = 120;

/// Resolves Docker daemon endpoints from the cluster's fleet inventory.
///
/// Holds handles to the two inventory APIs plus the adapter [`Settings`];
/// each resolution is independent and stateless.
#[derive(Debug, Clone)]
pub struct DockerHostResolver {
    cluster_api: Arc<dyn ClusterApi>,
    compute_api: Arc<dyn ComputeApi>,
    settings: Settings,
}

impl DockerHostResolver {
    /// Create a resolver over the given inventory APIs.
    pub fn new(
        cluster_api: Arc<dyn ClusterApi>,
        compute_api: Arc<dyn ComputeApi>,
        settings: Settings,
    ) -> Self {
        Self { cluster_api, compute_api, settings }
    }

    /// Resolve a Docker daemon endpoint for the configured cluster.
    ///
    /// Returns a URL of the form `http://<address>:2376`, where the address
    /// is the chosen instance's private IP, or its public IP when the
    /// development flag is set.
    ///
    /// Note the overrides in [`DockerHostResolver::docker_client`]: an
    /// explicit host or the test override variable skip resolution entirely.
    pub async fn resolve(&self) -> Result<String> {
        self.resolve_with_rng(&mut StdRng::from_entropy()).await
    }

    /// [`DockerHostResolver::resolve`] with an injected random source.
    pub async fn resolve_with_rng<R: Rng + Send>(&self, rng: &mut R) -> Result<String> {
        let cluster = self
            .settings
            .cluster
            .as_deref()
            .ok_or_else(|| GantryError::config("cluster identifier is not configured"))?;

        let arns = self.cluster_api.list_container_instances(cluster).await?;
        if arns.is_empty() {
            return Err(GantryError::not_found(format!(
                "no container instances in cluster '{}'",
                cluster
            )));
        }

        let instances = self.cluster_api.describe_container_instances(cluster, &arns).await?;
        if instances.is_empty() {
            return Err(GantryError::not_found(format!(
                "no container instances in cluster '{}'",
                cluster
            )));
        }

        let chosen = pick_container_instance(rng, &instances);
        debug!(
            cluster = %cluster,
            instance_id = %chosen.ec2_instance_id,
            candidates = instances.len(),
            "selected container instance"
        );

        let reservations = self.compute_api.describe_instances(&chosen.ec2_instance_id).await?;
        if reservations.len() != 1 || reservations[0].instances.len() != 1 {
            return Err(GantryError::invalid_state(format!(
                "could not describe container instance '{}': expected exactly one reservation \
                 with one instance",
                chosen.ec2_instance_id
            )));
        }
        let instance = &reservations[0].instances[0];

        let address = if self.settings.development {
            instance.public_ip_address.as_deref()
        } else {
            instance.private_ip_address.as_deref()
        };
        let address = address.ok_or_else(|| {
            GantryError::invalid_state(format!(
                "instance '{}' has no {} IP address",
                instance.instance_id,
                if self.settings.development { "public" } else { "private" }
            ))
        })?;

        let endpoint = format!("http://{}:{}", address, DOCKER_PORT);
        info!(
            cluster = %cluster,
            endpoint = %endpoint,
            development = self.settings.development,
            "resolved docker host"
        );
        Ok(endpoint)
    }

    /// Construct a Docker client against the fleet.
    ///
    /// The endpoint is taken from, in order: the `host` argument, the
    /// configured explicit host override, or fleet resolution. When the
    /// test-only override is configured it replaces whichever endpoint was
    /// chosen.
    pub async fn docker_client(&self, host: Option<&str>) -> Result<Docker> {
        let mut endpoint = match host {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => match self.settings.docker_host.clone() {
                Some(host) => host,
                None => self.resolve().await?,
            },
        };

        if let Some(test_host) = &self.settings.test_docker_host {
            endpoint = test_host.clone();
        }

        debug!(endpoint = %endpoint, "constructing docker client");
        Docker::connect_with_http(&endpoint, DOCKER_CLIENT_TIMEOUT_SECS, API_DEFAULT_VERSION)
            .map_err(|err| {
                GantryError::invalid_input(format!("invalid docker endpoint '{}': {}", endpoint, err))
            })
    }
}

/// Uniformly select one container instance.
///
/// Load-spreading only; any member is assumed equally valid as a Docker
/// host. Callers must pass a non-empty slice.
fn pick_container_instance<'a, R: Rng>(
    rng: &mut R,
    instances: &'a [ContainerInstance],
) -> &'a ContainerInstance {
    &instances[rng.gen_range(0..instances.len())]
}
