//! Fleet inventory trait seams and descriptor types.
//!
//! Defines the interfaces for the two upstream inventory APIs the host
//! resolver consumes: the cluster orchestration API that tracks
//! container-instance membership, and the compute-instance API that knows
//! network addresses. Production wiring supplies SDK-backed implementations;
//! tests supply in-process stubs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// A cluster member as reported by the orchestration API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerInstance {
    /// Orchestration-API identifier for the container instance
    pub container_instance_arn: String,

    /// Backing compute-instance identifier, used to look up addresses
    pub ec2_instance_id: String,
}

/// A reservation returned by the compute-instance API.
///
/// The compute API groups instances by launch reservation; a lookup filtered
/// by a single instance id is expected to yield exactly one reservation
/// holding exactly one instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub instances: Vec<ComputeInstance>,
}

/// A compute instance with its network addresses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeInstance {
    pub instance_id: String,

    /// Address reachable from inside the platform VPC
    pub private_ip_address: Option<String>,

    /// Internet-facing address, present only for instances with one assigned
    pub public_ip_address: Option<String>,
}

/// Cluster orchestration API: container-instance membership of a named cluster.
///
/// Implementations must classify transport and API failures as
/// [`crate::errors::GantryError::Upstream`], preserving the original message.
#[async_trait]
pub trait ClusterApi: Send + Sync + std::fmt::Debug {
    /// List the container-instance identifiers registered to `cluster`.
    async fn list_container_instances(&self, cluster: &str) -> Result<Vec<String>>;

    /// Fetch full descriptors for the given container-instance identifiers.
    async fn describe_container_instances(
        &self,
        cluster: &str,
        container_instance_arns: &[String],
    ) -> Result<Vec<ContainerInstance>>;
}

/// Compute-instance inventory API: instance descriptions by identifier.
#[async_trait]
pub trait ComputeApi: Send + Sync + std::fmt::Debug {
    /// Describe compute instances filtered by the given instance id.
    async fn describe_instances(&self, instance_id: &str) -> Result<Vec<Reservation>>;
}
