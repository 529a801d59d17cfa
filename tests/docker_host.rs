//! Integration tests for Docker host resolution
//!
//! Drives the resolver through stub fleet APIs, covering address selection,
//! the error taxonomy, and the endpoint override precedence.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use gantry::docker::fleet::{
    ClusterApi, ComputeApi, ComputeInstance, ContainerInstance, Reservation,
};
use gantry::{DockerHostResolver, GantryError, Settings};

#[derive(Debug, Default)]
struct StubClusterApi {
    arns: Vec<String>,
    instances: Vec<ContainerInstance>,
}

impl StubClusterApi {
    fn with_member(instance_id: &str) -> Self {
        Self {
            arns: vec![format!(
                "arn:aws:ecs:us-east-1:123456789012:container-instance/{}",
                instance_id
            )],
            instances: vec![ContainerInstance {
                container_instance_arn: format!(
                    "arn:aws:ecs:us-east-1:123456789012:container-instance/{}",
                    instance_id
                ),
                ec2_instance_id: instance_id.to_string(),
            }],
        }
    }
}

#[async_trait]
impl ClusterApi for StubClusterApi {
    async fn list_container_instances(&self, _cluster: &str) -> gantry::Result<Vec<String>> {
        Ok(self.arns.clone())
    }

    async fn describe_container_instances(
        &self,
        _cluster: &str,
        _container_instance_arns: &[String],
    ) -> gantry::Result<Vec<ContainerInstance>> {
        Ok(self.instances.clone())
    }
}

#[derive(Debug, Default)]
struct StubComputeApi {
    reservations: Vec<Reservation>,
    calls: AtomicUsize,
}

impl StubComputeApi {
    fn with_instance(instance_id: &str, private_ip: Option<&str>, public_ip: Option<&str>) -> Self {
        Self {
            reservations: vec![Reservation {
                instances: vec![ComputeInstance {
                    instance_id: instance_id.to_string(),
                    private_ip_address: private_ip.map(str::to_string),
                    public_ip_address: public_ip.map(str::to_string),
                }],
            }],
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ComputeApi for StubComputeApi {
    async fn describe_instances(&self, _instance_id: &str) -> gantry::Result<Vec<Reservation>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reservations.clone())
    }
}

/// Fleet APIs that fail every call; used to prove a path never reaches them.
#[derive(Debug)]
struct UnreachableClusterApi;

#[async_trait]
impl ClusterApi for UnreachableClusterApi {
    async fn list_container_instances(&self, _cluster: &str) -> gantry::Result<Vec<String>> {
        Err(GantryError::upstream("fleet API should not have been called"))
    }

    async fn describe_container_instances(
        &self,
        _cluster: &str,
        _container_instance_arns: &[String],
    ) -> gantry::Result<Vec<ContainerInstance>> {
        Err(GantryError::upstream("fleet API should not have been called"))
    }
}

fn settings_for(cluster: &str) -> Settings {
    Settings { cluster: Some(cluster.to_string()), ..Default::default() }
}

#[tokio::test]
async fn test_resolves_private_address_by_default() {
    let cluster = Arc::new(StubClusterApi::with_member("i-0abc"));
    let compute = Arc::new(StubComputeApi::with_instance("i-0abc", Some("10.0.0.5"), Some("34.1.2.3")));
    let resolver = DockerHostResolver::new(cluster, compute, settings_for("production"));

    let endpoint = resolver.resolve().await.unwrap();
    assert_eq!(endpoint, "http://10.0.0.5:2376");
}

#[tokio::test]
async fn test_development_mode_selects_public_address() {
    let cluster = Arc::new(StubClusterApi::with_member("i-0abc"));
    let compute = Arc::new(StubComputeApi::with_instance("i-0abc", Some("10.0.0.5"), Some("34.1.2.3")));
    let settings = Settings { development: true, ..settings_for("production") };
    let resolver = DockerHostResolver::new(cluster, compute, settings);

    let endpoint = resolver.resolve().await.unwrap();
    assert_eq!(endpoint, "http://34.1.2.3:2376");
}

#[tokio::test]
async fn test_empty_cluster_is_not_found_without_compute_call() {
    let cluster = Arc::new(StubClusterApi::default());
    let compute = Arc::new(StubComputeApi::default());
    let resolver = DockerHostResolver::new(cluster, compute.clone(), settings_for("production"));

    let result = resolver.resolve().await;
    assert!(matches!(result, Err(GantryError::NotFound { .. })));
    assert_eq!(compute.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_empty_descriptor_list_is_not_found() {
    let cluster = Arc::new(StubClusterApi {
        arns: vec!["arn:aws:ecs:us-east-1:123:container-instance/i-0abc".to_string()],
        instances: vec![],
    });
    let compute = Arc::new(StubComputeApi::default());
    let resolver = DockerHostResolver::new(cluster, compute.clone(), settings_for("production"));

    let result = resolver.resolve().await;
    assert!(matches!(result, Err(GantryError::NotFound { .. })));
    assert_eq!(compute.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_two_reservations_is_invalid_state() {
    let cluster = Arc::new(StubClusterApi::with_member("i-0abc"));
    let single = StubComputeApi::with_instance("i-0abc", Some("10.0.0.5"), None);
    let compute = Arc::new(StubComputeApi {
        reservations: vec![single.reservations[0].clone(), single.reservations[0].clone()],
        calls: AtomicUsize::new(0),
    });
    let resolver = DockerHostResolver::new(cluster, compute, settings_for("production"));

    let result = resolver.resolve().await;
    assert!(matches!(result, Err(GantryError::InvalidState { .. })));
}

#[tokio::test]
async fn test_missing_chosen_address_is_invalid_state() {
    let cluster = Arc::new(StubClusterApi::with_member("i-0abc"));
    let compute = Arc::new(StubComputeApi::with_instance("i-0abc", None, Some("34.1.2.3")));
    let resolver = DockerHostResolver::new(cluster, compute, settings_for("production"));

    let result = resolver.resolve().await;
    assert!(matches!(result, Err(GantryError::InvalidState { .. })));
}

#[tokio::test]
async fn test_missing_cluster_configuration() {
    let cluster = Arc::new(StubClusterApi::with_member("i-0abc"));
    let compute = Arc::new(StubComputeApi::with_instance("i-0abc", Some("10.0.0.5"), None));
    let resolver = DockerHostResolver::new(cluster, compute, Settings::default());

    let result = resolver.resolve().await;
    assert!(matches!(result, Err(GantryError::Config { .. })));
}

#[tokio::test]
async fn test_fleet_failure_propagates_as_upstream() {
    let compute = Arc::new(StubComputeApi::default());
    let resolver =
        DockerHostResolver::new(Arc::new(UnreachableClusterApi), compute, settings_for("production"));

    let result = resolver.resolve().await;
    assert!(matches!(result, Err(GantryError::Upstream { .. })));
}

#[tokio::test]
async fn test_explicit_host_skips_resolution() {
    let compute = Arc::new(StubComputeApi::default());
    let resolver =
        DockerHostResolver::new(Arc::new(UnreachableClusterApi), compute, settings_for("production"));

    // The fleet stubs fail every call, so success proves resolution was skipped.
    let client = resolver.docker_client(Some("http://10.9.9.9:2376")).await;
    assert!(client.is_ok());
}

#[tokio::test]
async fn test_configured_host_override_skips_resolution() {
    let compute = Arc::new(StubComputeApi::default());
    let settings = Settings {
        docker_host: Some("http://10.8.8.8:2376".to_string()),
        ..settings_for("production")
    };
    let resolver = DockerHostResolver::new(Arc::new(UnreachableClusterApi), compute, settings);

    let client = resolver.docker_client(None).await;
    assert!(client.is_ok());
}

#[tokio::test]
async fn test_test_override_beats_every_other_source() {
    let compute = Arc::new(StubComputeApi::default());
    let settings = Settings {
        docker_host: Some("http://10.8.8.8:2376".to_string()),
        test_docker_host: Some("http://127.0.0.1:2376".to_string()),
        ..settings_for("production")
    };
    let resolver = DockerHostResolver::new(Arc::new(UnreachableClusterApi), compute, settings);

    let client = resolver.docker_client(Some("http://10.9.9.9:2376")).await;
    assert!(client.is_ok());
}
