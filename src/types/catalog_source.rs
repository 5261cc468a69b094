// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::status::CATALOG_READY;
use kube::CustomResource;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(
    group = "operators.coreos.com",
    version = "v1alpha1",
    kind = "CatalogSource",
    plural = "catalogsources"
)]
#[kube(namespaced)]
#[kube(status = "CatalogSourceStatus")]
#[serde(rename_all = "camelCase")]
pub struct CatalogSourceSpec {
    /// "grpc", "internal" or "configmap"
    pub source_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secrets: Option<Vec<String>>,
}

impl CatalogSource {
    /// Check if the registry connection has been observed as READY
    pub fn is_ready(&self) -> bool {
        self.status
            .as_ref()
            .and_then(|s| s.connection_state.as_ref())
            .is_some_and(|c| c.last_observed_state == CATALOG_READY)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSourceStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_state: Option<GrpcConnectionState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrpcConnectionState {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub last_observed_state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_connect: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_catalog(status: Option<CatalogSourceStatus>) -> CatalogSource {
        let mut cs = CatalogSource::new(
            "memcached-catalog",
            CatalogSourceSpec {
                source_type: "grpc".to_string(),
                ..Default::default()
            },
        );
        cs.status = status;
        cs
    }

    fn with_state(state: &str) -> Option<CatalogSourceStatus> {
        Some(CatalogSourceStatus {
            connection_state: Some(GrpcConnectionState {
                address: "memcached-catalog.default.svc:50051".to_string(),
                last_observed_state: state.to_string(),
                last_connect: None,
            }),
            ..Default::default()
        })
    }

    #[test]
    fn test_is_ready_when_connection_ready() {
        assert!(make_catalog(with_state("READY")).is_ready());
    }

    #[test]
    fn test_is_not_ready_while_connecting() {
        assert!(!make_catalog(with_state("CONNECTING")).is_ready());
        assert!(!make_catalog(with_state("TRANSIENT_FAILURE")).is_ready());
    }

    #[test]
    fn test_is_not_ready_without_connection_state() {
        assert!(!make_catalog(Some(CatalogSourceStatus::default())).is_ready());
        assert!(!make_catalog(None).is_ready());
    }

    #[test]
    fn test_deserializes_olm_status() {
        let cs: CatalogSource = serde_json::from_value(serde_json::json!({
            "apiVersion": "operators.coreos.com/v1alpha1",
            "kind": "CatalogSource",
            "metadata": {"name": "memcached-catalog", "namespace": "default"},
            "spec": {"sourceType": "grpc", "image": "quay.io/example/index:v0.0.1", "grpcPodConfig": {}},
            "status": {"connectionState": {"address": "x:50051", "lastObservedState": "READY"}}
        }))
        .unwrap();

        assert_eq!(cs.spec.image.as_deref(), Some("quay.io/example/index:v0.0.1"));
        assert!(cs.is_ready());
    }
}
