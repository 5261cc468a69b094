// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::status::{CSV_FAILED, CSV_SUCCEEDED};
use kube::CustomResource;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(
    group = "operators.coreos.com",
    version = "v1alpha1",
    kind = "ClusterServiceVersion",
    plural = "clusterserviceversions",
    shortname = "csv"
)]
#[kube(namespaced)]
#[kube(status = "ClusterServiceVersionStatus")]
#[serde(rename_all = "camelCase")]
pub struct ClusterServiceVersionSpec {
    #[serde(default)]
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ClusterServiceVersion {
    pub fn phase(&self) -> Option<&str> {
        self.status.as_ref().and_then(|s| s.phase.as_deref())
    }

    pub fn is_succeeded(&self) -> bool {
        self.phase() == Some(CSV_SUCCEEDED)
    }

    /// Reason and message reported by OLM when the CSV landed in the Failed phase
    pub fn failure_message(&self) -> Option<String> {
        if self.phase() != Some(CSV_FAILED) {
            return None;
        }
        let status = self.status.as_ref()?;
        Some(format!(
            "reason: {:?}, message: {:?}",
            status.reason.as_deref().unwrap_or_default(),
            status.message.as_deref().unwrap_or_default()
        ))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClusterServiceVersionStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
