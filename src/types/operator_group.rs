// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::CustomResource;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(
    group = "operators.coreos.com",
    version = "v1",
    kind = "OperatorGroup",
    plural = "operatorgroups"
)]
#[kube(namespaced)]
#[kube(status = "OperatorGroupStatus")]
#[serde(rename_all = "camelCase")]
pub struct OperatorGroupSpec {
    /// Absent means the group targets all namespaces
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_namespaces: Option<Vec<String>>,
}

impl OperatorGroup {
    /// Namespaces OLM has resolved for this group, sorted.
    ///
    /// A missing status reads as no namespaces, and the all-namespaces marker
    /// `[""]` reads as empty so it compares equal to an AllNamespaces request.
    pub fn status_namespaces(&self) -> Vec<String> {
        let mut namespaces: Vec<String> = self
            .status
            .as_ref()
            .and_then(|s| s.namespaces.clone())
            .unwrap_or_default()
            .into_iter()
            .filter(|ns| !ns.is_empty())
            .collect();
        namespaces.sort();
        namespaces
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperatorGroupStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespaces: Option<Vec<String>>,
}
