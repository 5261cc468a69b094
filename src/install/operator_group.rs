// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! OperatorGroup lookup, compatibility checks, and creation.
//!
//! A namespace may hold at most one OperatorGroup; CSVs in a namespace with
//! several groups fail. The installer therefore reuses an existing group when
//! its namespaces match the request exactly and refuses to touch it otherwise.

use crate::constants::{labels, OPERATOR_NAME, SDK_OPERATOR_GROUP_NAME};
use crate::error::{OlmError, Result};
use crate::types::{OperatorGroup, OperatorGroupSpec};
use kube::{
    api::{ListParams, ObjectMeta, PostParams},
    Api, Client, ResourceExt,
};
use std::collections::BTreeMap;
use tracing::{info, instrument};

/// Find the single OperatorGroup in `namespace`, if any
#[instrument(skip(client))]
pub async fn get_operator_group(client: &Client, namespace: &str) -> Result<Option<OperatorGroup>> {
    let groups: Api<OperatorGroup> = Api::namespaced(client.clone(), namespace);
    let mut items = groups.list(&ListParams::default()).await?.items;

    match items.len() {
        0 => Ok(None),
        1 => Ok(items.pop()),
        _ => {
            let names: Vec<String> = items.iter().map(|og| og.name_any()).collect();
            Err(OlmError::OperatorGroupError(format!(
                "more than one operator group in namespace {}: {:?}",
                namespace, names
            )))
        }
    }
}

/// Check that an existing group targets exactly the desired namespaces
pub fn check_compatibility(og: &OperatorGroup, desired: &[String], package: &str) -> Result<()> {
    let existing = og.status_namespaces();
    let mut desired = desired.to_vec();
    desired.sort();

    if existing == desired {
        return Ok(());
    }

    let msg = format!(
        "namespaces {:?} do not match desired namespaces {:?}",
        existing, desired
    );
    if og.name_any() == SDK_OPERATOR_GROUP_NAME {
        return Err(OlmError::OperatorGroupError(format!(
            "existing SDK-managed operator group's {}, please clean up existing operators before running package {:?}",
            msg, package
        )));
    }
    Err(OlmError::OperatorGroupError(format!(
        "existing operator group {:?}'s {}, please ensure it has the exact namespace set before running package {:?}",
        og.name_any(),
        msg,
        package
    )))
}

/// Build the OperatorGroup this tool manages. An empty target set means all namespaces.
pub fn new_sdk_operator_group(namespace: &str, target_namespaces: &[String]) -> OperatorGroup {
    OperatorGroup {
        metadata: ObjectMeta {
            name: Some(SDK_OPERATOR_GROUP_NAME.to_string()),
            namespace: Some(namespace.to_string()),
            labels: Some(BTreeMap::from([(
                labels::MANAGED_BY.to_string(),
                OPERATOR_NAME.to_string(),
            )])),
            ..Default::default()
        },
        spec: OperatorGroupSpec {
            target_namespaces: (!target_namespaces.is_empty()).then(|| target_namespaces.to_vec()),
        },
        status: None,
    }
}

/// Reuse a compatible OperatorGroup or create the SDK-managed one
#[instrument(skip(client, target_namespaces))]
pub async fn ensure_operator_group(
    client: &Client,
    namespace: &str,
    target_namespaces: &[String],
    package: &str,
) -> Result<OperatorGroup> {
    // TODO: status.namespaces can lag behind a freshly created group; poll before comparing
    if let Some(og) = get_operator_group(client, namespace).await? {
        check_compatibility(&og, target_namespaces, package)?;
        info!("Using existing operator group {:?}", og.name_any());
        return Ok(og);
    }

    let groups: Api<OperatorGroup> = Api::namespaced(client.clone(), namespace);
    let og = new_sdk_operator_group(namespace, target_namespaces);
    let created = groups
        .create(&PostParams::default(), &og)
        .await
        .map_err(|e| OlmError::OperatorGroupError(format!("error creating OperatorGroup: {}", e)))?;
    info!("Created OperatorGroup: {}", created.name_any());

    Ok(created)
}
