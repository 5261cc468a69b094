// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Client creation from kubeconfig files or the in-cluster environment

use crate::error::{OlmError, Result};
use kube::{
    config::{KubeConfigOptions, Kubeconfig},
    Client, Config as KConfig,
};
use std::path::Path;
use tracing::{debug, instrument};

/// Create a Kubernetes client.
///
/// With an explicit kubeconfig path the file is read directly; otherwise the
/// usual inference applies (`KUBECONFIG`, `~/.kube/config`, in-cluster). An
/// optional context overrides the kubeconfig's current context.
#[instrument]
pub async fn create_client(kubeconfig: Option<&Path>, context: Option<&str>) -> Result<Client> {
    let options = KubeConfigOptions {
        context: context.map(String::from),
        ..Default::default()
    };

    let client_config = match kubeconfig {
        Some(path) => {
            let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
                OlmError::KubeconfigError(format!(
                    "Failed to read kubeconfig {}: {}",
                    path.display(),
                    e
                ))
            })?;
            KConfig::from_custom_kubeconfig(kubeconfig, &options)
                .await
                .map_err(|e| {
                    OlmError::KubeconfigError(format!("Failed to create config: {}", e))
                })?
        }
        None if context.is_some() => KConfig::from_kubeconfig(&options)
            .await
            .map_err(|e| OlmError::KubeconfigError(format!("Failed to create config: {}", e)))?,
        None => KConfig::infer()
            .await
            .map_err(|e| OlmError::KubeconfigError(format!("Failed to infer config: {}", e)))?,
    };

    debug!(
        "Using cluster {} with default namespace {}",
        client_config.cluster_url, client_config.default_namespace
    );

    Client::try_from(client_config)
        .map_err(|e| OlmError::KubeconfigError(format!("Failed to create client: {}", e)))
}
