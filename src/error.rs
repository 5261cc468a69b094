// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OlmError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("{context}: {source}")]
    KubeRequestError {
        context: String,
        #[source]
        source: kube::Error,
    },

    #[error("Failed to load kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("create catalog: {0}")]
    CatalogError(String),

    #[error("{0}")]
    OperatorGroupError(String),

    #[error("{0}")]
    SubscriptionError(String),

    #[error("{0}")]
    InstallPlanError(String),

    #[error("{0}")]
    CsvError(String),

    #[error("Invalid install mode: {0}")]
    InvalidInstallMode(String),

    #[error("Timed out after {elapsed:?} waiting for {what}")]
    Timeout { what: String, elapsed: Duration },
}

impl OlmError {
    /// Wrap a Kubernetes API error with the operation that failed
    pub fn kube(context: &str, source: kube::Error) -> Self {
        OlmError::KubeRequestError {
            context: context.to_string(),
            source,
        }
    }

    /// True when the API server rejected a write because of a stale resourceVersion
    pub fn is_conflict(&self) -> bool {
        match self {
            OlmError::KubeError(kube::Error::Api(err))
            | OlmError::KubeRequestError {
                source: kube::Error::Api(err),
                ..
            } => err.code == 409,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, OlmError>;
