// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Name given to OperatorGroups created by this tool
pub const SDK_OPERATOR_GROUP_NAME: &str = "operator-sdk-og";

/// Value written to the managed-by label and used as field manager
pub const OPERATOR_NAME: &str = "olm-installer";

/// Labels stamped on resources created by the installer
pub mod labels {
    pub const MANAGED_BY: &str = "app.kubernetes.io/managed-by";
}

/// Status values reported by OLM
pub mod status {
    /// CatalogSource gRPC connection state once the registry pod is serving
    pub const CATALOG_READY: &str = "READY";
    pub const CSV_SUCCEEDED: &str = "Succeeded";
    pub const CSV_FAILED: &str = "Failed";
}

/// Polling and retry configuration
pub mod wait {
    /// Default interval for catalog source and install plan polling
    pub const POLL_INTERVAL_MS: u64 = 200;
    /// Default interval for CSV phase polling
    pub const CSV_POLL_INTERVAL_MS: u64 = 1000;
    /// Default deadline for the whole install
    pub const INSTALL_TIMEOUT_SECS: u64 = 120;
}
