// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Command line interface

use crate::install::InstallMode;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "olm-installer")]
#[command(about = "Install an operator from a catalog image through the Operator Lifecycle Manager")]
pub struct Cli {
    /// Path to a kubeconfig file; defaults to KUBECONFIG or ~/.kube/config
    #[arg(long, global = true)]
    pub kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use instead of the current one
    #[arg(long, global = true)]
    pub context: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a catalog source and subscription, approve the install plan, and wait for the CSV
    Run(RunArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Package name in the catalog
    #[arg(long, env = "OLM_PACKAGE")]
    pub package: String,

    /// CSV to install, e.g. memcached-operator.v0.0.1
    #[arg(long = "starting-csv", env = "OLM_STARTING_CSV")]
    pub starting_csv: String,

    /// Index image serving the catalog
    #[arg(long = "index-image", env = "OLM_INDEX_IMAGE")]
    pub index_image: String,

    /// Package channel; the package's default channel when omitted
    #[arg(long, env = "OLM_CHANNEL")]
    pub channel: Option<String>,

    /// Name of the CatalogSource to create; defaults to <package>-catalog
    #[arg(long = "catalog-name")]
    pub catalog_name: Option<String>,

    /// Display name of the CatalogSource; defaults to its name
    #[arg(long = "display-name")]
    pub display_name: Option<String>,

    /// Install namespace; defaults to the kubeconfig context's namespace
    #[arg(long, short = 'n', env = "OLM_NAMESPACE")]
    pub namespace: Option<String>,

    /// OwnNamespace, AllNamespaces, SingleNamespace=<ns> or MultiNamespace=<ns1>,<ns2>
    #[arg(long = "install-mode", default_value = "OwnNamespace")]
    pub install_mode: InstallMode,

    /// Pull secret for the index image, may be repeated
    #[arg(long = "pull-secret")]
    pub pull_secrets: Vec<String>,

    /// How to print the installed ClusterServiceVersion
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Summary)]
    pub output: OutputFormat,
}

impl RunArgs {
    pub fn catalog_source_name(&self) -> String {
        self.catalog_name
            .clone()
            .unwrap_or_else(|| format!("{}-catalog", self.package))
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Yaml,
    Json,
}
