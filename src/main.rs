// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use clap::Parser;
use kube::ResourceExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

use olm_installer::cli::{Cli, Commands, OutputFormat, RunArgs};
use olm_installer::config::Config;
use olm_installer::install::{IndexImageCatalogCreator, OperatorInstaller};
use olm_installer::kubernetes::create_client;
use olm_installer::types::ClusterServiceVersion;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: install_timeout={:?}, wait_for_catalog_source={}",
        config.install_timeout, config.wait_for_catalog_source
    );

    let client = create_client(cli.kubeconfig.as_deref(), cli.context.as_deref())
        .await
        .context("Failed to connect to Kubernetes cluster")?;

    match cli.command {
        Commands::Run(args) => run(client, config, args).await,
    }
}

async fn run(client: kube::Client, config: Config, args: RunArgs) -> Result<()> {
    let namespace = args
        .namespace
        .clone()
        .unwrap_or_else(|| client.default_namespace().to_string());

    let mut creator = IndexImageCatalogCreator::new(client.clone(), &namespace, &args.index_image)
        .with_secrets(args.pull_secrets.clone());
    if let Some(display_name) = &args.display_name {
        creator = creator.with_display_name(display_name);
    }

    let mut installer = OperatorInstaller::new(client, &namespace, config, Box::new(creator));
    installer.catalog_source_name = args.catalog_source_name();
    installer.package_name = args.package.clone();
    installer.starting_csv = args.starting_csv.clone();
    installer.channel = args.channel.clone();
    installer.install_mode = args.install_mode.clone();

    info!(
        "Installing package {:?} ({}) into namespace {} with install mode {}",
        installer.package_name,
        installer.starting_csv,
        installer.namespace(),
        installer.install_mode
    );

    let csv = installer
        .install_operator()
        .await
        .with_context(|| format!("Failed to install {}", args.starting_csv))?;

    print_csv(&csv, args.output)
}

fn print_csv(csv: &ClusterServiceVersion, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Summary => {
            println!(
                "{}\t{}\t{}\t{}",
                csv.name_any(),
                csv.spec.display_name,
                csv.spec.version.as_deref().unwrap_or("-"),
                csv.phase().unwrap_or("Unknown")
            );
        }
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(csv)?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(csv)?),
    }
    Ok(())
}
