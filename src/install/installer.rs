// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! End-to-end operator installation through OLM

use crate::config::Config;
use crate::constants::{labels, OPERATOR_NAME};
use crate::error::{OlmError, Result};
use crate::install::catalog::CatalogCreator;
use crate::install::install_mode::InstallMode;
use crate::install::operator_group::ensure_operator_group;
use crate::kubernetes::wait::conditions;
use crate::kubernetes::{
    poll_immediate_until, retry_on_conflict, wait_for_condition, with_deadline, Backoff,
};
use crate::types::{
    Approval, CatalogSource, ClusterServiceVersion, InstallPlan, Subscription, SubscriptionSpec,
};
use kube::{
    api::{ObjectMeta, Patch, PatchParams, PostParams},
    Api, Client, ResourceExt,
};
use std::collections::BTreeMap;
use tokio::time::Instant;
use tracing::{info, instrument};

/// Installs one package from a catalog into a namespace and waits for its CSV
pub struct OperatorInstaller {
    pub catalog_source_name: String,
    pub package_name: String,
    pub starting_csv: String,
    pub channel: Option<String>,
    pub install_mode: InstallMode,
    pub catalog_creator: Box<dyn CatalogCreator>,
    /// Backoff for the install plan approval update
    pub approval_backoff: Backoff,

    client: Client,
    namespace: String,
    config: Config,
}

impl OperatorInstaller {
    pub fn new(
        client: Client,
        namespace: &str,
        config: Config,
        catalog_creator: Box<dyn CatalogCreator>,
    ) -> Self {
        Self {
            catalog_source_name: String::new(),
            package_name: String::new(),
            starting_csv: String::new(),
            channel: None,
            install_mode: InstallMode::default(),
            catalog_creator,
            approval_backoff: Backoff::default(),
            client,
            namespace: namespace.to_string(),
            config,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Run the whole install and return the CSV once it has Succeeded.
    ///
    /// Every step, including requests still in flight, is bounded by one
    /// deadline `install_timeout` from now.
    #[instrument(skip(self), fields(package = %self.package_name, csv = %self.starting_csv, namespace = %self.namespace))]
    pub async fn install_operator(&self) -> Result<ClusterServiceVersion> {
        let deadline = Instant::now() + self.config.install_timeout;

        let cs = with_deadline("catalog source creation", deadline, async {
            self.catalog_creator
                .create_catalog(&self.catalog_source_name)
                .await
                .map_err(|e| OlmError::CatalogError(e.to_string()))
        })
        .await?;
        info!("Created CatalogSource: {}", cs.name_any());

        if self.config.wait_for_catalog_source {
            self.wait_for_catalog_source(&cs, deadline).await?;
        }

        let target_namespaces = self.install_mode.resolve_target_namespaces(&self.namespace);
        with_deadline(
            "operator group",
            deadline,
            ensure_operator_group(
                &self.client,
                &self.namespace,
                &target_namespaces,
                &self.package_name,
            ),
        )
        .await?;

        let subscription =
            with_deadline("subscription creation", deadline, self.create_subscription(&cs)).await?;
        let subscription = self.wait_for_install_plan(&subscription, deadline).await?;
        with_deadline(
            "install plan approval",
            deadline,
            self.approve_install_plan(&subscription),
        )
        .await?;
        let csv = self.get_installed_csv(deadline).await?;

        info!("OLM has successfully installed {:?}", self.starting_csv);
        Ok(csv)
    }

    /// Wait until the catalog's registry connection reports READY
    async fn wait_for_catalog_source(
        &self,
        cs: &CatalogSource,
        deadline: Instant,
    ) -> Result<CatalogSource> {
        let catalogs: Api<CatalogSource> = Api::namespaced(
            self.client.clone(),
            &cs.namespace().unwrap_or_else(|| self.namespace.clone()),
        );
        let name = cs.name_any();
        info!("Waiting for CatalogSource {:?} connection to be READY", name);

        wait_for_condition(
            &catalogs,
            &name,
            &format!("catalog source {} connection", name),
            self.config.poll_interval,
            deadline,
            conditions::is_catalog_source_ready(),
        )
        .await
        .map_err(|e| match e {
            e @ OlmError::Timeout { .. } => e,
            e => OlmError::CatalogError(format!("catalog source connection is not ready: {}", e)),
        })
    }

    fn build_subscription(&self, cs: &CatalogSource) -> Subscription {
        Subscription {
            metadata: ObjectMeta {
                name: Some(self.starting_csv.clone()),
                namespace: Some(self.namespace.clone()),
                labels: Some(BTreeMap::from([(
                    labels::MANAGED_BY.to_string(),
                    OPERATOR_NAME.to_string(),
                )])),
                ..Default::default()
            },
            spec: SubscriptionSpec {
                source: cs.name_any(),
                source_namespace: self.namespace.clone(),
                name: self.package_name.clone(),
                channel: self.channel.clone().filter(|c| !c.is_empty()),
                starting_csv: Some(self.starting_csv.clone()),
                install_plan_approval: Some(Approval::Manual),
            },
            status: None,
        }
    }

    async fn create_subscription(&self, cs: &CatalogSource) -> Result<Subscription> {
        let subscriptions: Api<Subscription> = Api::namespaced(self.client.clone(), &self.namespace);
        let sub = self.build_subscription(cs);

        let created = subscriptions
            .create(&PostParams::default(), &sub)
            .await
            .map_err(|e| OlmError::SubscriptionError(format!("error creating subscription: {}", e)))?;
        info!("Created Subscription: {}", created.name_any());

        Ok(created)
    }

    /// Poll the subscription until OLM links the generated install plan
    async fn wait_for_install_plan(&self, sub: &Subscription, deadline: Instant) -> Result<Subscription> {
        let subscriptions: Api<Subscription> = Api::namespaced(
            self.client.clone(),
            &sub.namespace().unwrap_or_else(|| self.namespace.clone()),
        );
        let name = sub.name_any();

        wait_for_condition(
            &subscriptions,
            &name,
            &format!("install plan of subscription {}", name),
            self.config.poll_interval,
            deadline,
            conditions::has_install_plan_ref(),
        )
        .await
        .map_err(|e| match e {
            e @ OlmError::Timeout { .. } => e,
            e => OlmError::SubscriptionError(format!(
                "install plan is not available for the subscription {}: {}",
                name, e
            )),
        })
    }

    /// Set `spec.approved` on the subscription's install plan, retrying on write conflicts
    async fn approve_install_plan(&self, sub: &Subscription) -> Result<()> {
        let ip_ref = sub.install_plan_ref().ok_or_else(|| {
            OlmError::InstallPlanError(format!(
                "subscription {} has no install plan reference",
                sub.name_any()
            ))
        })?;
        let ip_namespace = ip_ref
            .namespace
            .clone()
            .or_else(|| sub.namespace())
            .unwrap_or_else(|| self.namespace.clone());
        let plans: Api<InstallPlan> = Api::namespaced(self.client.clone(), &ip_namespace);
        let plans = &plans;
        let ip_name = ip_ref.name.as_str();

        retry_on_conflict(&self.approval_backoff, move || async move {
            let ip = plans
                .get(ip_name)
                .await
                .map_err(|e| OlmError::kube("error getting install plan", e))?;
            // Guard the write with the version just read so a concurrent update yields 409
            let patch = serde_json::json!({
                "metadata": {"resourceVersion": ip.resource_version()},
                "spec": {"approved": true}
            });
            plans
                .patch(ip_name, &PatchParams::default(), &Patch::Merge(&patch))
                .await
                .map_err(|e| OlmError::kube("error approving install plan", e))?;
            Ok::<_, OlmError>(())
        })
        .await?;

        info!(
            "Approved InstallPlan {} for the Subscription: {}",
            ip_name,
            sub.name_any()
        );
        Ok(())
    }

    /// Wait for the starting CSV to reach the Succeeded phase in the install namespace.
    ///
    /// The CSV is only copied into namespaces the operator group targets, so an
    /// install namespace outside that set never sees it and this times out.
    async fn get_installed_csv(&self, deadline: Instant) -> Result<ClusterServiceVersion> {
        let csvs: Api<ClusterServiceVersion> = Api::namespaced(self.client.clone(), &self.namespace);
        let csvs = &csvs;
        let name = self.starting_csv.as_str();
        info!(
            "Waiting for ClusterServiceVersion {:?} to reach 'Succeeded' phase",
            format!("{}/{}", self.namespace, name)
        );

        poll_immediate_until(
            &format!("ClusterServiceVersion {}", name),
            self.config.csv_poll_interval,
            deadline,
            move || async move {
                let csv = match csvs.get_opt(name).await? {
                    Some(csv) => csv,
                    None => return Ok(None),
                };
                if let Some(msg) = csv.failure_message() {
                    return Err(OlmError::CsvError(format!("csv failed: {}", msg)));
                }
                Ok::<_, OlmError>(csv.is_succeeded().then_some(csv))
            },
        )
        .await
        .map_err(|e| match e {
            OlmError::CsvError(msg) => {
                OlmError::CsvError(format!("error waiting for CSV to install: {}", msg))
            }
            e => e,
        })
    }
}
