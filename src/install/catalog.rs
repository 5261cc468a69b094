// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Catalog source creation

use crate::constants::{labels, OPERATOR_NAME};
use crate::error::Result;
use crate::types::{CatalogSource, CatalogSourceSpec};
use async_trait::async_trait;
use kube::{
    api::{ObjectMeta, PostParams},
    Api, Client, ResourceExt,
};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Creates the CatalogSource the subscription will install from
#[async_trait]
pub trait CatalogCreator: Send + Sync {
    async fn create_catalog(&self, name: &str) -> Result<CatalogSource>;
}

/// Serves a catalog from an index image through a grpc CatalogSource
#[derive(Clone)]
pub struct IndexImageCatalogCreator {
    client: Client,
    namespace: String,
    index_image: String,
    display_name: Option<String>,
    /// Pull secrets for the index image
    secrets: Vec<String>,
}

impl IndexImageCatalogCreator {
    pub fn new(client: Client, namespace: &str, index_image: &str) -> Self {
        Self {
            client,
            namespace: namespace.to_string(),
            index_image: index_image.to_string(),
            display_name: None,
            secrets: Vec::new(),
        }
    }

    pub fn with_display_name(mut self, display_name: &str) -> Self {
        self.display_name = Some(display_name.to_string());
        self
    }

    pub fn with_secrets(mut self, secrets: Vec<String>) -> Self {
        self.secrets = secrets;
        self
    }

    fn build_catalog_source(&self, name: &str) -> CatalogSource {
        CatalogSource {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some(self.namespace.clone()),
                labels: Some(BTreeMap::from([(
                    labels::MANAGED_BY.to_string(),
                    OPERATOR_NAME.to_string(),
                )])),
                ..Default::default()
            },
            spec: CatalogSourceSpec {
                source_type: "grpc".to_string(),
                image: Some(self.index_image.clone()),
                display_name: Some(self.display_name.clone().unwrap_or_else(|| name.to_string())),
                publisher: Some(OPERATOR_NAME.to_string()),
                secrets: (!self.secrets.is_empty()).then(|| self.secrets.clone()),
                ..Default::default()
            },
            status: None,
        }
    }
}

#[async_trait]
impl CatalogCreator for IndexImageCatalogCreator {
    #[instrument(skip(self), fields(namespace = %self.namespace, image = %self.index_image))]
    async fn create_catalog(&self, name: &str) -> Result<CatalogSource> {
        let catalogs: Api<CatalogSource> = Api::namespaced(self.client.clone(), &self.namespace);
        let cs = self.build_catalog_source(name);

        let created = catalogs.create(&PostParams::default(), &cs).await?;
        debug!(
            "CatalogSource {}/{} serving {}",
            self.namespace,
            created.name_any(),
            self.index_image
        );

        Ok(created)
    }
}
