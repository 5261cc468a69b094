// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed views of the OLM custom resources the installer reads and writes.
//!
//! Only the fields the install workflow needs are modelled. Everything else is
//! dropped on deserialization, so objects read through these types must never be
//! written back wholesale; updates go through merge patches instead.

pub mod catalog_source;
pub mod csv;
pub mod install_plan;
pub mod operator_group;
pub mod subscription;

pub use catalog_source::{CatalogSource, CatalogSourceSpec};
pub use csv::{ClusterServiceVersion, ClusterServiceVersionSpec};
pub use install_plan::{Approval, InstallPlan, InstallPlanSpec};
pub use operator_group::{OperatorGroup, OperatorGroupSpec};
pub use subscription::{Subscription, SubscriptionSpec};
