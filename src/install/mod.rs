// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Operator installation through OLM: catalog, operator group, subscription,
//! install plan approval, and CSV readiness.

pub mod catalog;
pub mod install_mode;
pub mod installer;
pub mod operator_group;

pub use catalog::{CatalogCreator, IndexImageCatalogCreator};
pub use install_mode::{InstallMode, InstallModeType};
pub use installer::OperatorInstaller;
