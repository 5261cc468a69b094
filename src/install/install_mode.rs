// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::error::{OlmError, Result};
use std::fmt;
use std::str::FromStr;

/// OLM install mode types, named as they appear in a CSV's `installModes`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallModeType {
    OwnNamespace,
    SingleNamespace,
    MultiNamespace,
    AllNamespaces,
}

impl InstallModeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallModeType::OwnNamespace => "OwnNamespace",
            InstallModeType::SingleNamespace => "SingleNamespace",
            InstallModeType::MultiNamespace => "MultiNamespace",
            InstallModeType::AllNamespaces => "AllNamespaces",
        }
    }
}

impl fmt::Display for InstallModeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstallModeType {
    type Err = OlmError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "OwnNamespace" => Ok(InstallModeType::OwnNamespace),
            "SingleNamespace" => Ok(InstallModeType::SingleNamespace),
            "MultiNamespace" => Ok(InstallModeType::MultiNamespace),
            "AllNamespaces" => Ok(InstallModeType::AllNamespaces),
            other => Err(OlmError::InvalidInstallMode(format!(
                "unknown install mode type {:?}, expected one of OwnNamespace, SingleNamespace, MultiNamespace, AllNamespaces",
                other
            ))),
        }
    }
}

/// Install mode plus the namespaces the operator should watch.
///
/// Text form is `<Type>[=ns1,ns2,...]`, e.g. `OwnNamespace`,
/// `SingleNamespace=team-a` or `MultiNamespace=team-a,team-b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallMode {
    pub mode_type: InstallModeType,
    pub target_namespaces: Vec<String>,
}

impl Default for InstallMode {
    fn default() -> Self {
        InstallMode {
            mode_type: InstallModeType::OwnNamespace,
            target_namespaces: Vec::new(),
        }
    }
}

impl InstallMode {
    /// Namespaces the OperatorGroup must target for this mode.
    /// AllNamespaces targets everything, which OLM expresses as an empty set.
    pub fn resolve_target_namespaces(&self, install_namespace: &str) -> Vec<String> {
        match self.mode_type {
            InstallModeType::OwnNamespace => vec![install_namespace.to_string()],
            InstallModeType::AllNamespaces => Vec::new(),
            InstallModeType::SingleNamespace | InstallModeType::MultiNamespace => {
                self.target_namespaces.clone()
            }
        }
    }
}

impl FromStr for InstallMode {
    type Err = OlmError;

    fn from_str(s: &str) -> Result<Self> {
        let (type_str, namespaces) = match s.split_once('=') {
            Some((t, ns)) => (t.trim(), Some(ns)),
            None => (s.trim(), None),
        };
        let mode_type: InstallModeType = type_str.parse()?;

        let target_namespaces: Vec<String> = namespaces
            .map(|ns| {
                ns.split(',')
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        match mode_type {
            InstallModeType::OwnNamespace | InstallModeType::AllNamespaces
                if namespaces.is_some() =>
            {
                Err(OlmError::InvalidInstallMode(format!(
                    "install mode {} does not take target namespaces",
                    mode_type
                )))
            }
            InstallModeType::SingleNamespace if target_namespaces.len() != 1 => {
                Err(OlmError::InvalidInstallMode(format!(
                    "install mode {} requires exactly one target namespace, got {}",
                    mode_type,
                    target_namespaces.len()
                )))
            }
            InstallModeType::MultiNamespace if target_namespaces.is_empty() => {
                Err(OlmError::InvalidInstallMode(format!(
                    "install mode {} requires at least one target namespace",
                    mode_type
                )))
            }
            _ => Ok(InstallMode {
                mode_type,
                target_namespaces,
            }),
        }
    }
}

impl fmt::Display for InstallMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.target_namespaces.is_empty() {
            write!(f, "{}", self.mode_type)
        } else {
            write!(f, "{}={}", self.mode_type, self.target_namespaces.join(","))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_own_namespace() {
        let mode: InstallMode = "OwnNamespace".parse().unwrap();
        assert_eq!(mode, InstallMode::default());
        assert_eq!(mode.resolve_target_namespaces("operators"), vec!["operators"]);
    }

    #[test]
    fn test_parse_all_namespaces() {
        let mode: InstallMode = "AllNamespaces".parse().unwrap();
        assert_eq!(mode.mode_type, InstallModeType::AllNamespaces);
        assert!(mode.resolve_target_namespaces("operators").is_empty());
    }

    #[test]
    fn test_parse_single_namespace() {
        let mode: InstallMode = "SingleNamespace=team-a".parse().unwrap();
        assert_eq!(mode.mode_type, InstallModeType::SingleNamespace);
        assert_eq!(mode.resolve_target_namespaces("operators"), vec!["team-a"]);
    }

    #[test]
    fn test_parse_multi_namespace_trims_entries() {
        let mode: InstallMode = "MultiNamespace=team-a, team-b,".parse().unwrap();
        assert_eq!(mode.target_namespaces, vec!["team-a", "team-b"]);
        assert_eq!(mode.to_string(), "MultiNamespace=team-a,team-b");
    }

    #[test]
    fn test_single_namespace_requires_exactly_one() {
        assert!("SingleNamespace".parse::<InstallMode>().is_err());
        assert!("SingleNamespace=a,b".parse::<InstallMode>().is_err());
    }

    #[test]
    fn test_multi_namespace_requires_namespaces() {
        assert!("MultiNamespace=".parse::<InstallMode>().is_err());
    }

    #[test]
    fn test_own_namespace_rejects_namespaces() {
        let err = "OwnNamespace=foo".parse::<InstallMode>().unwrap_err();
        assert!(err.to_string().contains("does not take target namespaces"));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = "ClusterWide".parse::<InstallMode>().unwrap_err();
        assert!(matches!(err, OlmError::InvalidInstallMode(_)));
    }
}
