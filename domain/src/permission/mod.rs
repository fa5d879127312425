//! Permission domain module
//!
//! Two things are called "permission" in the tool protocol and they must
//! never be confused:
//!
//! | Type | Scope | Wire |
//! |------|-------|------|
//! | [`PermissionOverride`] | one `/tools/execute` call | `override_permissions: [..]` |
//! | [`PermissionGrant`] | standing, persisted by the backend | `POST /tools/permissions` |
//!
//! They share no conversions, so an override cannot be turned into a grant
//! by accident.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Permissions granted for exactly one tool execution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionOverride {
    permissions: BTreeSet<String>,
}

impl PermissionOverride {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, permission: impl Into<String>) -> Self {
        self.permissions.insert(permission.into());
        self
    }

    pub fn contains(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.permissions.iter().map(|p| p.as_str())
    }

    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for PermissionOverride {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            permissions: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// A durable allow/deny setting for one permission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGrant {
    pub permission: String,
    pub allow: bool,
}

impl PermissionGrant {
    pub fn allow(permission: impl Into<String>) -> Self {
        Self {
            permission: permission.into(),
            allow: true,
        }
    }

    pub fn deny(permission: impl Into<String>) -> Self {
        Self {
            permission: permission.into(),
            allow: false,
        }
    }
}
