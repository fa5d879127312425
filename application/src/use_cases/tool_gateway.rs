//! Tool execution gateway use case.
//!
//! Lists the backend's tools, runs one on request and edits standing
//! permission grants. Per-call overrides and standing grants go to
//! different endpoints and are never mixed:
//!
//! | Operation | Endpoint | Scope |
//! |-----------|----------|-------|
//! | [`ToolGatewayUseCase::execute`] with overrides | `POST /tools/execute` | this call only |
//! | [`ToolGatewayUseCase::set_permission`] | `POST /tools/permissions` | persisted by the backend |

use crate::ports::backend_transport::{BackendRequest, BackendTransport, TransportError};
use aios_domain::{
    Ack, DomainError, PermissionGrant, PermissionOverride, ToolArguments, ToolCall, ToolCatalog,
    ToolExecution,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

pub const TOOLS_PATH: &str = "/tools";
pub const EXECUTE_PATH: &str = "/tools/execute";
pub const PERMISSIONS_PATH: &str = "/tools/permissions";

/// Errors that can occur in the tool gateway.
#[derive(Error, Debug)]
pub enum ToolGatewayError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ToolGatewayError {
    /// The backend's own explanation of a rejected call, if it gave one.
    pub fn backend_detail(&self) -> Option<&str> {
        match self {
            ToolGatewayError::Transport(e) => e.body().filter(|b| !b.is_empty()),
            ToolGatewayError::Domain(_) => None,
        }
    }
}

#[derive(Serialize)]
struct ExecuteBody<'a> {
    name: &'a str,
    arguments: &'a ToolArguments,
    #[serde(skip_serializing_if = "Option::is_none")]
    override_permissions: Option<&'a PermissionOverride>,
}

/// Use case for tool listing, execution and standing grants.
#[derive(Clone)]
pub struct ToolGatewayUseCase {
    transport: Arc<dyn BackendTransport>,
}

impl ToolGatewayUseCase {
    pub fn new(transport: Arc<dyn BackendTransport>) -> Self {
        Self { transport }
    }

    /// All tools, in the order the backend lists them. Read-only.
    pub async fn list_tools(&self) -> Result<ToolCatalog, ToolGatewayError> {
        let raw = self
            .transport
            .exchange(BackendRequest::get("list tools", TOOLS_PATH))
            .await?;
        let catalog: ToolCatalog =
            serde_json::from_value(raw).map_err(|e| TransportError::decode("list tools", e))?;

        debug!("Backend lists {} tools", catalog.len());
        Ok(catalog)
    }

    /// Run `call` on the backend.
    ///
    /// `overrides` is forwarded as `override_permissions` for this call only
    /// and omitted entirely when `None`.
    pub async fn execute(
        &self,
        call: &ToolCall,
        overrides: Option<&PermissionOverride>,
    ) -> Result<ToolExecution, ToolGatewayError> {
        call.validate()?;

        info!(
            "Executing tool '{}' ({} args, {} overrides)",
            call.name,
            call.arguments.len(),
            overrides.map_or(0, |o| o.len())
        );

        let body = ExecuteBody {
            name: &call.name,
            arguments: &call.arguments,
            override_permissions: overrides,
        };
        let raw = self
            .transport
            .exchange(BackendRequest::post("execute tool", EXECUTE_PATH, &body)?)
            .await?;

        let execution: ToolExecution = serde_json::from_value(raw)
            .map_err(|e| TransportError::decode("execute tool", e))?;
        Ok(execution)
    }

    /// Change a standing grant. The only path that mutates permission state.
    pub async fn set_permission(&self, grant: &PermissionGrant) -> Result<Ack, ToolGatewayError> {
        info!(
            "Setting standing permission '{}' = {}",
            grant.permission, grant.allow
        );
        let request = BackendRequest::post("set permission", PERMISSIONS_PATH, grant)?;
        Ok(Ack::new(self.transport.exchange(request).await?))
    }
}
