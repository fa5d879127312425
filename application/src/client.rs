//! Assistant client facade.
//!
//! Wires every use case to one shared transport. Constructed explicitly by
//! the caller; there is no process-wide instance.

use crate::ports::backend_transport::BackendTransport;
use crate::use_cases::chat_turn::ChatTurnUseCase;
use crate::use_cases::preferences::PreferencesUseCase;
use crate::use_cases::resolve_clarification::ResolveClarificationUseCase;
use crate::use_cases::system_status::SystemStatusUseCase;
use crate::use_cases::tool_gateway::ToolGatewayUseCase;
use std::sync::Arc;

/// Entry point to the assistant backend.
#[derive(Clone)]
pub struct AssistantClient {
    chat: ChatTurnUseCase,
    tools: ToolGatewayUseCase,
    preferences: PreferencesUseCase,
    resolver: ResolveClarificationUseCase,
    system: SystemStatusUseCase,
}

impl AssistantClient {
    pub fn new(transport: Arc<dyn BackendTransport>) -> Self {
        let preferences = PreferencesUseCase::new(Arc::clone(&transport));
        Self {
            chat: ChatTurnUseCase::new(Arc::clone(&transport)),
            tools: ToolGatewayUseCase::new(Arc::clone(&transport)),
            resolver: ResolveClarificationUseCase::new(preferences.clone()),
            preferences,
            system: SystemStatusUseCase::new(transport),
        }
    }

    pub fn chat(&self) -> &ChatTurnUseCase {
        &self.chat
    }

    pub fn tools(&self) -> &ToolGatewayUseCase {
        &self.tools
    }

    pub fn preferences(&self) -> &PreferencesUseCase {
        &self.preferences
    }

    pub fn resolver(&self) -> &ResolveClarificationUseCase {
        &self.resolver
    }

    pub fn system(&self) -> &SystemStatusUseCase {
        &self.system
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::SimulatedBackend;
    use aios_domain::{ChatOptions, DefaultBinding};

    #[tokio::test]
    async fn test_operations_run_concurrently() {
        let backend = Arc::new(SimulatedBackend::new());
        let client = AssistantClient::new(backend.clone());

        let options = ChatOptions::default();
        let (reply, catalog, health) = tokio::join!(
            client.chat().send_turn("hello", &options),
            client.tools().list_tools(),
            client.system().health(),
        );

        assert!(reply.is_ok());
        assert_eq!(catalog.unwrap().len(), 3);
        assert!(health.unwrap().is_ok());
        assert_eq!(backend.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_clients_on_separate_backends_do_not_share_state() {
        let first = Arc::new(SimulatedBackend::new());
        let second = Arc::new(SimulatedBackend::new());

        AssistantClient::new(first.clone())
            .preferences()
            .set_default(&DefaultBinding::new("terminal", "kitty"))
            .await
            .unwrap();

        assert_eq!(first.kind_default("terminal").as_deref(), Some("kitty"));
        assert_eq!(second.kind_default("terminal"), None);
        assert!(second.requests().is_empty());
    }
}
