//! Backend status and speech synthesis.

use crate::ports::backend_transport::{BackendRequest, BackendTransport, TransportError};
use aios_domain::HealthStatus;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

pub const HEALTH_PATH: &str = "/health";
pub const TTS_PATH: &str = "/tts";

/// Use case for `/health` and `/tts`.
#[derive(Clone)]
pub struct SystemStatusUseCase {
    transport: Arc<dyn BackendTransport>,
}

impl SystemStatusUseCase {
    pub fn new(transport: Arc<dyn BackendTransport>) -> Self {
        Self { transport }
    }

    pub async fn health(&self) -> Result<HealthStatus, TransportError> {
        let raw = self
            .transport
            .exchange(BackendRequest::get("health check", HEALTH_PATH))
            .await?;
        serde_json::from_value(raw).map_err(|e| TransportError::decode("health check", e))
    }

    /// Synthesize `text` and return the audio exactly as the backend sent it
    /// (WAV). Playing it is the caller's business.
    pub async fn speak(&self, text: &str) -> Result<Vec<u8>, TransportError> {
        let request = BackendRequest::post("speech synthesis", TTS_PATH, &json!({ "text": text }))?;
        let audio = self.transport.exchange_bytes(request).await?;
        debug!("Received {} bytes of audio", audio.len());
        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::SimulatedBackend;

    #[tokio::test]
    async fn test_health() {
        let backend = Arc::new(SimulatedBackend::new());
        let health = SystemStatusUseCase::new(backend).health().await.unwrap();

        assert!(health.is_ok());
        assert!(health.has("ollama"));
        assert!(!health.has("piper"));
    }

    #[tokio::test]
    async fn test_speak_returns_audio_untouched() {
        let backend = Arc::new(SimulatedBackend::new());
        let audio = SystemStatusUseCase::new(backend.clone()).speak("hello").await.unwrap();

        assert_eq!(audio, b"RIFFhello".to_vec());
        assert_eq!(
            backend.requests_to(TTS_PATH)[0].body,
            Some(json!({"text": "hello"}))
        );
    }

    #[tokio::test]
    async fn test_speak_rejection_is_body_verbatim() {
        let backend = Arc::new(SimulatedBackend::new());
        let err = SystemStatusUseCase::new(backend).speak("").await.unwrap_err();
        assert_eq!(err.to_string(), "text required");
    }
}
