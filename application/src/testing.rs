//! In-process backend used by the use case tests.
//!
//! Implements [`BackendTransport`] with just enough of the assistant
//! backend's behavior to exercise the protocol: a device clarification that
//! disappears once a default is stored, alias conflicts, permission-gated
//! tools and standing grants.

use crate::ports::backend_transport::{
    BackendRequest, BackendTransport, HttpMethod, TransportError,
};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;

#[derive(Default)]
struct State {
    requests: Vec<BackendRequest>,
    scripted: VecDeque<Result<Value, (u16, String)>>,
    defaults: BTreeMap<String, String>,
    kind_defaults: BTreeMap<String, String>,
    grants: BTreeMap<String, bool>,
}

#[derive(Default)]
pub struct SimulatedBackend {
    state: Mutex<State>,
}

fn reject(request: &BackendRequest, status: u16, body: impl Into<String>) -> TransportError {
    TransportError::Status {
        operation: request.operation.to_string(),
        status,
        body: body.into(),
    }
}

fn field<'a>(body: &'a Value, key: &str) -> &'a str {
    body.get(key).and_then(|v| v.as_str()).unwrap_or_default()
}

fn flag(body: &Value, key: &str) -> bool {
    body.get(key).and_then(|v| v.as_bool()).unwrap_or(false)
}

impl SimulatedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `reply` for the next exchange, whatever the path.
    pub fn script_reply(&self, reply: Value) {
        self.state.lock().unwrap().scripted.push_back(Ok(reply));
    }

    /// Reject the next exchange with `status` and `body`.
    pub fn fail_next(&self, status: u16, body: &str) {
        self.state
            .lock()
            .unwrap()
            .scripted
            .push_back(Err((status, body.to_string())));
    }

    pub fn requests(&self) -> Vec<BackendRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<BackendRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    pub fn clear_requests(&self) {
        self.state.lock().unwrap().requests.clear();
    }

    pub fn default_for(&self, phrase: &str) -> Option<String> {
        self.state.lock().unwrap().defaults.get(phrase).cloned()
    }

    pub fn kind_default(&self, kind: &str) -> Option<String> {
        self.state.lock().unwrap().kind_defaults.get(kind).cloned()
    }

    pub fn grant(&self, permission: &str) -> Option<bool> {
        self.state.lock().unwrap().grants.get(permission).copied()
    }

    fn catalog() -> Value {
        json!([
            {"name": "datetime", "description": "Current date and time", "permissions": []},
            {"name": "lights.off", "description": "Switch a room's lights off", "permissions": []},
            {"name": "run_cmd_risky", "description": "Run a shell command", "permissions": ["shell.exec"]},
        ])
    }

    fn route(&self, state: &mut State, request: &BackendRequest) -> Result<Value, TransportError> {
        let body = request.body.clone().unwrap_or(Value::Null);

        match (request.method, request.path) {
            (HttpMethod::Post, "/chat") => {
                let prompt = body["messages"][0]["content"].as_str().unwrap_or_default();
                Ok(Self::chat(state, prompt))
            }
            (HttpMethod::Post, "/memory/alias") => {
                let phrase = field(&body, "phrase").to_string();
                let choice = field(&body, "choice").to_string();
                if flag(&body, "make_default") {
                    if let Some(existing) = state.defaults.get(&phrase)
                        && existing != &choice
                        && !flag(&body, "force")
                    {
                        return Err(reject(
                            request,
                            409,
                            format!("default already set for '{}': {}", phrase, existing),
                        ));
                    }
                    state.defaults.insert(phrase.clone(), choice.clone());
                }
                Ok(json!({"ok": true, "phrase": phrase, "target": choice}))
            }
            (HttpMethod::Post, "/memory/default") => {
                let kind = field(&body, "kind").to_string();
                let target = field(&body, "target").to_string();
                state.kind_defaults.insert(kind.clone(), target.clone());
                Ok(json!({"ok": true, "kind": kind, "target": target}))
            }
            (HttpMethod::Get, "/tools") => Ok(Self::catalog()),
            (HttpMethod::Post, "/tools/execute") => {
                let name = field(&body, "name");
                let catalog = Self::catalog();
                let tool = catalog
                    .as_array()
                    .and_then(|tools| tools.iter().find(|t| t["name"] == name))
                    .ok_or_else(|| reject(request, 404, format!("unknown tool: {}", name)))?;

                let overrides: Vec<&str> = body["override_permissions"]
                    .as_array()
                    .map(|a| a.iter().filter_map(|v| v.as_str()).collect())
                    .unwrap_or_default();
                for permission in tool["permissions"].as_array().into_iter().flatten() {
                    let permission = permission.as_str().unwrap_or_default();
                    let granted = state.grants.get(permission).copied().unwrap_or(false);
                    if !granted && !overrides.contains(&permission) {
                        return Err(reject(
                            request,
                            403,
                            format!("permission required: {}", permission),
                        ));
                    }
                }
                Ok(json!({"result": {"ok": true, "tool": name, "arguments": body["arguments"]}}))
            }
            (HttpMethod::Post, "/tools/permissions") => {
                state
                    .grants
                    .insert(field(&body, "permission").to_string(), flag(&body, "allow"));
                Ok(json!(state.grants))
            }
            (HttpMethod::Get, "/health") => Ok(json!({"status": "ok", "ollama": true, "piper": false})),
            _ => Err(reject(request, 404, "")),
        }
    }

    fn chat(state: &State, prompt: &str) -> Value {
        if prompt.contains("the lights") {
            return match state.defaults.get("the lights") {
                Some(room) => json!({
                    "text": "Lights off.",
                    "tool_call": {"name": "lights.off", "arguments": {"room": room}},
                    "tool_result": {"ok": true},
                }),
                None => json!({
                    "clarify": {
                        "kind": "ambiguous_device",
                        "phrase": "the lights",
                        "options": [{"id": "living_room"}, {"id": "bedroom"}],
                    }
                }),
            };
        }
        if prompt.contains("my editor") {
            return json!({
                "text": "Which editor do you mean?",
                "clarify": {"kind": "app_alias", "phrase": "my editor", "category": "apps", "options": []},
            });
        }
        json!({"text": format!("You said: {}", prompt)})
    }
}

#[async_trait]
impl BackendTransport for SimulatedBackend {
    async fn exchange(&self, request: BackendRequest) -> Result<Value, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());

        if let Some(scripted) = state.scripted.pop_front() {
            return scripted.map_err(|(status, body)| reject(&request, status, body));
        }
        self.route(&mut state, &request)
    }

    async fn exchange_bytes(&self, request: BackendRequest) -> Result<Vec<u8>, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());

        if let Some(scripted) = state.scripted.pop_front() {
            return scripted
                .map(|v| v.to_string().into_bytes())
                .map_err(|(status, body)| reject(&request, status, body));
        }
        match (request.method, request.path) {
            (HttpMethod::Post, "/tts") => {
                let text = request
                    .body
                    .as_ref()
                    .map(|b| field(b, "text"))
                    .unwrap_or_default();
                if text.is_empty() {
                    return Err(reject(&request, 400, "text required"));
                }
                let mut audio = b"RIFF".to_vec();
                audio.extend_from_slice(text.as_bytes());
                Ok(audio)
            }
            _ => Err(reject(&request, 404, "")),
        }
    }
}
