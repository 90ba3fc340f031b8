//! Shared test utilities for integration tests
//!
//! A scripted in-process provider for generation tests, plus a minimal blocking HTTP
//! server that speaks just enough of the chat-completions protocol for wire and CLI tests.

use async_trait::async_trait;
use companion_seed::catalog::Category;
use companion_seed::config::OwnerConfig;
use companion_seed::error::ProviderError;
use companion_seed::prompt::PromptKind;
use companion_seed::provider::{
    ChatMessage, CompletionOptions, CompletionResponse, ModelProviderClient, TokenUsage,
};
use companion_seed::roster::EntityDescriptor;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::thread::JoinHandle;

/// Replies keyed by exact prompt text. Prompts in the failing set return an error.
#[derive(Default)]
pub struct ScriptedProvider {
    replies: HashMap<String, String>,
    failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn reply(mut self, name: &str, kind: PromptKind, text: &str) -> Self {
        self.replies.insert(kind.render(name), text.to_string());
        self
    }

    pub fn fail(mut self, name: &str, kind: PromptKind) -> Self {
        self.failing.insert(kind.render(name));
        self
    }

    /// Prompt texts in the order they were sent.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl ModelProviderClient for ScriptedProvider {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        _options: CompletionOptions,
    ) -> Result<CompletionResponse, ProviderError> {
        let prompt = messages
            .into_iter()
            .next()
            .map(|m| m.content)
            .unwrap_or_default();
        self.calls.lock().push(prompt.clone());
        if self.failing.contains(&prompt) {
            return Err(ProviderError::RateLimit("scripted failure".to_string()));
        }
        Ok(CompletionResponse {
            content: self
                .replies
                .get(&prompt)
                .cloned()
                .unwrap_or_else(|| "Scripted reply".to_string()),
            model: "scripted".to_string(),
            usage: TokenUsage::default(),
            finish_reason: Some("stop".to_string()),
        })
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

pub fn owner() -> OwnerConfig {
    OwnerConfig {
        id: "user_seed".to_string(),
        name: "Seed Owner".to_string(),
        src: String::new(),
    }
}

pub fn write_categories(dir: &Path, categories: &[(&str, &str)]) -> PathBuf {
    let categories: Vec<Category> = categories
        .iter()
        .map(|(id, name)| Category {
            id: id.to_string(),
            name: name.to_string(),
        })
        .collect();
    let path = dir.join("Category.json");
    std::fs::write(&path, serde_json::to_string(&categories).unwrap()).unwrap();
    path
}

pub fn write_roster(dir: &Path, entities: &[(&str, &str)]) -> PathBuf {
    let entities: Vec<EntityDescriptor> = entities
        .iter()
        .map(|(name, category)| EntityDescriptor::new(*name, *category))
        .collect();
    let path = dir.join("roster.json");
    std::fs::write(&path, serde_json::to_string(&entities).unwrap()).unwrap();
    path
}

/// The companion-seed binary with an isolated config home and no inherited key, proxy or overrides.
pub fn companion_seed_command(workspace: &Path) -> Command {
    let config_home = workspace.join(".xdg-config");
    std::fs::create_dir_all(&config_home).unwrap();
    let mut command = Command::new(env!("CARGO_BIN_EXE_companion-seed"));
    command.env("XDG_CONFIG_HOME", &config_home);
    for var in [
        "OPENAI_API_KEY",
        "COMPANION_SEED_ENV",
        "COMPANION_SEED_LOG",
        "HTTP_PROXY",
        "http_proxy",
        "HTTPS_PROXY",
        "https_proxy",
        "ALL_PROXY",
        "all_proxy",
        "NO_PROXY",
        "no_proxy",
    ] {
        command.env_remove(var);
    }
    command.arg("--workspace").arg(workspace).arg("--quiet");
    command
}

pub fn write_workspace_config(workspace: &Path, body: &str) {
    let dir = workspace.join("config");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), body).unwrap();
}

/// A request as seen by [`FakeChatServer`].
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Content of the first chat message in the request body.
    pub fn prompt(&self) -> String {
        let body: serde_json::Value = serde_json::from_str(&self.body).unwrap();
        body["messages"][0]["content"]
            .as_str()
            .unwrap_or_default()
            .to_string()
    }
}

/// Serves a fixed number of connections, one request each, on a background thread.
pub struct FakeChatServer {
    pub base_url: String,
    handle: JoinHandle<Vec<CapturedRequest>>,
}

impl FakeChatServer {
    pub fn start<F>(connections: usize, respond: F) -> Self
    where
        F: Fn(&CapturedRequest) -> (u16, String) + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let handle = std::thread::spawn(move || {
            let mut captured = Vec::new();
            for _ in 0..connections {
                let (mut stream, _) = listener.accept().unwrap();
                let request = read_request(&mut stream);
                let (status, body) = respond(&request);
                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reason(status),
                    body.len(),
                    body
                );
                stream.write_all(response.as_bytes()).unwrap();
                stream.flush().unwrap();
                captured.push(request);
            }
            captured
        });
        Self { base_url, handle }
    }

    /// Wait for all connections to be served and return what was received.
    pub fn finish(self) -> Vec<CapturedRequest> {
        self.handle.join().unwrap()
    }
}

/// A chat-completions success body with a single choice.
pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "gpt-4",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 12, "completion_tokens": 5, "total_tokens": 17 }
    })
    .to_string()
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        401 => "Unauthorized",
        404 => "Not Found",
        429 => "Too Many Requests",
        _ => "Internal Server Error",
    }
}

fn read_request(stream: &mut std::net::TcpStream) -> CapturedRequest {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let read = stream.read(&mut chunk).unwrap();
        assert!(read > 0, "connection closed before headers were complete");
        buffer.extend_from_slice(&chunk[..read]);
        if let Some(pos) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect();
    let content_length = headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);

    let body_start = header_end + 4;
    while buffer.len() < body_start + content_length {
        let read = stream.read(&mut chunk).unwrap();
        assert!(read > 0, "connection closed before body was complete");
        buffer.extend_from_slice(&chunk[..read]);
    }
    let body = String::from_utf8_lossy(&buffer[body_start..body_start + content_length]).to_string();

    CapturedRequest {
        request_line,
        headers,
        body,
    }
}
