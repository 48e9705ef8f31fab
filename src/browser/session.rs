use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::browser::driver::{PageDriver, SnapshotSource};
use crate::error::DriverError;

const SCRIPT_NAME: &str = "browser_server.js";

/// Request sent to the browser server over stdin (one JSON line).
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BrowserRequest {
    Navigate {
        cmd: &'static str,
        url: String,
    },
    AriaSnapshot {
        cmd: &'static str,
    },
    Action {
        cmd: &'static str,
        action: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        locator: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        duration_ms: Option<u64>,
    },
    CurrentUrl {
        cmd: &'static str,
    },
    Quit {
        cmd: &'static str,
    },
}

impl BrowserRequest {
    pub fn navigate(url: &str) -> Self {
        BrowserRequest::Navigate {
            cmd: "navigate",
            url: url.to_string(),
        }
    }

    pub fn aria_snapshot() -> Self {
        BrowserRequest::AriaSnapshot {
            cmd: "aria_snapshot",
        }
    }

    pub fn click(locator: &str) -> Self {
        BrowserRequest::Action {
            cmd: "action",
            action: "click",
            locator: Some(locator.to_string()),
            value: None,
            duration_ms: None,
        }
    }

    pub fn fill(locator: &str, value: &str) -> Self {
        BrowserRequest::Action {
            cmd: "action",
            action: "fill",
            locator: Some(locator.to_string()),
            value: Some(value.to_string()),
            duration_ms: None,
        }
    }

    pub fn wait(duration_ms: u64) -> Self {
        BrowserRequest::Action {
            cmd: "action",
            action: "wait",
            locator: None,
            value: None,
            duration_ms: Some(duration_ms),
        }
    }

    pub fn current_url() -> Self {
        BrowserRequest::CurrentUrl { cmd: "current_url" }
    }

    pub fn quit() -> Self {
        BrowserRequest::Quit { cmd: "quit" }
    }
}

/// Response received from the browser server over stdout (one JSON line).
#[derive(Debug, Deserialize)]
pub struct BrowserResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub snapshot: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub ready: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchOptions {
    /// Node.js executable
    #[serde(default = "default_node")]
    pub node: String,

    /// Path to the NDJSON browser server script
    #[serde(default = "default_script")]
    pub script: String,

    #[serde(default = "default_true")]
    pub headless: bool,
}

fn default_node() -> String { "node".to_string() }
fn default_script() -> String { format!("node/{SCRIPT_NAME}") }
fn default_true() -> bool { true }

impl Default for LaunchOptions {
    fn default() -> Self {
        LaunchOptions {
            node: default_node(),
            script: default_script(),
            headless: true,
        }
    }
}

/// A persistent browser session backed by a long-lived Node.js process.
///
/// Commands go out as NDJSON over stdin, replies come back one line each on
/// stdout. The process keeps one Chromium page open for the whole session.
pub struct BrowserSession {
    child: Child,
    stdin: ChildStdin,
    reader: BufReader<ChildStdout>,
    current_url: Option<String>,
    closed: bool,
}

impl BrowserSession {
    /// Spawn the browser server and wait for its ready signal.
    pub fn launch(options: &LaunchOptions) -> Result<Self, DriverError> {
        let mut command = Command::new(&options.node);
        command.arg(&options.script);
        if !options.headless {
            command.arg("--headed");
        }

        info!("launching {} {}", options.node, options.script);

        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| DriverError::SubprocessSpawn {
                script: options.script.clone(),
                source: e,
            })?;

        let stdin = child.stdin.take().ok_or_else(|| {
            DriverError::SessionIO(format!("Failed to capture stdin of {SCRIPT_NAME}"))
        })?;

        let stdout = child.stdout.take().ok_or_else(|| {
            DriverError::SessionIO(format!("Failed to capture stdout of {SCRIPT_NAME}"))
        })?;

        let mut reader = BufReader::new(stdout);

        let mut line = String::new();
        reader
            .read_line(&mut line)
            .map_err(|e| DriverError::SessionIO(format!("Failed to read ready signal: {e}")))?;

        let response: BrowserResponse =
            serde_json::from_str(line.trim()).map_err(|e| DriverError::JsonParse {
                context: format!("{SCRIPT_NAME} ready signal"),
                source: e,
            })?;

        if !response.ok || response.ready != Some(true) {
            return Err(DriverError::SessionProtocol {
                command: "launch".into(),
                error: format!("Did not receive ready signal from {SCRIPT_NAME}"),
            });
        }

        Ok(BrowserSession {
            child,
            stdin,
            reader,
            current_url: None,
            closed: false,
        })
    }

    fn send(&mut self, request: &BrowserRequest) -> Result<BrowserResponse, DriverError> {
        let json = serde_json::to_string(request).map_err(|e| DriverError::JsonSerialize {
            context: "BrowserRequest".into(),
            source: e,
        })?;

        debug!("-> {json}");

        writeln!(self.stdin, "{json}").map_err(|e| {
            DriverError::SessionIO(format!("Failed to write to {SCRIPT_NAME} stdin: {e}"))
        })?;

        self.stdin.flush().map_err(|e| {
            DriverError::SessionIO(format!("Failed to flush {SCRIPT_NAME} stdin: {e}"))
        })?;

        let mut line = String::new();
        self.reader.read_line(&mut line).map_err(|e| {
            DriverError::SessionIO(format!("Failed to read from {SCRIPT_NAME} stdout: {e}"))
        })?;

        if line.trim().is_empty() {
            return Err(DriverError::SessionIO(format!(
                "Empty response from {SCRIPT_NAME} (process may have died)"
            )));
        }

        serde_json::from_str(line.trim()).map_err(|e| DriverError::JsonParse {
            context: format!("{SCRIPT_NAME} response"),
            source: e,
        })
    }

    fn send_ok(
        &mut self,
        request: &BrowserRequest,
        command_name: &str,
    ) -> Result<BrowserResponse, DriverError> {
        let response = self.send(request)?;
        if !response.ok {
            return Err(DriverError::SessionProtocol {
                command: command_name.into(),
                error: response.error.unwrap_or_else(|| "Unknown error".into()),
            });
        }
        Ok(response)
    }

    pub fn navigate(&mut self, url: &str) -> Result<(), DriverError> {
        self.send_ok(&BrowserRequest::navigate(url), "navigate")?;
        self.current_url = Some(url.to_string());
        Ok(())
    }

    pub fn current_url(&mut self) -> Result<String, DriverError> {
        let response = self.send_ok(&BrowserRequest::current_url(), "current_url")?;
        let url = response.url.ok_or_else(|| DriverError::SessionProtocol {
            command: "current_url".into(),
            error: "No URL in current_url response".into(),
        })?;
        self.current_url = Some(url.clone());
        Ok(url)
    }

    /// Last known URL, no browser round-trip.
    pub fn last_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    /// Ask the server to close the browser and reap the process. Idempotent.
    pub fn quit(&mut self) -> Result<(), DriverError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        // Process may already be gone
        let _ = self.send(&BrowserRequest::quit());
        self.child
            .wait()
            .map_err(|e| DriverError::SessionIO(format!("Failed to reap {SCRIPT_NAME}: {e}")))?;
        Ok(())
    }
}

impl SnapshotSource for BrowserSession {
    fn aria_snapshot(&mut self) -> Result<String, DriverError> {
        let response = self.send_ok(&BrowserRequest::aria_snapshot(), "aria_snapshot")?;
        response.snapshot.ok_or_else(|| DriverError::SessionProtocol {
            command: "aria_snapshot".into(),
            error: "No snapshot in aria_snapshot response".into(),
        })
    }
}

impl PageDriver for BrowserSession {
    fn click(&mut self, locator: &str) -> Result<(), DriverError> {
        self.send_ok(&BrowserRequest::click(locator), "click")?;
        Ok(())
    }

    fn fill(&mut self, locator: &str, text: &str) -> Result<(), DriverError> {
        self.send_ok(&BrowserRequest::fill(locator, text), "fill")?;
        Ok(())
    }

    fn wait_idle(&mut self, ms: u64) -> Result<(), DriverError> {
        self.send_ok(&BrowserRequest::wait(ms), "wait")?;
        Ok(())
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if let Err(e) = self.quit() {
            warn!("browser session did not shut down cleanly: {e}");
        }
    }
}
