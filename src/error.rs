use thiserror::Error;

/// Failures while talking to the browser driver.
#[derive(Debug, Error)]
pub enum DriverError {
    /// Node.js subprocess failed to spawn
    #[error("failed to spawn {script} (is Node.js installed?): {source}")]
    SubprocessSpawn {
        script: String,
        #[source]
        source: std::io::Error,
    },

    /// Pipe to/from the browser server broke
    #[error("browser session I/O error: {0}")]
    SessionIO(String),

    /// Browser server answered with ok=false or an incomplete reply
    #[error("browser session command '{command}' failed: {error}")]
    SessionProtocol { command: String, error: String },

    #[error("JSON parse error ({context}): {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON serialize error ({context}): {source}")]
    JsonSerialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A scripted snapshot source has no more snapshots to hand out
    #[error("snapshot source exhausted after {served} snapshots")]
    SourceExhausted { served: usize },

    /// Locator could not be resolved against the live page
    #[error("action '{action}' failed on '{locator}': {reason}")]
    Action {
        action: String,
        locator: String,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum PerceptionError {
    /// Requested id is not in the store. Treat as a stale id, not a crash.
    #[error("element '{id}' not found (stale id?)")]
    ElementNotFound { id: String },

    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error("invalid thresholds: {0}")]
    InvalidThresholds(String),

    /// Action arguments from the agent could not be decoded
    #[error("could not parse action input: {0}")]
    InvalidActionInput(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config '{path}': {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Invalid(#[from] PerceptionError),
}
