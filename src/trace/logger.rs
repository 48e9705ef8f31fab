use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;

use log::warn;

use crate::trace::trace::TraceEvent;

/// JSONL sink for perception steps. Write failures are logged and dropped.
pub struct TraceLogger {
    sink: Option<Mutex<File>>,
}

impl TraceLogger {
    /// Open `path` for appending, or build a no-op logger when `None`.
    pub fn open(path: Option<&str>) -> Self {
        let Some(path) = path else {
            return Self::disabled();
        };

        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => Self {
                sink: Some(Mutex::new(f)),
            },
            Err(e) => {
                warn!("could not open trace file '{path}': {e}; tracing disabled");
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        Self { sink: None }
    }

    pub fn log(&self, event: &TraceEvent) {
        let Some(sink) = &self.sink else {
            return;
        };

        if let Err(reason) = append(sink, event) {
            warn!("dropped trace event for step {}: {reason}", event.step);
        }
    }
}

fn append(sink: &Mutex<File>, event: &TraceEvent) -> Result<(), String> {
    let line = serde_json::to_string(event).map_err(|e| e.to_string())?;
    let mut file = sink.lock().map_err(|_| "lock poisoned".to_string())?;
    writeln!(file, "{line}").map_err(|e| e.to_string())
}
