//! Request-scoped JSONL logging.
//!
//! One JSON object per line, appended to the configured log file. The
//! gateway is stateless, so there is no in-memory history and nothing to
//! reload on startup; `tracing` covers the console, this file is the
//! machine-readable trail of what each request did.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub component: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

impl LogEntry {
    pub fn new(level: LogLevel, component: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            component: component.into(),
            message: message.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, ctx: serde_json::Value) -> Self {
        self.context = Some(ctx);
        self
    }
}

/// Append-only JSONL logger shared across handlers.
#[derive(Clone)]
pub struct SharedLogger(Arc<Mutex<BufWriter<File>>>);

impl SharedLogger {
    pub fn new(file_path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file_path = file_path.as_ref();

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)?;

        Ok(Self(Arc::new(Mutex::new(BufWriter::new(file)))))
    }

    pub fn log(&self, entry: LogEntry) {
        if let Ok(mut writer) = self.0.lock() {
            if let Ok(json) = serde_json::to_string(&entry) {
                let _ = writeln!(writer, "{}", json);
                let _ = writer.flush();
            }
        }
    }

    pub fn info(&self, component: impl Into<String>, message: impl Into<String>) {
        self.log(LogEntry::new(LogLevel::Info, component, message));
    }

    pub fn warn(&self, component: impl Into<String>, message: impl Into<String>) {
        self.log(LogEntry::new(LogLevel::Warn, component, message));
    }

    pub fn error(&self, component: impl Into<String>, message: impl Into<String>) {
        self.log(LogEntry::new(LogLevel::Error, component, message));
    }

    pub fn log_with_context(
        &self,
        level: LogLevel,
        component: impl Into<String>,
        message: impl Into<String>,
        context: serde_json::Value,
    ) {
        self.log(LogEntry::new(level, component, message).with_context(context));
    }
}
