//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use serde_json::{Value, json};
use tempfile::TempDir;

/// Builder for raw log entries as the log store returns them
pub struct EntryBuilder {
    timestamp: String,
    insert_id: String,
    extra: Vec<(String, Value)>,
}

impl EntryBuilder {
    pub fn new(timestamp: &str, insert_id: &str) -> Self {
        Self { timestamp: timestamp.to_string(), insert_id: insert_id.to_string(), extra: vec![] }
    }

    pub fn trace(mut self, trace: &str) -> Self {
        self.extra.push(("trace".to_string(), json!(trace)));
        self
    }

    pub fn task(mut self, task_name: &str) -> Self {
        self.extra.push(("protoPayload".to_string(), json!({"taskName": task_name})));
        self
    }

    pub fn message_id(mut self, message_id: &str) -> Self {
        self.extra.push(("jsonPayload".to_string(), json!({"messageId": message_id})));
        self
    }

    pub fn project(mut self, project: &str) -> Self {
        self.extra.push(("resource".to_string(), json!({"labels": {"project_id": project}})));
        self
    }

    pub fn to_value(&self) -> Value {
        let mut entry = json!({
            "timestamp": self.timestamp,
            "insertId": self.insert_id,
        });
        for (key, value) in &self.extra {
            entry[key] = value.clone();
        }
        entry
    }
}

/// A temp directory holding a log-store JSON file plus any input files a
/// test wants to feed the binary.
pub struct StoreDirBuilder {
    temp_dir: TempDir,
    entries: Vec<Value>,
}

impl StoreDirBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir, entries: vec![] }
    }

    pub fn with_entry(mut self, entry: EntryBuilder) -> Self {
        self.entries.push(entry.to_value());
        self
    }

    /// Write the store file and return (dir, store path)
    pub fn build(self) -> (TempDir, PathBuf) {
        let store_path = self.temp_dir.path().join("store.json");
        fs::write(&store_path, serde_json::to_string_pretty(&self.entries).unwrap())
            .expect("Failed to write store.json");
        (self.temp_dir, store_path)
    }
}

impl Default for StoreDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A prior search state covering the given window, as input JSON text
pub fn state_json(tasks: &[&str], start: &str, end: &str) -> String {
    serde_json::to_string_pretty(&json!({
        "tasks": tasks,
        "timeRangeStart": start,
        "timeRangeEnd": end,
    }))
    .unwrap()
}

/// Two entries close together in time, one trace each
pub fn small_store() -> (TempDir, PathBuf) {
    StoreDirBuilder::new()
        .with_entry(
            EntryBuilder::new("2022-11-10T20:51:36.027Z", "e1").trace("t1").task("task-1"),
        )
        .with_entry(EntryBuilder::new("2022-11-10T20:53:00.400Z", "e2").trace("t2"))
        .build()
}
