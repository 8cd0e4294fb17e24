use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};

use serde_json::Value;

use super::appender::TelemetryAppender;

const MAX_EVENTS: usize = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEvent {
    pub name: String,
    pub data: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TelemetrySnapshot {
    pub total: u64,
    pub per_event: BTreeMap<String, u64>,
}

/// Bounded in-memory appender. Once full, the oldest event is dropped.
#[derive(Debug, Default)]
pub struct TelemetryRecorder {
    buffer: RefCell<VecDeque<RecordedEvent>>,
}

impl TelemetryRecorder {
    pub fn new() -> Self {
        Self {
            buffer: RefCell::new(VecDeque::with_capacity(64)),
        }
    }

    pub fn record(&self, name: &str, data: Value) {
        let mut buffer = self.buffer.borrow_mut();
        if buffer.len() >= MAX_EVENTS {
            buffer.pop_front();
        }
        buffer.push_back(RecordedEvent {
            name: name.to_string(),
            data,
        });
    }

    pub fn events(&self) -> Vec<RecordedEvent> {
        self.buffer.borrow().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.buffer.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.borrow().is_empty()
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        let mut snap = TelemetrySnapshot::default();
        for event in self.buffer.borrow().iter() {
            snap.total += 1;
            *snap.per_event.entry(event.name.clone()).or_insert(0) += 1;
        }
        snap
    }
}

impl TelemetryAppender for TelemetryRecorder {
    fn log(&self, event_name: &str, data: &Value) {
        self.record(event_name, data.clone());
    }
}
