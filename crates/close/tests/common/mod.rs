//! Captures tracing events emitted while a closure runs
#![allow(dead_code)]

use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{Layer, Registry};

#[derive(Debug, Clone)]
pub struct Record {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub error: Option<String>,
}

struct CaptureLayer {
    records: Arc<Mutex<Vec<Record>>>,
}

#[derive(Default)]
struct FieldVisitor {
    message: String,
    error: Option<String>,
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{value:?}"),
            "error" => self.error = Some(format!("{value:?}")),
            _ => {}
        }
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        self.records.lock().unwrap().push(Record {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message: visitor.message,
            error: visitor.error,
        });
    }
}

/// Run `f` with a capturing subscriber and return its result and the events
pub fn capture<R>(f: impl FnOnce() -> R) -> (R, Vec<Record>) {
    let records = Arc::new(Mutex::new(Vec::new()));
    let subscriber = Registry::default().with(CaptureLayer {
        records: Arc::clone(&records),
    });
    let out = tracing::subscriber::with_default(subscriber, f);
    let records = records.lock().unwrap().clone();
    (out, records)
}
