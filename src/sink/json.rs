//! JSON formatting [layer](tracing_subscriber::Layer): one object per event, one line per object.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::io::Write;

use serde::ser::{SerializeMap, Serializer};
use serde_json::Value;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

use crate::logger::level::LogLevel;

// Implicit keys

pub(crate) const LEVEL: &str = "level";
pub(crate) const TIME: &str = "time";
pub(crate) const MESSAGE: &str = "message";

// Keys recorded by the facade

pub(crate) const META: &str = "meta";
pub(crate) const ERROR: &str = "error";

/// Field values of a single event, keyed by field name.
#[derive(Debug, Default)]
pub(crate) struct Storage {
    values: BTreeMap<&'static str, Value>,
}

impl Storage {
    fn message(&self) -> &str {
        match self.values.get(MESSAGE) {
            Some(Value::String(message)) => message,
            _ => "",
        }
    }
}

impl Visit for Storage {
    fn record_i64(&mut self, field: &Field, value: i64) {
        self.values.insert(field.name(), Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.values.insert(field.name(), Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.values.insert(field.name(), Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.values.insert(field.name(), Value::from(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.values.insert(field.name(), Value::from(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn Error + 'static)) {
        self.values.insert(field.name(), Value::from(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let text = format!("{value:?}");
        let value = match field.name() {
            // Meta arrives pre-rendered as a JSON object; keep it nested.
            META => serde_json::from_str(&text).unwrap_or(Value::String(text)),
            _ => Value::String(text),
        };
        self.values.insert(field.name(), value);
    }
}

///
/// Formats events as JSON objects.
///
/// Key order: `level`, the event's own fields sorted by name (`app`, `error`, `meta`, ...),
/// `time` in unix microseconds, then `message`. Error-level events always carry an `error`
/// key, `null` when no error value was recorded.
///
#[derive(Debug)]
pub struct JsonLayer<W>
where
    W: for<'a> MakeWriter<'a> + 'static,
{
    dst_writer: W,
}

impl<W> JsonLayer<W>
where
    W: for<'a> MakeWriter<'a> + 'static,
{
    pub fn new(dst_writer: W) -> Self {
        Self { dst_writer }
    }

    /// Serialize an event into a buffer of bytes, without the trailing newline.
    pub fn event_serialize(&self, event: &Event<'_>) -> std::io::Result<Vec<u8>> {
        let mut storage = Storage::default();
        event.record(&mut storage);

        let level = *event.metadata().level();

        let mut buffer = Vec::new();
        let mut serializer = serde_json::Serializer::new(&mut buffer);
        let mut map_serializer = serializer.serialize_map(None)?;

        map_serializer.serialize_entry(LEVEL, LogLevel::from_tracing(&level).as_str())?;
        for (key, value) in storage.values.iter().filter(|(key, _)| **key != MESSAGE) {
            map_serializer.serialize_entry(key, value)?;
        }
        if level == Level::ERROR && !storage.values.contains_key(ERROR) {
            map_serializer.serialize_entry(ERROR, &Value::Null)?;
        }
        map_serializer.serialize_entry(TIME, &chrono::Utc::now().timestamp_micros())?;
        map_serializer.serialize_entry(MESSAGE, storage.message())?;

        map_serializer.end()?;
        Ok(buffer)
    }

    ///
    /// Flush the buffer into the output stream, trailing it with a newline.
    ///
    /// Done with a single `write_all` so concurrent writers never interleave inside a line,
    /// and datagram writers send exactly one packet per record.
    ///
    fn flush(&self, metadata: &Metadata<'_>, mut buffer: Vec<u8>) -> std::io::Result<()> {
        buffer.write_all(b"\n")?;
        self.dst_writer.make_writer_for(metadata).write_all(&buffer)
    }
}

impl<S, W> Layer<S> for JsonLayer<W>
where
    S: Subscriber,
    W: for<'a> MakeWriter<'a> + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if let Ok(formatted) = self.event_serialize(event) {
            let _ = self.flush(event.metadata(), formatted);
        }
    }
}
