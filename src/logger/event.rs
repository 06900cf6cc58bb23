//! The transient log event and its metadata map.

use std::error::Error;
use std::fmt;

use crate::logger::level::LogLevel;

/// Key/value metadata attached to a record under the nested `meta` field.
pub type Meta = serde_json::Map<String, serde_json::Value>;

/// Build a [`Meta`] map inline.
///
/// ```
/// use service_logger::meta;
///
/// let meta = meta! { "user_id" => 42, "retry" => true, "region" => "eu-west-1" };
/// assert_eq!(meta.len(), 3);
/// ```
#[macro_export]
macro_rules! meta {
    () => {
        $crate::Meta::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut meta = $crate::Meta::new();
        $(
            meta.insert(::std::string::String::from($key), $crate::serde_json::Value::from($value));
        )+
        meta
    }};
}

/// One log call, borrowed for the duration of the dispatch.
#[derive(Debug, Clone, Copy)]
pub struct LogEvent<'a> {
    pub level: LogLevel,
    pub message: &'a str,
    /// Only read for [`LogLevel::Error`].
    pub error: Option<&'a (dyn Error + 'static)>,
    pub meta: Option<&'a Meta>,
}

impl<'a> LogEvent<'a> {
    pub fn new(level: LogLevel, message: &'a str, meta: Option<&'a Meta>) -> Self {
        Self {
            level,
            message,
            error: None,
            meta,
        }
    }

    pub fn error(
        message: &'a str,
        error: Option<&'a (dyn Error + 'static)>,
        meta: Option<&'a Meta>,
    ) -> Self {
        Self {
            level: LogLevel::Error,
            message,
            error,
            meta,
        }
    }

    /// Meta rendered as compact JSON when recorded as a `tracing` field.
    pub(crate) fn meta_json(&self) -> Option<MetaJson<'a>> {
        self.meta.map(MetaJson)
    }
}

/// Display adapter writing a [`Meta`] map as a JSON object.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MetaJson<'a>(&'a Meta);

impl fmt::Display for MetaJson<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self.0).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_macro_builds_scalars() {
        let meta = meta! {
            "testKey" => "testString",
            "testKey2" => 10,
            "testKey3" => 69.420,
            "testKey4" => true,
        };
        assert_eq!(meta["testKey"], "testString");
        assert_eq!(meta["testKey2"], 10);
        assert_eq!(meta["testKey3"], 69.420);
        assert_eq!(meta["testKey4"], true);
        assert!(meta!().is_empty());
    }

    #[test]
    fn meta_json_is_compact_object() {
        let meta = meta! { "k" => "v" };
        let event = LogEvent::new(LogLevel::Info, "hello", Some(&meta));
        let rendered = event.meta_json().map(|m| m.to_string());
        assert_eq!(rendered.as_deref(), Some(r#"{"k":"v"}"#));

        let empty = Meta::new();
        let event = LogEvent::new(LogLevel::Info, "hello", Some(&empty));
        assert_eq!(event.meta_json().map(|m| m.to_string()).as_deref(), Some("{}"));

        assert!(LogEvent::new(LogLevel::Info, "hello", None).meta_json().is_none());
    }
}
