//! Single-line `key=value` event formatting.
//!
//! A line always starts with the same six keys:
//!
//! ```text
//! id=unknown at=INFO time="2024-01-01 12:00:00.000000" tag=external module=app msg="hello"
//! ```
//!
//! `id` is taken from a `request_id` or `job_id` field of the event, or else
//! of the closest enclosing span that has one (spans are tracked by
//! [`CorrelationLayer`]). `tag` comes from a `tag` field. Messages that are
//! already logfmt are spliced in as-is. All other fields follow at the end.

use chrono::{DateTime, Local};
use std::fmt::{self, Write as _};
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, format::Writer};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

#[derive(Debug, Clone, PartialEq)]
pub enum LogValue {
    Absent,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
}

impl LogValue {
    /// Unquoted rendering, used for `id`.
    fn plain(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for LogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::UInt(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(&quote(s)),
        }
    }
}

fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Render pairs as `k=v` separated by spaces.
pub fn format_line(pairs: &[(String, LogValue)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// True when every token of `message` already looks like `key=value`.
fn is_logfmt(message: &str) -> bool {
    let mut tokens = message.split_whitespace().peekable();
    tokens.peek().is_some()
        && tokens.all(|token| {
            token
                .split_once('=')
                .is_some_and(|(key, _)| !key.is_empty() && !key.contains('"'))
        })
}

/// Fields collected from one event.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LogFields {
    pub message: Option<String>,
    pub request_id: Option<LogValue>,
    pub job_id: Option<LogValue>,
    pub tag: Option<String>,
    pub extra: Vec<(String, LogValue)>,
}

impl LogFields {
    fn record(&mut self, field: &Field, value: LogValue) {
        match field.name() {
            "message" => self.message = Some(value.plain()),
            "request_id" => self.request_id = Some(value),
            "job_id" => self.job_id = Some(value),
            "tag" => self.tag = Some(value.plain()),
            name => self.extra.push((name.to_string(), value)),
        }
    }
}

impl Visit for LogFields {
    fn record_bool(&mut self, field: &Field, value: bool) {
        self.record(field, LogValue::Bool(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record(field, LogValue::Int(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.record(field, LogValue::UInt(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.record(field, LogValue::Float(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record(field, LogValue::Str(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{value:?}");
        let value = if rendered == "None" {
            LogValue::Absent
        } else {
            LogValue::Str(rendered)
        };
        self.record(field, value);
    }
}

/// `request_id` / `job_id` recorded on a span.
#[derive(Debug, Default, Clone, PartialEq)]
struct CorrelationIds {
    request_id: Option<LogValue>,
    job_id: Option<LogValue>,
}

impl CorrelationIds {
    fn is_empty(&self) -> bool {
        self.request_id.is_none() && self.job_id.is_none()
    }

    fn record(&mut self, field: &Field, value: LogValue) {
        match field.name() {
            "request_id" => self.request_id = Some(value),
            "job_id" => self.job_id = Some(value),
            _ => {}
        }
    }
}

impl Visit for CorrelationIds {
    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record(field, LogValue::Int(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.record(field, LogValue::UInt(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record(field, LogValue::Str(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record(field, LogValue::Str(format!("{value:?}")));
    }
}

/// Stores each span's `request_id` / `job_id` in the span's extensions so
/// [`LogfmtFormatter`] can find them for events inside the span.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrelationLayer;

impl<S> Layer<S> for CorrelationLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let mut ids = CorrelationIds::default();
        attrs.record(&mut ids);
        if ids.is_empty() {
            return;
        }
        if let Some(span) = ctx.span(id) {
            span.extensions_mut().insert(ids);
        }
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut extensions = span.extensions_mut();
        if let Some(ids) = extensions.get_mut::<CorrelationIds>() {
            values.record(ids);
            return;
        }
        let mut ids = CorrelationIds::default();
        values.record(&mut ids);
        if !ids.is_empty() {
            extensions.insert(ids);
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogfmtFormatter;

impl LogfmtFormatter {
    pub fn format_record(
        &self,
        level: &Level,
        target: &str,
        time: DateTime<Local>,
        fields: LogFields,
    ) -> String {
        let LogFields {
            message,
            request_id,
            job_id,
            tag,
            extra,
        } = fields;

        let id = request_id
            .or(job_id)
            .map_or_else(|| "unknown".to_string(), |value| value.plain());
        let tag = tag.map_or_else(|| "external".to_string(), |tag| quote(&tag));

        let mut line = String::new();
        // Writing to a String cannot fail.
        let _ = write!(
            line,
            "id={id} at={level} time=\"{}\" tag={tag} module={target}",
            time.format(TIME_FORMAT)
        );

        let message = message.unwrap_or_default();
        if is_logfmt(&message) {
            for token in message.split_whitespace() {
                line.push(' ');
                line.push_str(token);
            }
        } else {
            line.push_str(" msg=");
            line.push_str(&quote(&message));
        }

        if !extra.is_empty() {
            line.push(' ');
            line.push_str(&format_line(&extra));
        }

        line
    }
}

impl<S, N> FormatEvent<S, N> for LogfmtFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut fields = LogFields::default();
        event.record(&mut fields);

        if fields.request_id.is_none() && fields.job_id.is_none() {
            // Closest span first.
            for span in ctx.event_scope().into_iter().flatten() {
                let extensions = span.extensions();
                if let Some(ids) = extensions.get::<CorrelationIds>() {
                    fields.request_id = ids.request_id.clone();
                    fields.job_id = ids.job_id.clone();
                    break;
                }
            }
        }

        let metadata = event.metadata();
        let line = self.format_record(metadata.level(), metadata.target(), Local::now(), fields);
        writeln!(writer, "{line}")
    }
}
