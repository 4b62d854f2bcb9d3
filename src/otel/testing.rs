//! Test support: capture span fields recorded through the tracing macros.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::span;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::{LookupSpan, Registry};
use tracing_subscriber::Layer;

/// Layer collecting every span field (creation and later `record` calls)
/// into a flat name -> rendered-value map.
#[derive(Clone, Default)]
struct FieldCapture {
    fields: Arc<Mutex<HashMap<String, String>>>,
}

struct FieldVisitor<'a>(&'a mut HashMap<String, String>);

impl Visit for FieldVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

impl<S> Layer<S> for FieldCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &span::Attributes<'_>, _id: &span::Id, _ctx: Context<'_, S>) {
        let mut fields = self.fields.lock().unwrap();
        attrs.record(&mut FieldVisitor(&mut fields));
    }

    fn on_record(&self, _id: &span::Id, values: &span::Record<'_>, _ctx: Context<'_, S>) {
        let mut fields = self.fields.lock().unwrap();
        values.record(&mut FieldVisitor(&mut fields));
    }
}

/// Run `f` under a capturing subscriber and return all span fields recorded.
///
/// # Example
///
/// ```rust,ignore
/// let fields = recorded_span_fields(|| {
///     let span = db_span(DbOperation::Search, Some("haikus"));
///     let _guard = span.entered();
/// });
/// assert_eq!(fields["otel.name"], "search haikus");
/// ```
pub(crate) fn recorded_span_fields(f: impl FnOnce()) -> HashMap<String, String> {
    let capture = FieldCapture::default();
    let subscriber = Registry::default().with(capture.clone());

    tracing::subscriber::with_default(subscriber, f);

    let fields = capture.fields.lock().unwrap().clone();
    fields
}
