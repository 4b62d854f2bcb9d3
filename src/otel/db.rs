//! Vector store operation instrumentation.
//!
//! Implements OpenTelemetry database semantic conventions for Qdrant REST
//! operations.

use tracing::{field::Empty, span, Level, Span};

/// Vector store operation types (maps to `db.operation.name`).
#[derive(Debug, Clone, Copy)]
pub enum DbOperation {
    /// List collections
    ListCollections,
    /// Create collection
    CreateCollection,
    /// Upsert points
    Upsert,
    /// Similarity search
    Search,
}

impl DbOperation {
    /// Get operation name as string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ListCollections => "list_collections",
            Self::CreateCollection => "create_collection",
            Self::Upsert => "upsert",
            Self::Search => "search",
        }
    }
}

/// Create vector store operation span with semantic conventions.
///
/// # Arguments
///
/// * `operation` - Vector store operation type
/// * `collection` - Collection name (optional; list operations have none)
///
/// # Returns
///
/// Tracing span with OpenTelemetry semantic attributes
///
/// # Example
///
/// ```rust,ignore
/// let span = db_span(DbOperation::Upsert, Some("haikus"));
/// let _guard = span.entered();
/// ```
pub fn db_span(operation: DbOperation, collection: Option<&str>) -> Span {
    // Span name: "{operation} {collection}" or just "{operation}"
    let span_name = if let Some(coll) = collection {
        format!("{} {}", operation.as_str(), coll)
    } else {
        operation.as_str().to_string()
    };

    let span = span!(
        Level::INFO,
        "db",
        otel.name = %span_name,
        otel.kind = "client",
        db.system.name = "qdrant",
        db.operation.name = operation.as_str(),
        db.collection.name = Empty,
        db.response.returned_rows = Empty,
    );

    if let Some(coll) = collection {
        span.record("db.collection.name", coll);
    }

    span
}

/// Record result count in the current vector store span.
///
/// # Arguments
///
/// * `rows_returned` - Number of points returned by a search (optional)
///
/// # Example
///
/// ```rust,ignore
/// let span = db_span(DbOperation::Search, Some("haikus"));
/// let _guard = span.entered();
///
/// let hits = search_points().await?;
/// record_db_metrics(Some(hits.len()));
/// ```
pub fn record_db_metrics(rows_returned: Option<usize>) {
    let span = Span::current();
    if let Some(returned) = rows_returned {
        span.record("db.response.returned_rows", returned);
    }
}
