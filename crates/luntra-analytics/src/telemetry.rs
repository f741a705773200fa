//! Telemetry event records.
//!
//! Events are flat, serializable records handed to an external sink. Delivery
//! is at-least-once, so each event carries a unique `event_id` the sink can
//! deduplicate on. Building an event never performs I/O.

use chrono::{DateTime, Utc};
use luntra_core::{DealInputs, FlatMap, FlatValue, LuntraError, LuntraResult};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

use crate::analysis::DealAnalysis;
use crate::metrics::DealMetrics;

/// Kind of telemetry event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A session began.
    SessionStarted,
    /// Metrics were computed for a set of inputs.
    MetricsComputed,
    /// A report was exported.
    ReportExported,
    /// The user left feedback.
    FeedbackSubmitted,
}

impl EventKind {
    /// Returns the wire name of the event.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SessionStarted => "session_started",
            Self::MetricsComputed => "metrics_computed",
            Self::ReportExported => "report_exported",
            Self::FeedbackSubmitted => "feedback_submitted",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured telemetry event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TelemetryEvent {
    /// Unique id of this event, for deduplication by the sink.
    pub event_id: Uuid,
    /// Event kind.
    pub event: EventKind,
    /// Session the event belongs to.
    pub session_id: Uuid,
    /// When the event was created.
    pub timestamp: DateTime<Utc>,
    /// Flat event properties.
    pub properties: FlatMap,
}

impl TelemetryEvent {
    /// Creates an event with the given properties, timestamped now.
    pub fn new(event: EventKind, session_id: Uuid, properties: FlatMap) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            event,
            session_id,
            timestamp: Utc::now(),
            properties,
        }
    }

    /// A new session began.
    pub fn session_started(session_id: Uuid) -> Self {
        Self::new(EventKind::SessionStarted, session_id, FlatMap::new())
    }

    /// Metrics were computed; carries both inputs and metrics.
    pub fn metrics_computed(session_id: Uuid, inputs: &DealInputs, metrics: &DealMetrics) -> Self {
        let mut properties = inputs.to_flat_map();
        properties.extend(metrics.to_flat_map());
        Self::new(EventKind::MetricsComputed, session_id, properties)
    }

    /// A report was exported for an analysis.
    pub fn report_exported(session_id: Uuid, analysis: &DealAnalysis, format: &str) -> Self {
        let mut properties = FlatMap::new();
        properties.insert("format".into(), format.into());
        properties.insert("model_type".into(), analysis.inputs.model_type.as_str().into());
        properties.insert("cap_rate".into(), analysis.metrics.cap_rate.to_flat());
        properties.insert(
            "cash_on_cash_return".into(),
            analysis.metrics.cash_on_cash_return.to_flat(),
        );
        Self::new(EventKind::ReportExported, session_id, properties)
    }

    /// The user rated the tool (1 to 5) with an optional message.
    pub fn feedback(session_id: Uuid, rating: u32, message: Option<&str>) -> LuntraResult<Self> {
        if !(1..=5).contains(&rating) {
            return Err(LuntraError::invalid_input(
                "rating",
                format!("must be between 1 and 5, got {rating}"),
            ));
        }

        let mut properties = FlatMap::new();
        properties.insert("rating".into(), rating.into());
        if let Some(text) = message.map(str::trim).filter(|t| !t.is_empty()) {
            properties.insert("message".into(), text.into());
        }
        Ok(Self::new(EventKind::FeedbackSubmitted, session_id, properties))
    }

    /// Adds or replaces a property.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<FlatValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Serializes the event as a single JSON line.
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::metrics::compute_metrics;
    use rust_decimal_macros::dec;

    fn inputs() -> DealInputs {
        DealInputs::builder()
            .purchase_price(dec!(450000))
            .down_payment_percent(dec!(5))
            .interest_rate_percent(dec!(6.5))
            .monthly_rent(dec!(2200))
            .build()
            .unwrap()
    }

    #[test]
    fn test_metrics_event_is_flat() {
        let session = Uuid::new_v4();
        let inputs = inputs();
        let metrics = compute_metrics(&inputs).unwrap();
        let event = TelemetryEvent::metrics_computed(session, &inputs, &metrics);

        assert_eq!(event.event, EventKind::MetricsComputed);
        assert_eq!(event.session_id, session);
        assert_eq!(event.properties.len(), 15 + 14);

        let json: serde_json::Value = serde_json::from_str(&event.to_json_line().unwrap()).unwrap();
        assert_eq!(json["event"], "metrics_computed");
        assert_eq!(json["session_id"], session.to_string());
        assert!(json["properties"]
            .as_object()
            .unwrap()
            .values()
            .all(|v| !v.is_object() && !v.is_array()));
    }

    #[test]
    fn test_event_ids_unique() {
        let session = Uuid::new_v4();
        let a = TelemetryEvent::session_started(session);
        let b = TelemetryEvent::session_started(session);
        assert_ne!(a.event_id, b.event_id);
    }

    #[test]
    fn test_undefined_ratio_serializes_null() {
        let inputs = DealInputs::default();
        let analysis = analyze(&inputs).unwrap();
        let event = TelemetryEvent::report_exported(Uuid::new_v4(), &analysis, "text");

        let json = serde_json::to_value(&event).unwrap();
        assert!(json["properties"]["cap_rate"].is_null());
        assert_eq!(json["properties"]["format"], "text");
    }

    #[test]
    fn test_feedback() {
        let event = TelemetryEvent::feedback(Uuid::new_v4(), 4, Some("  very handy ")).unwrap();
        assert_eq!(event.properties["rating"], FlatValue::Integer(4));
        assert_eq!(event.properties["message"], FlatValue::Text("very handy".into()));

        let event = TelemetryEvent::feedback(Uuid::new_v4(), 5, Some("   ")).unwrap();
        assert!(!event.properties.contains_key("message"));

        let err = TelemetryEvent::feedback(Uuid::new_v4(), 0, None).unwrap_err();
        assert!(err.names_field("rating"));
    }

    #[test]
    fn test_with_property() {
        let event = TelemetryEvent::session_started(Uuid::new_v4()).with_property("source", "cli");
        assert_eq!(event.properties["source"], FlatValue::Text("cli".into()));
    }
}
