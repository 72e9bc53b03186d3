//! Notifications from the charts and their controls.
//!
//! Panels translate raw egui input into [`ChartEvent`]s and hand them to
//! [`crate::sync::SyncController::handle`]. Coalescing raw input (one event
//! per frame) is the panels' job; the controller treats every event as a
//! complete request.

use crate::chart::AxisWindow;
use crate::data::series::Domain;

#[derive(Debug, Clone, PartialEq)]
pub enum ChartEvent {
    // ── Pointer ─────────────────────────────────────────────────────────
    /// Primary button went down on the curve chart at data coordinate `value`.
    PointerPressed { value: f64 },
    /// Pointer moved to `value`; only acts while a drag is in progress.
    PointerMoved { value: f64 },
    PointerReleased,

    // ── Controls ────────────────────────────────────────────────────────
    /// A value typed or slid in by the user, in the active domain.
    QueryInput { value: f64 },
    /// Flip the curve chart's x axis to `Domain`.
    SwitchDomain(Domain),

    // ── View ────────────────────────────────────────────────────────────
    /// The curve chart now shows this x window (zoom, pan, or a rebuilt axis).
    ViewChanged(AxisWindow),
    /// Zoom/pan or an axis rebuild has come to rest.
    ViewSettled,
    /// The curve plot area changed width.
    Resized { width_px: f32 },

    // ── Legend ──────────────────────────────────────────────────────────
    LegendToggled { name: String, visible: bool },
}

impl ChartEvent {
    /// The query value carried by pointer and input events.
    pub fn query_value(&self) -> Option<f64> {
        match self {
            ChartEvent::PointerPressed { value }
            | ChartEvent::PointerMoved { value }
            | ChartEvent::QueryInput { value } => Some(*value),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChartEvent::PointerPressed { .. } => "pointer-pressed",
            ChartEvent::PointerMoved { .. } => "pointer-moved",
            ChartEvent::PointerReleased => "pointer-released",
            ChartEvent::QueryInput { .. } => "query-input",
            ChartEvent::SwitchDomain(_) => "switch-domain",
            ChartEvent::ViewChanged(_) => "view-changed",
            ChartEvent::ViewSettled => "view-settled",
            ChartEvent::Resized { .. } => "resized",
            ChartEvent::LegendToggled { .. } => "legend-toggled",
        }
    }
}
