//! The single shared query cursor.
//!
//! Each domain remembers its own last value, so flipping the curve chart
//! between RPM and noise and back lands on the same position again. The
//! stored value is never `NaN`: non-finite writes are rejected.

use std::sync::mpsc::{Receiver, Sender};

use crate::chart::AxisWindow;
use crate::data::series::Domain;

/// Published to subscribers whenever a stored query value changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryChange {
    pub domain: Domain,
    pub value: f64,
}

#[derive(Debug, Default)]
pub struct QueryState {
    active: Domain,
    values: [Option<f64>; 2],
    listeners: Vec<Sender<QueryChange>>,
}

impl QueryState {
    pub fn new(active: Domain) -> Self {
        Self {
            active,
            ..Default::default()
        }
    }

    pub fn active(&self) -> Domain {
        self.active
    }

    /// Remembered value of the active domain.
    pub fn value(&self) -> Option<f64> {
        self.get(self.active)
    }

    pub fn get(&self, domain: Domain) -> Option<f64> {
        self.values[domain.index()]
    }

    /// Store `value` for `domain`. Returns `true` when the stored value changed.
    pub fn set(&mut self, domain: Domain, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        let slot = &mut self.values[domain.index()];
        if *slot == Some(value) {
            return false;
        }
        *slot = Some(value);
        self.notify(QueryChange { domain, value });
        true
    }

    /// Make `domain` the active one. Neither domain's remembered value is touched.
    pub fn switch_domain(&mut self, domain: Domain) -> bool {
        if self.active == domain {
            return false;
        }
        self.active = domain;
        true
    }

    /// Clamp the remembered value of `domain` into the visible `window`.
    ///
    /// A domain that has never been queried starts at the window midpoint.
    /// An invalid window leaves the state alone.
    pub fn clamp_into_visible_range(&mut self, domain: Domain, window: AxisWindow) -> Option<f64> {
        if !window.is_valid() {
            return self.get(domain);
        }
        let current = self.get(domain).unwrap_or_else(|| window.midpoint());
        let clamped = window.clamp(current);
        self.set(domain, clamped);
        Some(clamped)
    }

    /// Receive a [`QueryChange`] for every effective [`QueryState::set`].
    pub fn subscribe(&mut self) -> Receiver<QueryChange> {
        let (tx, rx) = std::sync::mpsc::channel();
        self.listeners.push(tx);
        rx
    }

    fn notify(&mut self, change: QueryChange) {
        self.listeners.retain(|tx| tx.send(change).is_ok());
    }
}
