//! Dual-view sync controller.
//!
//! Owns the shared [`QueryState`] and keeps the curve chart and the spectrum
//! chart consistent with it. Every event goes through [`SyncController::handle`]
//! and every redraw through one `recompute_and_render` pass, so the order
//! "clamp query → sample curves → rebuild spectrum → draw" lives in one place.

use std::sync::mpsc::Receiver;

use crate::chart::{AxisWindow, ChartSurface, Redraw};
use crate::config::{FanPlotConfig, SamplingConfig};
use crate::data::dataset::Dataset;
use crate::data::query::{QueryChange, QueryState};
use crate::data::resolver::resolve_rpm;
use crate::data::sampler::{value_at, CurveSource};
use crate::data::series::{Domain, SeriesDescriptor, SeriesKey};
use crate::data::spectrum::{SpectrumFrame, SpectrumReconstructor};
use crate::data::visibility::VisibilityFilter;
use crate::events::ChartEvent;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum SyncState {
    #[default]
    Idle,
    DraggingPointer,
    AxisSwitching,
    ZoomPanning,
}

/// Values of one series at the query position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Readout {
    pub airflow: Option<f64>,
    /// Noise at the RPM query, or RPM at the noise query.
    pub cross: Option<f64>,
    /// RPM the spectrum of this series is evaluated at.
    pub spectrum_rpm: Option<f64>,
    pub composite_db: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurveSeries {
    pub key: SeriesKey,
    pub name: String,
    /// Sampled model curve (or the raw polyline when no model exists).
    pub line: Vec<[f64; 2]>,
    /// Measured points inside the window.
    pub measured: Vec<[f64; 2]>,
    pub readout: Readout,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CurveFrame {
    pub domain: Domain,
    pub window: Option<AxisWindow>,
    pub query: Option<f64>,
    pub series: Vec<CurveSeries>,
}

impl CurveFrame {
    pub fn get(&self, name: &str) -> Option<&CurveSeries> {
        self.series.iter().find(|s| s.name == name)
    }
}

pub struct SyncController {
    dataset: Dataset,
    sampling: SamplingConfig,
    query: QueryState,
    visibility: VisibilityFilter,
    reconstructor: SpectrumReconstructor,
    state: SyncState,
    window: Option<AxisWindow>,
    width_px: f32,
    suppress_spectrum: u8,
    curve: CurveFrame,
    spectrum: SpectrumFrame,
}

impl SyncController {
    pub fn new(dataset: Dataset, config: &FanPlotConfig) -> Self {
        let domain = config.initial_domain;
        let visibility = VisibilityFilter::default();
        let window = dataset.extent(domain, &visibility);
        let mut query = QueryState::new(domain);
        if let Some(w) = window {
            query.clamp_into_visible_range(domain, w);
        }
        Self {
            dataset,
            sampling: config.sampling.clone(),
            query,
            visibility,
            reconstructor: SpectrumReconstructor::new(config.spectrum.clone()),
            state: SyncState::Idle,
            window,
            width_px: 0.0,
            suppress_spectrum: 0,
            curve: CurveFrame {
                domain,
                window,
                ..Default::default()
            },
            spectrum: SpectrumFrame::default(),
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn domain(&self) -> Domain {
        self.query.active()
    }

    pub fn visibility(&self) -> &VisibilityFilter {
        &self.visibility
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn window(&self) -> Option<AxisWindow> {
        self.window
    }

    pub fn curve_frame(&self) -> &CurveFrame {
        &self.curve
    }

    pub fn spectrum_frame(&self) -> &SpectrumFrame {
        &self.spectrum
    }

    pub fn reconstructor(&self) -> &SpectrumReconstructor {
        &self.reconstructor
    }

    /// Full data extent of `domain` over the visible series.
    pub fn extent(&self, domain: Domain) -> Option<AxisWindow> {
        self.dataset.extent(domain, &self.visibility)
    }

    pub fn subscribe_query(&mut self) -> Receiver<QueryChange> {
        self.query.subscribe()
    }

    // ── Entry points ─────────────────────────────────────────────────────

    /// Draw both charts from the current state without any change.
    pub fn refresh(&mut self, surface: &mut dyn ChartSurface) {
        self.recompute_and_render(Redraw::Incremental, surface);
    }

    /// Swap in a new dataset and rebuild both charts from scratch.
    pub fn set_dataset(&mut self, dataset: Dataset, surface: &mut dyn ChartSurface) {
        self.dataset = dataset;
        self.reconstructor.invalidate();
        self.visibility.show_all();
        self.state = SyncState::Idle;
        self.suppress_spectrum = 0;
        self.window = self.extent(self.domain());
        self.recompute_and_render(Redraw::Rebuild, surface);
    }

    /// Apply one user or chart event. The most recent event always wins: it
    /// replaces whatever state an earlier, unfinished interaction left behind.
    pub fn handle(&mut self, event: ChartEvent, surface: &mut dyn ChartSurface) {
        log::trace!("event {} in state {:?}", event.label(), self.state);
        if let Some(v) = event.query_value() {
            if !v.is_finite() {
                log::debug!("ignoring {} with non-finite value", event.label());
                return;
            }
        }
        let redraw = match event {
            ChartEvent::PointerPressed { value } => {
                self.transition(SyncState::DraggingPointer);
                self.set_query(value);
                Redraw::Incremental
            }
            ChartEvent::PointerMoved { value } => {
                if self.state != SyncState::DraggingPointer {
                    return;
                }
                self.set_query(value);
                Redraw::Incremental
            }
            ChartEvent::PointerReleased => {
                if self.state == SyncState::DraggingPointer {
                    self.transition(SyncState::Idle);
                }
                return;
            }
            ChartEvent::QueryInput { value } => {
                self.transition(SyncState::Idle);
                self.set_query(value);
                Redraw::Incremental
            }
            ChartEvent::SwitchDomain(domain) => {
                if !self.query.switch_domain(domain) {
                    return;
                }
                log::debug!("switching curve axis to {:?}", domain);
                self.transition(SyncState::AxisSwitching);
                self.window = self.extent(domain);
                self.suppress_spectrum = 1;
                Redraw::Rebuild
            }
            ChartEvent::ViewChanged(window) => {
                if !window.is_valid() {
                    return;
                }
                if self.state == SyncState::AxisSwitching {
                    // First view report of the rebuilt axis: it has settled.
                    self.transition(SyncState::Idle);
                } else if self.window == Some(window) {
                    return;
                } else {
                    self.transition(SyncState::ZoomPanning);
                }
                self.window = Some(window);
                Redraw::Incremental
            }
            ChartEvent::ViewSettled => match self.state {
                SyncState::ZoomPanning => {
                    self.transition(SyncState::Idle);
                    return;
                }
                SyncState::AxisSwitching => {
                    self.transition(SyncState::Idle);
                    Redraw::Incremental
                }
                _ => return,
            },
            ChartEvent::Resized { width_px } => {
                let before = self.sampling.count_for_width(self.width_px);
                self.width_px = width_px;
                if self.sampling.count_for_width(width_px) == before {
                    return;
                }
                Redraw::Incremental
            }
            ChartEvent::LegendToggled { name, visible } => {
                if !self.visibility.set(&name, visible) {
                    return;
                }
                log::debug!("series `{name}` visible={visible}");
                Redraw::Incremental
            }
        };
        self.recompute_and_render(redraw, surface);
    }

    fn transition(&mut self, next: SyncState) {
        if self.state != next {
            log::debug!("sync state {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    fn set_query(&mut self, value: f64) {
        let domain = self.query.active();
        let value = match self.window {
            Some(w) => w.clamp(value),
            None => value,
        };
        self.query.set(domain, value);
    }

    // ── Recompute ────────────────────────────────────────────────────────

    fn recompute_and_render(&mut self, redraw: Redraw, surface: &mut dyn ChartSurface) {
        let domain = self.query.active();
        if let Some(w) = self.window {
            self.query.clamp_into_visible_range(domain, w);
        }

        let spectrum_due = if self.suppress_spectrum > 0 {
            self.suppress_spectrum -= 1;
            log::debug!("spectrum recompute suppressed while the curve axis rebuilds");
            false
        } else {
            true
        };
        if spectrum_due {
            self.spectrum = self.reconstructor.reconstruct(
                self.dataset.spectra(),
                self.dataset.series(),
                &self.query,
                &self.visibility,
            );
        }

        self.curve = self.build_curve_frame(spectrum_due);
        surface.draw_curves(&self.curve, redraw);
        if spectrum_due {
            surface.draw_spectrum(&self.spectrum);
        }
    }

    /// `with_spectrum` is false while the spectrum is stale, so the readouts
    /// leave its columns empty instead of showing the previous axis' values.
    fn build_curve_frame(&self, with_spectrum: bool) -> CurveFrame {
        let domain = self.query.active();
        let query = self.query.value();
        let count = self.sampling.count_for_width(self.width_px);

        let series = self
            .dataset
            .series()
            .iter()
            .filter(|s| self.visibility.is_visible(&s.name))
            .map(|s| {
                let source = CurveSource::for_series(s, domain);
                let (line, measured) = match self.window {
                    Some(w) => (
                        source.sample(w, count),
                        s.raw_curve(domain)
                            .into_iter()
                            .filter(|p| w.contains(p[0]))
                            .collect(),
                    ),
                    None => (Vec::new(), Vec::new()),
                };
                CurveSeries {
                    key: s.key(),
                    name: s.name.clone(),
                    line,
                    measured,
                    readout: self.readout(s, &source, domain, query, with_spectrum),
                }
            })
            .collect();

        CurveFrame {
            domain,
            window: self.window,
            query,
            series,
        }
    }

    fn readout(
        &self,
        series: &SeriesDescriptor,
        source: &CurveSource<'_>,
        domain: Domain,
        query: Option<f64>,
        with_spectrum: bool,
    ) -> Readout {
        let Some(q) = query else {
            return Readout::default();
        };
        let cross = match domain {
            Domain::Rpm => value_at(series.models.rpm_to_noise_db.as_ref(), q),
            Domain::NoiseDb => {
                let spectrum = self.dataset.spectrum_for(&series.key());
                Some(resolve_rpm(series, spectrum, domain, q)).filter(|r| *r > 0.0)
            }
        };
        let spectrum = self
            .spectrum
            .get(&series.name)
            .filter(|_| with_spectrum);
        Readout {
            airflow: source.value_at(q),
            cross,
            spectrum_rpm: spectrum.map(|s| s.rpm),
            composite_db: spectrum.and_then(|s| s.composite_db),
        }
    }
}
