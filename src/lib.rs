//! FanPlot crate root: re-exports and module wiring.
//!
//! Interactive viewer for fan performance data. Airflow curves and
//! RPM-indexed noise spectra are drawn from precomputed PCHIP models; a
//! single query (an RPM or a noise level) drives both charts.
//!
//! - `data`: spline evaluation, series, query state, sampler, resolver,
//!   spectrum reconstruction and dataset loading
//! - `chart`: axis windows and the drawing surface the controller talks to
//! - `sync`: the controller that keeps both charts consistent
//! - `panels` / `app`: the egui front-end

pub mod app;
pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod panels;
pub mod sync;

pub use app::{run_fanplot, FanPlotApp};
pub use chart::{AxisScale, AxisWindow, ChartSurface, Redraw};
pub use config::{FanPlotConfig, SamplingConfig, SpectrumConfig};
pub use data::dataset::{Dataset, SpectrumEntry};
pub use data::query::{QueryChange, QueryState};
pub use data::resolver::{fallback_rpm, resolve_rpm};
pub use data::series::{CurveModels, Domain, PerfPoint, SeriesDescriptor, SeriesKey};
pub use data::spectrum::{
    SpectrumFrame, SpectrumModel, SpectrumReconstructor, SpectrumSeries, Weighting,
};
pub use data::spline::{evaluate, SplineModel};
pub use error::{Error, Result};
pub use events::ChartEvent;
pub use sync::{CurveFrame, CurveSeries, Readout, SyncController, SyncState};
