//! Native application around the dual-view charts.
//!
//! | Sub-module        | Responsibility |
//! | ----------------- | -------------- |
//! | [`fanplot_app`]   | [`FanPlotApp`] (eframe) and per-frame event dispatch |
//! | [`run`]           | [`run_fanplot()`] entry point |

mod fanplot_app;
mod run;

pub use fanplot_app::FanPlotApp;
pub use run::run_fanplot;
