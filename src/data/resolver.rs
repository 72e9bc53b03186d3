//! Mapping a query in either domain to the RPM a series' spectrum is read at.
//!
//! The spectrum is always indexed by RPM. In the noise domain each series
//! converts the shared noise value with its own noise→RPM model, so two
//! series can land on different RPMs for the same query.

use crate::data::query::QueryState;
use crate::data::series::{Domain, SeriesDescriptor};
use crate::data::spectrum::SpectrumModel;

/// RPM at which to reconstruct `series`' spectrum for a query `value` in
/// `domain`. `0.0` means "no valid spectrum for this series".
///
/// Noise queries outside the series' noise→RPM model, or series without such
/// a model, fall back to the series' maximum RPM. That fallback is an
/// approximation and not an inverse of anything.
pub fn resolve_rpm(
    series: &SeriesDescriptor,
    spectrum: Option<&SpectrumModel>,
    domain: Domain,
    value: f64,
) -> f64 {
    match domain {
        Domain::Rpm => {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                0.0
            }
        }
        Domain::NoiseDb => {
            let model = series
                .models
                .noise_to_rpm
                .as_ref()
                .filter(|m| m.is_usable());
            match model {
                Some(m) if m.covers(value) => m.eval(value),
                _ => fallback_rpm(series, spectrum).unwrap_or(0.0),
            }
        }
    }
}

/// Resolve against the active domain of `query`. An unset query resolves to `0.0`.
pub fn resolve_rpm_for_query(
    series: &SeriesDescriptor,
    spectrum: Option<&SpectrumModel>,
    query: &QueryState,
) -> f64 {
    match query.value() {
        Some(v) => resolve_rpm(series, spectrum, query.active(), v),
        None => 0.0,
    }
}

/// Maximum RPM of a series: the spectrum model's explicit `rpm_max`, then the
/// series' own bound (declared, else from recorded points), then the band
/// models' knot range.
pub fn fallback_rpm(series: &SeriesDescriptor, spectrum: Option<&SpectrumModel>) -> Option<f64> {
    let usable = |v: &f64| v.is_finite() && *v > 0.0;
    spectrum
        .and_then(|s| s.rpm_max)
        .filter(usable)
        .or_else(|| series.recorded_rpm_max().filter(usable))
        .or_else(|| {
            spectrum
                .and_then(|s| s.rpm_bounds())
                .map(|(_, hi)| hi)
                .filter(usable)
        })
}
