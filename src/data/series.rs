//! Series descriptors: one fan/condition combination shown on the curve chart.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::spline::SplineModel;

/// The two independent coordinates a query can be expressed in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    #[default]
    Rpm,
    NoiseDb,
}

impl Domain {
    pub const ALL: [Domain; 2] = [Domain::Rpm, Domain::NoiseDb];

    pub fn label(&self) -> &'static str {
        match self {
            Domain::Rpm => "Speed",
            Domain::NoiseDb => "Noise",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Domain::Rpm => "RPM",
            Domain::NoiseDb => "dB(A)",
        }
    }

    pub fn other(&self) -> Domain {
        match self {
            Domain::Rpm => Domain::NoiseDb,
            Domain::NoiseDb => Domain::Rpm,
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Domain::Rpm => 0,
            Domain::NoiseDb => 1,
        }
    }
}

/// Identity of a series across the curve and spectrum data sources.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesKey {
    pub model_id: String,
    pub condition_id: String,
}

impl SeriesKey {
    pub fn new(model_id: impl Into<String>, condition_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            condition_id: condition_id.into(),
        }
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.model_id, self.condition_id)
    }
}

/// A raw measured operating point.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerfPoint {
    pub rpm: f64,
    pub noise_db: f64,
    pub airflow: f64,
}

impl PerfPoint {
    pub fn coordinate(&self, domain: Domain) -> f64 {
        match domain {
            Domain::Rpm => self.rpm,
            Domain::NoiseDb => self.noise_db,
        }
    }
}

/// Fitted per-domain models of a series. Every one of them is optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveModels {
    pub rpm_to_airflow: Option<SplineModel>,
    pub noise_to_airflow: Option<SplineModel>,
    pub rpm_to_noise_db: Option<SplineModel>,
    pub noise_to_rpm: Option<SplineModel>,
}

impl CurveModels {
    pub(crate) fn iter_named_mut(&mut self) -> [(&'static str, &mut Option<SplineModel>); 4] {
        [
            ("rpm_to_airflow", &mut self.rpm_to_airflow),
            ("noise_to_airflow", &mut self.noise_to_airflow),
            ("rpm_to_noise_db", &mut self.rpm_to_noise_db),
            ("noise_to_rpm", &mut self.noise_to_rpm),
        ]
    }
}

/// One fan/condition combination. `name` is the display and legend key and
/// must be unique among the selected series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesDescriptor {
    pub model_id: String,
    pub condition_id: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<[u8; 3]>,
    #[serde(default)]
    pub points: Vec<PerfPoint>,
    #[serde(default)]
    pub models: CurveModels,
    #[serde(default)]
    pub rpm_min: Option<f64>,
    #[serde(default)]
    pub rpm_max: Option<f64>,
}

impl SeriesDescriptor {
    pub fn new(key: SeriesKey, name: impl Into<String>) -> Self {
        Self {
            model_id: key.model_id,
            condition_id: key.condition_id,
            name: name.into(),
            color: None,
            points: Vec::new(),
            models: CurveModels::default(),
            rpm_min: None,
            rpm_max: None,
        }
    }

    pub fn key(&self) -> SeriesKey {
        SeriesKey::new(self.model_id.clone(), self.condition_id.clone())
    }

    /// Range of the raw measured points along `domain`.
    pub fn recorded_bounds(&self, domain: Domain) -> Option<(f64, f64)> {
        finite_bounds(self.points.iter().map(|p| p.coordinate(domain)))
    }

    /// Largest RPM known from explicit bounds or recorded points.
    pub fn recorded_rpm_max(&self) -> Option<f64> {
        self.rpm_max
            .filter(|v| v.is_finite())
            .or_else(|| self.recorded_bounds(Domain::Rpm).map(|(_, hi)| hi))
    }

    /// Validity range of the series along `domain`: explicit RPM bounds first,
    /// then the forward model's knot range, then the raw points.
    pub fn bounds(&self, domain: Domain) -> Option<(f64, f64)> {
        if domain == Domain::Rpm {
            if let (Some(lo), Some(hi)) = (self.rpm_min, self.rpm_max) {
                if lo.is_finite() && hi.is_finite() && lo <= hi {
                    return Some((lo, hi));
                }
            }
        }
        let model = match domain {
            Domain::Rpm => self.models.rpm_to_airflow.as_ref(),
            Domain::NoiseDb => self
                .models
                .noise_to_airflow
                .as_ref()
                .or(self.models.noise_to_rpm.as_ref()),
        };
        model
            .and_then(|m| m.domain())
            .or_else(|| self.recorded_bounds(domain))
    }

    /// Raw `(coordinate, airflow)` pairs along `domain`, sorted by coordinate.
    pub fn raw_curve(&self, domain: Domain) -> Vec<[f64; 2]> {
        let mut pts: Vec<[f64; 2]> = self
            .points
            .iter()
            .map(|p| [p.coordinate(domain), p.airflow])
            .filter(|p| p[0].is_finite() && p[1].is_finite())
            .collect();
        pts.sort_by(|a, b| a[0].partial_cmp(&b[0]).unwrap_or(std::cmp::Ordering::Equal));
        pts
    }
}

pub(crate) fn finite_bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.filter(|v| v.is_finite()).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
