//! The upstream data: selected series and their spectrum models.
//!
//! Loading is the one place where bad input is an error. Individually broken
//! models are dropped with a warning so the rest of the data stays usable.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chart::AxisWindow;
use crate::data::series::{Domain, SeriesDescriptor, SeriesKey};
use crate::data::spectrum::SpectrumModel;
use crate::data::visibility::VisibilityFilter;
use crate::error::{Error, Result};

/// A spectrum model as stored in a dataset file, tagged with its series key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpectrumEntry {
    pub model_id: String,
    pub condition_id: String,
    #[serde(flatten)]
    pub model: SpectrumModel,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct DatasetFile {
    #[serde(default)]
    series: Vec<SeriesDescriptor>,
    #[serde(default)]
    spectra: Vec<SpectrumEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    series: Vec<SeriesDescriptor>,
    spectra: HashMap<SeriesKey, SpectrumModel>,
}

impl Dataset {
    pub fn new(series: Vec<SeriesDescriptor>, spectra: Vec<SpectrumEntry>) -> Result<Self> {
        let mut names = HashSet::new();
        for s in &series {
            if !names.insert(s.name.as_str()) {
                return Err(Error::DuplicateSeriesName(s.name.clone()));
            }
        }

        let mut dataset = Dataset {
            series,
            spectra: HashMap::new(),
        };
        for s in dataset.series.iter_mut() {
            let label = s.name.clone();
            for (what, slot) in s.models.iter_named_mut() {
                if let Some(model) = slot {
                    if let Err(e) = model.validate(&format!("{label}: {what}")) {
                        log::warn!("dropping curve model: {e}");
                        *slot = None;
                    }
                }
            }
        }
        for entry in spectra {
            let key = SeriesKey::new(entry.model_id, entry.condition_id);
            dataset.insert_spectrum(key, entry.model);
        }
        for s in &dataset.series {
            if !dataset.spectra.contains_key(&s.key()) {
                log::warn!("series `{}` ({}) has no spectrum model", s.name, s.key());
            }
        }
        log::info!(
            "dataset ready: {} series, {} spectrum models",
            dataset.series.len(),
            dataset.spectra.len()
        );
        Ok(dataset)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let file: DatasetFile = serde_json::from_str(text)?;
        Self::new(file.series, file.spectra)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let file: DatasetFile = serde_yaml::from_str(text)?;
        Self::new(file.series, file.spectra)
    }

    /// Load a `.json`, `.yaml` or `.yml` dataset file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let text = std::fs::read_to_string(path)?;
        log::info!("loading dataset from {}", path.display());
        match ext.as_deref() {
            Some("json") => Self::from_json_str(&text),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            _ => Err(Error::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Add or replace the spectrum model for `key`. Structurally invalid
    /// models are rejected; a broken band only loses that band. Returns
    /// whether the model was stored.
    pub fn insert_spectrum(&mut self, key: SeriesKey, model: SpectrumModel) -> bool {
        let what = format!("spectrum {key}");
        match model.validate(&what) {
            Ok(()) => {
                for (_, e) in model.broken_bands(&what) {
                    log::warn!("band will be skipped: {e}");
                }
                self.spectra.insert(key, model);
                true
            }
            Err(e) => {
                log::warn!("dropping spectrum model: {e}");
                false
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn series(&self) -> &[SeriesDescriptor] {
        &self.series
    }

    pub fn spectra(&self) -> &HashMap<SeriesKey, SpectrumModel> {
        &self.spectra
    }

    pub fn spectrum_for(&self, key: &SeriesKey) -> Option<&SpectrumModel> {
        self.spectra.get(key)
    }

    pub fn series_by_name(&self, name: &str) -> Option<&SeriesDescriptor> {
        self.series.iter().find(|s| s.name == name)
    }

    /// Union of the visible series' validity ranges along `domain`.
    pub fn extent(&self, domain: Domain, visibility: &VisibilityFilter) -> Option<AxisWindow> {
        self.series
            .iter()
            .filter(|s| visibility.is_visible(&s.name))
            .filter_map(|s| AxisWindow::from_bounds(s.bounds(domain)))
            .reduce(|a, b| a.union(&b))
    }
}
