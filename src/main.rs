use std::path::PathBuf;

use fanplot::{run_fanplot, Dataset, FanPlotConfig};

/// `fanplot [DATASET]`
///
/// The configuration file is taken from `FANPLOT_CONFIG` when set. A dataset
/// path on the command line overrides the one from the configuration.
fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut cfg = match std::env::var_os("FANPLOT_CONFIG") {
        Some(path) => match FanPlotConfig::load(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::error!("ignoring config {}: {e}", PathBuf::from(&path).display());
                FanPlotConfig::default()
            }
        },
        None => FanPlotConfig::default(),
    };
    if let Some(arg) = std::env::args_os().nth(1) {
        cfg.dataset = Some(PathBuf::from(arg));
    }

    let dataset = match &cfg.dataset {
        Some(path) => Dataset::load(path).unwrap_or_else(|e| {
            log::error!("failed to load dataset {}: {e}", path.display());
            Dataset::default()
        }),
        None => {
            log::info!("no dataset given; use \"Open dataset…\" to load one");
            Dataset::default()
        }
    };

    run_fanplot(dataset, cfg)
}
