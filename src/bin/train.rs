//! Offline training entry point: raw series in, persisted ensemble out.

use anyhow::{Context, Result};
use energy_forecaster::{
    config::Config,
    ingest,
    ml::training::{train_ensemble, TrainParams},
    pipeline::{dataset::TrainingFrame, features::derive_features, targets::build_targets},
    store::ModelStore,
    telemetry,
};
use tracing::info;

fn main() -> Result<()> {
    telemetry::init_tracing();

    let cfg = Config::load()?;

    let series = ingest::load_observations(&cfg.data.source_path)
        .with_context(|| format!("loading raw series from {}", cfg.data.source_path.display()))?;
    info!(rows = series.len(), "loaded raw series");

    let features = derive_features(&series);
    let rows = build_targets(&features, &series);
    info!(
        feature_rows = features.len(),
        training_rows = rows.len(),
        "derived features and targets"
    );

    let frame = TrainingFrame::from_rows(&rows)?;
    let (train, test) = frame.temporal_split(cfg.training.train_ratio)?;
    info!(train_rows = train.len(), test_rows = test.len(), "temporal split");

    let params = TrainParams {
        n_trees: cfg.training.n_trees,
        max_depth: cfg.training.max_depth,
        min_samples_split: cfg.training.min_samples_split,
        seed: cfg.training.seed,
    };
    let (ensemble, _reports) =
        train_ensemble(&train, &test, &params).context("training horizon ensemble")?;

    let store = ModelStore::new(&cfg.models.store_dir);
    store
        .save(&ensemble)
        .with_context(|| format!("persisting artifacts to {}", cfg.models.store_dir.display()))?;

    Ok(())
}
