use anyhow::Context;
use clap::Parser;
use exocore::classifier_interface::{ClassificationRequest, ModelSelection, ModelSelector};
use exocore::registry::NameGenerator;
use exocore::telemetry::MetricsRecorder;
use exocore::PlanetRegistry;
use generator::presets::{build_requests_from_config, GeneratorConfig, Preset};
use gui_bridge::bridge::RegistryBridge;
use gui_bridge::model::ViewQuery;
use log::info;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::classifier::{ClassifierKind, HeuristicClassifier, HttpClassifier};
use workflow::config::WorkflowConfig;
use workflow::runner::{share, Runner};

mod generator;
mod gui_bridge;
mod ingest;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Exoplanet classification driver and registry console")]
struct Args {
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Classifier base URL (requests go to <endpoint>/predict)
    #[arg(long)]
    endpoint: Option<String>,
    /// Model family: LightGBM, XGBoost, RandomForest or Ensemble
    #[arg(long)]
    model: Option<ModelSelector>,
    /// Reference targets to submit; all four when omitted
    #[arg(long, value_enum)]
    preset: Vec<Preset>,
    /// Jittered variants generated per preset
    #[arg(long, default_value_t = 1)]
    count: usize,
    /// Relative jitter applied to preset parameters, e.g. 0.05
    #[arg(long, default_value_t = 0.0)]
    noise: f64,
    /// Seed for jitter and planet designations
    #[arg(long)]
    seed: Option<u64>,
    /// Submit every row of a CSV batch instead of presets
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Classify with the built-in heuristic instead of the remote model
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Keep the registry bridge alive until Ctrl+C
    #[arg(long, default_value_t = false)]
    serve: bool,
    /// Append a one-line session summary to this file
    #[arg(long)]
    report: Option<PathBuf>,
}

fn load_config(args: &Args) -> anyhow::Result<WorkflowConfig> {
    let Some(path) = &args.workflow else {
        return Ok(WorkflowConfig::from_args(
            args.endpoint.clone(),
            args.model.unwrap_or_default(),
            args.seed,
        ));
    };

    let mut config = WorkflowConfig::load(path)?;
    if let Some(endpoint) = &args.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(model) = args.model {
        config.model = model;
    }
    if args.seed.is_some() {
        config.name_seed = args.seed;
    }
    Ok(config)
}

fn build_requests(
    args: &Args,
    selection: ModelSelection,
) -> anyhow::Result<Vec<ClassificationRequest>> {
    if let Some(path) = &args.csv {
        return ingest::load_batch(path, selection);
    }

    let presets = if args.preset.is_empty() {
        Preset::ALL.to_vec()
    } else {
        args.preset.clone()
    };
    let base_seed = args.seed.unwrap_or(0);
    let mut requests = Vec::new();
    for (offset, preset) in presets.into_iter().enumerate() {
        let config = GeneratorConfig {
            preset,
            count: args.count,
            noise: args.noise,
            seed: base_seed.wrapping_add(offset as u64),
        };
        requests.extend(build_requests_from_config(&config, selection)?);
    }
    Ok(requests)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config(&args)?;
    let names = match config.name_seed {
        Some(seed) => NameGenerator::seeded(seed),
        None => NameGenerator::from_entropy(),
    };
    let registry = share(PlanetRegistry::with_config(config.fallbacks.clone(), names));
    let metrics = Arc::new(MetricsRecorder::new());

    let classifier = if args.offline {
        ClassifierKind::Heuristic(HeuristicClassifier)
    } else {
        ClassifierKind::Http(HttpClassifier::new(&config.endpoint))
    };
    info!("classifying with {}", classifier.describe());

    let selection = config.to_model_selection();
    info!("model selection: {}", selection);
    let requests = build_requests(&args, selection)?;
    let runner = Runner::new(classifier, registry.clone(), metrics.clone());
    let bridge = RegistryBridge::new(registry, metrics.clone());

    let runtime = TokioBuilder::new_multi_thread()
        .enable_all()
        .build()
        .context("creating tokio runtime")?;

    runtime.block_on(async {
        let report = runner.submit_batch(requests).await;
        info!("{} detections recorded", report.recorded.len());
        for (row, reason) in &report.rejected {
            bridge.publish_status(&format!("row {row} rejected: {reason}"));
        }

        bridge.publish_logbook(&ViewQuery::default());
        let stats = bridge.publish();

        if let Some(report_path) = &args.report {
            let snapshot = metrics.snapshot();
            let line = format!(
                "total={} confirmed={} candidate={} false_positive={} avg_confidence={:.1} rejected={}\n",
                stats.total,
                stats.confirmed_count,
                stats.candidate_count,
                stats.false_positive_count,
                stats.average_confidence_percent,
                snapshot.rejected
            );
            if let Some(parent) = report_path.parent() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("creating report directory {}", parent.display())
                })?;
            }
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(report_path)
                .with_context(|| format!("opening report {}", report_path.display()))?;
            file.write_all(line.as_bytes())
                .with_context(|| format!("writing report {}", report_path.display()))?;
        }

        if args.serve {
            let bound = bridge.spawn(config.bind_address)?;
            bridge.publish_status(&format!(
                "registry bridge listening on http://{bound} (Ctrl+C to stop)..."
            ));
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
        }
        Ok::<(), anyhow::Error>(())
    })
}
