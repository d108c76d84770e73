use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use wikiscout::explorer::Budget;
use wikiscout::export::DatasetExporter;
use wikiscout::{
    CrawlController, EmbeddingGenerator, EmbeddingProvider, Frontier, KnowledgeBase,
    LegalCatalogue, ScoutConfig, TopicCatalogue, WikipediaClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,wikiscout=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = ScoutConfig::load(config_path.as_deref())?;
    info!(
        "Starting run: budget={}, max_depth={}, top_n={}, rediscovery={}",
        config.requests_limit, config.max_depth, config.top_n, config.rediscovery_policy
    );

    run(&config).await?;

    Ok(())
}

async fn run(config: &ScoutConfig) -> wikiscout::Result<()> {
    let catalogue: Arc<dyn TopicCatalogue> = Arc::new(LegalCatalogue::load(&config.catalogue_path)?);
    let embedder: Arc<dyn EmbeddingProvider> = Arc::new(EmbeddingGenerator::from_config(config)?);
    let kb: Arc<dyn KnowledgeBase> =
        Arc::new(WikipediaClient::from_config(config, Arc::clone(&catalogue))?);

    let frontier = Frontier::new(
        Arc::clone(&embedder),
        Arc::clone(&catalogue),
        config.rediscovery_policy,
    );
    let budget = Arc::new(Budget::new(config.requests_limit));
    let mut controller = CrawlController::new(kb, frontier, budget, config.max_depth);

    let report = controller.explore(&config.seed_topics()).await?;
    info!(
        "Run {} finished ({}): {} pages retrieved, {} failed fetches, {}/{} requests used",
        report.run_id,
        report.status,
        report.retrieved,
        report.failed_fetches,
        report.budget.used,
        report.budget.limit
    );

    let top = controller.top_set(config.top_n);
    let exporter = DatasetExporter::new(embedder, catalogue, config.output_dir.clone());
    let summary = exporter.export(&top, controller.retrieved()).await?;

    info!(
        "Dataset written to {} (quality={:.2}, diversity={:.3}, final={:.2})",
        summary.dataset_path.display(),
        summary.scores.catalogue_quality,
        summary.scores.diversity.overall,
        summary.scores.final_score
    );

    Ok(())
}
