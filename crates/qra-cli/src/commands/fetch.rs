use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use qra_application::{
    AggregationEngine, HostReplyCatalogReader, LiveButtonObserver, ObserverConfig,
};
use qra_core::quick_reply::DiscoveryRegistry;
use qra_infrastructure::{ChannelMutationSource, JsonFileCatalogProvider};

use super::print_json;

#[derive(Args)]
pub struct FetchArgs {
    /// Host catalog JSON file; a missing file means no catalog
    #[arg(long)]
    catalog: PathBuf,

    /// HTML of the observed container at subscription time
    #[arg(long)]
    dom: Option<PathBuf>,

    /// HTML fragments inserted after subscription, in order
    #[arg(long = "insert", requires = "dom")]
    inserts: Vec<PathBuf>,

    /// Element id of the observed container
    #[arg(long, default_value = "send_form")]
    container_id: String,
}

pub async fn run(args: FetchArgs) -> Result<()> {
    let registry = DiscoveryRegistry::new();

    if let Some(dom) = &args.dom {
        let html = read(dom)?;
        let (source, feed) = ChannelMutationSource::new(&args.container_id, html);

        let config = ObserverConfig {
            container_id: args.container_id.clone(),
            ..ObserverConfig::default()
        };
        let observer = LiveButtonObserver::new(Arc::new(source), config)?;

        if let Some(discovery) = observer.subscribe() {
            for insert in &args.inserts {
                feed.insert(read(insert)?);
            }
            drop(feed);

            let admitted = discovery.drain_into(&registry).await;
            tracing::info!("Discovered {} buttons", admitted);
        }
    }

    let provider = Arc::new(JsonFileCatalogProvider::new(args.catalog));
    let engine = AggregationEngine::new(provider, registry);
    print_json(&engine.fetch().await)
}

pub async fn catalog(path: PathBuf) -> Result<()> {
    let reader = HostReplyCatalogReader::new(Arc::new(JsonFileCatalogProvider::new(path)));
    print_json(&reader.read().await)
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
