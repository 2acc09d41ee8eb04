use std::sync::{Arc, Mutex};
use std::time::Instant;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use gdl_schema::{Decode, GameObject, Item, PacketDef, ServerInfo, Tile};
use gdl_source::{DocumentFetcher, SourceResolver};
use gdl_store::{KeyedStore, Record};

use crate::config::LoaderConfig;
use crate::dataset::{DatasetName, DatasetSpec};
use crate::error::{LoadError, LoadStage};
use crate::registry::{Registry, Slot};
use crate::report::{DatasetSummary, LoadReport};

type ErrorList = Arc<Mutex<Vec<LoadError>>>;
type SlotFn<V> = fn(&Registry) -> &Slot<<V as Record>::Key, V>;

// ---------------------------------------------------------------------------
// DataLoader
// ---------------------------------------------------------------------------

/// Loads every dataset concurrently and publishes the results into a
/// [`Registry`].
///
/// Each dataset runs as its own pipeline on a separate task:
/// resolve -> decode -> build -> publish. A failing pipeline records a
/// [`LoadError`] and clears its slot; it never affects its siblings.
///
/// The fallback chain only covers acquisition. A well-formed document that
/// fails to decode or build (say, a local override with a bad type code)
/// fails its dataset with [`LoadStage::Decode`]; later strategies such as
/// the embedded payload are not tried. A fetched server list is written to
/// its cache file only after it has decoded and built, so a bad response
/// never replaces the last good copy.
pub struct DataLoader {
    specs: Vec<DatasetSpec>,
    resolver: Arc<SourceResolver>,
}

impl DataLoader {
    /// A loader with the standard chains and an HTTP fetcher for the server
    /// list.
    pub fn new(config: &LoaderConfig) -> Self {
        Self::with_resolver(config, SourceResolver::http(config.fetch_timeout()))
    }

    /// A loader whose remote strategies go through `fetcher`.
    pub fn with_fetcher(config: &LoaderConfig, fetcher: Arc<dyn DocumentFetcher>) -> Self {
        Self::with_resolver(config, SourceResolver::new(fetcher, config.fetch_timeout()))
    }

    pub fn with_resolver(config: &LoaderConfig, resolver: SourceResolver) -> Self {
        Self {
            specs: DatasetSpec::all(config),
            resolver: Arc::new(resolver),
        }
    }

    /// Replace the chain used for `spec.dataset`.
    pub fn with_spec(mut self, spec: DatasetSpec) -> Self {
        match self.specs.iter_mut().find(|s| s.dataset == spec.dataset) {
            Some(existing) => *existing = spec,
            None => {
                self.specs.push(spec);
                self.specs.sort_by_key(|s| s.dataset);
            }
        }
        self
    }

    pub fn specs(&self) -> &[DatasetSpec] {
        &self.specs
    }

    /// Run every pipeline and wait for all of them.
    ///
    /// Never fails as a whole: per-dataset failures are collected into the
    /// returned report. Every slot is overwritten, so after a reload the
    /// registry holds exactly what this call produced. Must not run
    /// concurrently with another `load` on the same registry.
    ///
    /// Dropping the returned future aborts the pipelines that are still
    /// running. Pipelines that already finished have published (or cleared)
    /// their slots, so the registry can then mix results of this load and
    /// the previous one.
    pub async fn load(&self, registry: &Arc<Registry>) -> LoadReport {
        let started = Instant::now();
        let errors: ErrorList = Arc::default();

        let handles = self
            .specs
            .iter()
            .map(|spec| {
                let handle = match spec.dataset {
                    DatasetName::Items => {
                        self.spawn::<Item>(spec, registry, &errors, Registry::items_slot)
                    }
                    DatasetName::Tiles => {
                        self.spawn::<Tile>(spec, registry, &errors, Registry::tiles_slot)
                    }
                    DatasetName::Objects => {
                        self.spawn::<GameObject>(spec, registry, &errors, Registry::objects_slot)
                    }
                    DatasetName::Packets => {
                        self.spawn::<PacketDef>(spec, registry, &errors, Registry::packets_slot)
                    }
                    DatasetName::Servers => {
                        self.spawn::<ServerInfo>(spec, registry, &errors, Registry::servers_slot)
                    }
                };
                (spec.dataset, handle)
            })
            .collect();
        let mut pipelines = Pipelines(handles);

        let mut loaded = Vec::with_capacity(pipelines.0.len());
        for (dataset, handle) in pipelines.0.iter_mut() {
            match handle.await {
                Ok(Some(summary)) => loaded.push(summary),
                Ok(None) => {}
                Err(e) => {
                    registry.clear(*dataset);
                    record(&errors, LoadError::new(*dataset, LoadStage::Aborted, e));
                }
            }
        }

        let mut errors = std::mem::take(&mut *errors.lock().expect("error list lock poisoned"));
        errors.sort_by_key(|e| e.dataset);
        loaded.sort_by_key(|s| s.dataset);
        let report = LoadReport { loaded, errors };

        info!(
            loaded = report.success_count(),
            failed = report.error_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "game data load finished"
        );
        for e in &report.errors {
            warn!(dataset = %e.dataset, stage = %e.stage, cause = %e.cause, "dataset not loaded");
        }
        report
    }

    fn spawn<V>(
        &self,
        spec: &DatasetSpec,
        registry: &Arc<Registry>,
        errors: &ErrorList,
        slot: SlotFn<V>,
    ) -> JoinHandle<Option<DatasetSummary>>
    where
        V: Decode + 'static,
        V::Key: 'static,
    {
        let spec = spec.clone();
        let resolver = Arc::clone(&self.resolver);
        let registry = Arc::clone(registry);
        let errors = Arc::clone(errors);

        tokio::spawn(async move {
            match run_pipeline::<V>(&spec, &resolver).await {
                Ok((store, summary)) => {
                    slot(&registry).publish(Arc::new(store));
                    Some(summary)
                }
                Err(e) => {
                    slot(&registry).clear();
                    record(&errors, e);
                    None
                }
            }
        })
    }
}

/// Spawned pipelines of one `load` call, aborted if the call is dropped
/// before they are joined.
struct Pipelines(Vec<(DatasetName, JoinHandle<Option<DatasetSummary>>)>);

impl Drop for Pipelines {
    fn drop(&mut self) {
        for (_, handle) in &self.0 {
            handle.abort();
        }
    }
}

impl std::fmt::Debug for DataLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataLoader")
            .field("specs", &self.specs.len())
            .field("resolver", &self.resolver)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

async fn run_pipeline<V: Decode>(
    spec: &DatasetSpec,
    resolver: &SourceResolver,
) -> Result<(KeyedStore<V::Key, V>, DatasetSummary), LoadError> {
    let dataset = spec.dataset;

    let resolved = resolver
        .resolve(dataset.as_str(), &spec.strategies)
        .await
        .map_err(|e| LoadError::new(dataset, LoadStage::ExhaustedChain, e))?;

    let records =
        V::decode(&resolved.document).map_err(|e| LoadError::new(dataset, LoadStage::Decode, e))?;
    let store =
        KeyedStore::build(records).map_err(|e| LoadError::new(dataset, LoadStage::Decode, e))?;
    resolved.commit_cache().await;

    if resolved.is_fallback() {
        warn!(dataset = %dataset, origin = %resolved.origin, "primary source unavailable, used fallback");
    }
    info!(
        dataset = %dataset,
        entries = store.len(),
        strategy = %resolved.strategy,
        "dataset loaded"
    );

    let summary = DatasetSummary {
        dataset,
        entries: store.len(),
        strategy: resolved.strategy,
        fallback: resolved.is_fallback(),
        origin: resolved.origin,
    };
    Ok((store, summary))
}

fn record(errors: &ErrorList, error: LoadError) {
    errors.lock().expect("error list lock poisoned").push(error);
}
