use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use gdl_types::Document;

use crate::error::{SourceError, SourceResult};
use crate::fetch::{DocumentFetcher, HttpFetcher};
use crate::strategy::{Strategy, StrategyKind};

/// A successfully acquired document and where it came from.
#[derive(Clone, Debug)]
pub struct Resolved {
    pub document: Document,
    /// Which kind of strategy produced the document.
    pub strategy: StrategyKind,
    /// Human-readable description of the winning strategy.
    pub origin: String,
    /// Index of the winning strategy in the chain.
    pub position: usize,
    /// Remote body not yet written to its cache file.
    pub pending_cache: Option<PendingCache>,
}

impl Resolved {
    /// Returns `true` when the first strategy failed and a later one was used.
    pub fn is_fallback(&self) -> bool {
        self.position > 0
    }

    /// Write a fetched body to its cache file.
    ///
    /// Call this only after the document has been accepted (decoded and
    /// built), so a response that fails decoding never replaces the last
    /// good copy. A no-op for every strategy except a cached remote fetch.
    pub async fn commit_cache(&self) {
        if let Some(pending) = &self.pending_cache {
            persist(&pending.path, &pending.body).await;
        }
    }
}

/// A remote response waiting to be cached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingCache {
    pub path: PathBuf,
    pub body: String,
}

/// Walks a dataset's strategy chain until one strategy yields a document.
pub struct SourceResolver {
    fetcher: Arc<dyn DocumentFetcher>,
    fetch_timeout: Duration,
}

impl SourceResolver {
    /// Create a resolver using `fetcher` for remote strategies. Every remote
    /// fetch is cut off after `fetch_timeout`.
    pub fn new(fetcher: Arc<dyn DocumentFetcher>, fetch_timeout: Duration) -> Self {
        Self {
            fetcher,
            fetch_timeout,
        }
    }

    /// Create a resolver backed by [`HttpFetcher`].
    pub fn http(fetch_timeout: Duration) -> Self {
        Self::new(Arc::new(HttpFetcher::new(fetch_timeout)), fetch_timeout)
    }

    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }

    /// Try each strategy in order and return the first document acquired.
    ///
    /// A failed strategy is not an error as long as a later one succeeds;
    /// failures are logged at debug level and dropped. When every strategy
    /// fails, [`SourceError::Exhausted`] carries the last failure.
    pub async fn resolve(&self, dataset: &str, strategies: &[Strategy]) -> SourceResult<Resolved> {
        if strategies.is_empty() {
            return Err(SourceError::NoStrategies);
        }

        let mut last = SourceError::NoStrategies;
        for (position, strategy) in strategies.iter().enumerate() {
            match self.acquire_pending(strategy).await {
                Ok((document, pending_cache)) => {
                    return Ok(Resolved {
                        document,
                        strategy: strategy.kind(),
                        origin: strategy.to_string(),
                        position,
                        pending_cache,
                    });
                }
                Err(e) => {
                    debug!(dataset, strategy = %strategy, error = %e, "acquisition strategy failed");
                    last = e;
                }
            }
        }

        Err(SourceError::Exhausted {
            attempts: strategies.len(),
            last: Box::new(last),
        })
    }

    /// Run a single strategy. Nothing is written to a remote strategy's
    /// cache file.
    pub async fn acquire(&self, strategy: &Strategy) -> SourceResult<Document> {
        self.acquire_pending(strategy).await.map(|(document, _)| document)
    }

    async fn acquire_pending(
        &self,
        strategy: &Strategy,
    ) -> SourceResult<(Document, Option<PendingCache>)> {
        match strategy {
            Strategy::LocalFile(path) | Strategy::LocalCache(path) => {
                Ok((read_document(path).await?, None))
            }
            Strategy::Embedded { label, payload } => {
                let document = Document::parse(payload).map_err(|source| SourceError::Parse {
                    origin: format!("embedded {label}"),
                    source,
                })?;
                Ok((document, None))
            }
            Strategy::RemoteFetch { url, cache } => {
                let (document, body) = self.fetch_remote(url).await?;
                let pending = cache.as_ref().map(|path| PendingCache {
                    path: path.clone(),
                    body,
                });
                Ok((document, pending))
            }
        }
    }

    async fn fetch_remote(&self, url: &str) -> SourceResult<(Document, String)> {
        let body = match tokio::time::timeout(self.fetch_timeout, self.fetcher.fetch(url)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(SourceError::Timeout {
                    url: url.to_string(),
                    timeout: self.fetch_timeout,
                })
            }
        };

        let document = Document::parse(&body).map_err(|source| SourceError::Parse {
            origin: url.to_string(),
            source,
        })?;
        if document.is_error() {
            return Err(SourceError::ErrorDocument {
                url: url.to_string(),
                message: document.root().text().to_string(),
            });
        }

        Ok((document, body))
    }
}

impl std::fmt::Debug for SourceResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceResolver")
            .field("fetch_timeout", &self.fetch_timeout)
            .finish_non_exhaustive()
    }
}

async fn read_document(path: &Path) -> SourceResult<Document> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Document::parse(&text).map_err(|source| SourceError::Parse {
        origin: path.display().to_string(),
        source,
    })
}

/// Best-effort cache write; a failure is logged and otherwise ignored.
///
/// The body goes to a sibling temp file that is then renamed over `path`,
/// so the previous copy survives a failed or interrupted write.
async fn persist(path: &Path, body: &str) {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = tokio::fs::create_dir_all(parent).await {
            warn!(path = %path.display(), error = %e, "cannot create cache directory");
            return;
        }
    }

    let tmp = temp_sibling(path);
    let written = match tokio::fs::write(&tmp, body).await {
        Ok(()) => tokio::fs::rename(&tmp, path).await,
        Err(e) => Err(e),
    };
    match written {
        Ok(()) => debug!(path = %path.display(), bytes = body.len(), "cached fetched document"),
        Err(e) => {
            let _ = tokio::fs::remove_file(&tmp).await;
            warn!(path = %path.display(), error = %e, "cannot write cache file");
        }
    }
}

/// `dir/.name.<pid>.tmp` next to `path`.
fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    const TILES: &str = r#"<GroundTypes><Ground type="0x31" id="Grass"/></GroundTypes>"#;
    const CHAR_LIST: &str = "<Chars><Servers><Server><Name>USWest</Name><DNS>h</DNS></Server></Servers></Chars>";
    const CACHED: &str = "<Chars><Servers><Server><Name>Cached</Name><DNS>c</DNS></Server></Servers></Chars>";

    enum Fake {
        Body(&'static str),
        Fail,
        Stall,
    }

    #[async_trait]
    impl DocumentFetcher for Fake {
        async fn fetch(&self, url: &str) -> SourceResult<String> {
            match self {
                Fake::Body(body) => Ok(body.to_string()),
                Fake::Fail => Err(SourceError::Fetch {
                    url: url.into(),
                    reason: "connection refused".into(),
                }),
                Fake::Stall => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok(String::new())
                }
            }
        }
    }

    fn resolver(fake: Fake) -> SourceResolver {
        SourceResolver::new(Arc::new(fake), Duration::from_millis(100))
    }

    fn embedded(payload: &'static str) -> Strategy {
        Strategy::Embedded {
            label: "Tiles.xml",
            payload,
        }
    }

    fn remote_chain(cache: &Path) -> Vec<Strategy> {
        vec![
            Strategy::RemoteFetch {
                url: "http://servers.test/char/list".into(),
                cache: Some(cache.to_path_buf()),
            },
            Strategy::LocalCache(cache.to_path_buf()),
        ]
    }

    fn root_names(doc: &Document) -> Vec<String> {
        doc.root()
            .children()
            .iter()
            .flat_map(|c| c.children().iter())
            .filter_map(|s| s.child_text("Name").map(str::to_string))
            .collect()
    }

    // -----------------------------------------------------------------------
    // Local file -> embedded
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn local_file_wins_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Tiles.xml");
        std::fs::write(&path, TILES).unwrap();

        let chain = vec![Strategy::LocalFile(path), embedded("<GroundTypes/>")];
        let resolved = resolver(Fake::Fail).resolve("Tiles", &chain).await.unwrap();
        assert_eq!(resolved.strategy, StrategyKind::LocalFile);
        assert_eq!(resolved.position, 0);
        assert!(!resolved.is_fallback());
        assert_eq!(resolved.document.root().children().len(), 1);
    }

    #[tokio::test]
    async fn missing_file_falls_back_to_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let chain = vec![
            Strategy::LocalFile(dir.path().join("absent.xml")),
            embedded(TILES),
        ];
        let resolved = resolver(Fake::Fail).resolve("Tiles", &chain).await.unwrap();
        assert_eq!(resolved.strategy, StrategyKind::Embedded);
        assert!(resolved.is_fallback());
        assert_eq!(resolved.origin, "embedded Tiles.xml");
    }

    #[tokio::test]
    async fn corrupt_file_falls_back_to_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Tiles.xml");
        std::fs::write(&path, "<GroundTypes><Ground>").unwrap();

        let chain = vec![Strategy::LocalFile(path), embedded(TILES)];
        let resolved = resolver(Fake::Fail).resolve("Tiles", &chain).await.unwrap();
        assert_eq!(resolved.strategy, StrategyKind::Embedded);
    }

    #[tokio::test]
    async fn exhausted_chain_reports_last_failure() {
        let dir = tempfile::tempdir().unwrap();
        let chain = vec![
            Strategy::LocalFile(dir.path().join("absent.xml")),
            embedded("not xml at all <"),
        ];
        let err = resolver(Fake::Fail).resolve("Tiles", &chain).await.unwrap_err();
        match err {
            SourceError::Exhausted { attempts, last } => {
                assert_eq!(attempts, 2);
                assert!(matches!(*last, SourceError::Parse { ref origin, .. } if origin == "embedded Tiles.xml"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn empty_chain_is_an_error() {
        let err = resolver(Fake::Fail).resolve("Tiles", &[]).await.unwrap_err();
        assert!(matches!(err, SourceError::NoStrategies));
    }

    // -----------------------------------------------------------------------
    // Remote fetch -> local cache
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn remote_success_persists_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("char_list.xml");

        let resolved = resolver(Fake::Body(CHAR_LIST))
            .resolve("Servers", &remote_chain(&cache))
            .await
            .unwrap();
        assert_eq!(resolved.strategy, StrategyKind::RemoteFetch);
        assert_eq!(root_names(&resolved.document), vec!["USWest"]);
        // Nothing is written until the caller accepts the document.
        assert!(!cache.exists());

        resolved.commit_cache().await;
        assert_eq!(std::fs::read_to_string(&cache).unwrap(), CHAR_LIST);
    }

    #[tokio::test]
    async fn commit_replaces_previous_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("char_list.xml");
        std::fs::write(&cache, CACHED).unwrap();

        let resolved = resolver(Fake::Body(CHAR_LIST))
            .resolve("Servers", &remote_chain(&cache))
            .await
            .unwrap();
        assert_eq!(std::fs::read_to_string(&cache).unwrap(), CACHED);

        resolved.commit_cache().await;
        assert_eq!(std::fs::read_to_string(&cache).unwrap(), CHAR_LIST);
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .filter(|n| n != "char_list.xml")
            .collect();
        assert!(leftovers.is_empty(), "{leftovers:?}");
    }

    #[tokio::test]
    async fn local_strategies_have_nothing_to_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("char_list.xml");
        std::fs::write(&cache, CACHED).unwrap();

        let resolved = resolver(Fake::Fail)
            .resolve("Servers", &remote_chain(&cache))
            .await
            .unwrap();
        assert_eq!(resolved.strategy, StrategyKind::LocalCache);
        assert!(resolved.pending_cache.is_none());
    }

    #[tokio::test]
    async fn remote_timeout_uses_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("char_list.xml");
        std::fs::write(&cache, CACHED).unwrap();

        let resolved = resolver(Fake::Stall)
            .resolve("Servers", &remote_chain(&cache))
            .await
            .unwrap();
        assert_eq!(resolved.strategy, StrategyKind::LocalCache);
        assert_eq!(root_names(&resolved.document), vec!["Cached"]);
    }

    #[tokio::test]
    async fn error_document_uses_cache_and_keeps_it() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("char_list.xml");
        std::fs::write(&cache, CACHED).unwrap();

        let resolved = resolver(Fake::Body("<Error>Internal error</Error>"))
            .resolve("Servers", &remote_chain(&cache))
            .await
            .unwrap();
        assert_eq!(resolved.strategy, StrategyKind::LocalCache);
        assert_eq!(std::fs::read_to_string(&cache).unwrap(), CACHED);
    }

    #[tokio::test]
    async fn remote_failure_without_cache_is_exhausted() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("char_list.xml");

        let err = resolver(Fake::Stall)
            .resolve("Servers", &remote_chain(&cache))
            .await
            .unwrap_err();
        match err {
            SourceError::Exhausted { attempts, last } => {
                assert_eq!(attempts, 2);
                assert!(matches!(*last, SourceError::Io { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!cache.exists());
    }

    #[tokio::test]
    async fn direct_timeout_error() {
        let strategy = Strategy::RemoteFetch {
            url: "http://servers.test/char/list".into(),
            cache: None,
        };
        let err = resolver(Fake::Stall).acquire(&strategy).await.unwrap_err();
        assert!(matches!(err, SourceError::Timeout { timeout, .. } if timeout == Duration::from_millis(100)));
    }

    #[tokio::test]
    async fn cache_write_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        // The cache path is an existing directory, so the rename fails.
        let cache: PathBuf = dir.path().join("cache");
        std::fs::create_dir(&cache).unwrap();
        let chain = vec![Strategy::RemoteFetch {
            url: "http://servers.test/char/list".into(),
            cache: Some(cache.clone()),
        }];

        let resolved = resolver(Fake::Body(CHAR_LIST))
            .resolve("Servers", &chain)
            .await
            .unwrap();
        resolved.commit_cache().await;

        assert_eq!(resolved.document.root().name(), "Chars");
        assert!(cache.is_dir());
        assert!(!temp_sibling(&cache).exists());
    }
}
