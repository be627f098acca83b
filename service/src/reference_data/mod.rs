pub mod listing_fetcher;

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use async_std::fs;
use dat_file_parser::{DatFileParserOps, DefaultDatParser, ReferenceRecord};
use domain::{
    naming::{
        arcade::is_arcade_scope, artifact_names::sanitize_artifact_name,
        system_names::base_scope_id,
    },
    similarity::SimilarityScorer,
};
use http_downloader::fill_url_template;

use crate::{
    error::Error,
    reference_catalog::ReferenceCatalog,
    scope_expander::SystemScopeExpander,
    settings::{ResolverSettings, SupplementalListing},
};
use listing_fetcher::{HttpListingFetcher, ListingFetcher};

/// Loads per-platform reference listings, caching downloads on disk, and
/// builds the [`ReferenceCatalog`] of an activated scope.
///
/// Missing or broken listings never fail an activation; the affected scope
/// simply has less (or no) reference data.
pub struct ReferenceDataLoader {
    cache_dir: PathBuf,
    settings: Arc<ResolverSettings>,
    expander: SystemScopeExpander,
    fetcher: Arc<dyn ListingFetcher>,
    parser: Arc<dyn DatFileParserOps>,
    scorer: Option<Arc<dyn SimilarityScorer>>,
}

impl ReferenceDataLoader {
    pub fn new(
        cache_dir: PathBuf,
        settings: Arc<ResolverSettings>,
        fetcher: Arc<dyn ListingFetcher>,
        parser: Arc<dyn DatFileParserOps>,
        scorer: Option<Arc<dyn SimilarityScorer>>,
    ) -> Self {
        let expander = SystemScopeExpander::from_settings(&settings);
        Self {
            cache_dir,
            settings,
            expander,
            fetcher,
            parser,
            scorer,
        }
    }

    /// Loader using the per-user cache directory, HTTP downloads and the
    /// default listing parser.
    pub fn with_defaults(
        settings: Arc<ResolverSettings>,
        scorer: Option<Arc<dyn SimilarityScorer>>,
    ) -> Result<Self, Error> {
        let cache_dir = file_system::get_reference_listing_dir()?;
        Ok(Self::new(
            cache_dir,
            settings,
            Arc::new(HttpListingFetcher),
            Arc::new(DefaultDatParser),
            scorer,
        ))
    }

    pub fn cached_listing_path(&self, name: &str) -> PathBuf {
        self.cache_dir
            .join(format!("{}.dat", sanitize_artifact_name(name)))
    }

    /// Download locations for `system`, in the order they are tried.
    pub fn candidate_urls(&self, system: &str) -> Vec<String> {
        let sources = &self.settings.reference_sources;
        let arcade = is_arcade_scope(system)
            .then_some(sources.arcade_url_templates.iter())
            .into_iter()
            .flatten();
        arcade
            .chain(sources.url_templates.iter())
            .map(|template| fill_url_template(template, system))
            .collect()
    }

    /// Records of the listing for `system`: the cached copy if there is one,
    /// otherwise the first location that can be downloaded.
    pub async fn load_listing(&self, system: &str) -> Vec<ReferenceRecord> {
        let urls = self.candidate_urls(system);
        self.load_cached_or_fetch(system, &urls).await
    }

    /// Builds the reference catalog for `scope`.
    ///
    /// A virtual scope loads its own listing first, followed by the listings
    /// of the scopes it maps to. Other scopes load their listing followed by
    /// any configured supplemental listings.
    pub async fn activate(&self, scope: &str) -> ReferenceCatalog {
        let base = base_scope_id(scope);
        let mut catalog = ReferenceCatalog::new(self.scorer.clone(), &self.settings);

        catalog.ingest(&self.load_listing(base).await);
        if self.expander.is_virtual(base) {
            for sub_scope in self.expander.expand(base).iter().filter(|s| s.as_str() != base) {
                catalog.ingest(&self.load_listing(sub_scope).await);
            }
        } else if let Some(supplemental) = self.settings.reference_sources.supplemental.get(base) {
            for listing in supplemental {
                catalog.ingest(&self.load_supplemental(base, listing).await);
            }
        }

        tracing::info!(scope = %base, keys = catalog.len(), "Reference catalog built");
        catalog
    }

    async fn load_supplemental(
        &self,
        system: &str,
        listing: &SupplementalListing,
    ) -> Vec<ReferenceRecord> {
        let url = fill_url_template(&listing.url_template, system);
        self.load_cached_or_fetch(&listing.label, &[url]).await
    }

    async fn load_cached_or_fetch(&self, name: &str, urls: &[String]) -> Vec<ReferenceRecord> {
        let path = self.cached_listing_path(name);
        if fs::metadata(&path).await.is_err() {
            if let Err(err) = self.download_first_available(urls, &path).await {
                tracing::warn!(listing = name, error = %err, "No reference listing available");
                return Vec::new();
            }
        }

        match self.parser.parse_listing_file(&path) {
            Ok(records) => {
                tracing::debug!(
                    listing = name,
                    records = records.len(),
                    "Parsed reference listing"
                );
                records
            }
            Err(err) => {
                tracing::warn!(listing = name, error = %err, "Unreadable reference listing");
                Vec::new()
            }
        }
    }

    async fn download_first_available(&self, urls: &[String], target: &Path) -> Result<(), Error> {
        let mut last_error = Error::DownloadError("No download locations configured".to_string());
        for url in urls {
            match self.fetcher.fetch(url).await {
                Ok(bytes) => {
                    if let Some(parent) = target.parent() {
                        fs::create_dir_all(parent).await?;
                    }
                    fs::write(target, &bytes).await?;
                    tracing::info!(
                        url = %url,
                        target = %target.display(),
                        "Cached reference listing"
                    );
                    return Ok(());
                }
                Err(err) => {
                    tracing::debug!(url = %url, error = %err, "Reference listing not found");
                    last_error = err;
                }
            }
        }
        Err(last_error)
    }
}
