//! Layer configuration.
//!
//! `CacheLayerOptions` describes a tile source and its cache: database
//! identity, object-store namespace, seeding crawl delay, tile staleness
//! limit, and the presentation options applied to created tile elements.
//! Options are immutable once built; every store handle the layer opens is
//! derived from the same options value.

use std::time::Duration;

/// Default name of the tile cache database.
pub const DEFAULT_DATABASE_NAME: &str = "tile-cache-data";

/// Default schema version of the tile cache database.
pub const DEFAULT_DATABASE_VERSION: u32 = 1;

/// Default object-store (namespace) name. Should correspond with the name
/// of the tile server.
pub const DEFAULT_OBJECT_STORE_NAME: &str = "OSM";

/// Default minimum spacing between successive requests while seeding, so a
/// bulk seed does not stress the tile server.
pub const DEFAULT_CRAWL_DELAY: Duration = Duration::from_millis(500);

/// Default maximum age of a stored tile; older tiles are treated as stale
/// and re-fetched.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Default sub-domain tokens substituted into the URL template.
pub const DEFAULT_SUB_DOMAINS: [&str; 3] = ["a", "b", "c"];

/// Configuration for a [`CachedTileLayer`](crate::CachedTileLayer).
///
/// All fields have working defaults, so a layer can be built over a bare URL
/// template:
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use cached_tile_layer::CacheLayerOptions;
///
/// let options = CacheLayerOptions::builder()
///     .object_store_name("satellite")
///     .crawl_delay(Duration::from_millis(250))
///     .cross_origin(true)
///     .build();
///
/// assert_eq!(options.object_store_name(), "satellite");
/// assert_eq!(options.database_version(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct CacheLayerOptions {
    /// Name of the cache database.
    database_name: String,
    /// Schema version of the cache database. Should not normally change.
    database_version: u32,
    /// Name of the object store within the database.
    object_store_name: String,
    /// Minimum spacing between requests while seeding.
    crawl_delay: Duration,
    /// Maximum age of a stored tile before it counts as stale.
    max_age: Duration,
    /// Sub-domain tokens for the URL template.
    sub_domains: Vec<String>,
    /// Image reference assigned to a tile whose lookup failed.
    error_tile_url: String,
    /// Whether created elements request anonymous cross-origin fetching.
    cross_origin: bool,
}

impl CacheLayerOptions {
    /// Create a new options builder.
    pub fn builder() -> CacheLayerOptionsBuilder {
        CacheLayerOptionsBuilder::default()
    }

    /// Get the cache database name.
    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    /// Get the cache database schema version.
    pub fn database_version(&self) -> u32 {
        self.database_version
    }

    /// Get the object-store name.
    pub fn object_store_name(&self) -> &str {
        &self.object_store_name
    }

    /// Get the seeding crawl delay.
    pub fn crawl_delay(&self) -> Duration {
        self.crawl_delay
    }

    /// Get the maximum stored-tile age.
    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Get the sub-domain tokens.
    pub fn sub_domains(&self) -> &[String] {
        &self.sub_domains
    }

    /// Get the error-fallback image reference.
    pub fn error_tile_url(&self) -> &str {
        &self.error_tile_url
    }

    /// Check whether created elements request anonymous cross-origin
    /// fetching.
    pub fn cross_origin(&self) -> bool {
        self.cross_origin
    }
}

impl Default for CacheLayerOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for [`CacheLayerOptions`].
#[derive(Debug, Clone, Default)]
pub struct CacheLayerOptionsBuilder {
    database_name: Option<String>,
    database_version: Option<u32>,
    object_store_name: Option<String>,
    crawl_delay: Option<Duration>,
    max_age: Option<Duration>,
    sub_domains: Option<Vec<String>>,
    error_tile_url: Option<String>,
    cross_origin: Option<bool>,
}

impl CacheLayerOptionsBuilder {
    /// Set the cache database name.
    pub fn database_name(mut self, name: impl Into<String>) -> Self {
        self.database_name = Some(name.into());
        self
    }

    /// Set the cache database schema version.
    pub fn database_version(mut self, version: u32) -> Self {
        self.database_version = Some(version);
        self
    }

    /// Set the object-store name.
    pub fn object_store_name(mut self, name: impl Into<String>) -> Self {
        self.object_store_name = Some(name.into());
        self
    }

    /// Set the minimum spacing between requests while seeding.
    pub fn crawl_delay(mut self, delay: Duration) -> Self {
        self.crawl_delay = Some(delay);
        self
    }

    /// Set the maximum stored-tile age.
    pub fn max_age(mut self, age: Duration) -> Self {
        self.max_age = Some(age);
        self
    }

    /// Set the sub-domain tokens substituted into the URL template.
    pub fn sub_domains<I, S>(mut self, sub_domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sub_domains = Some(sub_domains.into_iter().map(Into::into).collect());
        self
    }

    /// Set the image reference served for tiles whose lookup failed.
    pub fn error_tile_url(mut self, url: impl Into<String>) -> Self {
        self.error_tile_url = Some(url.into());
        self
    }

    /// Request anonymous cross-origin fetching on created elements.
    pub fn cross_origin(mut self, enabled: bool) -> Self {
        self.cross_origin = Some(enabled);
        self
    }

    /// Build the options with defaults for unset values.
    pub fn build(self) -> CacheLayerOptions {
        CacheLayerOptions {
            database_name: self
                .database_name
                .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string()),
            database_version: self.database_version.unwrap_or(DEFAULT_DATABASE_VERSION),
            object_store_name: self
                .object_store_name
                .unwrap_or_else(|| DEFAULT_OBJECT_STORE_NAME.to_string()),
            crawl_delay: self.crawl_delay.unwrap_or(DEFAULT_CRAWL_DELAY),
            max_age: self.max_age.unwrap_or(DEFAULT_MAX_AGE),
            sub_domains: self.sub_domains.unwrap_or_else(|| {
                DEFAULT_SUB_DOMAINS.iter().map(ToString::to_string).collect()
            }),
            error_tile_url: self.error_tile_url.unwrap_or_default(),
            cross_origin: self.cross_origin.unwrap_or(false),
        }
    }
}
