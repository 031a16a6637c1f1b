//! Dispatcher over the per-network fetchers.
//!
//! A [`ShareCountClient`] owns one shared transport, the endpoint template for
//! each network and the dispatch mode. Selections are validated in full before
//! the first request leaves, so a bad name never costs a round trip.
use crate::args::{NetworkArg, UrlArg};
use crate::network::Network;
use crate::networks::{self, has_placeholder};
use crate::stats::{
    EngagementCounter, FacebookStats, LinkedInStats, NetworkStats, PinterestStats, StatsReport,
    StumbleUponStats,
};
use futures::stream::{FuturesUnordered, StreamExt};
use sharecount_common::{Result, ShareCountError};
use sharecount_config::{FetchMode, HttpConfig, ShareCountConfig, ShareCountConfigLoader};
use sharecount_http::{HttpClient, Transport};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;

#[derive(Clone)]
pub struct ShareCountClient {
    transport: Arc<dyn Transport>,
    endpoints: Arc<BTreeMap<Network, String>>,
    mode: FetchMode,
}

impl std::fmt::Debug for ShareCountClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShareCountClient")
            .field("endpoints", &self.endpoints)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl ShareCountClient {
    /// Client against the public endpoints with default HTTP settings.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> ShareCountClientBuilder {
        ShareCountClientBuilder::default()
    }

    /// Build from a loaded configuration: HTTP settings, endpoint overrides
    /// and dispatch mode.
    pub fn from_config(config: &ShareCountConfig) -> Result<Self> {
        let mut builder = Self::builder()
            .http_config(config.http.clone())
            .mode(config.fetch.mode);
        for network in Network::ALL {
            if let Some(template) = config.endpoints.get(network.as_str()) {
                builder = builder.endpoint(network, template);
            }
        }
        builder.build()
    }

    /// Load `path` (YAML/TOML/JSON) plus `SHARECOUNT__` environment
    /// overrides and build from the result.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        let config = ShareCountConfigLoader::new()
            .with_file(path)
            .load()
            .map_err(|e| ShareCountError::Config(e.to_string()))?;
        Self::from_config(&config)
    }

    pub fn mode(&self) -> FetchMode {
        self.mode
    }

    /// Identifiers of every registered network.
    pub fn list_available_networks(&self) -> BTreeSet<&'static str> {
        self.endpoints.keys().map(Network::as_str).collect()
    }

    /// Fetch stats for `url` from the selected networks.
    ///
    /// `networks` is [`NetworkArg::All`] for every registered network or a
    /// list of identifiers. Argument problems (a list of URLs, a bare network name,
    /// an unknown network) are reported before any request is made. The first
    /// fetch failure aborts the whole call.
    pub async fn get_stats(
        &self,
        url: impl Into<UrlArg>,
        networks: impl Into<NetworkArg>,
    ) -> Result<StatsReport> {
        let url = url.into().into_single()?;
        let selected = networks.into().resolve()?;
        self.get_network_stats(&url, &selected).await
    }

    /// Shorthand for [`get_stats`](Self::get_stats) with [`NetworkArg::All`].
    pub async fn get_all_stats(&self, url: impl Into<UrlArg>) -> Result<StatsReport> {
        self.get_stats(url, NetworkArg::All).await
    }

    /// Typed variant of [`get_stats`](Self::get_stats). Repeated networks
    /// are fetched once.
    pub async fn get_network_stats(&self, url: &str, networks: &[Network]) -> Result<StatsReport> {
        let mut selected: Vec<Network> = Vec::with_capacity(networks.len());
        for network in networks {
            if !selected.contains(network) {
                selected.push(*network);
            }
        }

        tracing::info!(
            url,
            networks=?selected.iter().map(Network::as_str).collect::<Vec<_>>(),
            mode=?self.mode,
            "stats.collect.start"
        );

        let report = match self.mode {
            FetchMode::Sequential => self.collect_sequential(url, selected).await?,
            FetchMode::Concurrent => self.collect_concurrent(url, selected).await?,
        };

        tracing::info!(
            url,
            networks = report.len(),
            total_actions = report.total_actions(),
            "stats.collect.done"
        );
        Ok(report)
    }

    async fn collect_sequential(&self, url: &str, networks: Vec<Network>) -> Result<StatsReport> {
        let mut report = StatsReport::default();
        for network in networks {
            report.insert(self.fetch(network, url).await?);
        }
        Ok(report)
    }

    // One task per network. On the first error the remaining handles are
    // dropped, which detaches their tasks rather than cancelling them.
    async fn collect_concurrent(&self, url: &str, networks: Vec<Network>) -> Result<StatsReport> {
        let mut pending: FuturesUnordered<_> = networks
            .into_iter()
            .map(|network| {
                let client = self.clone();
                let url = url.to_string();
                tokio::spawn(async move { client.fetch(network, &url).await })
            })
            .collect();

        let mut report = StatsReport::default();
        while let Some(joined) = pending.next().await {
            match joined {
                Ok(stats) => report.insert(stats?),
                Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
                Err(err) => return Err(ShareCountError::Task(err.to_string())),
            }
        }
        Ok(report)
    }

    /// Fetch one network's record.
    pub async fn fetch(&self, network: Network, url: &str) -> Result<NetworkStats> {
        tracing::debug!(%network, url, "stats.fetch.start");
        let result: Result<NetworkStats> = match network {
            Network::Facebook => self.fetch_facebook(url).await.map(Into::into),
            Network::Pinterest => self.fetch_pinterest(url).await.map(Into::into),
            Network::LinkedIn => self.fetch_linkedin(url).await.map(Into::into),
            Network::StumbleUpon => self.fetch_stumbleupon(url).await.map(Into::into),
        };
        match &result {
            Ok(stats) => tracing::debug!(
                %network,
                url,
                total_actions = stats.total_actions(),
                summary = %stats,
                "stats.fetch.done"
            ),
            Err(err) => tracing::warn!(%network, url, error = %err, "stats.fetch.failed"),
        }
        result
    }

    pub async fn fetch_facebook(&self, url: impl Into<UrlArg>) -> Result<FacebookStats> {
        let url = url.into().into_single()?;
        networks::facebook::fetch(self.transport.as_ref(), self.endpoint(Network::Facebook), &url)
            .await
    }

    pub async fn fetch_pinterest(&self, url: impl Into<UrlArg>) -> Result<PinterestStats> {
        let url = url.into().into_single()?;
        networks::pinterest::fetch(self.transport.as_ref(), self.endpoint(Network::Pinterest), &url)
            .await
    }

    pub async fn fetch_linkedin(&self, url: impl Into<UrlArg>) -> Result<LinkedInStats> {
        let url = url.into().into_single()?;
        networks::linkedin::fetch(self.transport.as_ref(), self.endpoint(Network::LinkedIn), &url)
            .await
    }

    pub async fn fetch_stumbleupon(&self, url: impl Into<UrlArg>) -> Result<StumbleUponStats> {
        let url = url.into().into_single()?;
        networks::stumbleupon::fetch(
            self.transport.as_ref(),
            self.endpoint(Network::StumbleUpon),
            &url,
        )
        .await
    }

    fn endpoint(&self, network: Network) -> &str {
        self.endpoints
            .get(&network)
            .map(String::as_str)
            .unwrap_or_else(|| network.default_endpoint())
    }
}

/// Assembles a [`ShareCountClient`].
///
/// ```
/// use sharecount_social::{FetchMode, Network, ShareCountClient};
///
/// let client = ShareCountClient::builder()
///     .mode(FetchMode::Sequential)
///     .endpoint(Network::LinkedIn, "http://localhost:8080/share?url={url}")
///     .build()
///     .unwrap();
/// assert_eq!(client.mode(), FetchMode::Sequential);
/// assert_eq!(client.list_available_networks().len(), 4);
/// ```
#[derive(Default)]
pub struct ShareCountClientBuilder {
    transport: Option<Arc<dyn Transport>>,
    http: HttpConfig,
    endpoints: BTreeMap<Network, String>,
    mode: FetchMode,
}

impl ShareCountClientBuilder {
    /// Use a custom transport instead of building an [`HttpClient`]; the
    /// HTTP settings are then ignored.
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    pub fn http_config(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Override one network's endpoint template. It must contain `{url}`.
    pub fn endpoint(mut self, network: Network, template: impl Into<String>) -> Self {
        self.endpoints.insert(network, template.into());
        self
    }

    pub fn mode(mut self, mode: FetchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn build(self) -> Result<ShareCountClient> {
        let mut endpoints = BTreeMap::new();
        for network in Network::ALL {
            let template = self
                .endpoints
                .get(&network)
                .cloned()
                .unwrap_or_else(|| network.default_endpoint().to_string());
            if !has_placeholder(&template) {
                return Err(ShareCountError::InvalidArgument(format!(
                    "endpoint for {network} has no {{url}} placeholder: {template}"
                )));
            }
            endpoints.insert(network, template);
        }

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(build_http(&self.http)?),
        };

        Ok(ShareCountClient {
            transport,
            endpoints: Arc::new(endpoints),
            mode: self.mode,
        })
    }
}

fn build_http(http: &HttpConfig) -> Result<HttpClient> {
    let mut builder = HttpClient::builder();
    for (name, value) in &http.headers {
        builder = builder.header(name, value)?;
    }
    if let Some(agent) = &http.user_agent {
        builder = builder.user_agent(agent)?;
    }
    if let Some(timeout) = http.timeout() {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}
