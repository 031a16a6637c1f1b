//! Social engagement counters for a URL.
//!
//! [`ShareCountClient`] asks Facebook, Pinterest, LinkedIn and StumbleUpon how
//! often a URL was shared, liked, pinned or viewed, and returns one typed
//! record per network in a [`StatsReport`]. Requests for several networks go
//! out concurrently by default; a single failure fails the whole call.
//!
//! ```no_run
//! # async fn demo() -> sharecount_common::Result<()> {
//! use sharecount_social::{EngagementCounter, ShareCountClient};
//!
//! let client = ShareCountClient::new()?;
//! let report = client.get_stats("http://etsy.com", ["facebook", "pinterest"]).await?;
//! for (network, stats) in report.iter() {
//!     println!("{network}: {stats} ({} actions)", stats.total_actions());
//! }
//! # Ok(()) }
//! ```
//!
//! The [`share`] module builds sharer links with tracking parameters and makes
//! no requests.
pub mod args;
pub mod client;
pub mod network;
pub mod networks;
pub mod share;
pub mod stats;

pub use args::{NetworkArg, UrlArg};
pub use client::{ShareCountClient, ShareCountClientBuilder};
pub use network::Network;
pub use sharecount_common::{Result, ShareCountError};
pub use sharecount_config::FetchMode;
pub use sharecount_http::{HttpError, Transport};
pub use stats::{
    EngagementCounter, FacebookStats, LinkedInStats, NetworkStats, PinterestStats, StatsReport,
    StumbleUponStats,
};
