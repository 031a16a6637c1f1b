//! Typed engagement records, one per network, and the per-call report.
use crate::network::Network;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Shared surface of every stats record.
pub trait EngagementCounter: fmt::Display {
    fn network(&self) -> Network;

    /// Canonical URL as echoed back by the network.
    fn url(&self) -> &str;

    /// Sum of every counter the record holds.
    fn total_actions(&self) -> u64;

    fn summary(&self) -> String {
        self.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacebookStats {
    pub url: String,
    pub shares: u64,
    pub likes: u64,
    pub comments: u64,
    pub clicks: u64,
}

impl EngagementCounter for FacebookStats {
    fn network(&self) -> Network {
        Network::Facebook
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn total_actions(&self) -> u64 {
        self.shares
            .saturating_add(self.likes)
            .saturating_add(self.comments)
            .saturating_add(self.clicks)
    }
}

// Clicks count towards the total but are left out of the summary.
impl fmt::Display for FacebookStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} shares, {} likes, {} comments",
            self.shares, self.likes, self.comments
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PinterestStats {
    pub url: String,
    pub pins: u64,
}

impl EngagementCounter for PinterestStats {
    fn network(&self) -> Network {
        Network::Pinterest
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn total_actions(&self) -> u64 {
        self.pins
    }
}

impl fmt::Display for PinterestStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} pins", self.pins)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkedInStats {
    pub url: String,
    pub shares: u64,
}

impl EngagementCounter for LinkedInStats {
    fn network(&self) -> Network {
        Network::LinkedIn
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn total_actions(&self) -> u64 {
        self.shares
    }
}

impl fmt::Display for LinkedInStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} shares", self.shares)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StumbleUponStats {
    pub url: String,
    /// Zero when the network reported no views for the URL.
    pub views: u64,
}

impl EngagementCounter for StumbleUponStats {
    fn network(&self) -> Network {
        Network::StumbleUpon
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn total_actions(&self) -> u64 {
        self.views
    }
}

impl fmt::Display for StumbleUponStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} views", self.views)
    }
}

/// Any one network's record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NetworkStats {
    Facebook(FacebookStats),
    Pinterest(PinterestStats),
    LinkedIn(LinkedInStats),
    StumbleUpon(StumbleUponStats),
}

impl NetworkStats {
    fn as_counter(&self) -> &dyn EngagementCounter {
        match self {
            NetworkStats::Facebook(s) => s,
            NetworkStats::Pinterest(s) => s,
            NetworkStats::LinkedIn(s) => s,
            NetworkStats::StumbleUpon(s) => s,
        }
    }
}

impl EngagementCounter for NetworkStats {
    fn network(&self) -> Network {
        self.as_counter().network()
    }

    fn url(&self) -> &str {
        self.as_counter().url()
    }

    fn total_actions(&self) -> u64 {
        self.as_counter().total_actions()
    }
}

impl fmt::Display for NetworkStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_counter(), f)
    }
}

impl From<FacebookStats> for NetworkStats {
    fn from(s: FacebookStats) -> Self {
        NetworkStats::Facebook(s)
    }
}

impl From<PinterestStats> for NetworkStats {
    fn from(s: PinterestStats) -> Self {
        NetworkStats::Pinterest(s)
    }
}

impl From<LinkedInStats> for NetworkStats {
    fn from(s: LinkedInStats) -> Self {
        NetworkStats::LinkedIn(s)
    }
}

impl From<StumbleUponStats> for NetworkStats {
    fn from(s: StumbleUponStats) -> Self {
        NetworkStats::StumbleUpon(s)
    }
}

/// Records collected by one `get_stats` call, keyed by network.
///
/// Serializes as a JSON object keyed by network identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatsReport {
    entries: BTreeMap<Network, NetworkStats>,
}

impl StatsReport {
    pub(crate) fn insert(&mut self, stats: NetworkStats) {
        self.entries.insert(stats.network(), stats);
    }

    pub fn get(&self, network: Network) -> Option<&NetworkStats> {
        self.entries.get(&network)
    }

    /// Look up by identifier; unknown identifiers simply miss.
    pub fn get_by_name(&self, name: &str) -> Option<&NetworkStats> {
        name.parse().ok().and_then(|n| self.get(n))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get_by_name(name).is_some()
    }

    /// Identifiers present in the report.
    pub fn networks(&self) -> BTreeSet<&'static str> {
        self.entries.keys().map(Network::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Network, &NetworkStats)> {
        self.entries.iter()
    }

    /// Sum of `total_actions` across every network in the report.
    pub fn total_actions(&self) -> u64 {
        self.entries
            .values()
            .fold(0u64, |acc, s| acc.saturating_add(s.total_actions()))
    }
}

impl IntoIterator for StatsReport {
    type Item = (Network, NetworkStats);
    type IntoIter = std::collections::btree_map::IntoIter<Network, NetworkStats>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facebook() -> FacebookStats {
        FacebookStats {
            url: "http://etsy.com".into(),
            shares: 2,
            likes: 3,
            comments: 1,
            clicks: 0,
        }
    }

    #[test]
    fn facebook_total_sums_every_counter() {
        assert_eq!(facebook().total_actions(), 6);
    }

    #[test]
    fn facebook_summary_omits_clicks() {
        let stats = FacebookStats {
            clicks: 9,
            ..facebook()
        };
        assert_eq!(stats.to_string(), "2 shares, 3 likes, 1 comments");
        assert_eq!(stats.total_actions(), 15);
    }

    #[test]
    fn single_counter_summaries() {
        let pins = PinterestStats {
            url: "u".into(),
            pins: 7,
        };
        let shares = LinkedInStats {
            url: "u".into(),
            shares: 4,
        };
        let views = StumbleUponStats {
            url: "u".into(),
            views: 0,
        };
        assert_eq!(pins.summary(), "7 pins");
        assert_eq!(shares.summary(), "4 shares");
        assert_eq!(views.summary(), "0 views");
        assert_eq!(pins.total_actions(), 7);
        assert_eq!(views.total_actions(), 0);
    }

    #[test]
    fn totals_saturate() {
        let stats = FacebookStats {
            shares: u64::MAX,
            ..facebook()
        };
        assert_eq!(stats.total_actions(), u64::MAX);
    }

    #[test]
    fn network_stats_delegates() {
        let stats = NetworkStats::from(facebook());
        assert_eq!(stats.network(), Network::Facebook);
        assert_eq!(stats.url(), "http://etsy.com");
        assert_eq!(stats.total_actions(), 6);
        assert_eq!(stats.to_string(), "2 shares, 3 likes, 1 comments");
    }

    #[test]
    fn report_is_keyed_by_identifier() {
        let mut report = StatsReport::default();
        report.insert(facebook().into());
        report.insert(
            PinterestStats {
                url: "http://etsy.com".into(),
                pins: 10,
            }
            .into(),
        );

        assert_eq!(report.len(), 2);
        assert!(report.contains("facebook"));
        assert!(!report.contains("linkedin"));
        assert!(!report.contains("not-a-network"));
        assert_eq!(report.networks(), BTreeSet::from(["facebook", "pinterest"]));
        assert_eq!(report.total_actions(), 16);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["pinterest"]["pins"], 10);
        assert_eq!(json["facebook"]["likes"], 3);
    }
}
