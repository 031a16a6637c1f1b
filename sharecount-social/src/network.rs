//! The fixed set of networks the client knows how to query.
use serde::Serialize;
use sharecount_common::ShareCountError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Facebook,
    Pinterest,
    #[serde(rename = "linkedin")]
    LinkedIn,
    #[serde(rename = "stumbleupon")]
    StumbleUpon,
}

impl Network {
    pub const ALL: [Network; 4] = [
        Network::Facebook,
        Network::Pinterest,
        Network::LinkedIn,
        Network::StumbleUpon,
    ];

    /// Lowercase identifier used in requests, reports and config.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Facebook => "facebook",
            Network::Pinterest => "pinterest",
            Network::LinkedIn => "linkedin",
            Network::StumbleUpon => "stumbleupon",
        }
    }

    /// Public count endpoint; `{url}` is replaced by the encoded target.
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Network::Facebook => {
                "https://api.facebook.com/method/links.getStats?urls={url}&format=json"
            }
            Network::Pinterest => "http://api.pinterest.com/v1/urls/count.json?&url={url}",
            Network::LinkedIn => {
                "http://www.linkedin.com/countserv/count/share?url={url}&format=json"
            }
            Network::StumbleUpon => {
                "http://www.stumbleupon.com/services/1.01/badge.getinfo?url={url}"
            }
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ShareCountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Network::ALL
            .into_iter()
            .find(|n| n.as_str() == s)
            .ok_or_else(|| ShareCountError::UnknownNetwork(s.to_string()))
    }
}
