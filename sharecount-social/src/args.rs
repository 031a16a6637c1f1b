//! Loosely typed call arguments, checked before any request goes out.
//!
//! Callers may hand over a URL or a list of URLs, and a list of network
//! names or a bare name. Only one URL and a list of names are accepted; the
//! other shapes are turned into errors instead of being guessed at.
use crate::network::Network;
use sharecount_common::{Result, ShareCountError};

/// The target URL argument of a fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlArg {
    One(String),
    Many(Vec<String>),
}

impl UrlArg {
    /// The single URL, or [`ShareCountError::MultipleUrls`] for a list of
    /// any length.
    pub fn into_single(self) -> Result<String> {
        match self {
            UrlArg::One(url) => Ok(url),
            UrlArg::Many(_) => Err(ShareCountError::MultipleUrls),
        }
    }
}

impl From<&str> for UrlArg {
    fn from(url: &str) -> Self {
        UrlArg::One(url.to_string())
    }
}

impl From<String> for UrlArg {
    fn from(url: String) -> Self {
        UrlArg::One(url)
    }
}

impl From<&String> for UrlArg {
    fn from(url: &String) -> Self {
        UrlArg::One(url.clone())
    }
}

impl From<Vec<String>> for UrlArg {
    fn from(urls: Vec<String>) -> Self {
        UrlArg::Many(urls)
    }
}

impl From<Vec<&str>> for UrlArg {
    fn from(urls: Vec<&str>) -> Self {
        UrlArg::Many(urls.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for UrlArg {
    fn from(urls: &[&str]) -> Self {
        UrlArg::Many(urls.iter().map(|u| u.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for UrlArg {
    fn from(urls: [&str; N]) -> Self {
        UrlArg::Many(urls.iter().map(|u| u.to_string()).collect())
    }
}

/// Which networks a `get_stats` call should cover.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NetworkArg {
    /// Every registered network.
    #[default]
    All,
    /// An explicit list of identifiers.
    Names(Vec<String>),
    /// A bare identifier. Always rejected: selections must be lists.
    Name(String),
}

impl NetworkArg {
    /// Validate against the registry, dropping repeats but keeping order.
    pub(crate) fn resolve(self) -> Result<Vec<Network>> {
        match self {
            NetworkArg::All => Ok(Network::ALL.to_vec()),
            NetworkArg::Name(name) => Err(ShareCountError::InvalidArgument(format!(
                "networks should be a list of names, not the single name {name:?}"
            ))),
            NetworkArg::Names(names) => {
                let mut resolved: Vec<Network> = Vec::with_capacity(names.len());
                for name in names {
                    let network = name.parse::<Network>()?;
                    if !resolved.contains(&network) {
                        resolved.push(network);
                    }
                }
                Ok(resolved)
            }
        }
    }
}

impl From<&str> for NetworkArg {
    fn from(name: &str) -> Self {
        NetworkArg::Name(name.to_string())
    }
}

impl From<String> for NetworkArg {
    fn from(name: String) -> Self {
        NetworkArg::Name(name)
    }
}

impl From<Vec<String>> for NetworkArg {
    fn from(names: Vec<String>) -> Self {
        NetworkArg::Names(names)
    }
}

impl From<Vec<&str>> for NetworkArg {
    fn from(names: Vec<&str>) -> Self {
        NetworkArg::Names(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for NetworkArg {
    fn from(names: &[&str]) -> Self {
        NetworkArg::Names(names.iter().map(|n| n.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for NetworkArg {
    fn from(names: [&str; N]) -> Self {
        NetworkArg::Names(names.iter().map(|n| n.to_string()).collect())
    }
}

impl From<&[Network]> for NetworkArg {
    fn from(networks: &[Network]) -> Self {
        NetworkArg::Names(networks.iter().map(|n| n.as_str().to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_url_passes() {
        let url = UrlArg::from("http://etsy.com").into_single().unwrap();
        assert_eq!(url, "http://etsy.com");
    }

    #[test]
    fn any_list_of_urls_is_rejected() {
        for arg in [
            UrlArg::from(["http://a.com", "http://b.com"]),
            UrlArg::from(vec!["http://a.com"]),
            UrlArg::from(Vec::<String>::new()),
        ] {
            assert!(matches!(
                arg.into_single(),
                Err(ShareCountError::MultipleUrls)
            ));
        }
    }

    #[test]
    fn all_selects_every_network() {
        let resolved = NetworkArg::All.resolve().unwrap();
        assert_eq!(resolved, Network::ALL.to_vec());
    }

    #[test]
    fn bare_name_is_invalid() {
        let err = NetworkArg::from("facebook").resolve().unwrap_err();
        assert!(matches!(err, ShareCountError::InvalidArgument(_)));
    }

    #[test]
    fn names_resolve_in_order_without_repeats() {
        let resolved = NetworkArg::from(["linkedin", "facebook", "linkedin"])
            .resolve()
            .unwrap();
        assert_eq!(resolved, vec![Network::LinkedIn, Network::Facebook]);
    }

    #[test]
    fn first_unknown_name_fails() {
        let err = NetworkArg::from(["facebook", "myspace", "friendster"])
            .resolve()
            .unwrap_err();
        match err {
            ShareCountError::UnknownNetwork(name) => assert_eq!(name, "myspace"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn empty_list_selects_nothing() {
        let resolved = NetworkArg::Names(vec![]).resolve().unwrap();
        assert!(resolved.is_empty());
    }
}
