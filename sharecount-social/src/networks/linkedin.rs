//! LinkedIn share counter: a flat JSON object.
use super::{count, decode_body, from_value, get_body};
use crate::network::Network;
use crate::stats::LinkedInStats;
use serde::Deserialize;
use sharecount_common::Result;
use sharecount_http::Transport;

#[derive(Debug, Deserialize)]
struct ShareCount {
    url: String,
    #[serde(deserialize_with = "count")]
    count: u64,
}

pub async fn fetch(transport: &dyn Transport, template: &str, target: &str) -> Result<LinkedInStats> {
    let body = get_body(transport, Network::LinkedIn, template, target).await?;
    parse(&body)
}

pub fn parse(body: &str) -> Result<LinkedInStats> {
    let value = decode_body(Network::LinkedIn, body)?;
    let raw: ShareCount = from_value(Network::LinkedIn, value)?;
    Ok(LinkedInStats {
        url: raw.url,
        shares: raw.count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharecount_common::ShareCountError;

    #[test]
    fn parses_share_count() {
        let stats = parse(r#"{"count": 1520, "fCnt": "1,520", "fCntPlusOne": "1,521", "url": "http://etsy.com"}"#)
            .unwrap();
        assert_eq!(stats.url, "http://etsy.com");
        assert_eq!(stats.shares, 1520);
    }

    #[test]
    fn null_body_is_no_data() {
        let err = parse("null").unwrap_err();
        assert!(matches!(err, ShareCountError::NoData { network: "LinkedIn" }));
    }

    #[test]
    fn zero_shares_is_a_result() {
        let stats = parse(r#"{"count": 0, "url": "http://quiet.example"}"#).unwrap();
        assert_eq!(stats.shares, 0);
    }
}
