//! Pinterest URL counter. The JSON object comes wrapped in a JSONP callback,
//! `receiveCount({...})`, which is cut off by position before parsing.
use super::{count, decode_body, from_value, get_body};
use crate::network::Network;
use crate::stats::PinterestStats;
use serde::Deserialize;
use sharecount_common::Result;
use sharecount_http::Transport;

/// Length of the `receiveCount(` prefix.
pub const ENVELOPE_PREFIX_LEN: usize = 13;
/// Length of the closing `)`.
pub const ENVELOPE_SUFFIX_LEN: usize = 1;

#[derive(Debug, Deserialize)]
struct PinCount {
    url: String,
    #[serde(deserialize_with = "count")]
    count: u64,
}

pub async fn fetch(transport: &dyn Transport, template: &str, target: &str) -> Result<PinterestStats> {
    let body = get_body(transport, Network::Pinterest, template, target).await?;
    parse(&body)
}

pub fn parse(body: &str) -> Result<PinterestStats> {
    let value = decode_body(Network::Pinterest, strip_envelope(body))?;
    let raw: PinCount = from_value(Network::Pinterest, value)?;
    Ok(PinterestStats {
        url: raw.url,
        pins: raw.count,
    })
}

/// Drop the fixed-width callback wrapper. Bodies too short to hold it (or
/// cut mid-character) come back empty and fail JSON decoding.
pub fn strip_envelope(body: &str) -> &str {
    let end = body.len().saturating_sub(ENVELOPE_SUFFIX_LEN);
    body.get(ENVELOPE_PREFIX_LEN..end).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharecount_common::ShareCountError;

    #[test]
    fn strips_callback_wrapper() {
        let stats = parse(r#"receiveCount({"url":"http://x","count":7})"#).unwrap();
        assert_eq!(stats.url, "http://x");
        assert_eq!(stats.pins, 7);
    }

    #[test]
    fn stripping_is_positional() {
        // Any 13-character prefix is discarded, whatever it says.
        let stats = parse(r#"callbackName({"url":"http://x","count":"2"}]"#).unwrap();
        assert_eq!(stats.pins, 2);
    }

    #[test]
    fn unwrapped_json_fails_to_decode() {
        let err = parse(r#"{"url":"http://x","count":7}"#).unwrap_err();
        assert!(matches!(err, ShareCountError::Decode { network: "Pinterest", .. }));
    }

    #[test]
    fn short_bodies_decode_as_nothing() {
        assert_eq!(strip_envelope("receiveCount"), "");
        assert_eq!(strip_envelope(""), "");
        assert!(matches!(
            parse("receiveCount()").unwrap_err(),
            ShareCountError::Decode { .. }
        ));
    }

    #[test]
    fn empty_object_is_no_data() {
        let err = parse("receiveCount({})").unwrap_err();
        assert!(matches!(err, ShareCountError::NoData { network: "Pinterest" }));
    }
}
