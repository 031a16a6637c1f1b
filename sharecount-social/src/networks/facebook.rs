//! Facebook `links.getStats`: a JSON array whose first element holds the
//! counters.
use super::{count, decode_body, decode_error, from_value, get_body};
use crate::network::Network;
use crate::stats::FacebookStats;
use serde::Deserialize;
use sharecount_common::Result;
use sharecount_http::Transport;

#[derive(Debug, Deserialize)]
struct LinkStatsRow {
    url: String,
    #[serde(deserialize_with = "count")]
    share_count: u64,
    #[serde(deserialize_with = "count")]
    like_count: u64,
    #[serde(deserialize_with = "count")]
    comment_count: u64,
    #[serde(deserialize_with = "count")]
    click_count: u64,
}

pub async fn fetch(transport: &dyn Transport, template: &str, target: &str) -> Result<FacebookStats> {
    let body = get_body(transport, Network::Facebook, template, target).await?;
    parse(&body)
}

pub fn parse(body: &str) -> Result<FacebookStats> {
    let value = decode_body(Network::Facebook, body)?;
    let first = value
        .as_array()
        .and_then(|rows| rows.first())
        .cloned()
        .ok_or_else(|| decode_error(Network::Facebook, "expected a non-empty array of link stats"))?;
    let row: LinkStatsRow = from_value(Network::Facebook, first)?;

    Ok(FacebookStats {
        url: row.url,
        shares: row.share_count,
        likes: row.like_count,
        comments: row.comment_count,
        clicks: row.click_count,
    })
}
