//! StumbleUpon badge info: counters nested under `result`, where `views` is
//! omitted for URLs nobody has stumbled on.
use super::{count, decode_body, from_value, get_body};
use crate::network::Network;
use crate::stats::StumbleUponStats;
use serde::Deserialize;
use sharecount_common::Result;
use sharecount_http::Transport;

#[derive(Debug, Deserialize)]
struct BadgeInfo {
    result: BadgeResult,
}

#[derive(Debug, Deserialize)]
struct BadgeResult {
    url: String,
    #[serde(default, deserialize_with = "count")]
    views: u64,
}

pub async fn fetch(
    transport: &dyn Transport,
    template: &str,
    target: &str,
) -> Result<StumbleUponStats> {
    let body = get_body(transport, Network::StumbleUpon, template, target).await?;
    parse(&body)
}

pub fn parse(body: &str) -> Result<StumbleUponStats> {
    let value = decode_body(Network::StumbleUpon, body)?;
    let info: BadgeInfo = from_value(Network::StumbleUpon, value)?;
    Ok(StumbleUponStats {
        url: info.result.url,
        views: info.result.views,
    })
}
