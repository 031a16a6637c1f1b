//! Share-link builders. Pure string work, no requests.
//!
//! Tracking parameters (`utm_source`, `utm_campaign`, ...) are appended to
//! the target URL, and the tagged target becomes the share parameter of the
//! network's sharer page. Keys and values are form-encoded twice: once into
//! the target's query, once as part of the share parameter.
use url::form_urlencoded;

const FACEBOOK_SHARER: &str = "https://facebook.com/sharer/sharer.php";
const TWITTER_SHARER: &str = "https://twitter.com/home";
const GPLUS_SHARER: &str = "https://plus.google.com/share";

/// ```
/// use sharecount_social::share::facebook_share_link;
///
/// let link = facebook_share_link("http://etsy.com", &[("utm_source", "facebook")]);
/// assert_eq!(
///     link,
///     "https://facebook.com/sharer/sharer.php?u=http%3A%2F%2Fetsy.com%3Futm_source%3Dfacebook"
/// );
/// ```
pub fn facebook_share_link<K, V>(target: &str, params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    share_link(FACEBOOK_SHARER, "u", target, params)
}

pub fn twitter_share_link<K, V>(target: &str, params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    share_link(TWITTER_SHARER, "status", target, params)
}

pub fn gplus_share_link<K, V>(target: &str, params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    share_link(GPLUS_SHARER, "url", target, params)
}

fn share_link<K, V>(sharer: &str, key: &str, target: &str, params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let tagged = tag_target(target, params);
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair(key, &tagged)
        .finish();
    format!("{sharer}?{query}")
}

fn tag_target<K, V>(target: &str, params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    if params.is_empty() {
        return target.to_string();
    }
    let tracking = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter())
        .finish();
    let sep = if target.contains('?') { '&' } else { '?' };
    format!("{target}{sep}{tracking}")
}
