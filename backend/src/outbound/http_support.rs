//! Request plumbing shared by the reqwest adapters.

use reqwest::{RequestBuilder, Url};

use crate::domain::{TRACE_ID_HEADER, TraceId, UserId};

/// Header naming the user on whose behalf a backend call is made.
pub const USER_ID_HEADER: &str = "User-Id";

const PREVIEW_CHAR_LIMIT: usize = 160;

/// Append `segments` to the path of `base`.
///
/// Returns `None` for URLs that cannot carry a path, such as `mailto:`.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Option<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .extend(segments);
    Some(url)
}

/// Attach the caller identity and the active trace identifier.
pub(crate) fn with_context(builder: RequestBuilder, user_id: Option<&UserId>) -> RequestBuilder {
    let builder = match TraceId::current() {
        Some(trace_id) => builder.header(TRACE_ID_HEADER, trace_id.to_string()),
        None => builder,
    };
    match user_id {
        Some(user_id) => builder.header(USER_ID_HEADER, user_id.to_string()),
        None => builder,
    }
}

/// Whitespace-collapsed prefix of a response body for log lines.
pub(crate) fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
