use serde::Deserialize;

/// Which coordinator issued a request; responses are routed back by target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTarget {
    View,
    Compare,
}

/// A fire-and-forget content request. The token is per-coordinator and
/// monotonically increasing; a response is applied only while its token is
/// still the latest one issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub target: FetchTarget,
    pub token: u64,
    pub url: String,
}

/// Body of the wiki content endpoint. Both fields are nullable: a revision
/// may have no stored text, and the server only sometimes pre-renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageContent {
    #[serde(default)]
    pub wiki_content: Option<String>,
    #[serde(default)]
    pub wiki_rendered: Option<String>,
}

pub trait ContentFetcher {
    fn fetch(&mut self, request: FetchRequest);
}

/// `current` fetches the bare endpoint; a saved revision appends its id.
pub fn request_url(content_url: &str, segment: Option<&str>) -> String {
    match segment {
        Some(id) => format!("{content_url}{id}"),
        None => content_url.to_string(),
    }
}
