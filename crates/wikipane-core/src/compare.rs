use tracing::debug;

use crate::diff::DiffRenderer;
use crate::fetch::{ContentFetcher, FetchRequest, FetchTarget, PageContent, request_url};
use crate::version::CompareVersion;

/// Owns compare-version selection and publishes a diff between the compared
/// revision and the live view text.
#[derive(Debug)]
pub struct CompareCoordinator {
    content_url: String,
    version: CompareVersion,
    current_text: String,
    compare_source: String,
    rendered: String,
    visible: bool,
    token: u64,
}

impl CompareCoordinator {
    pub fn new(content_url: String, version: CompareVersion, visible: bool) -> Self {
        Self {
            content_url,
            version,
            current_text: String::new(),
            compare_source: String::new(),
            rendered: String::new(),
            visible,
            token: 0,
        }
    }

    pub fn version(&self) -> &CompareVersion {
        &self.version
    }

    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    pub fn compare_source(&self) -> &str {
        &self.compare_source
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn select_version(&mut self, version: CompareVersion, fetcher: &mut dyn ContentFetcher) {
        self.version = version;
        self.request(fetcher);
    }

    /// Issues a fetch for the selected revision; `current` fetches too.
    pub fn request(&mut self, fetcher: &mut dyn ContentFetcher) {
        self.token += 1;
        fetcher.fetch(FetchRequest {
            target: FetchTarget::Compare,
            token: self.token,
            url: request_url(&self.content_url, self.version.path_segment()),
        });
    }

    /// Applies a fetch response and recomputes the diff. Superseded
    /// responses are dropped, leaving the last successful source in place.
    pub fn apply_fetch(
        &mut self,
        token: u64,
        content: PageContent,
        differ: &dyn DiffRenderer,
    ) -> bool {
        if token != self.token {
            debug!(token, latest = self.token, "dropping stale compare response");
            return false;
        }

        self.compare_source = content.wiki_content.unwrap_or_default();
        self.recompute(differ);
        true
    }

    /// Feeds the live view text. Recomputes unconditionally: the diff is
    /// event-driven, not value-memoized, so identical text still republishes.
    pub fn set_current_text(&mut self, text: &str, differ: &dyn DiffRenderer) {
        self.current_text.clear();
        self.current_text.push_str(text);
        self.recompute(differ);
    }

    fn recompute(&mut self, differ: &dyn DiffRenderer) {
        self.rendered = differ.diff(&self.compare_source, &self.current_text);
    }
}
