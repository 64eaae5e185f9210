use tracing::debug;

use crate::fetch::{ContentFetcher, FetchRequest, FetchTarget, PageContent, request_url};
use crate::render::{MarkdownRenderer, RenderMode};
use crate::version::ViewVersion;

/// Markdown substituted when a fetched revision has no stored text.
pub const NO_CONTENT_PLACEHOLDER: &str = "*No wiki content*";

/// What a view mutation touched, so the page controller knows what to
/// propagate: `rendered` drives the math typeset side effect, `source`
/// feeds the compare panel's current-text input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewUpdate {
    pub rendered: bool,
    pub source: bool,
}

/// Owns view-version selection and produces the view panel's rendered
/// content, fetching remote revisions when the selector requires it.
#[derive(Debug)]
pub struct ViewCoordinator {
    content_url: String,
    version: Option<ViewVersion>,
    live_text: String,
    rendered: String,
    visible: bool,
    mathjax_allowed: bool,
    full_render_allowed: bool,
    display_source: String,
    token: u64,
}

impl ViewCoordinator {
    pub fn new(content_url: String, version: Option<ViewVersion>, visible: bool) -> Self {
        Self {
            content_url,
            version,
            live_text: String::new(),
            rendered: String::new(),
            visible,
            mathjax_allowed: true,
            full_render_allowed: true,
            display_source: String::new(),
            token: 0,
        }
    }

    pub fn version(&self) -> Option<&ViewVersion> {
        self.version.as_ref()
    }

    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    /// Last raw text this panel fetched or previewed; the compare panel
    /// reads this as the "current" side of its diff.
    pub fn display_source(&self) -> &str {
        &self.display_source
    }

    pub fn live_text(&self) -> &str {
        &self.live_text
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn mathjax_allowed(&self) -> bool {
        self.mathjax_allowed
    }

    pub fn full_render_allowed(&self) -> bool {
        self.full_render_allowed
    }

    /// Pre-rendered content arrives already typeset, and partial renders are
    /// not worth typesetting; math runs only when both flags allow it.
    pub fn should_typeset(&self) -> bool {
        self.mathjax_allowed && self.full_render_allowed
    }

    pub fn select_version(
        &mut self,
        version: Option<ViewVersion>,
        renderer: &dyn MarkdownRenderer,
        fetcher: &mut dyn ContentFetcher,
    ) -> ViewUpdate {
        self.version = version;
        self.refresh(renderer, fetcher)
    }

    /// Re-evaluates the selector: previews render synchronously, remote
    /// versions issue exactly one token-tagged fetch.
    pub fn refresh(
        &mut self,
        renderer: &dyn MarkdownRenderer,
        fetcher: &mut dyn ContentFetcher,
    ) -> ViewUpdate {
        match self.version.clone() {
            None => {
                self.display_source.clear();
                ViewUpdate {
                    rendered: false,
                    source: true,
                }
            }
            Some(ViewVersion::Preview) => self.render_preview(renderer),
            Some(version) => {
                self.token += 1;
                fetcher.fetch(FetchRequest {
                    target: FetchTarget::View,
                    token: self.token,
                    url: request_url(&self.content_url, version.path_segment()),
                });
                ViewUpdate::default()
            }
        }
    }

    /// The live editor changed. Drops to a fast partial render immediately;
    /// remote versions are not re-fetched on keystrokes.
    pub fn edit(&mut self, text: String, renderer: &dyn MarkdownRenderer) -> ViewUpdate {
        self.live_text = text;
        self.full_render_allowed = false;
        self.render_draft(renderer)
    }

    /// The debounce window elapsed with no further edits: one full render.
    pub fn allow_full_render(&mut self, renderer: &dyn MarkdownRenderer) -> ViewUpdate {
        self.full_render_allowed = true;
        self.render_draft(renderer)
    }

    fn render_draft(&mut self, renderer: &dyn MarkdownRenderer) -> ViewUpdate {
        if self.version != Some(ViewVersion::Preview) {
            return ViewUpdate::default();
        }
        self.render_preview(renderer)
    }

    fn render_preview(&mut self, renderer: &dyn MarkdownRenderer) -> ViewUpdate {
        self.rendered = renderer.render(&self.live_text, self.render_mode());
        self.display_source = self.live_text.clone();
        ViewUpdate {
            rendered: true,
            source: true,
        }
    }

    /// Applies a fetch response. Responses for superseded selections are
    /// discarded; `display_source` always tracks an accepted response while
    /// `rendered` is only published when the panel is visible.
    pub fn apply_fetch(
        &mut self,
        token: u64,
        content: PageContent,
        renderer: &dyn MarkdownRenderer,
    ) -> ViewUpdate {
        if token != self.token {
            debug!(token, latest = self.token, "dropping stale view response");
            return ViewUpdate::default();
        }

        let raw = match content.wiki_content {
            Some(text) if !text.is_empty() => text,
            _ => NO_CONTENT_PLACEHOLDER.to_string(),
        };

        let mut update = ViewUpdate {
            rendered: false,
            source: true,
        };
        match content.wiki_rendered {
            Some(pre_rendered) if !pre_rendered.is_empty() => {
                self.mathjax_allowed = false;
                if self.visible {
                    self.rendered = pre_rendered;
                    update.rendered = true;
                }
            }
            _ => {
                self.mathjax_allowed = true;
                if self.visible {
                    self.rendered = renderer.render(&raw, self.render_mode());
                    update.rendered = true;
                }
            }
        }
        self.display_source = raw;
        update
    }

    fn render_mode(&self) -> RenderMode {
        if self.full_render_allowed {
            RenderMode::Full
        } else {
            RenderMode::Fast
        }
    }
}
