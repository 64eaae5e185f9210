use std::time::{Duration, Instant};

use tracing::trace;

use crate::compare::CompareCoordinator;
use crate::config::PageConfig;
use crate::diff::DiffRenderer;
use crate::fetch::{ContentFetcher, FetchTarget, PageContent};
use crate::panels::{self, Panel, PanelFlags, VersionRule};
use crate::render::MarkdownRenderer;
use crate::timer::DebounceTimer;
use crate::version::{CompareVersion, ViewVersion};
use crate::view::{ViewCoordinator, ViewUpdate};

/// Quiescent period after the last edit before the full re-render.
pub const FULL_RENDER_DELAY: Duration = Duration::from_millis(500);

/// Render-target id handed to the math typesetter for the view panel.
pub const VIEW_RENDER_TARGET: &str = "wikiViewRender";

/// Typesets math notation in already-rendered content. Must be idempotent:
/// the page calls it on every publish of the same target.
pub trait MathTypesetter {
    fn typeset(&mut self, target_id: &str);
}

/// Replaces the current location in place; never navigates and never pushes
/// a new history entry.
pub trait HistorySink {
    fn replace(&mut self, url: &str);
}

/// External collaborators injected into the page.
pub struct PageServices {
    pub renderer: Box<dyn MarkdownRenderer>,
    pub differ: Box<dyn DiffRenderer>,
    pub fetcher: Box<dyn ContentFetcher>,
    pub math: Box<dyn MathTypesetter>,
    pub history: Box<dyn HistorySink>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    TogglePanel { panel: Panel, visible: bool },
    SelectViewVersion(Option<ViewVersion>),
    SelectCompareVersion(CompareVersion),
    EditorChanged { text: String },
    Fetched {
        target: FetchTarget,
        token: u64,
        content: PageContent,
    },
}

/// Composition root: owns the three coordinators and pushes every state
/// change through a fixed dependency order — panel flags and version rules
/// first, then the view, then the compare panel's current text (compare
/// reads the view's display source, never the other way around), then the
/// math side effect, then the derived URL.
pub struct PageController {
    panels: PanelFlags,
    view: ViewCoordinator,
    compare: CompareCoordinator,
    page_url: String,
    editor_attached: bool,
    timer: DebounceTimer,
    services: PageServices,
}

impl PageController {
    /// Builds the page and runs the initial evaluation: the configured view
    /// and compare versions are fetched (or previewed) and the canonical
    /// URL is published once.
    pub fn new(config: PageConfig, services: PageServices) -> Self {
        let mut page = Self {
            panels: PanelFlags {
                edit: config.edit_visible,
                view: config.view_visible,
                compare: config.compare_visible,
            },
            view: ViewCoordinator::new(
                config.urls.content.clone(),
                Some(config.view_version),
                config.view_visible,
            ),
            compare: CompareCoordinator::new(
                config.urls.content,
                config.compare_version,
                config.compare_visible,
            ),
            page_url: config.urls.page,
            editor_attached: config.can_edit,
            timer: DebounceTimer::new(FULL_RENDER_DELAY),
            services,
        };

        let update = page
            .view
            .refresh(page.services.renderer.as_ref(), page.services.fetcher.as_mut());
        page.propagate_view_update(update);
        page.compare.request(page.services.fetcher.as_mut());
        page.sync_url();
        page
    }

    pub fn panels(&self) -> PanelFlags {
        self.panels
    }

    pub fn view(&self) -> &ViewCoordinator {
        &self.view
    }

    pub fn compare(&self) -> &CompareCoordinator {
        &self.compare
    }

    pub fn editor_attached(&self) -> bool {
        self.editor_attached
    }

    /// The URL the page currently resolves to.
    pub fn current_url(&self) -> String {
        panels::derive_url(
            &self.page_url,
            &self.panels,
            self.view.version(),
            self.compare.version(),
        )
    }

    pub fn handle(&mut self, event: PageEvent) {
        match event {
            PageEvent::TogglePanel { panel, visible } => self.toggle_panel(panel, visible),
            PageEvent::SelectViewVersion(version) => {
                self.set_view_version(version);
                self.sync_url();
            }
            PageEvent::SelectCompareVersion(version) => {
                self.set_compare_version(version);
                self.sync_url();
            }
            PageEvent::EditorChanged { text } => self.editor_changed(text),
            PageEvent::Fetched {
                target,
                token,
                content,
            } => self.fetched(target, token, content),
        }
    }

    /// Drives the debounce timer; call from the host event loop.
    pub fn tick(&mut self, now: Instant) {
        if self.timer.poll(now) {
            let update = self.view.allow_full_render(self.services.renderer.as_ref());
            self.propagate_view_update(update);
        }
    }

    fn toggle_panel(&mut self, panel: Panel, visible: bool) {
        let rule = panels::toggle(&mut self.panels, panel, visible, self.view.version());
        match panel {
            Panel::Edit => {}
            Panel::View => self.view.set_visible(visible),
            Panel::Compare => self.compare.set_visible(visible),
        }
        match rule {
            Some(VersionRule::ForcePreview) => self.set_view_version(Some(ViewVersion::Preview)),
            Some(VersionRule::ResetToCurrent) => self.set_view_version(Some(ViewVersion::Current)),
            None => {}
        }
        self.sync_url();
    }

    /// Same-value writes are suppressed, so re-opening the edit panel while
    /// already previewing does not re-render and re-selecting a remote
    /// version does not re-fetch.
    fn set_view_version(&mut self, version: Option<ViewVersion>) {
        if self.view.version() == version.as_ref() {
            return;
        }
        let update = self.view.select_version(
            version,
            self.services.renderer.as_ref(),
            self.services.fetcher.as_mut(),
        );
        self.propagate_view_update(update);
    }

    fn set_compare_version(&mut self, version: CompareVersion) {
        if self.compare.version() == &version {
            return;
        }
        self.compare
            .select_version(version, self.services.fetcher.as_mut());
    }

    fn editor_changed(&mut self, text: String) {
        if !self.editor_attached {
            return;
        }
        let update = self.view.edit(text, self.services.renderer.as_ref());
        self.timer.restart(Instant::now());
        self.propagate_view_update(update);
    }

    fn fetched(&mut self, target: FetchTarget, token: u64, content: PageContent) {
        match target {
            FetchTarget::View => {
                let update =
                    self.view
                        .apply_fetch(token, content, self.services.renderer.as_ref());
                self.propagate_view_update(update);
            }
            FetchTarget::Compare => {
                self.compare
                    .apply_fetch(token, content, self.services.differ.as_ref());
            }
        }
    }

    fn propagate_view_update(&mut self, update: ViewUpdate) {
        if update.source {
            let text = self.view.display_source().to_string();
            self.compare
                .set_current_text(&text, self.services.differ.as_ref());
        }
        if update.rendered && self.view.should_typeset() {
            self.services.math.typeset(VIEW_RENDER_TARGET);
        }
    }

    fn sync_url(&mut self) {
        let url = self.current_url();
        trace!(%url, "canonical page url");
        self.services.history.replace(&url);
    }
}
