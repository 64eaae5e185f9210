pub mod compare;
pub mod config;
pub mod diff;
pub mod fetch;
pub mod page;
pub mod panels;
pub mod render;
pub mod timer;
pub mod version;
pub mod view;

pub use compare::CompareCoordinator;
pub use config::{PageConfig, PageUrls};
pub use diff::{DiffRenderer, LineDiff};
pub use fetch::{ContentFetcher, FetchRequest, FetchTarget, PageContent, request_url};
pub use page::{
    FULL_RENDER_DELAY, HistorySink, MathTypesetter, PageController, PageEvent, PageServices,
    VIEW_RENDER_TARGET,
};
pub use panels::{Panel, PanelFlags, derive_url};
pub use render::{CmarkRenderer, MarkdownRenderer, RenderMode};
pub use timer::DebounceTimer;
pub use version::{CompareVersion, VersionError, ViewVersion};
pub use view::{NO_CONTENT_PLACEHOLDER, ViewCoordinator, ViewUpdate};
