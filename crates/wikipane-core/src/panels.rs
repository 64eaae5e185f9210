use crate::version::{CompareVersion, ViewVersion};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Edit,
    View,
    Compare,
}

/// Visibility of the three panels. Any combination is structurally legal;
/// the derived URL and version rules keep the rest of the page consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelFlags {
    pub edit: bool,
    pub view: bool,
    pub compare: bool,
}

impl PanelFlags {
    pub fn is_visible(&self, panel: Panel) -> bool {
        match panel {
            Panel::Edit => self.edit,
            Panel::View => self.view,
            Panel::Compare => self.compare,
        }
    }

    fn set(&mut self, panel: Panel, visible: bool) {
        match panel {
            Panel::Edit => self.edit = visible,
            Panel::View => self.view = visible,
            Panel::Compare => self.compare = visible,
        }
    }
}

/// Cross-panel version rule a toggle may trigger on the view panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionRule {
    ForcePreview,
    ResetToCurrent,
}

/// Applies a toggle request. Opening the edit panel forces the view into
/// preview; closing it releases a preview back to `current` but leaves a
/// pinned historical version alone.
pub fn toggle(
    flags: &mut PanelFlags,
    panel: Panel,
    visible: bool,
    view_version: Option<&ViewVersion>,
) -> Option<VersionRule> {
    flags.set(panel, visible);

    if panel != Panel::Edit {
        return None;
    }

    if visible {
        Some(VersionRule::ForcePreview)
    } else if view_version == Some(&ViewVersion::Preview) {
        Some(VersionRule::ResetToCurrent)
    } else {
        None
    }
}

/// Derives the canonical navigable URL from panel state.
pub fn derive_url(
    page_url: &str,
    flags: &PanelFlags,
    view_version: Option<&ViewVersion>,
    compare_version: &CompareVersion,
) -> String {
    let mut url = page_url.to_string();

    if flags.edit {
        url.push_str("edit/");
    }

    let view_is_saved = matches!(view_version, Some(ViewVersion::Saved(_)));
    if flags.view && ((flags.edit && flags.compare) || view_is_saved) {
        url.push_str("view/");
        if let Some(ViewVersion::Saved(id)) = view_version {
            url.push_str(id);
            url.push('/');
        }
    }

    if flags.compare {
        url.push_str("compare/");
        if let CompareVersion::Saved(id) = compare_version {
            url.push_str(id);
            url.push('/');
        }
    }

    url
}

#[cfg(test)]
mod tests {
    use crate::version::{CompareVersion, ViewVersion};

    use super::{Panel, PanelFlags, VersionRule, derive_url, toggle};

    const DEFAULT_FLAGS: PanelFlags = PanelFlags {
        edit: false,
        view: true,
        compare: false,
    };

    #[test]
    fn opening_edit_forces_preview() {
        let mut flags = DEFAULT_FLAGS;
        let rule = toggle(&mut flags, Panel::Edit, true, Some(&ViewVersion::Current));
        assert!(flags.edit);
        assert_eq!(rule, Some(VersionRule::ForcePreview));
    }

    #[test]
    fn closing_edit_releases_preview_to_current() {
        let mut flags = PanelFlags {
            edit: true,
            ..DEFAULT_FLAGS
        };
        let rule = toggle(&mut flags, Panel::Edit, false, Some(&ViewVersion::Preview));
        assert!(!flags.edit);
        assert_eq!(rule, Some(VersionRule::ResetToCurrent));
    }

    #[test]
    fn closing_edit_leaves_historical_version_alone() {
        let mut flags = PanelFlags {
            edit: true,
            ..DEFAULT_FLAGS
        };
        let saved = ViewVersion::Saved("v4".into());
        let rule = toggle(&mut flags, Panel::Edit, false, Some(&saved));
        assert_eq!(rule, None);
    }

    #[test]
    fn non_edit_toggles_never_touch_the_version() {
        let mut flags = DEFAULT_FLAGS;
        assert_eq!(
            toggle(&mut flags, Panel::Compare, true, Some(&ViewVersion::Preview)),
            None
        );
        assert!(flags.compare);
        assert_eq!(
            toggle(&mut flags, Panel::View, false, Some(&ViewVersion::Preview)),
            None
        );
        assert!(!flags.view);
    }

    #[test]
    fn url_for_historical_view_with_compare() {
        let flags = PanelFlags {
            edit: false,
            view: true,
            compare: true,
        };
        let url = derive_url(
            "/project123/wiki/Home/",
            &flags,
            Some(&ViewVersion::Saved("v2".into())),
            &CompareVersion::Current,
        );
        assert_eq!(url, "/project123/wiki/Home/view/v2/compare/");
    }

    #[test]
    fn url_omits_view_segment_for_current_version() {
        let url = derive_url(
            "/p/wiki/Home/",
            &DEFAULT_FLAGS,
            Some(&ViewVersion::Current),
            &CompareVersion::Current,
        );
        assert_eq!(url, "/p/wiki/Home/");
    }

    #[test]
    fn url_includes_view_segment_when_all_panels_open() {
        let flags = PanelFlags {
            edit: true,
            view: true,
            compare: true,
        };
        let url = derive_url(
            "/p/wiki/Home/",
            &flags,
            Some(&ViewVersion::Preview),
            &CompareVersion::Current,
        );
        assert_eq!(url, "/p/wiki/Home/edit/view/compare/");
    }

    #[test]
    fn url_appends_compare_version_id() {
        let flags = PanelFlags {
            edit: false,
            view: false,
            compare: true,
        };
        let url = derive_url(
            "/p/wiki/Home/",
            &flags,
            Some(&ViewVersion::Current),
            &CompareVersion::Saved("v7".into()),
        );
        assert_eq!(url, "/p/wiki/Home/compare/v7/");
    }

    #[test]
    fn url_with_edit_only() {
        let flags = PanelFlags {
            edit: true,
            view: true,
            compare: false,
        };
        let url = derive_url(
            "/p/wiki/Home/",
            &flags,
            Some(&ViewVersion::Preview),
            &CompareVersion::Current,
        );
        assert_eq!(url, "/p/wiki/Home/edit/");
    }

    #[test]
    fn url_with_unset_view_version() {
        let url = derive_url(
            "/p/wiki/Home/",
            &DEFAULT_FLAGS,
            None,
            &CompareVersion::Current,
        );
        assert_eq!(url, "/p/wiki/Home/");
    }
}
