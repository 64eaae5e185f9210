use ratatui::layout::{Constraint, Direction, Layout, Rect};
use wikipane_core::{Panel, PanelFlags};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneSlot {
    pub panel: Panel,
    pub area: Rect,
}

/// Visible panels share the content area evenly, side by side on wide
/// terminals and stacked below 100 columns.
pub fn compute_panel_layout(area: Rect, flags: PanelFlags) -> Vec<PaneSlot> {
    let panels: Vec<Panel> = [Panel::Edit, Panel::View, Panel::Compare]
        .into_iter()
        .filter(|panel| flags.is_visible(*panel))
        .collect();

    if panels.is_empty() {
        return Vec::new();
    }

    let direction = if area.width >= 100 {
        Direction::Horizontal
    } else {
        Direction::Vertical
    };

    let count = panels.len() as u16;
    let share = 100 / count;
    let mut constraints = vec![Constraint::Percentage(share); panels.len()];
    if let Some(last) = constraints.last_mut() {
        *last = Constraint::Percentage(100 - share * (count - 1));
    }

    let areas = Layout::default()
        .direction(direction)
        .constraints(constraints)
        .split(area);

    panels
        .into_iter()
        .zip(areas.iter().copied())
        .map(|(panel, area)| PaneSlot { panel, area })
        .collect()
}
