use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::{Frame, Terminal};
use tracing::debug;
use wikipane_core::{
    CmarkRenderer, CompareVersion, ContentFetcher, HistorySink, LineDiff, MathTypesetter,
    PageConfig, PageController, PageEvent, PageServices, Panel, ViewVersion,
};

use crate::http::FetchedMessage;
use crate::input::{self, AppAction, KEY_HINTS};
use crate::ui::layout::compute_panel_layout;
use crate::ui::render::{compose_status, truncate_middle};
use crate::ui::theme::ThemeTokens;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusPane {
    Edit,
    View,
    Compare,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptKind {
    ViewVersion,
    CompareVersion,
}

#[derive(Debug)]
struct Prompt {
    kind: PromptKind,
    query: String,
}

/// History sink backed by a cell the status bar reads from: the terminal's
/// stand-in for replacing the browser location.
struct UrlBar(Rc<RefCell<String>>);

impl HistorySink for UrlBar {
    fn replace(&mut self, url: &str) {
        *self.0.borrow_mut() = url.to_string();
    }
}

/// There is no MathJax in a terminal; the invocation is only traced.
struct MathMarker;

impl MathTypesetter for MathMarker {
    fn typeset(&mut self, target_id: &str) {
        debug!(target_id, "math typeset requested");
    }
}

pub struct App {
    page: PageController,
    fetch_rx: Receiver<FetchedMessage>,
    url: Rc<RefCell<String>>,
    draft: String,
    focus: FocusPane,
    prompt: Option<Prompt>,
    status: String,
    status_is_error: bool,
    theme: ThemeTokens,
}

impl App {
    pub fn new(
        config: PageConfig,
        fetcher: Box<dyn ContentFetcher>,
        fetch_rx: Receiver<FetchedMessage>,
        theme: ThemeTokens,
    ) -> Self {
        let url = Rc::new(RefCell::new(String::new()));
        let services = PageServices {
            renderer: Box::new(CmarkRenderer),
            differ: Box::new(LineDiff),
            fetcher,
            math: Box::new(MathMarker),
            history: Box::new(UrlBar(Rc::clone(&url))),
        };
        let page = PageController::new(config, services);
        let focus = if page.panels().edit {
            FocusPane::Edit
        } else {
            FocusPane::View
        };

        Self {
            page,
            fetch_rx,
            url,
            draft: String::new(),
            focus,
            prompt: None,
            status: "Ready".into(),
            status_is_error: false,
            theme,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        enable_raw_mode()?;

        let loop_result = self.run_loop(&mut terminal);

        disable_raw_mode()?;
        terminal.backend_mut().execute(LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        loop_result
    }

    fn run_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let mut running = true;

        while running {
            self.drain_fetches();
            self.page.tick(Instant::now());
            terminal.draw(|frame| self.draw(frame))?;

            if event::poll(POLL_INTERVAL)?
                && let Event::Key(key) = event::read()?
            {
                self.handle_key(key, &mut running);
            }
        }

        Ok(())
    }

    fn drain_fetches(&mut self) {
        while let Ok(msg) = self.fetch_rx.try_recv() {
            self.page.handle(PageEvent::Fetched {
                target: msg.target,
                token: msg.token,
                content: msg.content,
            });
        }
    }

    fn handle_key(&mut self, key: KeyEvent, running: &mut bool) {
        if let Some(action) = input::map_global_key(key) {
            self.apply_action(action, running);
            return;
        }

        if self.prompt.is_some() {
            self.handle_prompt_key(key);
            return;
        }

        self.handle_edit_key(key);
    }

    fn apply_action(&mut self, action: AppAction, running: &mut bool) {
        match action {
            AppAction::Quit => *running = false,
            AppAction::ToggleEdit => {
                if !self.page.editor_attached() {
                    self.set_error("Read only: edit panel disabled");
                    return;
                }
                self.toggle_panel(Panel::Edit);
                if self.page.panels().edit {
                    self.focus = FocusPane::Edit;
                }
            }
            AppAction::ToggleView => self.toggle_panel(Panel::View),
            AppAction::ToggleCompare => self.toggle_panel(Panel::Compare),
            AppAction::CycleFocus => self.cycle_focus(),
            AppAction::SelectPreview => {
                self.page
                    .handle(PageEvent::SelectViewVersion(Some(ViewVersion::Preview)));
                self.set_status("View version: preview");
            }
            AppAction::SelectCurrent => {
                self.page
                    .handle(PageEvent::SelectViewVersion(Some(ViewVersion::Current)));
                self.set_status("View version: current");
            }
            AppAction::PromptViewVersion => {
                self.prompt = Some(Prompt {
                    kind: PromptKind::ViewVersion,
                    query: String::new(),
                });
            }
            AppAction::PromptCompareVersion => {
                self.prompt = Some(Prompt {
                    kind: PromptKind::CompareVersion,
                    query: String::new(),
                });
            }
        }
    }

    fn toggle_panel(&mut self, panel: Panel) {
        let visible = !self.page.panels().is_visible(panel);
        self.page.handle(PageEvent::TogglePanel { panel, visible });

        let name = match panel {
            Panel::Edit => "edit",
            Panel::View => "view",
            Panel::Compare => "compare",
        };
        self.set_status(&format!(
            "{name} panel {}",
            if visible { "opened" } else { "closed" }
        ));
        self.ensure_focus_visible();
    }

    fn visible_panes(&self) -> Vec<FocusPane> {
        let flags = self.page.panels();
        let mut panes = Vec::new();
        if flags.edit {
            panes.push(FocusPane::Edit);
        }
        if flags.view {
            panes.push(FocusPane::View);
        }
        if flags.compare {
            panes.push(FocusPane::Compare);
        }
        panes
    }

    fn cycle_focus(&mut self) {
        let panes = self.visible_panes();
        if panes.is_empty() {
            return;
        }
        let next = panes
            .iter()
            .position(|&pane| pane == self.focus)
            .map(|index| (index + 1) % panes.len())
            .unwrap_or(0);
        self.focus = panes[next];
    }

    fn ensure_focus_visible(&mut self) {
        let panes = self.visible_panes();
        if !panes.contains(&self.focus)
            && let Some(first) = panes.first()
        {
            self.focus = *first;
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => {
                self.prompt = None;
                self.set_status("Version select cancelled");
            }
            (KeyCode::Enter, _) => {
                if let Some(prompt) = self.prompt.take() {
                    self.commit_prompt(prompt);
                }
            }
            (KeyCode::Backspace, _) => {
                if let Some(prompt) = &mut self.prompt {
                    prompt.query.pop();
                }
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                if let Some(prompt) = &mut self.prompt {
                    prompt.query.push(c);
                }
            }
            _ => {}
        }
    }

    fn commit_prompt(&mut self, prompt: Prompt) {
        match prompt.kind {
            PromptKind::ViewVersion => match prompt.query.parse::<ViewVersion>() {
                Ok(version) => {
                    self.set_status(&format!("View version: {version}"));
                    self.page.handle(PageEvent::SelectViewVersion(Some(version)));
                }
                Err(err) => self.set_error(&err.to_string()),
            },
            PromptKind::CompareVersion => match prompt.query.parse::<CompareVersion>() {
                Ok(version) => {
                    self.set_status(&format!("Compare version: {version}"));
                    self.page.handle(PageEvent::SelectCompareVersion(version));
                }
                Err(err) => self.set_error(&err.to_string()),
            },
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        if self.focus != FocusPane::Edit
            || !self.page.panels().edit
            || !self.page.editor_attached()
        {
            return;
        }

        let changed = match (key.code, key.modifiers) {
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.draft.push(c);
                true
            }
            (KeyCode::Enter, _) => {
                self.draft.push('\n');
                true
            }
            (KeyCode::Backspace, _) => self.draft.pop().is_some(),
            _ => false,
        };

        if changed {
            self.page.handle(PageEvent::EditorChanged {
                text: self.draft.clone(),
            });
        }
    }

    fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
        self.status_is_error = false;
    }

    fn set_error(&mut self, status: &str) {
        self.status = status.to_string();
        self.status_is_error = true;
    }

    fn draw(&mut self, frame: &mut Frame<'_>) {
        let area = frame.area();
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        let url = self.url.borrow().clone();
        let top = truncate_middle(&url, vertical[0].width as usize).into_owned();
        frame.render_widget(Paragraph::new(top).style(self.theme.top_bar), vertical[0]);

        for slot in compute_panel_layout(vertical[1], self.page.panels()) {
            match slot.panel {
                Panel::Edit => self.draw_edit_pane(frame, slot.area),
                Panel::View => self.draw_view_pane(frame, slot.area),
                Panel::Compare => self.draw_compare_pane(frame, slot.area),
            }
        }

        let left = match &self.prompt {
            Some(prompt) => match prompt.kind {
                PromptKind::ViewVersion => format!("View version: {}", prompt.query),
                PromptKind::CompareVersion => format!("Compare version: {}", prompt.query),
            },
            None => self.status.clone(),
        };
        let style = if self.prompt.is_some() {
            self.theme.prompt
        } else if self.status_is_error {
            self.theme.status_error
        } else {
            self.theme.status
        };
        let status = compose_status(&left, KEY_HINTS, vertical[2].width as usize);
        frame.render_widget(Paragraph::new(status).style(style), vertical[2]);
    }

    fn draw_edit_pane(&self, frame: &mut Frame<'_>, area: Rect) {
        let pane = Paragraph::new(self.draft.clone())
            .block(self.pane_block("Edit", self.focus == FocusPane::Edit))
            .wrap(Wrap { trim: false });
        frame.render_widget(pane, area);
    }

    fn draw_view_pane(&self, frame: &mut Frame<'_>, area: Rect) {
        let version = match self.page.view().version() {
            Some(version) => version.to_string(),
            None => "unset".into(),
        };
        let pane = Paragraph::new(self.page.view().rendered().to_string())
            .block(self.pane_block(
                &format!("View [{version}]"),
                self.focus == FocusPane::View,
            ))
            .wrap(Wrap { trim: false });
        frame.render_widget(pane, area);
    }

    fn draw_compare_pane(&self, frame: &mut Frame<'_>, area: Rect) {
        let version = self.page.compare().version().to_string();
        let pane = Paragraph::new(self.page.compare().rendered().to_string())
            .block(self.pane_block(
                &format!("Compare [{version}]"),
                self.focus == FocusPane::Compare,
            ))
            .wrap(Wrap { trim: false });
        frame.render_widget(pane, area);
    }

    fn pane_block(&self, title: &str, focused: bool) -> Block<'static> {
        let border = if focused {
            self.theme.pane_focus
        } else {
            self.theme.pane_border
        };
        Block::default()
            .borders(Borders::ALL)
            .title(title.to_string())
            .border_style(border)
    }
}
