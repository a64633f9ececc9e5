//! Full-screen dashboard over the project collection.
//!
//! Key bindings: `/` search, `s` cycle status filter, `v` toggle cards/table,
//! `c` new project, `r` refresh (and retry after a failed fetch), `x` clear
//! filters, `q` quit. The record set is re-fetched wholesale on entry, on
//! `r`, and after every successful create; nothing is merged locally.

use anyhow::Result;
use boma_core::engine::currency::format_ugx;
use boma_core::engine::filter::{self, StatusFilter};
use boma_core::engine::stats::{self, Totals};
use boma_core::model::project::Project;
use boma_core::store::RecordStore;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use std::time::Duration;

use super::create_dialog::{CreateDialog, DialogOutcome};

/// How the filtered records are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Cards,
    Table,
}

impl ViewMode {
    fn toggle(self) -> Self {
        match self {
            Self::Cards => Self::Table,
            Self::Table => Self::Cards,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum InputMode {
    #[default]
    Normal,
    Search,
}

/// Dashboard state: the fetched record set plus the view controls.
pub struct Dashboard<'a> {
    store: &'a dyn RecordStore,
    records: Vec<Project>,
    search: String,
    status_filter: StatusFilter,
    view: ViewMode,
    input_mode: InputMode,
    dialog: Option<CreateDialog>,
    error: Option<String>,
    status_line: Option<String>,
    should_quit: bool,
}

impl<'a> Dashboard<'a> {
    /// Build the dashboard and run the initial fetch.
    pub fn new(store: &'a dyn RecordStore) -> Self {
        let mut dashboard = Self {
            store,
            records: Vec::new(),
            search: String::new(),
            status_filter: StatusFilter::All,
            view: ViewMode::default(),
            input_mode: InputMode::default(),
            dialog: None,
            error: None,
            status_line: None,
            should_quit: false,
        };
        dashboard.refresh();
        dashboard
    }

    /// Replace the in-memory set with a fresh full read. On failure the
    /// previous set is kept and the error surfaced with a retry hint.
    pub fn refresh(&mut self) {
        match self.store.list_all() {
            Ok(records) => {
                self.records = records;
                self.error = None;
            }
            Err(err) => {
                self.error = Some(format!("{err}. {} (press r to retry)", err.suggestion()));
            }
        }
    }

    /// Event loop: draw, poll, dispatch, until quit.
    pub fn run(mut self, terminal: &mut ratatui::DefaultTerminal) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;
            if event::poll(Duration::from_millis(200))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }
        }
        Ok(())
    }

    /// The displayed subset under the current search and status filter.
    #[must_use]
    pub fn visible(&self) -> Vec<&Project> {
        filter::apply(&self.records, &self.search, self.status_filter)
    }

    /// Summary tiles over the full (unfiltered) set.
    #[must_use]
    pub fn totals(&self) -> Totals {
        stats::aggregate(&self.records)
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.status_line = None;

        if let Some(dialog) = self.dialog.as_mut() {
            match dialog.handle_key(key, self.store) {
                Some(DialogOutcome::Created(id)) => {
                    self.dialog = None;
                    self.status_line = Some(format!("created {id}"));
                    self.refresh();
                }
                Some(DialogOutcome::Cancelled) => self.dialog = None,
                None => {}
            }
            return;
        }

        match self.input_mode {
            InputMode::Search => match key.code {
                KeyCode::Esc | KeyCode::Enter => self.input_mode = InputMode::Normal,
                KeyCode::Backspace => {
                    self.search.pop();
                }
                KeyCode::Char(c) => self.search.push(c),
                _ => {}
            },
            InputMode::Normal => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                KeyCode::Char('/') => self.input_mode = InputMode::Search,
                KeyCode::Char('s') => self.status_filter = self.status_filter.next(),
                KeyCode::Char('v') => self.view = self.view.toggle(),
                KeyCode::Char('r') => self.refresh(),
                KeyCode::Char('c') => self.dialog = Some(CreateDialog::new()),
                KeyCode::Char('x') => {
                    self.search.clear();
                    self.status_filter = StatusFilter::All;
                }
                _ => {}
            },
        }
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // tiles
                Constraint::Length(1), // filter bar
                Constraint::Min(0),    // body
                Constraint::Length(1), // footer
            ])
            .split(frame.area());

        self.render_tiles(frame, chunks[0]);
        self.render_filter_bar(frame, chunks[1]);
        self.render_body(frame, chunks[2]);
        self.render_footer(frame, chunks[3]);

        if let Some(dialog) = &self.dialog {
            dialog.render(frame, frame.area());
        }
    }

    fn render_tiles(&self, frame: &mut Frame, area: Rect) {
        let totals = self.totals();
        let tiles = [
            ("Projects", totals.projects.to_string()),
            ("Active", totals.active.to_string()),
            ("Completed", totals.completed.to_string()),
            ("Budget", format_ugx(totals.total_budget)),
        ];
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(area);
        for ((label, value), column) in tiles.iter().zip(columns.iter()) {
            let tile = Paragraph::new(Line::from(vec![
                Span::styled(
                    value.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(*label, Style::default().fg(Color::DarkGray)),
            ]))
            .block(Block::default().borders(Borders::ALL));
            frame.render_widget(tile, *column);
        }
    }

    fn render_filter_bar(&self, frame: &mut Frame, area: Rect) {
        let search_style = if self.input_mode == InputMode::Search {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let bar = Line::from(vec![
            Span::styled(format!(" search: {}_", self.search), search_style),
            Span::raw("   "),
            Span::raw(format!("status: {}", self.status_filter)),
            Span::raw("   "),
            Span::raw(match self.view {
                ViewMode::Cards => "view: cards",
                ViewMode::Table => "view: table",
            }),
        ]);
        frame.render_widget(Paragraph::new(bar), area);
    }

    fn render_body(&self, frame: &mut Frame, area: Rect) {
        if let Some(error) = &self.error {
            let banner = Paragraph::new(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )))
            .block(Block::default().borders(Borders::ALL).title(" fetch failed "));
            frame.render_widget(banner, area);
            return;
        }

        let visible = self.visible();
        match self.view {
            ViewMode::Cards => Self::render_cards(frame, area, &visible),
            ViewMode::Table => Self::render_table(frame, area, &visible),
        }
    }

    fn render_cards(frame: &mut Frame, area: Rect, visible: &[&Project]) {
        const CARD_HEIGHT: u16 = 5;
        const COLUMNS: usize = 3;

        let rows_that_fit = (area.height / CARD_HEIGHT) as usize;
        let row_rects = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(CARD_HEIGHT); rows_that_fit.max(1)])
            .split(area);

        for (row_idx, cards) in visible.chunks(COLUMNS).take(rows_that_fit).enumerate() {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, COLUMNS as u32); COLUMNS])
                .split(row_rects[row_idx]);
            for (card_idx, project) in cards.iter().enumerate() {
                frame.render_widget(Self::card(project), columns[card_idx]);
            }
        }
    }

    fn card(project: &Project) -> Paragraph<'_> {
        let filled = (usize::from(project.progress) * 10) / 100;
        let bar: String = "█".repeat(filled) + &"░".repeat(10 - filled);
        Paragraph::new(vec![
            Line::from(vec![
                Span::raw(project.constituency.clone()),
                Span::raw(" · "),
                Span::styled(
                    project.status.to_string(),
                    Style::default().fg(Color::Cyan),
                ),
            ]),
            Line::from(format!("{}  ·  ends {}", format_ugx(project.budget), project.end_date())),
            Line::from(format!("{bar} {}%", project.progress)),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", project.name)),
        )
    }

    fn render_table(frame: &mut Frame, area: Rect, visible: &[&Project]) {
        let header = Row::new(
            ["ID", "NAME", "CONSTITUENCY", "CATEGORY", "BUDGET", "PROG", "STATUS", "END"]
                .map(|h| Cell::from(Span::styled(h, Style::default().add_modifier(Modifier::BOLD)))),
        );
        let rows = visible.iter().map(|project| {
            Row::new([
                Cell::from(project.id.clone()),
                Cell::from(project.name.clone()),
                Cell::from(project.constituency.clone()),
                Cell::from(project.category.to_string()),
                Cell::from(format_ugx(project.budget)),
                Cell::from(format!("{}%", project.progress)),
                Cell::from(project.status.to_string()),
                Cell::from(project.end_date()),
            ])
        });
        let table = Table::new(
            rows,
            [
                Constraint::Length(10),
                Constraint::Min(16),
                Constraint::Min(14),
                Constraint::Length(18),
                Constraint::Length(10),
                Constraint::Length(5),
                Constraint::Length(10),
                Constraint::Length(10),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(table, area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let hints = self.status_line.clone().unwrap_or_else(|| {
            " / search · s status · v view · c new · r refresh · x clear · q quit".to_string()
        });
        frame.render_widget(
            Paragraph::new(Span::styled(hints, Style::default().fg(Color::DarkGray))),
            area,
        );
    }

    #[cfg(test)]
    fn is_dialog_open(&self) -> bool {
        self.dialog.is_some()
    }
}
