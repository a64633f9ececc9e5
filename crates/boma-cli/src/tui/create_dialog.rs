//! Modal create dialog.
//!
//! The overlay that appears on `c`: six inputs (name, category,
//! constituency, budget, end date, description) over the create workflow.
//! Text fields take typed characters; category and constituency cycle with
//! the arrow keys. **Enter** submits, **Esc** cancels. Guard and store
//! failures stay on the form with the message shown in the footer.

use boma_core::model::constituency;
use boma_core::model::project::Category;
use boma_core::store::RecordStore;
use boma_core::workflow::CreateFlow;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// The six form fields, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Field {
    #[default]
    Name,
    Category,
    Constituency,
    Budget,
    End,
    Description,
}

impl Field {
    const ALL: [Self; 6] = [
        Self::Name,
        Self::Category,
        Self::Constituency,
        Self::Budget,
        Self::End,
        Self::Description,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Category => "Category",
            Self::Constituency => "Constituency",
            Self::Budget => "Budget (UGX)",
            Self::End => "End date",
            Self::Description => "Description",
        }
    }

    fn next(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Selector fields cycle with the arrow keys instead of taking text.
    fn is_selector(self) -> bool {
        matches!(self, Self::Category | Self::Constituency)
    }
}

/// What the dialog wants the caller to do.
pub enum DialogOutcome {
    /// A record was created; the caller should close the overlay and
    /// re-fetch the collection.
    Created(String),
    /// The user cancelled; close the overlay, nothing was written.
    Cancelled,
}

/// Modal create form over the workflow state machine.
pub struct CreateDialog {
    flow: CreateFlow,
    focus: Field,
    budget_text: String,
    budget_error: Option<String>,
}

impl Default for CreateDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateDialog {
    #[must_use]
    pub fn new() -> Self {
        let mut flow = CreateFlow::new();
        flow.open();
        Self {
            flow,
            focus: Field::Name,
            budget_text: String::new(),
            budget_error: None,
        }
    }

    /// Feed a key event to the dialog.
    ///
    /// Returns `Some` when the dialog is finished (caller closes the
    /// overlay), `None` while the user is still editing.
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        store: &dyn RecordStore,
    ) -> Option<DialogOutcome> {
        match key.code {
            KeyCode::Esc => {
                self.flow.cancel();
                Some(DialogOutcome::Cancelled)
            }
            KeyCode::Enter => self.submit(store),
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev();
                None
            }
            KeyCode::Left => {
                self.cycle_selector(-1);
                None
            }
            KeyCode::Right => {
                self.cycle_selector(1);
                None
            }
            KeyCode::Backspace => {
                self.edit_focused(|text| {
                    text.pop();
                });
                None
            }
            KeyCode::Char(c) => {
                self.edit_focused(|text| text.push(c));
                None
            }
            _ => None,
        }
    }

    /// The message to show in the form footer, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.budget_error.as_deref().or_else(|| self.flow.error())
    }

    fn edit_focused(&mut self, apply: impl FnOnce(&mut String)) {
        self.budget_error = None;
        if self.focus == Field::Budget {
            apply(&mut self.budget_text);
            return;
        }
        let Some(draft) = self.flow.draft_mut() else {
            return;
        };
        match self.focus {
            Field::Name => apply(&mut draft.name),
            Field::End => apply(&mut draft.end),
            Field::Description => apply(&mut draft.description),
            Field::Budget | Field::Category | Field::Constituency => {}
        }
    }

    fn cycle_selector(&mut self, step: i32) {
        let focus = self.focus;
        let Some(draft) = self.flow.draft_mut() else {
            return;
        };
        match focus {
            Field::Category => {
                let all = Category::ALL;
                let i = all.iter().position(|c| *c == draft.category).unwrap_or(0);
                let next = (i as i32 + step).rem_euclid(all.len() as i32) as usize;
                draft.category = all[next];
            }
            Field::Constituency => {
                let all = constituency::ALL;
                let i = all
                    .iter()
                    .position(|name| name.eq_ignore_ascii_case(&draft.constituency))
                    .unwrap_or(0);
                let next = (i as i32 + step).rem_euclid(all.len() as i32) as usize;
                draft.constituency = all[next].to_string();
            }
            _ => {}
        }
    }

    fn submit(&mut self, store: &dyn RecordStore) -> Option<DialogOutcome> {
        self.budget_error = None;
        let budget = if self.budget_text.trim().is_empty() {
            0
        } else {
            match self.budget_text.trim().parse::<u64>() {
                Ok(budget) => budget,
                Err(_) => {
                    self.budget_error = Some("budget must be a whole number of UGX".into());
                    return None;
                }
            }
        };
        if let Some(draft) = self.flow.draft_mut() {
            draft.budget = budget;
        }
        self.flow.submit(store).map(DialogOutcome::Created)
    }

    fn field_value(&self, field: Field) -> String {
        let draft = self.flow.draft();
        match field {
            Field::Name => draft.name.clone(),
            Field::Category => draft.category.to_string(),
            Field::Constituency => draft.constituency.clone(),
            Field::Budget => self.budget_text.clone(),
            Field::End => draft.end.clone(),
            Field::Description => draft.description.clone(),
        }
    }

    /// Render the dialog as a centered overlay on top of `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let dialog_w: u16 = 64.min(area.width.saturating_sub(4));
        let dialog_h: u16 = 12.min(area.height.saturating_sub(2));
        let dialog_area = Rect {
            x: area.x + area.width.saturating_sub(dialog_w) / 2,
            y: area.y + area.height.saturating_sub(dialog_h) / 2,
            width: dialog_w,
            height: dialog_h,
        };

        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" New Project ")
            .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD));
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let mut lines: Vec<Line> = Field::ALL
            .iter()
            .map(|field| {
                let focused = *field == self.focus;
                let marker = if focused { "► " } else { "  " };
                let value = self.field_value(*field);
                let hint = if field.is_selector() { " ◂ ▸" } else { "" };
                let style = if focused {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Line::from(vec![
                    Span::styled(format!("{marker}{:<14}", field.label()), style),
                    Span::raw(value),
                    Span::styled(hint, Style::default().fg(Color::DarkGray)),
                ])
            })
            .collect();

        if let Some(error) = self.error() {
            lines.push(Line::from(Span::styled(
                format!("  {error}"),
                Style::default().fg(Color::Red),
            )));
        }
        lines.push(Line::from(Span::styled(
            "  Tab next · ◂▸ change · Enter create · Esc cancel",
            Style::default().fg(Color::DarkGray),
        )));

        frame.render_widget(Paragraph::new(lines), inner);
    }

    #[cfg(test)]
    fn draft_name(&self) -> &str {
        &self.flow.draft().name
    }
}
