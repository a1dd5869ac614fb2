use crossterm::event::{KeyCode, KeyEvent};
use monotodo_core::task::{format_date_input, parse_due_date};
use monotodo_core::{TaskDraft, TodoError};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::palette::Palette;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Category,
    Priority,
    Due,
    Tags,
}

impl FormField {
    pub const ALL: &[FormField] = &[
        FormField::Title,
        FormField::Category,
        FormField::Priority,
        FormField::Due,
        FormField::Tags,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Category => "Category",
            FormField::Priority => "Priority",
            FormField::Due => "Due",
            FormField::Tags => "Tags",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Constrained fields are cycled, not typed into.
    pub fn is_choice(&self) -> bool {
        matches!(self, FormField::Category | FormField::Priority)
    }
}

/// Input state for the composer and the edit dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub draft: TaskDraft,
    /// Raw date text; parsed when the form is submitted.
    pub due: String,
    pub field: FormField,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::from_draft(&TaskDraft::default())
    }
}

impl TaskForm {
    pub fn from_draft(draft: &TaskDraft) -> Self {
        Self {
            draft: draft.clone(),
            due: format_date_input(draft.due_date),
            field: FormField::Title,
        }
    }

    pub fn to_draft(&self) -> Result<TaskDraft, TodoError> {
        let mut draft = self.draft.clone();
        draft.due_date = parse_due_date(&self.due)?;
        Ok(draft)
    }

    /// Composer reset after a create; focus goes back to the title.
    pub fn clear(&mut self) {
        self.draft.clear();
        self.due.clear();
        self.field = FormField::Title;
    }

    pub fn focus_title(&mut self) {
        self.field = FormField::Title;
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.field {
            FormField::Title => Some(&mut self.draft.title),
            FormField::Due => Some(&mut self.due),
            FormField::Tags => Some(&mut self.draft.tags),
            FormField::Category | FormField::Priority => None,
        }
    }

    fn cycle(&mut self, forward: bool) {
        match (self.field, forward) {
            (FormField::Category, true) => self.draft.category = self.draft.category.next(),
            (FormField::Category, false) => self.draft.category = self.draft.category.prev(),
            (FormField::Priority, true) => self.draft.priority = self.draft.priority.next(),
            (FormField::Priority, false) => self.draft.priority = self.draft.priority.prev(),
            _ => {}
        }
    }

    /// Field navigation and editing. Submit/cancel keys are left to the caller.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.field = self.field.next(),
            KeyCode::BackTab | KeyCode::Up => self.field = self.field.prev(),
            KeyCode::Right if self.field.is_choice() => self.cycle(true),
            KeyCode::Left if self.field.is_choice() => self.cycle(false),
            KeyCode::Char(' ') if self.field.is_choice() => self.cycle(true),
            KeyCode::Backspace => {
                if let Some(text) = self.text_mut() {
                    text.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(text) = self.text_mut() {
                    text.push(c);
                }
            }
            _ => {}
        }
    }

    fn value(&self, field: FormField) -> String {
        match field {
            FormField::Title => self.draft.title.clone(),
            FormField::Category => format!("< {} >", self.draft.category),
            FormField::Priority => format!("< {} >", self.draft.priority),
            FormField::Due if self.due.is_empty() => "YYYY-MM-DD".into(),
            FormField::Due => self.due.clone(),
            FormField::Tags => self.draft.tags.clone(),
        }
    }

    fn field_spans(&self, field: FormField, focused: bool, palette: &Palette) -> Vec<Span<'static>> {
        let active = focused && self.field == field;
        let label_style = if active {
            Style::default().fg(palette.accent).bold()
        } else {
            Style::default().fg(palette.muted)
        };
        let placeholder = field == FormField::Due && self.due.is_empty();
        let value_style = if active {
            Style::default()
                .fg(palette.highlight_fg)
                .bg(palette.highlight_bg)
        } else if placeholder {
            Style::default().fg(palette.muted)
        } else {
            Style::default().fg(palette.fg)
        };
        let mut value = self.value(field);
        if active && !field.is_choice() {
            value.push('_');
        }
        vec![
            Span::styled(format!("{}: ", field.label()), label_style),
            Span::styled(value, value_style),
        ]
    }

    /// One-line composer strip.
    pub fn render_inline(&self, frame: &mut Frame, area: Rect, focused: bool, palette: &Palette) {
        let mut spans = Vec::new();
        for (i, field) in FormField::ALL.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.extend(self.field_spans(*field, focused, palette));
        }
        let border = if focused { palette.accent } else { palette.border };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" New task ");
        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }

    /// One field per line, for the edit dialog.
    pub fn render_stacked(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let lines: Vec<Line> = FormField::ALL
            .iter()
            .map(|field| Line::from(self.field_spans(*field, true, palette)))
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }
}
