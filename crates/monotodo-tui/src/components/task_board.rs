use crossterm::event::{KeyCode, KeyEvent};
use monotodo_core::{BoardView, TaskCard};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::palette::Palette;

pub const EMPTY_STATE: &str = "Nothing here yet. Press n to add a task.";

pub struct TaskBoard {
    view: BoardView,
    list_state: ListState,
}

impl TaskBoard {
    pub fn new(view: BoardView) -> Self {
        let mut list_state = ListState::default();
        if !view.cards.is_empty() {
            list_state.select(Some(0));
        }
        Self { view, list_state }
    }

    pub fn view(&self) -> &BoardView {
        &self.view
    }

    /// Swap in a freshly built view, keeping the cursor on `keep` when it is
    /// still visible and clamping it otherwise.
    pub fn set_view(&mut self, view: BoardView, keep: Option<&str>) {
        let previous = self.list_state.selected().unwrap_or(0);
        let selected = match keep.and_then(|id| view.position(id)) {
            Some(idx) => Some(idx),
            None if view.cards.is_empty() => None,
            None => Some(previous.min(view.cards.len() - 1)),
        };
        self.view = view;
        self.list_state.select(selected);
    }

    /// Returns the currently highlighted card, if any.
    pub fn selected_card(&self) -> Option<&TaskCard> {
        self.view.cards.get(self.list_state.selected()?)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_card().map(|c| c.id.as_str())
    }

    /// Attempt to select the card with the given task id.
    pub fn select_task_by_id(&mut self, task_id: &str) -> bool {
        match self.view.position(task_id) {
            Some(idx) => {
                self.list_state.select(Some(idx));
                true
            }
            None => false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let len = self.view.cards.len();
        if len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        let next = match key.code {
            KeyCode::Char('j') | KeyCode::Down => (current + 1).min(len - 1),
            KeyCode::Char('k') | KeyCode::Up => current.saturating_sub(1),
            KeyCode::Char('g') | KeyCode::Home => 0,
            KeyCode::Char('G') | KeyCode::End => len - 1,
            _ => return,
        };
        self.list_state.select(Some(next));
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .title(format!(" Tasks ({}) ", self.view.cards.len()));

        if self.view.empty {
            let placeholder = Paragraph::new(EMPTY_STATE)
                .style(Style::default().fg(palette.muted))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(placeholder, area);
            return;
        }

        let items: Vec<ListItem> = self
            .view
            .cards
            .iter()
            .map(|card| card_item(card, palette))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .fg(palette.highlight_fg)
                    .bg(palette.highlight_bg),
            )
            .highlight_symbol("> ");

        let mut state = self.list_state.clone();
        frame.render_stateful_widget(list, area, &mut state);
    }
}

fn card_item<'a>(card: &'a TaskCard, palette: &Palette) -> ListItem<'a> {
    let checkbox = if card.completed { "[x] " } else { "[ ] " };
    let mut title_style = Style::default().fg(palette.fg);
    if card.completed {
        title_style = title_style.fg(palette.muted).crossed_out();
    }
    let title = Line::from(vec![
        Span::styled(checkbox, Style::default().fg(palette.accent)),
        Span::styled(card.title.as_str(), title_style),
        Span::styled("  [e]dit [d]el", Style::default().fg(palette.muted)),
    ]);

    let chip = |text: &'a str| Span::styled(text, Style::default().fg(palette.muted));
    let mut meta = vec![
        Span::raw("    "),
        Span::styled(card.category.as_str(), Style::default().fg(palette.fg)),
        chip(" · "),
        chip(card.due.as_str()),
        chip(" · "),
        Span::styled(card.priority.as_str(), Style::default().fg(palette.fg).bold()),
    ];
    if !card.tags.is_empty() {
        meta.push(chip(" · "));
        for (i, tag) in card.tags.iter().enumerate() {
            if i > 0 {
                meta.push(Span::raw(" "));
            }
            meta.push(Span::styled(tag.as_str(), Style::default().fg(palette.accent)));
        }
    }

    ListItem::new(vec![title, Line::from(meta)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use monotodo_core::Progress;

    fn card(id: &str) -> TaskCard {
        TaskCard {
            id: id.to_string(),
            title: format!("Task {id}"),
            completed: false,
            category: "Work".into(),
            due: "Due No due date".into(),
            priority: "Medium priority".into(),
            tags: vec![],
        }
    }

    fn view(ids: &[&str]) -> BoardView {
        BoardView {
            cards: ids.iter().map(|id| card(id)).collect(),
            empty: ids.is_empty(),
            progress: Progress::default(),
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn new_board_selects_first_card() {
        let board = TaskBoard::new(view(&["a", "b"]));
        assert_eq!(board.selected_id(), Some("a"));
        assert!(TaskBoard::new(view(&[])).selected_card().is_none());
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let mut board = TaskBoard::new(view(&["a", "b", "c"]));
        board.handle_key(key(KeyCode::Char('k')));
        assert_eq!(board.selected_id(), Some("a"));
        board.handle_key(key(KeyCode::Char('G')));
        assert_eq!(board.selected_id(), Some("c"));
        board.handle_key(key(KeyCode::Char('j')));
        assert_eq!(board.selected_id(), Some("c"));
        board.handle_key(key(KeyCode::Home));
        assert_eq!(board.selected_id(), Some("a"));
    }

    #[test]
    fn set_view_keeps_selected_task() {
        let mut board = TaskBoard::new(view(&["a", "b", "c"]));
        assert!(board.select_task_by_id("b"));
        board.set_view(view(&["new", "a", "b", "c"]), Some("b"));
        assert_eq!(board.selected_id(), Some("b"));
    }

    #[test]
    fn set_view_clamps_when_selection_disappears() {
        let mut board = TaskBoard::new(view(&["a", "b", "c"]));
        board.select_task_by_id("c");
        board.set_view(view(&["a", "b"]), Some("c"));
        assert_eq!(board.selected_id(), Some("b"));

        board.set_view(view(&[]), Some("b"));
        assert!(board.selected_card().is_none());

        board.set_view(view(&["z"]), None);
        assert_eq!(board.selected_id(), Some("z"));
    }

    #[test]
    fn select_nonexistent_task_returns_false() {
        let mut board = TaskBoard::new(view(&["a", "b"]));
        board.select_task_by_id("b");
        assert!(!board.select_task_by_id("nope"));
        assert_eq!(board.selected_id(), Some("b"));
    }
}
