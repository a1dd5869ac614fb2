use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use monotodo_core::{Applied, BoardView, Intent, TaskFilter, TaskStore, TodoError};
use monotodo_store::{TaskPersistence, Theme};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph};
use tracing::{debug, error, info};

use crate::components::task_board::TaskBoard;
use crate::components::task_form::TaskForm;
use crate::palette::Palette;

/// What the app is currently doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Board navigation
    Normal,
    /// Typing into the composer
    Compose,
    /// Typing a search query
    Search { input: String },
    /// Edit dialog open for the store's current edit session
    Edit { form: TaskForm },
}

pub struct App {
    store: TaskStore,
    persistence: TaskPersistence,
    theme: Theme,
    board: TaskBoard,
    composer: TaskForm,
    mode: Mode,
    status_message: Option<String>,
}

impl App {
    /// Load persisted state and run the first render pass.
    pub fn new(persistence: TaskPersistence) -> Self {
        let (tasks, theme) = persistence.load();
        let store = TaskStore::with_tasks(tasks);
        let board = TaskBoard::new(BoardView::build(&store));
        let mut app = Self {
            store,
            persistence,
            theme,
            board,
            composer: TaskForm::default(),
            mode: Mode::Normal,
            status_message: None,
        };
        app.refresh();
        app
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn board(&self) -> &TaskBoard {
        &self.board
    }

    pub fn composer(&self) -> &TaskForm {
        &self.composer
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn is_input_mode(&self) -> bool {
        !matches!(self.mode, Mode::Normal)
    }

    /// Render pass: rebuild the visible cards from the store and write the
    /// full task list through.
    fn refresh(&mut self) {
        let selected = self.board.selected_id().map(str::to_owned);
        self.board
            .set_view(BoardView::build(&self.store), selected.as_deref());
        if let Err(e) = self.persistence.save(self.store.tasks()) {
            error!("saving tasks: {e}");
            self.status_message = Some(format!("Save error: {e}"));
        }
    }

    /// Single handler for every intent. Task-list intents end with one render pass.
    pub fn dispatch(&mut self, intent: Intent) -> Result<Applied, TodoError> {
        debug!(?intent, "dispatch");
        if intent == Intent::ToggleTheme {
            self.toggle_theme();
            return Ok(Applied::Unchanged);
        }
        let applied = self.store.apply(intent)?;
        self.refresh();
        Ok(applied)
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        if let Err(e) = self.persistence.save_theme(self.theme) {
            error!("saving theme: {e}");
            self.status_message = Some(format!("Save error: {e}"));
        }
    }

    fn set_filter(&mut self, update: impl FnOnce(&mut TaskFilter)) {
        let mut filter = self.store.filter().clone();
        update(&mut filter);
        // SetFilter never fails
        let _ = self.dispatch(Intent::SetFilter(filter));
    }

    fn selected_id(&self) -> Option<String> {
        self.board.selected_id().map(str::to_owned)
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.status_message = None;

        match &self.mode.clone() {
            Mode::Normal => self.handle_normal(key),
            Mode::Compose => self.handle_compose(key),
            Mode::Search { input } => self.handle_search(key, input.clone()),
            Mode::Edit { form } => self.handle_edit(key, form.clone()),
        }
    }

    fn handle_normal(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('n') | KeyCode::Char('a') => {
                self.composer.focus_title();
                self.mode = Mode::Compose;
            }
            KeyCode::Char(' ') | KeyCode::Char('x') => {
                if let Some(id) = self.selected_id() {
                    let _ = self.dispatch(Intent::ToggleComplete(id));
                }
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(id) = self.selected_id() {
                    self.open_edit(id);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_id() {
                    if let Ok(applied) = self.dispatch(Intent::Delete(id)) {
                        if applied.changed() {
                            self.status_message = Some("Task deleted".into());
                        }
                    }
                }
            }
            KeyCode::Char('C') => {
                if let Ok(applied) = self.dispatch(Intent::ClearCompleted) {
                    let msg = if applied.changed() {
                        "Completed tasks cleared"
                    } else {
                        "No completed tasks"
                    };
                    self.status_message = Some(msg.into());
                }
            }
            KeyCode::Char('/') => {
                self.mode = Mode::Search {
                    input: self.store.filter().search.clone(),
                };
            }
            KeyCode::Char('s') => self.set_filter(|f| f.status = f.status.next()),
            KeyCode::Char('p') => self.set_filter(TaskFilter::cycle_priority),
            KeyCode::Char('c') => self.set_filter(TaskFilter::cycle_category),
            KeyCode::Char('r') => {
                self.set_filter(|f| *f = TaskFilter::default());
                self.status_message = Some("Filters reset".into());
            }
            KeyCode::Char('T') => {
                let _ = self.dispatch(Intent::ToggleTheme);
                self.status_message = Some(format!("Theme: {}", self.theme));
            }
            _ => self.board.handle_key(key),
        }
    }

    fn handle_compose(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Enter => self.submit_composer(),
            _ => self.composer.handle_key(key),
        }
    }

    fn submit_composer(&mut self) {
        if self.composer.draft.trimmed_title().is_none() {
            self.composer.focus_title();
            return;
        }
        let draft = match self.composer.to_draft() {
            Ok(draft) => draft,
            Err(e) => {
                self.status_message = Some(format!("Due date: {e}"));
                return;
            }
        };
        match self.dispatch(Intent::Create(draft)) {
            Ok(_) => {
                if let Some(task) = self.store.tasks().first() {
                    info!(id = %task.id, "task created");
                    let id = task.id.clone();
                    self.board.select_task_by_id(&id);
                }
                self.composer.clear();
                self.status_message = Some("Task created".into());
                self.mode = Mode::Normal;
            }
            Err(e) => {
                // Blank title: nothing changes, focus returns to the title.
                debug!("create rejected: {e}");
                self.composer.focus_title();
            }
        }
    }

    fn handle_search(&mut self, key: KeyEvent, mut input: String) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Backspace => {
                input.pop();
                self.update_search(input);
            }
            KeyCode::Char(c) => {
                input.push(c);
                self.update_search(input);
            }
            _ => {}
        }
    }

    fn update_search(&mut self, input: String) {
        let search = input.clone();
        self.set_filter(|f| f.search = search);
        self.mode = Mode::Search { input };
    }

    fn open_edit(&mut self, id: String) {
        let _ = self.dispatch(Intent::BeginEdit(id));
        if let Some(draft) = self.store.editing().draft() {
            self.mode = Mode::Edit {
                form: TaskForm::from_draft(draft),
            };
        }
    }

    /// The dialog closes only through save or close; every other key edits the form.
    fn handle_edit(&mut self, key: KeyEvent, mut form: TaskForm) {
        let save = key.code == KeyCode::Enter
            || (key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL));
        if save {
            match form.to_draft() {
                Ok(draft) => {
                    if let Some(staged) = self.store.draft_mut() {
                        *staged = draft;
                    }
                    if let Ok(applied) = self.dispatch(Intent::SaveEdit) {
                        if applied.changed() {
                            self.status_message = Some("Task updated".into());
                        }
                    }
                    self.mode = Mode::Normal;
                }
                Err(e) => {
                    self.status_message = Some(format!("Due date: {e}"));
                    self.mode = Mode::Edit { form };
                }
            }
            return;
        }
        if key.code == KeyCode::Esc {
            let _ = self.dispatch(Intent::CancelEdit);
            self.mode = Mode::Normal;
            return;
        }
        form.handle_key(key);
        self.mode = Mode::Edit { form };
    }

    // -- Rendering --

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let palette = Palette::for_theme(self.theme);
        frame.render_widget(Block::default().style(palette.base()), area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_title_bar(frame, layout[0], &palette);
        self.render_filter_bar(frame, layout[1], &palette);
        self.composer
            .render_inline(frame, layout[2], self.mode == Mode::Compose, &palette);
        self.board.render(frame, layout[3], &palette);
        self.render_status_bar(frame, layout[4], &palette);

        // Overlays
        match &self.mode {
            Mode::Normal | Mode::Compose => {}
            Mode::Search { input } => self.render_input_bar(frame, " Search ", input, area, &palette),
            Mode::Edit { form } => self.render_edit_dialog(frame, form, area, &palette),
        }
    }

    fn render_title_bar(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let progress = self.board.view().progress;
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(24)])
            .split(area);

        let title = Line::from(vec![
            Span::styled(" monotodo ", Style::default().bold().fg(palette.accent)),
            Span::raw("| "),
            Span::styled(
                format!("{}/{} done", progress.completed, progress.total),
                Style::default().fg(palette.muted),
            ),
        ]);
        frame.render_widget(title, cols[0]);

        let (filled, _) = progress.arc();
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(palette.accent).bg(palette.border))
            .percent(filled)
            .label(progress.label());
        frame.render_widget(gauge, cols[1]);
    }

    fn render_filter_bar(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let filter = self.store.filter();
        let style = if filter.is_default() {
            Style::default().fg(palette.muted)
        } else {
            Style::default().fg(palette.warn)
        };
        let line = Line::from(Span::styled(format!(" {}", filter.summary()), style));
        frame.render_widget(line, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        if let Some(ref msg) = self.status_message {
            let line = Line::from(Span::styled(
                format!(" {msg}"),
                Style::default().fg(palette.ok),
            ));
            frame.render_widget(line, area);
            return;
        }

        let hints = match &self.mode {
            Mode::Normal => vec![
                ("q", "quit"),
                ("j/k", "move"),
                ("n", "new"),
                ("space", "done"),
                ("e", "edit"),
                ("d", "del"),
                ("C", "clear done"),
                ("/", "search"),
                ("s/p/c", "filter"),
                ("r", "reset"),
                ("T", "theme"),
            ],
            Mode::Compose => vec![
                ("Tab", "next field"),
                ("←/→", "choose"),
                ("Enter", "add"),
                ("Esc", "back"),
            ],
            Mode::Search { .. } => vec![("Enter", "done"), ("Esc", "back")],
            Mode::Edit { .. } => vec![
                ("Tab", "next field"),
                ("←/→", "choose"),
                ("Enter/Ctrl+S", "save"),
                ("Esc", "close"),
            ],
        };

        let spans: Vec<Span> = hints
            .into_iter()
            .flat_map(|(key, desc)| {
                vec![
                    Span::styled(format!(" {key}"), Style::default().fg(palette.accent).bold()),
                    Span::raw(format!(" {desc} ")),
                ]
            })
            .collect();

        frame.render_widget(Line::from(spans), area);
    }

    fn render_input_bar(
        &self,
        frame: &mut Frame,
        label: &str,
        input: &str,
        area: Rect,
        palette: &Palette,
    ) {
        let input_area = Rect {
            x: area.x,
            y: area.y + area.height.saturating_sub(3),
            width: area.width,
            height: area.height.min(3),
        };
        frame.render_widget(Clear, input_area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent))
            .title(label);
        let paragraph = Paragraph::new(format!("{input}_"))
            .style(palette.base())
            .block(block);
        frame.render_widget(paragraph, input_area);
    }

    fn render_edit_dialog(&self, frame: &mut Frame, form: &TaskForm, area: Rect, palette: &Palette) {
        let popup = centered_rect(60, 40, area);
        frame.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent))
            .style(palette.base())
            .title(" Edit task ");
        let inner = block.inner(popup);
        frame.render_widget(block, popup);
        form.render_stacked(frame, inner, palette);
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
