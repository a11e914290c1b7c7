use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
    Frame,
};
use tick_core::{storage::KeyValueStore, tasks::TaskList};
use tick_tasks::StoreTaskRepo;
use tracing::warn;

use super::theme::Theme;

/// Which input currently receives keystrokes.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    /// Browsing the list; keys are commands.
    Normal,
    /// Typing into the add box.
    Insert,
    /// Rewriting one task's text in place. Entering edit on another task
    /// replaces this state, abandoning the unsaved buffer.
    Edit { id: u64, buffer: String },
}

/// The task list view. Owns the collection and all transient UI state;
/// every collection mutation is followed by a save through the repo.
pub struct App<S: KeyValueStore> {
    repo: StoreTaskRepo<S>,
    tasks: TaskList,
    mode: Mode,
    /// Add-box buffer. Like the box it models, it keeps its content when
    /// focus moves away.
    input: String,
    show_completed: bool,
    dark_mode: bool,
    /// Index into the visible rows (pending first, then completed when
    /// the panel is open).
    selected: usize,
    quit: bool,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(repo: StoreTaskRepo<S>, tasks: TaskList, dark_mode: bool) -> Self {
        Self {
            repo,
            tasks,
            mode: Mode::Normal,
            input: String::new(),
            show_completed: false,
            dark_mode,
            selected: 0,
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::Normal => self.handle_normal_key(key),
            Mode::Insert => self.handle_insert_key(key),
            Mode::Edit { .. } => self.handle_edit_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Char('i') | KeyCode::Char('a') => self.mode = Mode::Insert,
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected(),
            KeyCode::Char('e') => self.begin_edit(),
            KeyCode::Char('d') => self.delete_selected(),
            KeyCode::Char('c') => {
                self.show_completed = !self.show_completed;
                self.clamp_selection();
            }
            KeyCode::Char('t') => self.dark_mode = !self.dark_mode,
            _ => {}
        }
    }

    fn handle_insert_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Enter => self.commit_add(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Enter => self.save_edit(),
            KeyCode::Backspace => {
                if let Mode::Edit { buffer, .. } = &mut self.mode {
                    buffer.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Mode::Edit { buffer, .. } = &mut self.mode {
                    buffer.push(c);
                }
            }
            _ => {}
        }
    }

    /// Append the add-box content as a new task. Whitespace-only input is
    /// ignored and the box keeps its content; insert mode stays active so
    /// several tasks can be entered in a row.
    fn commit_add(&mut self) {
        if self.tasks.add(&self.input).is_some() {
            self.input.clear();
            self.persist();
        }
    }

    fn begin_edit(&mut self) {
        let Some(id) = self.selected_id() else { return };
        let Some(task) = self.tasks.get(id) else {
            return;
        };
        // Completed rows only offer undo and delete, matching the
        // per-partition controls.
        if task.completed {
            return;
        }
        self.mode = Mode::Edit {
            id,
            buffer: task.text.clone(),
        };
    }

    /// Commit the edit buffer. Edit mode clears even when the task has
    /// vanished underneath it; in that case nothing is written.
    fn save_edit(&mut self) {
        let Mode::Edit { id, buffer } = std::mem::replace(&mut self.mode, Mode::Normal) else {
            return;
        };
        if self.tasks.set_text(id, &buffer) {
            self.persist();
        }
    }

    fn toggle_selected(&mut self) {
        let Some(id) = self.selected_id() else { return };
        self.tasks.toggle(id);
        self.persist();
        self.clamp_selection();
    }

    fn delete_selected(&mut self) {
        let Some(id) = self.selected_id() else { return };
        if self.tasks.remove(id) {
            self.persist();
        }
        self.clamp_selection();
    }

    /// Ids of the rows currently on screen, in display order.
    fn visible_ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.tasks.pending().map(|t| t.id).collect();
        if self.show_completed {
            ids.extend(self.tasks.completed().map(|t| t.id));
        }
        ids
    }

    fn selected_id(&self) -> Option<u64> {
        self.visible_ids().get(self.selected).copied()
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_ids().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    fn select_next(&mut self) {
        let len = self.visible_ids().len();
        if len == 0 {
            return;
        }
        self.selected = if self.selected + 1 >= len {
            0
        } else {
            self.selected + 1
        };
    }

    fn select_prev(&mut self) {
        let len = self.visible_ids().len();
        if len == 0 {
            return;
        }
        self.selected = if self.selected == 0 {
            len - 1
        } else {
            self.selected - 1
        };
    }

    /// Mirror the collection to the store. A failed write keeps the
    /// session alive; the next mutation rewrites the full value anyway.
    fn persist(&self) {
        if let Err(err) = self.repo.save(&self.tasks) {
            warn!("failed to save tasks: {err}");
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let theme = Theme::for_mode(self.dark_mode);

        frame.render_widget(
            Block::default().style(
                Style::default()
                    .bg(theme.background)
                    .fg(theme.foreground),
            ),
            frame.area(),
        );

        let mut constraints = vec![
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ];
        if self.show_completed {
            let rows = self.tasks.completed().count() as u16;
            constraints.push(Constraint::Length(rows.saturating_add(2).min(12)));
        }
        constraints.push(Constraint::Length(3));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(constraints)
            .split(frame.area());

        self.render_header(frame, chunks[0], &theme);
        self.render_input(frame, chunks[1], &theme);
        self.render_pending(frame, chunks[2], &theme);
        if self.show_completed {
            self.render_completed(frame, chunks[3], &theme);
        }
        self.render_footer(frame, chunks[chunks.len() - 1], &theme);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                "Tick",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" — a to-do list for your terminal"),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme.border))
                .title(Span::styled(
                    if self.dark_mode { " dark " } else { " light " },
                    Style::default().fg(theme.muted),
                )),
        );
        frame.render_widget(header, area);
    }

    fn render_input(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let inserting = matches!(self.mode, Mode::Insert);
        let line = if inserting {
            Line::from(Span::raw(format!("{}_", self.input)))
        } else if self.input.is_empty() {
            Line::from(Span::styled(
                "press i to add a task",
                Style::default().fg(theme.muted),
            ))
        } else {
            Line::from(Span::raw(self.input.clone()))
        };

        let border = if inserting { theme.accent } else { theme.border };
        let input_box = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" New task ")
                .border_style(Style::default().fg(border)),
        );
        frame.render_widget(input_box, area);
    }

    fn render_pending(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Tasks ")
            .border_style(Style::default().fg(theme.border));

        let pending: Vec<_> = self.tasks.pending().collect();
        if pending.is_empty() {
            let empty = Paragraph::new(Span::styled(
                "No pending tasks.",
                Style::default().fg(theme.muted),
            ))
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = pending
            .iter()
            .enumerate()
            .map(|(i, task)| {
                let line = match &self.mode {
                    Mode::Edit { id, buffer } if *id == task.id => Line::from(vec![
                        Span::styled("[ ] ", Style::default().fg(theme.muted)),
                        Span::styled(
                            format!("{buffer}_"),
                            Style::default()
                                .fg(theme.accent)
                                .add_modifier(Modifier::UNDERLINED),
                        ),
                    ]),
                    _ => Line::from(vec![
                        Span::styled("[ ] ", Style::default().fg(theme.muted)),
                        Span::raw(task.text.clone()),
                    ]),
                };
                let mut item = ListItem::new(line);
                if i == self.selected {
                    item = item.style(Style::default().bg(theme.selection));
                }
                item
            })
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }

    fn render_completed(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let completed: Vec<_> = self.tasks.completed().collect();
        let offset = self.tasks.pending().count();

        let items: Vec<ListItem> = completed
            .iter()
            .enumerate()
            .map(|(i, task)| {
                let line = Line::from(vec![
                    Span::styled("[x] ", Style::default().fg(theme.done)),
                    Span::styled(
                        task.text.clone(),
                        Style::default()
                            .fg(theme.muted)
                            .add_modifier(Modifier::CROSSED_OUT),
                    ),
                ]);
                let mut item = ListItem::new(line);
                if offset + i == self.selected {
                    item = item.style(Style::default().bg(theme.selection));
                }
                item
            })
            .collect();

        let panel = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Completed ({}) ", completed.len()))
                .border_style(Style::default().fg(theme.border)),
        );
        frame.render_widget(panel, area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let hints: &[(&str, &str)] = match &self.mode {
            Mode::Normal => &[
                ("i", "add"),
                ("e", "edit"),
                ("space", "done/undo"),
                ("d", "delete"),
                ("c", "completed"),
                ("t", "theme"),
                ("q", "quit"),
            ],
            Mode::Insert => &[("Enter", "add task"), ("Esc", "back")],
            Mode::Edit { .. } => &[("Enter", "save"), ("Esc", "cancel")],
        };

        let mut spans = Vec::new();
        for (key, action) in hints {
            if !spans.is_empty() {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*key, Style::default().fg(theme.accent)));
            spans.push(Span::raw(format!(" {action}")));
        }

        let footer = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Keys ")
                .border_style(Style::default().fg(theme.border)),
        );
        frame.render_widget(footer, area);
    }
}
