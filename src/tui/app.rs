//! Main application logic for the terminal user interface.
//!
//! The `App` struct owns the in-memory task store for the session and
//! coordinates the two screens: the manage view (month calendar, day agenda,
//! add-task form) and the dashboard (status/category charts plus the AI
//! analysis panel). All store mutations happen here in response to key
//! events; rendering derives everything from a fresh snapshot each frame.

use std::io;
use std::sync::mpsc::TryRecvError;
use std::time::Duration;

use chrono::{Datelike, Local, NaiveDate};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::analysis::{spawn_analysis, Analyst};
use crate::datetime::{first_of_month, is_today, month_grid, next_month, prev_month, same_month};
use crate::fields::{category_icon, format_category, format_status, Status};
use crate::store::TaskStore;
use crate::tui::colors::{category_color, status_color, INDIGO};
use crate::tui::enums::{AnalysisSlot, AppState};
use crate::tui::input::InputField;
use crate::tui::task_form::{TaskForm, SUBTASK_FIELD};
use crate::views::{category_distribution, day_agenda, day_dots, schedule_digest, status_distribution};

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Terminal application state.
pub struct App {
    state: AppState,
    store: TaskStore,
    /// Day whose agenda is shown; also the date new tasks are created on.
    selected_date: NaiveDate,
    /// First day of the visible month.
    month: NaiveDate,
    agenda_index: usize,
    form: TaskForm,
    subtask_entry: InputField,
    subtask_target: Option<u64>,
    analysis: AnalysisSlot,
    status_message: String,
}

impl App {
    /// Create the application around an existing store.
    pub fn new(store: TaskStore) -> Self {
        let today = Local::now().date_naive();
        App {
            state: AppState::Manage,
            store,
            selected_date: today,
            month: first_of_month(today),
            agenda_index: 0,
            form: TaskForm::new(),
            subtask_entry: InputField::new(),
            subtask_target: None,
            analysis: AnalysisSlot::Idle,
            status_message: String::new(),
        }
    }

    /// Draw and handle input until the user quits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }

    /// Poll for keyboard events and the pending analysis result.
    ///
    /// Returns true if the application should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        self.poll_analysis();

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    return Ok(false);
                }
                self.status_message.clear();

                let should_quit = match self.state {
                    AppState::Manage => self.handle_manage_input(key.code),
                    AppState::Dashboard => self.handle_dashboard_input(key.code),
                    AppState::AddTask => self.handle_form_input(key.code),
                    AppState::AddSubtask => self.handle_subtask_input(key.code),
                };
                if should_quit {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Collect the AI result if the in-flight request has resolved.
    fn poll_analysis(&mut self) {
        if let AnalysisSlot::Pending(rx) = &self.analysis {
            match rx.try_recv() {
                Ok(text) => self.analysis = AnalysisSlot::Done(text),
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    // Worker died without a result; free the slot.
                    self.analysis = AnalysisSlot::Idle;
                }
            }
        }
    }

    /// Id of the task currently selected in the agenda, if any.
    fn selected_task_id(&self) -> Option<u64> {
        day_agenda(self.store.tasks(), self.selected_date)
            .get(self.agenda_index)
            .map(|t| t.id)
    }

    fn agenda_len(&self) -> usize {
        day_agenda(self.store.tasks(), self.selected_date).len()
    }

    /// Keep the agenda selection inside the (possibly shrunk) list.
    fn clamp_agenda_index(&mut self) {
        let len = self.agenda_len();
        if len == 0 {
            self.agenda_index = 0;
        } else if self.agenda_index >= len {
            self.agenda_index = len - 1;
        }
    }

    fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
        if !same_month(date, self.month) {
            self.month = first_of_month(date);
        }
        self.agenda_index = 0;
    }

    fn handle_manage_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab => self.state = AppState::Dashboard,
            KeyCode::Left => self.select_date(self.selected_date - chrono::Duration::days(1)),
            KeyCode::Right => self.select_date(self.selected_date + chrono::Duration::days(1)),
            KeyCode::Up => self.select_date(self.selected_date - chrono::Duration::days(7)),
            KeyCode::Down => self.select_date(self.selected_date + chrono::Duration::days(7)),
            KeyCode::Char('n') | KeyCode::PageDown => self.month = next_month(self.month),
            KeyCode::Char('p') | KeyCode::PageUp => self.month = prev_month(self.month),
            KeyCode::Char('h') => self.select_date(Local::now().date_naive()),
            KeyCode::Char('a') => {
                self.form = TaskForm::new();
                self.state = AppState::AddTask;
            }
            KeyCode::Char('j') => {
                let len = self.agenda_len();
                if len > 0 {
                    self.agenda_index = (self.agenda_index + 1).min(len - 1);
                }
            }
            KeyCode::Char('k') => self.agenda_index = self.agenda_index.saturating_sub(1),
            KeyCode::Char('t') => {
                if let Some(id) = self.selected_task_id() {
                    let next = self
                        .store
                        .get(id)
                        .map(|t| t.status.cycled())
                        .unwrap_or(Status::NotStarted);
                    self.store.update_status(id, next);
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_task_id() {
                    self.store.delete_task(id);
                    self.clamp_agenda_index();
                    self.status_message = format!("Deleted task {id}");
                }
            }
            KeyCode::Char('s') => {
                if let Some(id) = self.selected_task_id() {
                    self.subtask_target = Some(id);
                    self.subtask_entry.clear();
                    self.state = AppState::AddSubtask;
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                // Toggle the n-th subtask of the selected task.
                let nth = c as usize - '1' as usize;
                if let Some(id) = self.selected_task_id() {
                    let subtask_id = self
                        .store
                        .get(id)
                        .and_then(|t| t.subtasks.get(nth))
                        .map(|s| s.id);
                    if let Some(sid) = subtask_id {
                        self.store.toggle_subtask(id, sid);
                    }
                }
            }
            _ => {}
        }
        false
    }

    fn handle_dashboard_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab => self.state = AppState::Manage,
            KeyCode::Char('g') => self.request_analysis(),
            KeyCode::Char('c') => {
                if matches!(self.analysis, AnalysisSlot::Done(_)) {
                    self.analysis = AnalysisSlot::Idle;
                }
            }
            _ => {}
        }
        false
    }

    /// Fire the workload analysis unless one is already in flight.
    fn request_analysis(&mut self) {
        if matches!(self.analysis, AnalysisSlot::Pending(_)) {
            return;
        }
        let digest = schedule_digest(self.store.tasks());
        let rx = spawn_analysis(Analyst::from_env(), digest);
        self.analysis = AnalysisSlot::Pending(rx);
    }

    fn handle_form_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Esc => self.state = AppState::Manage,
            KeyCode::Tab => self.form.next_field(),
            KeyCode::BackTab => self.form.prev_field(),
            KeyCode::Up => {
                if self.form.current_field == SUBTASK_FIELD && !self.form.staged.is_empty() {
                    self.form.move_staged_selection(false);
                } else {
                    self.form.prev_field();
                }
            }
            KeyCode::Down => {
                if self.form.current_field == SUBTASK_FIELD && !self.form.staged.is_empty() {
                    self.form.move_staged_selection(true);
                } else {
                    self.form.next_field();
                }
            }
            KeyCode::Left => self.form.handle_left_right(false),
            KeyCode::Right => self.form.handle_left_right(true),
            KeyCode::Delete => {
                if self.form.current_field == SUBTASK_FIELD {
                    self.form.remove_selected_staged();
                }
            }
            KeyCode::Enter => {
                if self.form.current_field == SUBTASK_FIELD
                    && !self.form.subtask_entry.value.trim().is_empty()
                {
                    self.form.stage_subtask();
                } else {
                    match self.form.draft(self.selected_date) {
                        Some(draft) => {
                            let title = draft.title.clone();
                            if self.store.add_task(draft).is_some() {
                                self.status_message = format!("Added \"{title}\"");
                            }
                            self.state = AppState::Manage;
                        }
                        None => self.status_message = "Title is required".into(),
                    }
                }
            }
            KeyCode::Backspace => self.form.handle_backspace(),
            KeyCode::Char(c) => self.form.handle_char(c),
            _ => {}
        }
        false
    }

    fn handle_subtask_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Esc => self.state = AppState::Manage,
            KeyCode::Enter => {
                if let Some(id) = self.subtask_target {
                    if self.store.add_subtask(id, &self.subtask_entry.value) {
                        self.status_message = "Subtask added".into();
                    }
                }
                self.state = AppState::Manage;
            }
            KeyCode::Backspace => self.subtask_entry.backspace(),
            KeyCode::Left => self.subtask_entry.left(),
            KeyCode::Right => self.subtask_entry.right(),
            KeyCode::Char(c) => self.subtask_entry.insert(c),
            _ => {}
        }
        false
    }

    // ---- rendering ----

    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        match self.state {
            AppState::Dashboard => self.render_dashboard(f, chunks[1]),
            _ => self.render_manage(f, chunks[1]),
        }
        self.render_footer(f, chunks[2]);

        match self.state {
            AppState::AddTask => self.render_form_overlay(f),
            AppState::AddSubtask => self.render_subtask_overlay(f),
            _ => {}
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let view = match self.state {
            AppState::Dashboard => "Dashboard Overview",
            _ => "Manage Tasks",
        };
        let header = Paragraph::new(Line::from(vec![
            Span::styled("ZENITH", Style::default().fg(INDIGO).add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(view, Style::default().add_modifier(Modifier::ITALIC)),
        ]))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let hints = match self.state {
            AppState::Manage => {
                "←↑↓→ day  n/p month  h today  j/k agenda  a add  t status  d delete  s subtask  1-9 toggle  Tab dashboard  q quit"
            }
            AppState::Dashboard => "g analyse  c clear  Tab manage  q quit",
            AppState::AddTask => "Tab/↑↓ fields  ←→ edit/cycle  Enter stage/save  Del unstage  Esc cancel",
            AppState::AddSubtask => "Enter save  Esc cancel",
        };
        let line = if self.status_message.is_empty() {
            Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray)))
        } else {
            Line::from(Span::styled(
                self.status_message.clone(),
                Style::default().fg(INDIGO),
            ))
        };
        f.render_widget(Paragraph::new(line), area);
    }

    fn render_manage(&mut self, f: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
            .split(area);

        self.render_calendar(f, columns[0]);
        self.render_agenda(f, columns[1]);
    }

    fn render_calendar(&self, f: &mut Frame, area: Rect) {
        let title = format!(" ‹p  {}  n› ", self.month.format("%B %Y"));
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_alignment(Alignment::Center);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let cells = month_grid(self.month);
        let weeks = cells.len() / 7;
        if inner.height < 2 || weeks == 0 {
            return;
        }

        let mut row_constraints = vec![Constraint::Length(1)];
        row_constraints.extend(std::iter::repeat(Constraint::Ratio(1, weeks as u32)).take(weeks));
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(row_constraints)
            .split(inner);

        let day_columns = |row: Rect| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, 7); 7])
                .split(row)
        };

        // Weekday header.
        let header_cols = day_columns(rows[0]);
        for (i, label) in WEEKDAY_LABELS.iter().enumerate() {
            let p = Paragraph::new(*label)
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center);
            f.render_widget(p, header_cols[i]);
        }

        for week in 0..weeks {
            let cols = day_columns(rows[week + 1]);
            for day in 0..7 {
                let cell = cells[week * 7 + day];
                self.render_day_cell(f, cols[day], cell.date, cell.in_month);
            }
        }
    }

    fn render_day_cell(&self, f: &mut Frame, area: Rect, date: NaiveDate, in_month: bool) {
        let selected = date == self.selected_date;

        let mut number_style = if in_month {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        if is_today(date) {
            number_style = number_style.fg(Color::White).bg(INDIGO).add_modifier(Modifier::BOLD);
        }

        let mut lines = vec![Line::from(Span::styled(
            format!("{:>2}", date.day()),
            number_style,
        ))];

        let dots = day_dots(self.store.tasks(), date);
        if !dots.is_empty() {
            let mut spans = Vec::new();
            for status in dots {
                spans.push(Span::styled("●", Style::default().fg(status_color(status))));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }

        let mut cell = Paragraph::new(lines).alignment(Alignment::Center);
        if selected {
            cell = cell.block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(INDIGO)),
            );
        }
        f.render_widget(cell, area);
    }

    fn render_agenda(&self, f: &mut Frame, area: Rect) {
        let agenda = day_agenda(self.store.tasks(), self.selected_date);
        let title = format!(" Agenda — {} ", self.selected_date.format("%a, %b %-d"));

        let mut lines: Vec<Line> = Vec::new();
        if agenda.is_empty() {
            lines.push(Line::from(Span::styled(
                "No tasks for this day.",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for (i, task) in agenda.iter().enumerate() {
            let selected = i == self.agenda_index;
            let marker = if selected { "› " } else { "  " };
            let mut title_style = Style::default().add_modifier(Modifier::BOLD);
            if selected {
                title_style = title_style.fg(INDIGO);
            }
            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(
                    format!("{}-{}", task.start.format("%H:%M"), task.end.format("%H:%M")),
                    Style::default().fg(Color::Gray),
                ),
                Span::raw(" "),
                Span::raw(category_icon(task.category)),
                Span::raw(" "),
                Span::styled(task.title.clone(), title_style),
            ]));
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(
                    format_status(task.status),
                    Style::default().fg(status_color(task.status)),
                ),
                Span::styled(
                    format!("  {}m", task.duration_min),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
            if !task.description.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("    {}", task.description),
                    Style::default().fg(Color::Gray),
                )));
            }
            for (n, sub) in task.subtasks.iter().enumerate() {
                let mark = if sub.done { "[x]" } else { "[ ]" };
                let style = if sub.done {
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default()
                };
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(format!("{mark} {} {}", n + 1, sub.title), style),
                ]));
            }
            lines.push(Line::default());
        }

        let agenda_widget = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: false });
        f.render_widget(agenda_widget, area);
    }

    fn render_dashboard(&self, f: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(9), Constraint::Min(5)])
            .split(area);
        let charts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);

        self.render_status_chart(f, charts[0]);
        self.render_category_chart(f, charts[1]);
        self.render_analysis_panel(f, rows[1]);
    }

    fn render_status_chart(&self, f: &mut Frame, area: Rect) {
        let dist = status_distribution(self.store.tasks());
        let max = dist.iter().map(|(_, n)| *n).max().unwrap_or(0).max(1);

        let mut lines = Vec::new();
        for (status, count) in dist {
            let bar = "█".repeat(count * 24 / max);
            lines.push(Line::from(vec![
                Span::raw(format!("{:<12}", format_status(status))),
                Span::styled(bar, Style::default().fg(status_color(status))),
                Span::raw(format!(" {count}")),
            ]));
        }
        let widget = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Task Status "));
        f.render_widget(widget, area);
    }

    fn render_category_chart(&self, f: &mut Frame, area: Rect) {
        let dist = category_distribution(self.store.tasks());
        let max = dist.iter().map(|(_, n)| *n).max().unwrap_or(0).max(1);

        let mut lines = Vec::new();
        if dist.is_empty() {
            lines.push(Line::from(Span::styled(
                "No tasks yet.",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for (category, count) in dist {
            let bar = "█".repeat(count * 24 / max);
            lines.push(Line::from(vec![
                Span::raw(format!(
                    "{} {:<9}",
                    category_icon(category),
                    format_category(category)
                )),
                Span::styled(bar, Style::default().fg(category_color(category))),
                Span::raw(format!(" {count}")),
            ]));
        }
        let widget = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Category Breakdown "),
        );
        f.render_widget(widget, area);
    }

    fn render_analysis_panel(&self, f: &mut Frame, area: Rect) {
        let lines: Vec<Line> = match &self.analysis {
            AnalysisSlot::Idle => vec![Line::from(Span::styled(
                "Press g to analyse your workload.",
                Style::default().fg(Color::DarkGray),
            ))],
            AnalysisSlot::Pending(_) => vec![Line::from(Span::styled(
                "Analysing…",
                Style::default().fg(INDIGO).add_modifier(Modifier::ITALIC),
            ))],
            AnalysisSlot::Done(text) => {
                let mut rendered: Vec<Line> = text.lines().map(markdown_line).collect();
                rendered.push(Line::default());
                rendered.push(Line::from(Span::styled(
                    "c to clear",
                    Style::default().fg(Color::DarkGray),
                )));
                rendered
            }
        };
        let widget = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" ✦ AI Schedule Assistant "),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(widget, area);
    }

    fn render_form_overlay(&self, f: &mut Frame) {
        let area = centered_rect(64, 72, f.area());
        f.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(INDIGO))
            .title(format!(" Add Task — {} ", self.selected_date.format("%b %-d, %Y")));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let active = |field: usize| {
            if self.form.current_field == field {
                Style::default().fg(INDIGO).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            }
        };
        let text_line = |label: &str, value: &str, field: usize| {
            let shown = if self.form.current_field == field {
                format!("{value}▏")
            } else {
                value.to_string()
            };
            Line::from(vec![
                Span::styled(format!("{label:<11}"), active(field)),
                Span::raw(shown),
            ])
        };

        use crate::tui::task_form::{
            CATEGORY_FIELD, DESCRIPTION_FIELD, DURATION_FIELD, END_FIELD, START_FIELD,
            STATUS_FIELD, TITLE_FIELD,
        };

        let mut lines = vec![
            text_line("Title", &self.form.title.value, TITLE_FIELD),
            text_line("Description", &self.form.description.value, DESCRIPTION_FIELD),
            text_line("Start", &self.form.start.value, START_FIELD),
            text_line("End", &self.form.end.value, END_FIELD),
            text_line("Duration", &self.form.duration.value, DURATION_FIELD),
            Line::from(vec![
                Span::styled(format!("{:<11}", "Category"), active(CATEGORY_FIELD)),
                Span::raw(format!(
                    "‹ {} {} ›",
                    category_icon(self.form.selected_category()),
                    format_category(self.form.selected_category())
                )),
            ]),
            Line::from(vec![
                Span::styled(format!("{:<11}", "Status"), active(STATUS_FIELD)),
                Span::raw(format!("‹ {} ›", format_status(self.form.selected_status()))),
            ]),
            text_line("Subtask", &self.form.subtask_entry.value, SUBTASK_FIELD),
        ];

        for (i, staged) in self.form.staged.iter().enumerate() {
            let marker = if self.form.current_field == SUBTASK_FIELD && i == self.form.staged_selected
            {
                "› "
            } else {
                "  "
            };
            lines.push(Line::from(Span::raw(format!(
                "{marker}• {}",
                staged.title
            ))));
        }

        let widget = Paragraph::new(lines).wrap(Wrap { trim: false });
        f.render_widget(widget, inner);
    }

    fn render_subtask_overlay(&self, f: &mut Frame) {
        let area = centered_rect(50, 18, f.area());
        f.render_widget(Clear, area);

        let target = self
            .subtask_target
            .and_then(|id| self.store.get(id))
            .map(|t| t.title.clone())
            .unwrap_or_default();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(INDIGO))
            .title(format!(" Add subtask to \"{target}\" "));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let widget = Paragraph::new(Line::from(format!("{}▏", self.subtask_entry.value)));
        f.render_widget(widget, inner);
    }
}

/// Style one line of the analysis markdown: bullets get a dot, the rest is
/// shown verbatim.
fn markdown_line(line: &str) -> Line<'static> {
    let trimmed = line.trim_start();
    if let Some(rest) = trimmed.strip_prefix("* ").or_else(|| trimmed.strip_prefix("- ")) {
        Line::from(vec![
            Span::styled("• ", Style::default().fg(INDIGO)),
            Span::raw(rest.to_string()),
        ])
    } else {
        Line::from(Span::raw(line.to_string()))
    }
}

/// A rectangle centred in `area` taking the given percentages of each axis.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Category;
    use crate::task::TaskDraft;
    use chrono::NaiveTime;

    fn app_with_task_today() -> App {
        let mut store = TaskStore::new();
        let _ = store.add_task(TaskDraft {
            title: "solo".into(),
            description: String::new(),
            date: Local::now().date_naive(),
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            duration_min: 60,
            status: Status::NotStarted,
            category: Category::Work,
            subtasks: Vec::new(),
        });
        App::new(store)
    }

    #[test]
    fn status_key_cycles_selected_task() {
        let mut app = app_with_task_today();
        app.handle_manage_input(KeyCode::Char('t'));
        assert_eq!(app.store.get(1).unwrap().status, Status::InProgress);
        app.handle_manage_input(KeyCode::Char('t'));
        assert_eq!(app.store.get(1).unwrap().status, Status::Completed);
    }

    #[test]
    fn delete_key_removes_selected_task_and_clamps_selection() {
        let mut app = app_with_task_today();
        app.handle_manage_input(KeyCode::Char('d'));
        assert!(app.store.is_empty());
        assert_eq!(app.agenda_index, 0);
        // A second delete with nothing selected is a no-op.
        app.handle_manage_input(KeyCode::Char('d'));
        assert!(app.store.is_empty());
    }

    #[test]
    fn month_navigation_leaves_selected_date_alone() {
        let mut app = app_with_task_today();
        let before = app.selected_date;
        app.handle_manage_input(KeyCode::Char('n'));
        assert_eq!(app.selected_date, before);
        assert_eq!(app.month, next_month(first_of_month(before)));
    }

    #[test]
    fn arrow_past_month_boundary_follows_the_selection() {
        let mut app = app_with_task_today();
        app.select_date(crate::datetime::last_of_month(app.selected_date));
        app.handle_manage_input(KeyCode::Right);
        assert!(same_month(app.selected_date, app.month));
        assert_eq!(app.month.day(), 1);
    }

    #[test]
    fn analysis_slot_ignores_overlapping_requests() {
        let mut app = app_with_task_today();
        // No key configured: the worker resolves to the apology string.
        std::env::remove_var("GEMINI_API_KEY");
        app.request_analysis();
        let first = matches!(&app.analysis, AnalysisSlot::Pending(_));
        assert!(first);
        // Second trigger while pending is ignored (slot stays the same
        // receiver; no panic, no replacement).
        app.request_analysis();
        assert!(matches!(&app.analysis, AnalysisSlot::Pending(_)));
        // Eventually the result lands and 'c' clears it.
        for _ in 0..200 {
            app.poll_analysis();
            if matches!(app.analysis, AnalysisSlot::Done(_)) {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        assert!(matches!(&app.analysis, AnalysisSlot::Done(_)));
        app.handle_dashboard_input(KeyCode::Char('c'));
        assert!(matches!(app.analysis, AnalysisSlot::Idle));
    }

    #[test]
    fn form_submit_adds_task_on_selected_date() {
        let mut app = app_with_task_today();
        app.handle_manage_input(KeyCode::Char('a'));
        assert!(matches!(app.state, AppState::AddTask));
        for c in "Dentist".chars() {
            app.handle_form_input(KeyCode::Char(c));
        }
        app.handle_form_input(KeyCode::Enter);
        assert!(matches!(app.state, AppState::Manage));
        assert_eq!(app.store.len(), 2);
        assert_eq!(app.store.get(2).unwrap().title, "Dentist");
        assert_eq!(app.store.get(2).unwrap().date, app.selected_date);
    }

    #[test]
    fn subtask_prompt_appends_to_target() {
        let mut app = app_with_task_today();
        app.handle_manage_input(KeyCode::Char('s'));
        assert!(matches!(app.state, AppState::AddSubtask));
        for c in "buy gift".chars() {
            app.handle_subtask_input(KeyCode::Char(c));
        }
        app.handle_subtask_input(KeyCode::Enter);
        assert_eq!(app.store.get(1).unwrap().subtasks.len(), 1);
        assert_eq!(app.store.get(1).unwrap().subtasks[0].title, "buy gift");
    }
}
