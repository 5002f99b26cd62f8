use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, List, ListItem,
        ListState, Paragraph,
    },
};

use getfit::analysis::Analysis;
use getfit::db::Store;
use getfit::db::models::WorkoutStats;
use getfit::errors::{Field, SessionError};
use getfit::session::Session;

use crate::login_message;

const HOME_ITEMS: [&str; 5] = [
    "Log Workout",
    "Delete Workout",
    "View Stats",
    "Graphical Analysis",
    "Log Out",
];
const FORM_LABELS: [&str; 4] = [
    "Exercise Name",
    "Date (DD-MM-YYYY)",
    "Duration (minutes)",
    "Calories Burned",
];

const LOGIN_HELP: &str = "Enter your name and press Enter | Esc: quit";
const HOME_HELP: &str = "j/k: navigate | Enter: select | l/d/s/a: shortcuts | o: log out | q: quit";
const FORM_HELP: &str = "Tab/Shift-Tab: next/previous field | Enter: submit | Esc: cancel";
const DELETE_HELP: &str = "Enter: delete | Esc: cancel";
const VIEW_HELP: &str = "Esc/Enter: back";

enum Screen {
    Login,
    Home,
    LogWorkout,
    DeleteWorkout,
    Stats(WorkoutStats),
    Analysis(Analysis),
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct App {
    store: Store,
    session: Option<Session>,
    screen: Screen,
    status_message: String,
    input_buffer: String,
    form: [String; 4],
    focus: usize,
    selected: usize,
}

/// Maps a failed action to the message shown in the status bar.
fn error_message(err: &SessionError) -> String {
    match err {
        SessionError::Invalid { field, .. } => match field {
            Field::Name => "Name cannot be empty!".to_string(),
            Field::Exercise => "Please enter valid details!".to_string(),
            Field::Date => "Please enter date in DD-MM-YYYY format".to_string(),
            Field::Duration | Field::Calories => {
                "Please enter valid numerical values for duration and calories!".to_string()
            }
        },
        SessionError::UserNotFound(_) => "User not found!".to_string(),
        SessionError::Store(e) => format!("Error: {}", e),
    }
}

impl App {
    fn new(store: Store) -> Self {
        Self {
            store,
            session: None,
            screen: Screen::Login,
            status_message: LOGIN_HELP.to_string(),
            input_buffer: String::new(),
            form: Default::default(),
            focus: 0,
            selected: 0,
        }
    }

    fn go_home(&mut self, status: impl Into<String>) {
        self.screen = Screen::Home;
        self.input_buffer.clear();
        self.status_message = status.into();
    }

    fn submit_name(&mut self) {
        match Session::login(self.store.clone(), &self.input_buffer) {
            Ok((session, outcome)) => {
                let welcome = login_message(session.name(), outcome);
                self.session = Some(session);
                self.selected = 0;
                self.go_home(format!("{} {}", welcome, HOME_HELP));
            }
            Err(e) => self.status_message = error_message(&e),
        }
    }

    fn activate(&mut self, item: usize) -> Flow {
        let Some(session) = &self.session else {
            self.screen = Screen::Login;
            return Flow::Continue;
        };

        match item {
            0 => {
                self.form = Default::default();
                self.focus = 0;
                self.screen = Screen::LogWorkout;
                self.status_message = FORM_HELP.to_string();
            }
            1 => {
                self.input_buffer.clear();
                self.screen = Screen::DeleteWorkout;
                self.status_message = DELETE_HELP.to_string();
            }
            2 => match session.stats() {
                Ok(stats) => {
                    self.screen = Screen::Stats(stats);
                    self.status_message = VIEW_HELP.to_string();
                }
                Err(e) => self.status_message = error_message(&e),
            },
            3 => match session.analysis() {
                Ok(analysis) if analysis.is_empty() => {
                    self.status_message = "No workout data found!".to_string();
                }
                Ok(analysis) => {
                    self.screen = Screen::Analysis(analysis);
                    self.status_message = VIEW_HELP.to_string();
                }
                Err(e) => self.status_message = error_message(&e),
            },
            _ => self.logout(),
        }
        Flow::Continue
    }

    fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            self.store = session.logout();
        }
        self.input_buffer.clear();
        self.screen = Screen::Login;
        self.status_message = LOGIN_HELP.to_string();
    }

    fn submit_log(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        let [exercise, date, duration, calories] = &self.form;
        let result = session.log_workout(exercise, date, duration, calories);
        match result {
            Ok(_) => self.go_home("Workout logged successfully!"),
            Err(e) => self.status_message = error_message(&e),
        }
    }

    fn submit_delete(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        let result = session.delete_workouts(&self.input_buffer);
        match result {
            Ok(deleted) => {
                let message = format!(
                    "Deleted {} workout(s) on {} successfully!",
                    deleted, self.input_buffer
                );
                self.go_home(message);
            }
            Err(e) => self.status_message = error_message(&e),
        }
    }

    fn handle_key(&mut self, code: KeyCode) -> Flow {
        match self.screen {
            Screen::Login => match code {
                KeyCode::Enter => self.submit_name(),
                KeyCode::Esc => return Flow::Quit,
                KeyCode::Char(c) => self.input_buffer.push(c),
                KeyCode::Backspace => {
                    self.input_buffer.pop();
                }
                _ => {}
            },
            Screen::Home => match code {
                KeyCode::Char('q') | KeyCode::Char('Q') => return Flow::Quit,
                KeyCode::Char('j') | KeyCode::Down => {
                    if self.selected < HOME_ITEMS.len() - 1 {
                        self.selected += 1;
                    }
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    self.selected = self.selected.saturating_sub(1);
                }
                KeyCode::Enter => return self.activate(self.selected),
                KeyCode::Char('l') => return self.activate(0),
                KeyCode::Char('d') => return self.activate(1),
                KeyCode::Char('s') => return self.activate(2),
                KeyCode::Char('a') => return self.activate(3),
                KeyCode::Char('o') => return self.activate(4),
                _ => {}
            },
            Screen::LogWorkout => match code {
                KeyCode::Tab | KeyCode::Down => self.focus = (self.focus + 1) % FORM_LABELS.len(),
                KeyCode::BackTab | KeyCode::Up => {
                    self.focus = (self.focus + FORM_LABELS.len() - 1) % FORM_LABELS.len()
                }
                KeyCode::Enter => self.submit_log(),
                KeyCode::Esc => self.go_home(HOME_HELP),
                KeyCode::Char(c) => self.form[self.focus].push(c),
                KeyCode::Backspace => {
                    self.form[self.focus].pop();
                }
                _ => {}
            },
            Screen::DeleteWorkout => match code {
                KeyCode::Enter => self.submit_delete(),
                KeyCode::Esc => self.go_home(HOME_HELP),
                KeyCode::Char(c) => self.input_buffer.push(c),
                KeyCode::Backspace => {
                    self.input_buffer.pop();
                }
                _ => {}
            },
            Screen::Stats(_) | Screen::Analysis(_) => match code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => self.go_home(HOME_HELP),
                _ => {}
            },
        }
        Flow::Continue
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

        // Header
        let title = match &self.session {
            Some(session) => format!("GetFit - {}'s home", session.name()),
            None => "GetFit".to_string(),
        };
        let header = Paragraph::new(title)
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        match &self.screen {
            Screen::Login => {
                render_input(frame, chunks[1], "Enter your name", &self.input_buffer)
            }
            Screen::Home => self.render_home(frame, chunks[1]),
            Screen::LogWorkout => self.render_form(frame, chunks[1]),
            Screen::DeleteWorkout => render_input(
                frame,
                chunks[1],
                "Date of the workouts to delete (DD-MM-YYYY)",
                &self.input_buffer,
            ),
            Screen::Stats(stats) => render_stats(frame, chunks[1], stats),
            Screen::Analysis(analysis) => render_analysis(frame, chunks[1], analysis),
        }

        // Footer with status
        let footer = Paragraph::new(self.status_message.as_str())
            .style(Style::default().fg(Color::White))
            .block(Block::default().borders(Borders::ALL).title("Status"));
        frame.render_widget(footer, chunks[2]);
    }

    fn render_home(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = HOME_ITEMS
            .iter()
            .enumerate()
            .map(|(idx, label)| {
                let style = if idx == self.selected {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(*label).style(style)
            })
            .collect();

        let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Menu"));
        let mut list_state = ListState::default();
        list_state.select(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

        for (idx, label) in FORM_LABELS.iter().enumerate() {
            let style = if idx == self.focus {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            let field = Paragraph::new(self.form[idx].as_str())
                .style(style)
                .block(Block::default().borders(Borders::ALL).title(*label));
            frame.render_widget(field, rows[idx]);
        }
    }
}

fn render_input(frame: &mut Frame, area: Rect, title: &str, value: &str) {
    let input = Paragraph::new(value)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(input, area);
}

fn render_stats(frame: &mut Frame, area: Rect, stats: &WorkoutStats) {
    let lines = vec![
        Line::from(format!("Total Workouts: {}", stats.count)),
        Line::from(format!(
            "Average Workout Duration: {:.2} minutes",
            stats.avg_duration
        )),
        Line::from(format!("Average Calories Burned: {:.2}", stats.avg_calories)),
    ];
    let body =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Workout Stats"));
    frame.render_widget(body, area);
}

/// First, middle and last date, enough to orient the x axis.
fn date_labels(analysis: &Analysis) -> Vec<Span<'static>> {
    let days = &analysis.calories_per_day;
    let mut picks = vec![0, days.len() / 2, days.len().saturating_sub(1)];
    picks.dedup();
    picks
        .into_iter()
        .filter_map(|idx| days.get(idx))
        .map(|day| Span::raw(day.date.clone()))
        .collect()
}

fn render_analysis(frame: &mut Frame, area: Rect, analysis: &Analysis) {
    let chunks =
        Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).split(area);

    let points: Vec<(f64, f64)> = analysis
        .calories_per_day
        .iter()
        .enumerate()
        .map(|(idx, day)| (idx as f64, day.calories as f64))
        .collect();
    let max_x = points.len().saturating_sub(1).max(1) as f64;
    let max_y = points.iter().map(|p| p.1).fold(1.0, f64::max) * 1.1;

    let dataset = Dataset::default()
        .name("Calories")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Yellow))
        .data(&points);
    let line_chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Calories Burned Per Day"),
        )
        .x_axis(
            Axis::default()
                .title("Date")
                .bounds([0.0, max_x])
                .labels(date_labels(analysis)),
        )
        .y_axis(
            Axis::default()
                .title("Calories")
                .bounds([0.0, max_y])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format!("{:.0}", max_y / 2.0)),
                    Span::raw(format!("{:.0}", max_y)),
                ]),
        );
    frame.render_widget(line_chart, chunks[0]);

    let bars: Vec<Bar> = analysis
        .avg_calories_per_exercise
        .iter()
        .map(|exercise| {
            Bar::default()
                .label(Line::from(exercise.exercise.clone()))
                .value(exercise.avg_calories.round() as u64)
                .text_value(format!("{:.0}", exercise.avg_calories))
        })
        .collect();
    let bar_chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Average Calories Burned Per Exercise"),
        )
        .bar_width(9)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Yellow))
        .value_style(Style::default().fg(Color::Black).bg(Color::Yellow))
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(bar_chart, chunks[1]);
}

/// Runs the full-screen front end until the user quits.
pub fn run(mut terminal: DefaultTerminal, store: Store, name: Option<String>) -> Result<()> {
    let mut app = App::new(store);
    if let Some(name) = name {
        app.input_buffer = name;
        app.submit_name();
    }

    loop {
        terminal.draw(|frame| app.render(frame))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.handle_key(key.code) == Flow::Quit {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use getfit::config::StoreConfig;

    fn app() -> App {
        App::new(Store::open_and_initialize(StoreConfig::in_memory()).unwrap())
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c));
        }
    }

    fn logged_in(name: &str) -> App {
        let mut app = app();
        type_text(&mut app, name);
        app.handle_key(KeyCode::Enter);
        app
    }

    fn fill_form(app: &mut App, fields: [&str; 4]) {
        for field in fields {
            type_text(app, field);
            app.handle_key(KeyCode::Tab);
        }
    }

    #[test]
    fn login_registers_and_opens_home() {
        let app = logged_in("Alice");
        assert!(matches!(app.screen, Screen::Home));
        assert!(app.status_message.starts_with("User Alice registered successfully!"));
        assert_eq!(app.session.as_ref().map(|s| s.name()), Some("Alice"));
    }

    #[test]
    fn empty_name_stays_on_login() {
        let mut app = app();
        type_text(&mut app, "   ");
        app.handle_key(KeyCode::Enter);
        assert!(matches!(app.screen, Screen::Login));
        assert_eq!(app.status_message, "Name cannot be empty!");
    }

    #[test]
    fn logged_workout_shows_in_stats() {
        let mut app = logged_in("Alice");
        app.handle_key(KeyCode::Char('l'));
        fill_form(&mut app, ["Run", "01-01-2024", "30", "300"]);
        assert_eq!(app.focus, 0);
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.status_message, "Workout logged successfully!");

        app.handle_key(KeyCode::Char('s'));
        match &app.screen {
            Screen::Stats(stats) => {
                assert_eq!(stats.count, 1);
                assert_eq!(stats.avg_calories, 300.0);
            }
            _ => panic!("expected the stats screen"),
        }
    }

    #[test]
    fn bad_date_keeps_form_open() {
        let mut app = logged_in("Alice");
        app.handle_key(KeyCode::Enter);
        fill_form(&mut app, ["Run", "2024-01-01", "30", "300"]);
        app.handle_key(KeyCode::Enter);
        assert!(matches!(app.screen, Screen::LogWorkout));
        assert_eq!(app.status_message, "Please enter date in DD-MM-YYYY format");
    }

    #[test]
    fn back_tab_wraps_to_last_field() {
        let mut app = logged_in("Alice");
        app.handle_key(KeyCode::Char('l'));
        app.handle_key(KeyCode::BackTab);
        assert_eq!(app.focus, 3);
        type_text(&mut app, "250");
        assert_eq!(app.form[3], "250");
    }

    #[test]
    fn analysis_without_data_stays_home() {
        let mut app = logged_in("Alice");
        app.handle_key(KeyCode::Char('a'));
        assert!(matches!(app.screen, Screen::Home));
        assert_eq!(app.status_message, "No workout data found!");
    }

    #[test]
    fn delete_then_logout() {
        let mut app = logged_in("Alice");
        app.handle_key(KeyCode::Char('d'));
        type_text(&mut app, "31-12-1999");
        app.handle_key(KeyCode::Enter);
        assert!(matches!(app.screen, Screen::Home));
        assert!(app.status_message.starts_with("Deleted 0 workout(s)"));

        app.handle_key(KeyCode::Char('o'));
        assert!(matches!(app.screen, Screen::Login));
        assert!(app.session.is_none());
        assert_eq!(app.handle_key(KeyCode::Esc), Flow::Quit);
    }
}
