use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use crossterm::event::{self, Event, KeyEvent};
use ledger::{Direction, Ledger, LedgerError, LoadReport, Toggle, parse_amount};

use crate::{
    error::{AppError, Result},
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

const TOAST_TTL: Duration = Duration::from_secs(3);

/// Entries of the main window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    ManagePerson,
    ShowTable,
    AdjustBalance,
}

impl MenuItem {
    pub const ALL: [MenuItem; 3] = [Self::ManagePerson, Self::ShowTable, Self::AdjustBalance];

    pub fn label(self) -> &'static str {
        match self {
            Self::ManagePerson => "Manage people",
            Self::ShowTable => "Show table",
            Self::AdjustBalance => "Change balance",
        }
    }

    pub fn hotkey(self) -> char {
        match self {
            Self::ManagePerson => 'p',
            Self::ShowTable => 't',
            Self::AdjustBalance => 'b',
        }
    }

    fn from_hotkey(ch: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|item| item.hotkey() == ch.to_ascii_lowercase())
    }
}

#[derive(Debug, Default)]
pub struct NameForm {
    pub name: String,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
pub struct TableView {
    pub selected: usize,
}

/// Names captured when the picker opened; selection indexes into them.
#[derive(Debug)]
pub struct PickerState {
    pub names: Vec<String>,
    pub selected: usize,
}

#[derive(Debug)]
pub struct AdjustForm {
    pub name: String,
    pub amount: String,
    pub action: Direction,
    pub error: Option<String>,
}

impl AdjustForm {
    fn new(name: String) -> Self {
        Self {
            name,
            amount: String::new(),
            action: Direction::CreditToUser,
            error: None,
        }
    }

    fn switch_action(&mut self) {
        self.action = match self.action {
            Direction::CreditToUser => Direction::DebtFromUser,
            Direction::DebtFromUser => Direction::CreditToUser,
        };
    }
}

/// A modal dialog. Only the last one on the stack receives keys.
#[derive(Debug)]
pub enum Dialog {
    ManagePerson(NameForm),
    Table(TableView),
    PickPerson(PickerState),
    Adjust(AdjustForm),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DialogKind {
    ManagePerson,
    Table,
    PickPerson,
    Adjust,
}

impl Dialog {
    fn kind(&self) -> DialogKind {
        match self {
            Self::ManagePerson(_) => DialogKind::ManagePerson,
            Self::Table(_) => DialogKind::Table,
            Self::PickPerson(_) => DialogKind::PickPerson,
            Self::Adjust(_) => DialogKind::Adjust,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    created: Instant,
}

impl ToastState {
    fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
            created: Instant::now(),
        }
    }

    fn expired(&self) -> bool {
        self.created.elapsed() >= TOAST_TTL
    }
}

#[derive(Debug)]
pub struct AppState {
    pub ledger: Ledger,
    pub data_file: PathBuf,
    pub menu_selected: usize,
    pub dialogs: Vec<Dialog>,
    pub toast: Option<ToastState>,
}

impl AppState {
    pub fn new(ledger: Ledger, data_file: impl Into<PathBuf>) -> Self {
        Self {
            ledger,
            data_file: data_file.into(),
            menu_selected: 0,
            dialogs: Vec::new(),
            toast: None,
        }
    }
}

pub struct App {
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(ledger: Ledger, report: &LoadReport, data_file: impl AsRef<Path>) -> Self {
        let mut state = AppState::new(ledger, data_file.as_ref());
        if report.skipped > 0 {
            state.toast = Some(ToastState::new(
                ToastLevel::Warning,
                format!("Skipped {} malformed row(s)", report.skipped),
            ));
        }

        Self {
            state,
            should_quit: false,
        }
    }

    /// Runs the interactive session and saves the ledger when it ends.
    pub fn run(&mut self) -> Result<()> {
        self.session(ui::setup_terminal, |app, mut terminal| {
            let result = app.event_loop(&mut terminal);
            ui::restore_terminal(&mut terminal)?;
            result
        })
    }

    /// A failed `start` returns before anything is written. Once started,
    /// the ledger is saved even if `body` fails.
    fn session<T>(
        &mut self,
        start: impl FnOnce() -> Result<T>,
        body: impl FnOnce(&mut Self, T) -> Result<()>,
    ) -> Result<()> {
        let handle = start()?;
        let result = body(self, handle);
        let saved = self.save_on_exit();
        if let Err(err) = &saved {
            tracing::error!("Final save failed: {err}");
        }
        result?;
        saved
    }

    /// Writes the ledger one last time before the process ends.
    fn save_on_exit(&self) -> Result<()> {
        ledger::save(&self.state.ledger, &self.state.data_file)?;
        Ok(())
    }

    fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)?
                && let Event::Key(key) = event::read()?
            {
                self.handle_key(key);
            }

            if self.state.toast.as_ref().is_some_and(ToastState::expired) {
                self.state.toast = None;
            }
        }

        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let action = map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }

        match self.state.dialogs.last().map(Dialog::kind) {
            None => self.handle_menu(action),
            Some(DialogKind::ManagePerson) => self.handle_manage(action),
            Some(DialogKind::Table) => self.handle_table(action),
            Some(DialogKind::PickPerson) => self.handle_picker(action),
            Some(DialogKind::Adjust) => self.handle_adjust(action),
        }
    }

    #[cfg(test)]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn handle_menu(&mut self, action: AppAction) {
        match action {
            AppAction::Up => {
                self.state.menu_selected = self.state.menu_selected.saturating_sub(1);
            }
            AppAction::Down => {
                self.state.menu_selected =
                    (self.state.menu_selected + 1).min(MenuItem::ALL.len() - 1);
            }
            AppAction::Submit => {
                if let Some(item) = MenuItem::ALL.get(self.state.menu_selected) {
                    self.open(*item);
                }
            }
            AppAction::Input('q' | 'Q') => self.should_quit = true,
            AppAction::Input(ch) => {
                if let Some(item) = MenuItem::from_hotkey(ch) {
                    self.open(item);
                }
            }
            _ => {}
        }
    }

    fn open(&mut self, item: MenuItem) {
        let dialog = match item {
            MenuItem::ManagePerson => Dialog::ManagePerson(NameForm::default()),
            MenuItem::ShowTable => Dialog::Table(TableView::default()),
            MenuItem::AdjustBalance => {
                if self.state.ledger.is_empty() {
                    self.toast(ToastLevel::Info, "No people yet. Add someone first.");
                    return;
                }
                Dialog::PickPerson(PickerState {
                    names: self.state.ledger.names(),
                    selected: 0,
                })
            }
        };
        self.state.dialogs.push(dialog);
    }

    fn handle_manage(&mut self, action: AppAction) {
        let Some(Dialog::ManagePerson(form)) = self.state.dialogs.last_mut() else {
            return;
        };

        match action {
            AppAction::Cancel => {
                self.state.dialogs.pop();
            }
            AppAction::Backspace => {
                form.name.pop();
                form.error = None;
            }
            AppAction::Input(ch) => {
                form.name.push(ch);
                form.error = None;
            }
            AppAction::Submit => {
                let name = form.name.trim().to_string();
                match self.state.ledger.toggle(&name) {
                    Ok(outcome) => {
                        self.state.dialogs.pop();
                        if self.persist() {
                            let message = match outcome {
                                Toggle::Added => format!("Added {name}"),
                                Toggle::Removed => format!("Removed {name}"),
                            };
                            self.toast(ToastLevel::Success, message);
                        }
                    }
                    // Blank input keeps the dialog open without feedback.
                    Err(LedgerError::EmptyName) => {}
                    Err(err) => form.error = Some(err.to_string()),
                }
            }
            _ => {}
        }
    }

    fn handle_table(&mut self, action: AppAction) {
        let rows = self.state.ledger.len();
        let Some(Dialog::Table(view)) = self.state.dialogs.last_mut() else {
            return;
        };

        match action {
            AppAction::Cancel | AppAction::Submit => {
                self.state.dialogs.pop();
            }
            AppAction::Up => view.selected = view.selected.saturating_sub(1),
            AppAction::Down => view.selected = (view.selected + 1).min(rows.saturating_sub(1)),
            _ => {}
        }
    }

    fn handle_picker(&mut self, action: AppAction) {
        let Some(Dialog::PickPerson(picker)) = self.state.dialogs.last_mut() else {
            return;
        };

        match action {
            AppAction::Cancel => {
                self.state.dialogs.pop();
            }
            AppAction::Up => picker.selected = picker.selected.saturating_sub(1),
            AppAction::Down => {
                picker.selected = (picker.selected + 1).min(picker.names.len().saturating_sub(1));
            }
            AppAction::Submit => {
                if let Some(name) = picker.names.get(picker.selected).cloned() {
                    self.state.dialogs.push(Dialog::Adjust(AdjustForm::new(name)));
                }
            }
            _ => {}
        }
    }

    fn handle_adjust(&mut self, action: AppAction) {
        let Some(Dialog::Adjust(form)) = self.state.dialogs.last_mut() else {
            return;
        };

        match action {
            AppAction::Cancel => {
                self.state.dialogs.pop();
            }
            AppAction::Backspace => {
                form.amount.pop();
                form.error = None;
            }
            AppAction::Input(ch) => {
                form.amount.push(ch);
                form.error = None;
            }
            AppAction::Left | AppAction::Right | AppAction::NextField => form.switch_action(),
            AppAction::Submit => {
                let amount = match parse_amount(&form.amount) {
                    Ok(amount) => amount,
                    Err(err) => {
                        form.error = Some(err.to_string());
                        return;
                    }
                };
                let name = form.name.clone();
                let direction = form.action;

                match self.state.ledger.adjust(&name, amount, direction) {
                    Ok(record) => {
                        // Close the amount dialog and the picker under it.
                        self.state.dialogs.pop();
                        self.state.dialogs.pop();
                        if self.persist() {
                            self.toast(
                                ToastLevel::Success,
                                format!("{name}: balance {:.2}", record.balance),
                            );
                        }
                    }
                    Err(err) => form.error = Some(err.to_string()),
                }
            }
            _ => {}
        }
    }

    /// Saves the ledger; failures are logged and surfaced as a toast.
    fn persist(&mut self) -> bool {
        match ledger::save(&self.state.ledger, &self.state.data_file) {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(
                    "failed to save \"{}\": {err}",
                    self.state.data_file.display()
                );
                self.toast(ToastLevel::Error, format!("Save failed: {err}"));
                false
            }
        }
    }

    fn toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.state.toast = Some(ToastState::new(level, message));
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crossterm::event::{KeyCode, KeyModifiers};
    use ledger::Record;
    use tempfile::TempDir;

    use super::*;

    fn app_with(names: &[&str]) -> (App, TempDir) {
        let dir = TempDir::new().unwrap();
        let mut ledger = Ledger::new();
        for name in names {
            ledger.toggle(name).unwrap();
        }
        let app = App::new(
            ledger,
            &LoadReport::default(),
            dir.path().join("balances.csv"),
        );
        (app, dir)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    fn top(app: &App) -> Option<&Dialog> {
        app.state.dialogs.last()
    }

    #[test]
    fn manage_adds_person_and_persists() {
        let (mut app, _dir) = app_with(&[]);
        press(&mut app, KeyCode::Char('p'));
        type_text(&mut app, "Alex");
        press(&mut app, KeyCode::Enter);

        assert!(app.state.dialogs.is_empty());
        assert_eq!(app.state.ledger.get("Alex"), Some(&Record::ZERO));
        let saved = fs::read_to_string(&app.state.data_file).unwrap();
        assert_eq!(saved, "name,balance,deps,wds\nAlex,0.0,0.0,0.0\n");
        assert_eq!(
            app.state.toast.as_ref().map(|t| t.message.as_str()),
            Some("Added Alex")
        );
    }

    #[test]
    fn manage_submitting_existing_name_removes_it() {
        let (mut app, _dir) = app_with(&["Alex", "Sam"]);
        press(&mut app, KeyCode::Char('p'));
        type_text(&mut app, " Alex ");
        press(&mut app, KeyCode::Enter);

        assert!(!app.state.ledger.contains("Alex"));
        let saved = fs::read_to_string(&app.state.data_file).unwrap();
        assert_eq!(saved, "name,balance,deps,wds\nSam,0.0,0.0,0.0\n");
    }

    #[test]
    fn manage_blank_name_keeps_dialog_open() {
        let (mut app, _dir) = app_with(&[]);
        press(&mut app, KeyCode::Char('p'));
        type_text(&mut app, "  ");
        press(&mut app, KeyCode::Enter);

        assert!(matches!(top(&app), Some(Dialog::ManagePerson(_))));
        assert!(!app.state.data_file.exists());
    }

    #[test]
    fn letters_in_a_text_field_are_not_shortcuts() {
        let (mut app, _dir) = app_with(&[]);
        press(&mut app, KeyCode::Char('p'));
        type_text(&mut app, "qtb");

        assert!(!app.should_quit());
        let Some(Dialog::ManagePerson(form)) = top(&app) else {
            panic!("manage dialog should be open");
        };
        assert_eq!(form.name, "qtb");
    }

    #[test]
    fn menu_navigation_opens_selected_item() {
        let (mut app, _dir) = app_with(&[]);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert!(matches!(top(&app), Some(Dialog::Table(_))));
        press(&mut app, KeyCode::Esc);
        assert!(app.state.dialogs.is_empty());
    }

    #[test]
    fn change_balance_on_empty_ledger_opens_nothing() {
        let (mut app, _dir) = app_with(&[]);
        press(&mut app, KeyCode::Char('b'));

        assert!(app.state.dialogs.is_empty());
        assert_eq!(
            app.state.toast.as_ref().map(|t| t.level),
            Some(ToastLevel::Info)
        );
    }

    #[test]
    fn picker_binds_the_selected_person() {
        let (mut app, _dir) = app_with(&["A", "B", "C"]);
        press(&mut app, KeyCode::Char('b'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        let Some(Dialog::Adjust(form)) = top(&app) else {
            panic!("adjust dialog should be open");
        };
        assert_eq!(form.name, "C");
    }

    #[test]
    fn credit_updates_record_persists_and_closes_both_dialogs() {
        let (mut app, _dir) = app_with(&["Alex"]);
        press(&mut app, KeyCode::Char('b'));
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "5");
        press(&mut app, KeyCode::Enter);

        assert!(app.state.dialogs.is_empty());
        assert_eq!(
            app.state.ledger.get("Alex"),
            Some(&Record::new(5.0, 5.0, 0.0))
        );
        let saved = fs::read_to_string(&app.state.data_file).unwrap();
        assert!(saved.contains("Alex,5.0,5.0,0.0"));
    }

    #[test]
    fn debit_with_comma_decimal() {
        let (mut app, _dir) = app_with(&["Alex"]);
        press(&mut app, KeyCode::Char('b'));
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "2,5");
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);

        assert_eq!(
            app.state.ledger.get("Alex"),
            Some(&Record::new(-2.5, 0.0, 2.5))
        );
    }

    #[test]
    fn non_numeric_amount_keeps_dialog_open_without_writing() {
        let (mut app, _dir) = app_with(&["Alex"]);
        press(&mut app, KeyCode::Char('b'));
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "abc");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.state.dialogs.len(), 2);
        let Some(Dialog::Adjust(form)) = top(&app) else {
            panic!("adjust dialog should stay open");
        };
        assert!(form.error.is_some());
        assert_eq!(app.state.ledger.get("Alex"), Some(&Record::ZERO));
        assert!(!app.state.data_file.exists());
    }

    #[test]
    fn typing_clears_the_error_cue() {
        let (mut app, _dir) = app_with(&["Alex"]);
        press(&mut app, KeyCode::Char('b'));
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "x");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Backspace);

        let Some(Dialog::Adjust(form)) = top(&app) else {
            panic!("adjust dialog should stay open");
        };
        assert!(form.error.is_none());
        assert!(form.amount.is_empty());
    }

    #[test]
    fn escape_from_amount_returns_to_picker() {
        let (mut app, _dir) = app_with(&["Alex"]);
        press(&mut app, KeyCode::Char('b'));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);

        assert!(matches!(top(&app), Some(Dialog::PickPerson(_))));
    }

    #[test]
    fn quit_keys() {
        let (mut app, _dir) = app_with(&[]);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());

        let (mut app, _dir) = app_with(&[]);
        press(&mut app, KeyCode::Char('p'));
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }

    #[test]
    fn failed_save_is_reported_not_fatal() {
        let (mut app, dir) = app_with(&[]);
        // A directory in place of the data file makes the write fail.
        app.state.data_file = dir.path().to_path_buf();
        press(&mut app, KeyCode::Char('p'));
        type_text(&mut app, "Alex");
        press(&mut app, KeyCode::Enter);

        assert!(app.state.ledger.contains("Alex"));
        assert_eq!(
            app.state.toast.as_ref().map(|t| t.level),
            Some(ToastLevel::Error)
        );
    }

    #[test]
    fn skipped_rows_are_announced() {
        let dir = TempDir::new().unwrap();
        let report = LoadReport {
            loaded: 1,
            skipped: 2,
            missing: false,
        };
        let app = App::new(Ledger::new(), &report, dir.path().join("balances.csv"));
        assert_eq!(
            app.state.toast.as_ref().map(|t| t.level),
            Some(ToastLevel::Warning)
        );
    }

    #[test]
    fn save_on_exit_writes_the_ledger() {
        let (app, _dir) = app_with(&["Kim"]);
        app.save_on_exit().unwrap();
        let saved = fs::read_to_string(&app.state.data_file).unwrap();
        assert_eq!(saved, "name,balance,deps,wds\nKim,0.0,0.0,0.0\n");
    }

    #[test]
    fn failed_terminal_start_writes_nothing() {
        let (mut app, _dir) = app_with(&["Kim"]);
        let result = app.session(
            || Err::<(), _>(AppError::Terminal("no tty".to_string())),
            |_, ()| Ok(()),
        );

        assert!(matches!(result, Err(AppError::Terminal(_))));
        assert!(!app.state.data_file.exists());
    }

    #[test]
    fn started_session_saves_even_when_it_fails() {
        let (mut app, _dir) = app_with(&[]);
        let result = app.session(
            || Ok(()),
            |app, ()| {
                app.state.ledger.toggle("Alex")?;
                Err(AppError::Terminal("lost the screen".to_string()))
            },
        );

        assert!(matches!(result, Err(AppError::Terminal(_))));
        let saved = fs::read_to_string(&app.state.data_file).unwrap();
        assert_eq!(saved, "name,balance,deps,wds\nAlex,0.0,0.0,0.0\n");
    }
}
