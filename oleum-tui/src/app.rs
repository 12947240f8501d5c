//! Application state and key handling
//!
//! The shell owns all screen state. `App` adds what only the terminal needs:
//! text inputs with cursors, which field has focus, and the log pane. Tasks
//! returned by the shell are spawned onto the runtime and their outcomes come
//! back through the channel.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use oleum_client::{Backend, Outcome, Screen, Shell, Tab, Task};
use std::sync::Arc;
use tokio::sync::mpsc;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;
use tui_logger::{TuiWidgetEvent, TuiWidgetState};

/// Outcome of a spawned task, tagged with its mount id
pub type TaskResult = (u64, Outcome);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Focused field on the auth form
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    #[default]
    Username,
    Password,
}

impl AuthField {
    fn other(self) -> Self {
        match self {
            AuthField::Username => AuthField::Password,
            AuthField::Password => AuthField::Username,
        }
    }
}

pub struct App {
    pub shell: Shell,
    /// Normal: keys are commands. Editing: keys go to the quantity field.
    pub input_mode: InputMode,
    pub auth_field: AuthField,
    pub username: Input,
    pub password: Input,
    pub quantity: Input,
    pub logger_state: TuiWidgetState,
    pub should_quit: bool,
    mounted: u64,
    backend: Arc<dyn Backend>,
    tx: mpsc::Sender<TaskResult>,
}

impl App {
    pub fn new(shell: Shell, backend: Arc<dyn Backend>, tx: mpsc::Sender<TaskResult>) -> Self {
        let mounted = shell.mount_id();
        Self {
            shell,
            input_mode: InputMode::default(),
            auth_field: AuthField::default(),
            username: Input::default(),
            password: Input::default(),
            quantity: Input::default(),
            logger_state: TuiWidgetState::new(),
            should_quit: false,
            mounted,
            backend,
            tx,
        }
    }

    /// Run a task in the background; its outcome arrives on the channel
    pub fn spawn(&self, task: Option<Task>) {
        let Some(task) = task else {
            return;
        };
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = task.run(backend.as_ref()).await;
            if tx.send(result).await.is_err() {
                tracing::debug!("UI closed before task finished");
            }
        });
    }

    /// Feed a finished task back into the shell
    pub fn apply(&mut self, (mount_id, outcome): TaskResult) {
        let next = self.shell.apply(mount_id, outcome);
        self.spawn(next);
        self.sync_inputs();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if matches!(self.shell.screen(), Screen::Auth(_)) {
            self.auth_key(key);
        } else if self.input_mode == InputMode::Editing {
            self.edit_key(key);
        } else {
            self.normal_key(key);
        }
        self.sync_inputs();
    }

    // ========== Auth ==========

    fn auth_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.auth_field = self.auth_field.other();
            }
            KeyCode::Enter => {
                let task = self.shell.submit_auth();
                self.spawn(task);
            }
            KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Screen::Auth(screen) = self.shell.screen_mut() {
                    screen.toggle_mode();
                }
            }
            _ => {
                let input = match self.auth_field {
                    AuthField::Username => &mut self.username,
                    AuthField::Password => &mut self.password,
                };
                if input.handle_event(&Event::Key(key)).is_none() {
                    return;
                }
                let value = input.value().to_string();
                if let Screen::Auth(screen) = self.shell.screen_mut() {
                    match self.auth_field {
                        AuthField::Username => screen.username = value,
                        AuthField::Password => screen.password = value,
                    }
                }
            }
        }
    }

    // ========== Signed in ==========

    fn normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('1') => self.select_tab(Tab::Order),
            KeyCode::Char('2') => self.select_tab(Tab::Network),
            KeyCode::Char('3') => self.select_tab(Tab::Trips),
            KeyCode::Tab => self.select_tab(self.shell.tab().next()),
            KeyCode::BackTab => self.select_tab(self.shell.tab().prev()),
            KeyCode::Char('x') => {
                tracing::info!("Signing out");
                self.shell.sign_out();
            }
            KeyCode::PageUp => self.logger_state.transition(TuiWidgetEvent::PrevPageKey),
            KeyCode::PageDown => self.logger_state.transition(TuiWidgetEvent::NextPageKey),
            _ => self.screen_key(key),
        }
    }

    fn screen_key(&mut self, key: KeyEvent) {
        match (self.shell.tab(), key.code) {
            (Tab::Order, KeyCode::Char('m')) => self.toggle_order_kind(),
            (Tab::Order, KeyCode::Char('e')) => self.input_mode = InputMode::Editing,
            (Tab::Order, KeyCode::Up) => self.step_destination(-1),
            (Tab::Order, KeyCode::Down) => self.step_destination(1),
            (Tab::Order, KeyCode::Enter) => self.submit_order(),
            (Tab::Network, KeyCode::Char('f')) => {
                if let Screen::Network(screen) = self.shell.screen_mut() {
                    screen.cycle_filter();
                }
            }
            _ => {}
        }
    }

    fn edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                self.submit_order();
            }
            _ => {
                if self.quantity.handle_event(&Event::Key(key)).is_none() {
                    return;
                }
                let value = self.quantity.value().to_string();
                if let Screen::NewOrder(screen) = self.shell.screen_mut() {
                    *screen.quantity_mut() = value;
                }
            }
        }
    }

    fn select_tab(&mut self, tab: Tab) {
        let task = self.shell.select_tab(tab);
        self.spawn(task);
    }

    fn toggle_order_kind(&mut self) {
        let Screen::NewOrder(screen) = self.shell.screen() else {
            return;
        };
        let kind = screen.kind().toggled();
        let task = self.shell.set_order_kind(kind);
        self.spawn(task);
    }

    fn submit_order(&mut self) {
        let task = self.shell.submit_order();
        self.spawn(task);
    }

    /// Move the destination highlight, wrapping at both ends
    fn step_destination(&mut self, delta: isize) {
        let Screen::NewOrder(screen) = self.shell.screen_mut() else {
            return;
        };
        let options = screen.destinations();
        if options.is_empty() {
            return;
        }
        let current = screen
            .selected()
            .and_then(|id| options.iter().position(|o| o.id == id));
        let index = match current {
            Some(i) => (i as isize + delta).rem_euclid(options.len() as isize) as usize,
            None if delta < 0 => options.len() - 1,
            None => 0,
        };
        screen.select_destination(Some(options[index].id.as_str()));
    }

    /// Pull form text back from the screen after it changed underneath
    /// (remount, cleared form, mode switch)
    fn sync_inputs(&mut self) {
        if self.shell.mount_id() != self.mounted {
            self.mounted = self.shell.mount_id();
            self.input_mode = InputMode::Normal;
            self.auth_field = AuthField::Username;
        }
        match self.shell.screen() {
            Screen::Auth(screen) => {
                sync(&mut self.username, &screen.username);
                sync(&mut self.password, &screen.password);
            }
            Screen::NewOrder(screen) => sync(&mut self.quantity, screen.quantity()),
            Screen::Network(_) | Screen::Trips(_) => {}
        }
    }
}

fn sync(input: &mut Input, value: &str) {
    if input.value() != value {
        *input = Input::new(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oleum_client::{InMemoryBackend, SessionStore, User};
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app(store: SessionStore) -> (App, mpsc::Receiver<TaskResult>) {
        let (shell, _) = Shell::start(store);
        let (tx, rx) = mpsc::channel(8);
        (App::new(shell, Arc::new(InMemoryBackend::new()), tx), rx)
    }

    #[tokio::test]
    async fn test_typing_fills_auth_form() {
        let temp_dir = TempDir::new().unwrap();
        let (mut app, _rx) = app(SessionStore::new(temp_dir.path()));

        app.handle_key(key(KeyCode::Char('o')));
        app.handle_key(key(KeyCode::Char('m')));
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Char('x')));

        let Screen::Auth(screen) = app.shell.screen() else {
            panic!("expected auth screen");
        };
        assert_eq!(screen.username, "om");
        assert_eq!(screen.password, "x");
        assert_eq!(app.auth_field, AuthField::Password);
        assert!(!app.should_quit);
    }

    #[tokio::test]
    async fn test_destination_stepping_wraps() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::new(temp_dir.path());
        store
            .save(&User {
                id: 1,
                name: "demo".into(),
                created_at: None,
            })
            .unwrap();
        let backend = crate::demo::seeded_backend().unwrap();
        let (mut shell, task) = Shell::start(store);
        shell.drive(&backend, task).await;
        let (tx, _rx) = mpsc::channel(8);
        let mut app = App::new(shell, Arc::new(backend), tx);

        app.handle_key(key(KeyCode::Up));
        let selected = |app: &App| match app.shell.screen() {
            Screen::NewOrder(screen) => screen.selected().map(str::to_string),
            _ => None,
        };
        assert_eq!(selected(&app).as_deref(), Some("p-3"));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(selected(&app).as_deref(), Some("p-1"));
    }

    #[tokio::test]
    async fn test_quantity_editing() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::new(temp_dir.path());
        store
            .save(&User {
                id: 1,
                name: "demo".into(),
                created_at: None,
            })
            .unwrap();
        let (mut app, _rx) = app(store);

        app.handle_key(key(KeyCode::Char('e')));
        assert_eq!(app.input_mode, InputMode::Editing);
        app.handle_key(key(KeyCode::Char('4')));
        app.handle_key(key(KeyCode::Char('2')));
        app.handle_key(key(KeyCode::Esc));

        let Screen::NewOrder(screen) = app.shell.screen() else {
            panic!("expected order screen");
        };
        assert_eq!(screen.weight, "42");
        assert_eq!(app.input_mode, InputMode::Normal);
    }
}
