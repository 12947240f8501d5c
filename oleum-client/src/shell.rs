//! Shell
//!
//! Owns the session and the active tab and mounts exactly one screen. Screen
//! actions that need the backend come back as a [`Task`]; the host runs it
//! (see [`Task::run`]) and feeds the [`Outcome`] to [`Shell::apply`].
//! Every mount gets a new id, and outcomes for an unmounted screen are
//! dropped.

use crate::backend::Backend;
use crate::screens::auth::{self, AuthRequest, AuthScreen};
use crate::screens::network::{self, NetworkLoad, NetworkScreen};
use crate::screens::new_order::{self, Destinations, NewOrderScreen};
use crate::screens::trips::{self, TripsScreen};
use crate::session::{SessionContext, SessionStore};
use shared::error::AppResult;
use shared::models::{NewBatch, OrderKind, Trip, User};

/// Bottom tab bar entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Order,
    Network,
    Trips,
}

impl Tab {
    /// Tabs in display order
    pub const ALL: [Tab; 3] = [Tab::Order, Tab::Network, Tab::Trips];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Order => "New Order",
            Tab::Network => "Network",
            Tab::Trips => "Trips",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Tab::Order => Tab::Network,
            Tab::Network => Tab::Trips,
            Tab::Trips => Tab::Order,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Tab::Order => Tab::Trips,
            Tab::Network => Tab::Order,
            Tab::Trips => Tab::Network,
        }
    }
}

/// The mounted screen
#[derive(Debug, Clone)]
pub enum Screen {
    Auth(AuthScreen),
    NewOrder(NewOrderScreen),
    Network(NetworkScreen),
    Trips(TripsScreen),
}

/// Backend work requested by a screen
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Authenticate(AuthRequest),
    LoadDestinations(OrderKind),
    SubmitBatch(NewBatch),
    LoadNetwork,
    LoadTrips,
}

/// Result of running an [`Effect`]
#[derive(Debug, Clone)]
pub enum Outcome {
    Authenticated(AppResult<User>),
    Destinations(OrderKind, AppResult<Destinations>),
    BatchSubmitted(AppResult<()>),
    Network(NetworkLoad),
    Trips(AppResult<Vec<Trip>>),
}

/// An effect tagged with the mount it was issued for
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub mount_id: u64,
    pub effect: Effect,
}

impl Task {
    /// Run the effect against `backend`
    pub async fn run(self, backend: &dyn Backend) -> (u64, Outcome) {
        let outcome = match self.effect {
            Effect::Authenticate(request) => {
                Outcome::Authenticated(auth::authenticate(backend, &request).await)
            }
            Effect::LoadDestinations(kind) => {
                Outcome::Destinations(kind, new_order::load_destinations(backend, kind).await)
            }
            Effect::SubmitBatch(batch) => {
                Outcome::BatchSubmitted(new_order::insert_batch(backend, &batch).await)
            }
            Effect::LoadNetwork => Outcome::Network(network::load_network(backend).await),
            Effect::LoadTrips => Outcome::Trips(trips::load_trips(backend).await),
        };
        (self.mount_id, outcome)
    }
}

/// Root component
#[derive(Debug)]
pub struct Shell {
    session: SessionContext,
    tab: Tab,
    screen: Screen,
    mount_id: u64,
}

impl Shell {
    /// Restore the session and mount the first screen.
    ///
    /// Returns the shell and the mount task of that screen, if any.
    pub fn start(store: SessionStore) -> (Self, Option<Task>) {
        let mut shell = Self {
            session: SessionContext::restore(store),
            tab: Tab::default(),
            screen: Screen::Auth(AuthScreen::new()),
            mount_id: 0,
        };
        let task = shell.mount();
        (shell, task)
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user()
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    pub fn mount_id(&self) -> u64 {
        self.mount_id
    }

    /// Header greeting
    pub fn greeting(&self) -> Option<String> {
        self.user().map(|u| format!("Hello, {}", u.name))
    }

    fn task(&self, effect: Effect) -> Task {
        Task {
            mount_id: self.mount_id,
            effect,
        }
    }

    /// Replace the mounted screen according to session and tab
    fn mount(&mut self) -> Option<Task> {
        self.mount_id += 1;
        let Some(user) = self.session.user() else {
            self.screen = Screen::Auth(AuthScreen::new());
            return None;
        };
        let (screen, effect) = match self.tab {
            Tab::Order => {
                let mut screen = NewOrderScreen::new(user.id);
                let kind = screen.mount();
                (Screen::NewOrder(screen), Effect::LoadDestinations(kind))
            }
            Tab::Network => {
                let mut screen = NetworkScreen::new();
                screen.mount();
                (Screen::Network(screen), Effect::LoadNetwork)
            }
            Tab::Trips => {
                let mut screen = TripsScreen::new();
                screen.mount();
                (Screen::Trips(screen), Effect::LoadTrips)
            }
        };
        self.screen = screen;
        tracing::debug!(tab = ?self.tab, mount_id = self.mount_id, "Mounted screen");
        Some(self.task(effect))
    }

    /// Switch tabs. Ignored without a session or when already active.
    pub fn select_tab(&mut self, tab: Tab) -> Option<Task> {
        if !self.session.is_active() || tab == self.tab {
            return None;
        }
        self.tab = tab;
        self.mount()
    }

    /// Clear the session, reset to the default tab and show the auth screen
    pub fn sign_out(&mut self) {
        if let Err(e) = self.session.clear() {
            tracing::warn!(error = %e, "Failed to clear stored session");
        }
        self.tab = Tab::default();
        self.mount();
    }

    // ========== Screen actions ==========

    /// Submit the auth form
    pub fn submit_auth(&mut self) -> Option<Task> {
        let Screen::Auth(screen) = &mut self.screen else {
            return None;
        };
        let request = screen.begin_submit()?;
        Some(self.task(Effect::Authenticate(request)))
    }

    /// Switch the order mode
    pub fn set_order_kind(&mut self, kind: OrderKind) -> Option<Task> {
        let Screen::NewOrder(screen) = &mut self.screen else {
            return None;
        };
        let kind = screen.set_kind(kind)?;
        Some(self.task(Effect::LoadDestinations(kind)))
    }

    /// Submit the order form
    pub fn submit_order(&mut self) -> Option<Task> {
        let Screen::NewOrder(screen) = &mut self.screen else {
            return None;
        };
        let batch = screen.begin_submit()?;
        Some(self.task(Effect::SubmitBatch(batch)))
    }

    /// Feed back an outcome; may start follow-up work
    pub fn apply(&mut self, mount_id: u64, outcome: Outcome) -> Option<Task> {
        if mount_id != self.mount_id {
            tracing::debug!(mount_id, current = self.mount_id, "Dropping stale outcome");
            return None;
        }
        match outcome {
            Outcome::Authenticated(result) => {
                let Screen::Auth(screen) = &mut self.screen else {
                    return mismatched("authentication");
                };
                let user = screen.finish_submit(result)?;
                if let Err(e) = self.session.establish(user) {
                    tracing::warn!(error = %e, "Failed to persist session");
                }
                self.mount()
            }
            Outcome::Destinations(kind, result) => {
                let Screen::NewOrder(screen) = &mut self.screen else {
                    return mismatched("destinations");
                };
                screen.apply_destinations(kind, result);
                None
            }
            Outcome::BatchSubmitted(result) => {
                let Screen::NewOrder(screen) = &mut self.screen else {
                    return mismatched("batch submission");
                };
                screen.finish_submit(result);
                None
            }
            Outcome::Network(load) => {
                let Screen::Network(screen) = &mut self.screen else {
                    return mismatched("network");
                };
                screen.apply(load);
                None
            }
            Outcome::Trips(result) => {
                let Screen::Trips(screen) = &mut self.screen else {
                    return mismatched("trips");
                };
                screen.apply(result);
                None
            }
        }
    }

    /// Run `task` and any follow-ups to completion
    pub async fn drive(&mut self, backend: &dyn Backend, task: Option<Task>) {
        let mut next = task;
        while let Some(task) = next.take() {
            let (mount_id, outcome) = task.run(backend).await;
            next = self.apply(mount_id, outcome);
        }
    }
}

fn mismatched(outcome: &str) -> Option<Task> {
    tracing::warn!(outcome, "Outcome does not match the mounted screen");
    None
}
