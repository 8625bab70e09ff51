//! The General options page
//!
//! `GeneralOptionsPage` owns the page state and binds it to the option store.
//! Widgets (or the CLI) call the handlers and feed [`Msg`]s to `update()`;
//! asynchronous session work comes back as a [`Command`] which the
//! [`PageRuntime`] executes.

pub mod command;
pub mod display;
pub mod runtime;
pub mod state;

pub use command::Command;
pub use display::{DisplayState, Translate, Untranslated};
pub use runtime::PageRuntime;
pub use state::{AutoProcessing, LevelChoice, PageState, needs_server_warning};

use crate::config::options::registrations::general;
use crate::config::options::{
    Namespace, OptionDefinition, OptionError, OptionType, OptionValue, Options,
};
use crate::constants::{UPDATE_LEVELS, UpdateLevel};
use crate::session::{
    LoginOutcome, LoginTicket, SessionMachine, SessionProvider, SessionStatus, Settlement,
};
use crate::update::UpdateCapability;
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Static description of an options page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub name: &'static str,
    pub title: &'static str,
    pub parent: Option<&'static str>,
    pub sort_order: u32,
    pub active: bool,
    pub help_url: &'static str,
}

pub const GENERAL_PAGE: PageInfo = PageInfo {
    name: "general",
    title: "General",
    parent: None,
    sort_order: 1,
    active: true,
    help_url: "/config/options_general.html",
};

/// `setting` options shown on the page, in load/save order
pub const BOUND_OPTIONS: [&str; 10] = [
    general::SERVER_HOST,
    general::SERVER_PORT,
    general::USE_SERVER_FOR_SUBMISSION,
    general::ANALYZE_NEW_FILES,
    general::CLUSTER_NEW_FILES,
    general::IGNORE_FILE_MBIDS,
    general::CHECK_FOR_UPDATES,
    general::UPDATE_CHECK_DAYS,
    general::UPDATE_LEVEL,
    general::CHECK_FOR_PLUGIN_UPDATES,
];

#[derive(Debug, Clone)]
pub enum Msg {
    HostChanged(String),
    AnalyzeToggled(bool),
    ClusterToggled(bool),
    Login,
    LoginFinished { ticket: LoginTicket, outcome: LoginOutcome },
    Logout,
    LogoutFinished,
    RestoreDefaults,
}

pub struct GeneralOptionsPage {
    options: Options,
    session: Arc<dyn SessionProvider>,
    updates: Arc<dyn UpdateCapability>,
    translator: Arc<dyn Translate>,
    machine: SessionMachine,
    state: PageState,
    alive: Arc<AtomicBool>,
}

impl GeneralOptionsPage {
    pub fn new(
        options: Options,
        session: Arc<dyn SessionProvider>,
        updates: Arc<dyn UpdateCapability>,
        translator: Arc<dyn Translate>,
    ) -> Self {
        Self {
            options,
            session,
            updates,
            translator,
            machine: SessionMachine::new(),
            state: PageState::default(),
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn info(&self) -> PageInfo {
        GENERAL_PAGE
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn status(&self) -> &SessionStatus {
        self.machine.status()
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Shared liveness flag, cleared by [`dispose`](Self::dispose)
    pub fn liveness(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.alive)
    }

    /// Tear the page down; results that arrive afterwards are dropped
    pub fn dispose(&mut self) {
        self.alive.store(false, Ordering::Release);
    }

    /// Read every bound option from the store into the page
    pub async fn load(&mut self) -> Result<()> {
        let mut values = HashMap::new();
        for key in BOUND_OPTIONS {
            let def = self.options.registry().require(Namespace::Setting, key)?;
            values.insert(key.to_string(), self.options.get(def).await?);
        }
        self.apply_values(values);

        let logged_in_as = if self.session.is_logged_in().await {
            Some(
                self.options
                    .get_text(Namespace::Persist, general::OAUTH_USERNAME)
                    .await?,
            )
        } else {
            None
        };
        self.machine.sync(logged_in_as);
        self.refresh_display();

        self.state.update_group_visible = self.updates.auto_update_enabled();
        log::info!("Loaded {} options for page '{}'", BOUND_OPTIONS.len(), GENERAL_PAGE.name);
        Ok(())
    }

    /// Write every bound option from the page into the store
    pub async fn save(&self) -> Result<()> {
        // Nothing is written unless every bound option has a page value
        let mut writes = Vec::with_capacity(BOUND_OPTIONS.len());
        for key in BOUND_OPTIONS {
            let def = self.options.registry().require(Namespace::Setting, key)?;
            let value = match self.state.value(key) {
                Some(OptionValue::Text(text)) => OptionValue::Text(text.trim().to_string()),
                Some(value) => value.clone(),
                None => anyhow::bail!("'{}' has no value on the page; load it before saving", def.path()),
            };
            writes.push((def, value));
        }
        for (def, value) in writes {
            self.options.set(def, &value).await?;
        }
        log::info!("Saved {} options for page '{}'", BOUND_OPTIONS.len(), GENERAL_PAGE.name);
        Ok(())
    }

    /// Put the declared defaults into the page and log out
    ///
    /// Nothing is written until the next `save()`.
    pub fn restore_defaults(&mut self) -> Command<Msg> {
        let registry = self.options.registry();
        let values = BOUND_OPTIONS
            .iter()
            .filter_map(|key| registry.get(Namespace::Setting, key))
            .map(|def| (def.key.clone(), def.default.clone()))
            .collect();
        self.apply_values(values);
        log::debug!("Restored defaults for page '{}'", GENERAL_PAGE.name);
        self.logout()
    }

    pub fn update(&mut self, msg: Msg) -> Command<Msg> {
        if !self.is_alive() {
            return Command::None;
        }

        match msg {
            Msg::HostChanged(host) => {
                self.on_host_changed(&host);
                Command::None
            }
            Msg::AnalyzeToggled(on) => {
                self.on_analyze_toggled(on);
                Command::None
            }
            Msg::ClusterToggled(on) => {
                self.on_cluster_toggled(on);
                Command::None
            }
            Msg::Login => self.login(),
            Msg::LoginFinished { ticket, outcome } => match self.machine.finish_login(ticket, outcome) {
                Settlement::Applied => {
                    self.refresh_display();
                    Command::None
                }
                Settlement::Dropped => Command::None,
                Settlement::Revoke => self.end_provider_session(),
            },
            Msg::Logout => self.logout(),
            Msg::LogoutFinished => Command::None,
            Msg::RestoreDefaults => self.restore_defaults(),
        }
    }

    pub fn on_host_changed(&mut self, host: &str) {
        self.state
            .values
            .insert(general::SERVER_HOST.to_string(), OptionValue::Text(host.to_string()));
        self.refresh_server_warning();
    }

    pub fn on_analyze_toggled(&mut self, on: bool) {
        let next = self.auto_processing().with_analyze(on);
        self.set_auto_processing(next);
    }

    pub fn on_cluster_toggled(&mut self, on: bool) {
        let next = self.auto_processing().with_cluster(on);
        self.set_auto_processing(next);
    }

    pub fn set_port(&mut self, port: i64) {
        self.state
            .values
            .insert(general::SERVER_PORT.to_string(), OptionValue::Int(port));
    }

    pub fn set_update_check_days(&mut self, days: i64) {
        self.state
            .values
            .insert(general::UPDATE_CHECK_DAYS.to_string(), OptionValue::Int(days));
    }

    /// Set one of the page's checkboxes
    pub fn set_flag(&mut self, key: &str, on: bool) -> Result<(), OptionError> {
        match key {
            general::ANALYZE_NEW_FILES => self.on_analyze_toggled(on),
            general::CLUSTER_NEW_FILES => self.on_cluster_toggled(on),
            _ => {
                let def = self.bound_definition(key)?;
                if def.ty != OptionType::Bool {
                    return Err(OptionError::TypeMismatch {
                        key: def.path(),
                        expected: def.ty.name(),
                        found: on.to_string(),
                    });
                }
                self.state.values.insert(def.key, OptionValue::Bool(on));
            }
        }
        Ok(())
    }

    /// Select an update level; only members of the level set are accepted
    pub fn select_update_level(&mut self, value: i64) -> Result<(), OptionError> {
        let level = UpdateLevel::from_value(value)?;
        self.state
            .values
            .insert(general::UPDATE_LEVEL.to_string(), OptionValue::Int(level.value));
        Ok(())
    }

    fn login(&mut self) -> Command<Msg> {
        let Some(ticket) = self.machine.begin_login() else {
            log::debug!("Ignoring login request in state {:?}", self.machine.status());
            return Command::None;
        };
        self.refresh_display();

        let session = Arc::clone(&self.session);
        let options = self.options.clone();
        Command::perform(
            async move {
                if let Err(message) = session.login().await {
                    return LoginOutcome::Failure { message };
                }
                match options.get_text(Namespace::Persist, general::OAUTH_USERNAME).await {
                    Ok(username) => LoginOutcome::Success { username },
                    Err(e) => LoginOutcome::Failure {
                        message: e.to_string(),
                    },
                }
            },
            move |outcome| Msg::LoginFinished { ticket, outcome },
        )
    }

    fn logout(&mut self) -> Command<Msg> {
        self.machine.logout();
        self.refresh_display();
        self.end_provider_session()
    }

    fn end_provider_session(&self) -> Command<Msg> {
        let session = Arc::clone(&self.session);
        Command::perform(async move { session.logout().await }, |_| Msg::LogoutFinished)
    }

    fn bound_definition(&self, key: &str) -> Result<OptionDefinition, OptionError> {
        if !BOUND_OPTIONS.contains(&key) {
            return Err(OptionError::NotRegistered {
                namespace: Namespace::Setting,
                key: key.to_string(),
            });
        }
        self.options.registry().require(Namespace::Setting, key).cloned()
    }

    /// Replace the bound values and re-derive everything that depends on them
    fn apply_values(&mut self, values: HashMap<String, OptionValue>) {
        self.state.values = values;

        // Applied in widget order: a stored pair with both switches on ends up clustering
        let stored = self.auto_processing();
        let next = AutoProcessing::default()
            .with_analyze(stored.analyze)
            .with_cluster(stored.cluster);
        self.set_auto_processing(next);

        let level = UpdateLevel::clamp(self.state.selected_update_level());
        self.state
            .values
            .insert(general::UPDATE_LEVEL.to_string(), OptionValue::Int(level.value));
        self.state.update_level_choices = UPDATE_LEVELS
            .iter()
            .map(|level| LevelChoice {
                value: level.value,
                label: self.translator.tr(level.title),
            })
            .collect();

        self.refresh_server_warning();
    }

    fn auto_processing(&self) -> AutoProcessing {
        AutoProcessing {
            analyze: self.state.flag(general::ANALYZE_NEW_FILES),
            cluster: self.state.flag(general::CLUSTER_NEW_FILES),
        }
    }

    fn set_auto_processing(&mut self, next: AutoProcessing) {
        self.state
            .values
            .insert(general::ANALYZE_NEW_FILES.to_string(), OptionValue::Bool(next.analyze));
        self.state
            .values
            .insert(general::CLUSTER_NEW_FILES.to_string(), OptionValue::Bool(next.cluster));
    }

    fn refresh_server_warning(&mut self) {
        self.state.server_warning_visible = needs_server_warning(self.state.text(general::SERVER_HOST));
    }

    fn refresh_display(&mut self) {
        self.state.display = DisplayState::for_status(self.machine.status(), self.translator.as_ref());
    }
}
