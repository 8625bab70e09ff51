#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tagger_options::config::options::registrations::{build_registry, general};
use tagger_options::config::options::{Namespace, OptionValue, Options};
use tagger_options::page::{GeneralOptionsPage, Untranslated};
use tagger_options::session::SessionProvider;
use tagger_options::update::StaticUpdateCapability;
use tokio::sync::Notify;

pub fn options() -> Options {
    Options::in_memory(build_registry().expect("registry"))
}

/// Session provider that answers logins from a script
///
/// With a gate, every login waits for [`ScriptedSession::release`] before it
/// completes.
pub struct ScriptedSession {
    options: Options,
    logged_in: AtomicBool,
    script: Mutex<VecDeque<Result<String, String>>>,
    gate: Option<Notify>,
    finished: Notify,
    pub login_calls: AtomicUsize,
    pub logout_calls: AtomicUsize,
}

impl ScriptedSession {
    pub fn new(options: &Options) -> Self {
        Self {
            options: options.clone(),
            logged_in: AtomicBool::new(false),
            script: Mutex::new(VecDeque::new()),
            gate: None,
            finished: Notify::new(),
            login_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
        }
    }

    pub fn gated(options: &Options) -> Self {
        Self {
            gate: Some(Notify::new()),
            ..Self::new(options)
        }
    }

    /// Queue a successful login as `username`
    pub fn succeed_as(self, username: &str) -> Self {
        self.script.lock().unwrap().push_back(Ok(username.to_string()));
        self
    }

    /// Queue a failed login
    pub fn fail_with(self, message: &str) -> Self {
        self.script.lock().unwrap().push_back(Err(message.to_string()));
        self
    }

    /// Start out logged in as `username`
    pub async fn already_logged_in(self, username: &str) -> Self {
        self.options
            .set_key(
                Namespace::Persist,
                general::OAUTH_USERNAME,
                OptionValue::Text(username.to_string()),
            )
            .await
            .unwrap();
        self.logged_in.store(true, Ordering::SeqCst);
        self
    }

    /// Let one gated login complete
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    /// Wait until a login call has returned
    pub async fn login_returned(&self) {
        self.finished.notified().await;
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn logout_calls(&self) -> usize {
        self.logout_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionProvider for ScriptedSession {
    async fn is_logged_in(&self) -> bool {
        self.logged_in.load(Ordering::SeqCst)
    }

    async fn login(&self) -> Result<(), String> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let next = self.script.lock().unwrap().pop_front();
        let result = match next {
            Some(Ok(username)) => {
                self.options
                    .set_key(Namespace::Persist, general::OAUTH_USERNAME, OptionValue::Text(username))
                    .await
                    .map_err(|e| e.to_string())?;
                self.logged_in.store(true, Ordering::SeqCst);
                Ok(())
            }
            Some(Err(message)) => Err(message),
            None => Err("no scripted login result".to_string()),
        };
        self.finished.notify_one();
        result
    }

    async fn logout(&self) {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        self.logged_in.store(false, Ordering::SeqCst);
    }
}

pub fn page(options: &Options, session: Arc<ScriptedSession>) -> GeneralOptionsPage {
    page_with_updates(options, session, true)
}

pub fn page_with_updates(
    options: &Options,
    session: Arc<ScriptedSession>,
    auto_update: bool,
) -> GeneralOptionsPage {
    GeneralOptionsPage::new(
        options.clone(),
        session,
        Arc::new(StaticUpdateCapability(auto_update)),
        Arc::new(Untranslated),
    )
}
