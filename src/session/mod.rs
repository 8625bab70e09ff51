//! Login session status tracking
//!
//! The status is derived state owned by the options page. Tokens and the
//! username live in the `persist` namespace and are maintained by the
//! [`SessionProvider`]; this module only reconciles asynchronous login results
//! with what the page shows.

pub mod persisted;
pub mod provider;

pub use persisted::{GrantedTokens, PersistedSession, ProvidedTokens, TokenExchange};
pub use provider::SessionProvider;

/// Status of the external credential session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    LoggedOut,
    LoggingIn,
    LoggedIn { username: String },
    LoginFailed { message: String },
}

/// Final result of one login attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Success { username: String },
    Failure { message: String },
}

/// Identifies one issued login request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoginTicket(u64);

/// What became of a login result handed to [`SessionMachine::finish_login`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// The result settled the status
    Applied,
    /// Stale or duplicate result, nothing to do
    Dropped,
    /// A login abandoned by logout succeeded anyway; the provider session
    /// must be logged out again
    Revoke,
}

/// Transition logic for [`SessionStatus`]
///
/// At most one login is in flight. Every issued login gets a fresh ticket and a
/// result is applied only if its ticket is the one in flight, so a late or
/// duplicated result can never cause a second final transition. Tickets
/// abandoned by a logout are remembered until their result arrives.
#[derive(Debug, Default)]
pub struct SessionMachine {
    status: SessionStatus,
    in_flight: Option<LoginTicket>,
    abandoned: Vec<LoginTicket>,
    next_ticket: u64,
}

impl SessionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn in_flight(&self) -> Option<LoginTicket> {
        self.in_flight
    }

    /// Sync with the provider's view, e.g. when the page is loaded
    ///
    /// Ignored while a login is in flight; its result will settle the status.
    pub fn sync(&mut self, logged_in_as: Option<String>) {
        if self.in_flight.is_some() {
            return;
        }
        self.status = match logged_in_as {
            Some(username) => SessionStatus::LoggedIn { username },
            None => SessionStatus::LoggedOut,
        };
    }

    /// Start a login
    ///
    /// Returns `None` when a login is already in flight or the session is
    /// already logged in.
    pub fn begin_login(&mut self) -> Option<LoginTicket> {
        match self.status {
            SessionStatus::LoggingIn | SessionStatus::LoggedIn { .. } => None,
            SessionStatus::LoggedOut | SessionStatus::LoginFailed { .. } => {
                self.next_ticket += 1;
                let ticket = LoginTicket(self.next_ticket);
                self.in_flight = Some(ticket);
                self.status = SessionStatus::LoggingIn;
                Some(ticket)
            }
        }
    }

    /// Apply a login result
    pub fn finish_login(&mut self, ticket: LoginTicket, outcome: LoginOutcome) -> Settlement {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
            self.status = match outcome {
                LoginOutcome::Success { username } => SessionStatus::LoggedIn { username },
                LoginOutcome::Failure { message } => SessionStatus::LoginFailed { message },
            };
            return Settlement::Applied;
        }

        let Some(pos) = self.abandoned.iter().position(|t| *t == ticket) else {
            log::debug!("Dropping login result for stale ticket {:?}", ticket);
            return Settlement::Dropped;
        };
        self.abandoned.remove(pos);

        // A newer login or session owns the provider state now
        let settled_out = matches!(
            self.status,
            SessionStatus::LoggedOut | SessionStatus::LoginFailed { .. }
        );
        match outcome {
            LoginOutcome::Success { .. } if settled_out && self.in_flight.is_none() => {
                log::info!("Login {:?} finished after logout, revoking it", ticket);
                Settlement::Revoke
            }
            _ => Settlement::Dropped,
        }
    }

    /// Log out from any state; an in-flight login is abandoned
    pub fn logout(&mut self) {
        if let Some(ticket) = self.in_flight.take() {
            self.abandoned.push(ticket);
        }
        self.status = SessionStatus::LoggedOut;
    }
}
