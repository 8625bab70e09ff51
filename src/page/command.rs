use futures::FutureExt;
use futures::future::BoxFuture;
use std::future::Future;

/// Commands represent side effects a page wants performed.
/// They are returned from `update()` and executed by the page runtime.
pub enum Command<Msg> {
    /// Do nothing
    None,

    /// Perform an async operation and send the result back as a message
    Perform(BoxFuture<'static, Msg>),
}

impl<Msg> Command<Msg> {
    /// Helper to create a Perform command from a future and a message mapper
    pub fn perform<F, T>(future: F, to_msg: impl FnOnce(T) -> Msg + Send + 'static) -> Self
    where
        F: Future<Output = T> + Send + 'static,
        Msg: Send + 'static,
    {
        Command::Perform(future.map(to_msg).boxed())
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Command::None)
    }
}

impl<Msg> std::fmt::Debug for Command<Msg> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::None => f.write_str("None"),
            Command::Perform(_) => f.write_str("Perform(..)"),
        }
    }
}
