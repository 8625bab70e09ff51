use super::{Command, GeneralOptionsPage, Msg};
use anyhow::Result;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;

/// Drives a [`GeneralOptionsPage`]: executes the commands its `update()`
/// returns and feeds completed async work back in as messages.
///
/// Spawned futures run on tokio; their messages come back through a channel
/// and are applied on the task that owns the runtime, so page state is never
/// shared.
pub struct PageRuntime {
    page: GeneralOptionsPage,
    alive: Arc<AtomicBool>,
    tx: mpsc::UnboundedSender<Msg>,
    rx: mpsc::UnboundedReceiver<Msg>,
    pending: usize,
}

impl PageRuntime {
    pub fn new(page: GeneralOptionsPage) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let alive = page.liveness();
        Self {
            page,
            alive,
            tx,
            rx,
            pending: 0,
        }
    }

    pub fn page(&self) -> &GeneralOptionsPage {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut GeneralOptionsPage {
        &mut self.page
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Number of spawned commands whose message has not been applied yet
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub async fn load(&mut self) -> Result<()> {
        self.page.load().await
    }

    pub async fn save(&self) -> Result<()> {
        self.page.save().await
    }

    pub fn restore_defaults(&mut self) {
        let command = self.page.restore_defaults();
        self.execute_command(command);
    }

    /// Apply a message and execute the resulting command
    pub fn dispatch(&mut self, msg: Msg) {
        if !self.is_alive() {
            log::debug!("Page torn down, dropping {:?}", msg);
            return;
        }
        let command = self.page.update(msg);
        self.execute_command(command);
    }

    /// Wait for the next spawned command to finish and apply its message
    ///
    /// Returns false when nothing is pending or the page was torn down.
    pub async fn next_completion(&mut self) -> bool {
        if self.pending == 0 || !self.is_alive() {
            return false;
        }
        match self.rx.recv().await {
            Some(msg) => {
                self.pending -= 1;
                self.dispatch(msg);
                true
            }
            None => false,
        }
    }

    /// Apply completions until no spawned command is left
    pub async fn run_until_idle(&mut self) {
        while self.next_completion().await {}
    }

    /// Tear down the page; in-flight results are discarded when they arrive
    pub fn destroy(&mut self) {
        self.page.dispose();
        self.rx.close();
        self.pending = 0;
        log::debug!("Page '{}' destroyed", self.page.info().name);
    }

    fn execute_command(&mut self, command: Command<Msg>) {
        match command {
            Command::None => {}
            Command::Perform(future) => {
                let tx = self.tx.clone();
                let alive = Arc::clone(&self.alive);
                self.pending += 1;
                tokio::spawn(async move {
                    let msg = future.await;
                    if alive.load(Ordering::Acquire) {
                        // Receiver is gone only after destroy()
                        let _ = tx.send(msg);
                    }
                });
            }
        }
    }
}
