//! The interactive shell
//!
//! Owns the session state and the command registry, and runs the
//! read-eval loop. No command failure ends the session: errors are
//! reported to the console and the loop continues.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use bsh_core::{Console, ObjectStore, Session};

use crate::commands::{self, Command};

pub struct Shell {
    session: Session,
    store: Arc<dyn ObjectStore>,
    console: Arc<dyn Console>,
    commands: HashMap<&'static str, Box<dyn Command>>,
}

impl Shell {
    pub fn new(store: Arc<dyn ObjectStore>, console: Arc<dyn Console>, local_dir: PathBuf) -> Self {
        let commands = commands::registry(store.clone(), console.clone());
        Self {
            session: Session::new(local_dir),
            store,
            console,
            commands,
        }
    }

    /// Authorise with the store, re-prompting for credentials until a set
    /// is accepted
    pub async fn login(&self, key_id: String, application_key: String) {
        let mut key_id = key_id;
        let mut application_key = application_key;
        loop {
            self.console.write_line("Authorising...");
            match self.store.authorize(&key_id, &application_key).await {
                Ok(()) => {
                    self.console.write_line("Authorisation successful");
                    return;
                }
                Err(err) => {
                    self.console.write_line("Authorisation failed.");
                    self.console.write_line(&err.to_string());
                    self.console.write_line("Please re-enter your credentials.");
                    key_id = self.console.ask("Enter your account ID:");
                    application_key = self.console.ask("Enter your application key:");
                }
            }
        }
    }

    /// The read-eval loop; runs until the process is terminated
    pub async fn run(&mut self) {
        loop {
            let prompt = format!("{}> ", self.session.location());
            let input = self.console.ask(&prompt);
            self.dispatch(&input).await;
        }
    }

    /// Dispatch one input line: the first whitespace-separated token
    /// selects the command, the remainder is its single argument
    pub async fn dispatch(&mut self, input: &str) {
        let input = input.trim();
        if input.is_empty() {
            return;
        }

        let (name, args) = match input.split_once(' ') {
            Some((name, rest)) => (name, rest.trim()),
            None => (input, ""),
        };

        let Some(command) = self.commands.get(name) else {
            self.console.write_line(&format!("Command {input} not found"));
            return;
        };

        tracing::debug!(command = name, "dispatching");
        if let Err(err) = command.run(&mut self.session, args).await {
            self.console.write_line(&err.to_string());
        }
    }

    #[cfg(test)]
    pub(crate) fn session(&self) -> &Session {
        &self.session
    }
}
