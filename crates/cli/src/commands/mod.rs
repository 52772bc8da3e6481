//! Shell command definitions and dispatch registry
//!
//! Each command is a boxed handler registered under its name; dispatch is
//! a map lookup, and new commands are added by registering here.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bsh_core::{Console, ObjectStore, Result, Session};

mod cd;
mod get;
mod lls;
mod lpwd;
mod ls;
mod put;
mod pwd;
mod transfer;

#[cfg(test)]
pub(crate) mod test_support;

/// A single shell command
#[async_trait]
pub trait Command: Send + Sync {
    /// The name the command is dispatched under
    fn name(&self) -> &'static str;

    /// Run against the shared session with the trailing argument string
    async fn run(&self, session: &mut Session, args: &str) -> Result<()>;
}

/// Build the command registry
pub fn registry(
    store: Arc<dyn ObjectStore>,
    console: Arc<dyn Console>,
) -> HashMap<&'static str, Box<dyn Command>> {
    let commands: Vec<Box<dyn Command>> = vec![
        Box::new(cd::Cd::new(store.clone(), console.clone())),
        Box::new(ls::Ls::new(store.clone(), console.clone())),
        Box::new(lls::Lls::new(console.clone())),
        Box::new(pwd::Pwd::new(console.clone())),
        Box::new(lpwd::Lpwd::new(console.clone())),
        Box::new(get::Get::new(store.clone(), console.clone())),
        Box::new(put::Put::new(store, console)),
    ];

    commands
        .into_iter()
        .map(|command| (command.name(), command))
        .collect()
}
