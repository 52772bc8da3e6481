//! lpwd command - Print the local working directory

use std::sync::Arc;

use async_trait::async_trait;
use bsh_core::{Console, Result, Session};

use super::Command;

pub struct Lpwd {
    console: Arc<dyn Console>,
}

impl Lpwd {
    pub fn new(console: Arc<dyn Console>) -> Self {
        Self { console }
    }
}

#[async_trait]
impl Command for Lpwd {
    fn name(&self) -> &'static str {
        "lpwd"
    }

    async fn run(&self, session: &mut Session, _args: &str) -> Result<()> {
        self.console
            .write_line(&session.local_dir().display().to_string());
        Ok(())
    }
}
