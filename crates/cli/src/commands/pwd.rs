//! pwd command - Print the current remote position

use std::sync::Arc;

use async_trait::async_trait;
use bsh_core::{Console, Result, Session};

use super::Command;

pub struct Pwd {
    console: Arc<dyn Console>,
}

impl Pwd {
    pub fn new(console: Arc<dyn Console>) -> Self {
        Self { console }
    }
}

#[async_trait]
impl Command for Pwd {
    fn name(&self) -> &'static str {
        "pwd"
    }

    async fn run(&self, session: &mut Session, _args: &str) -> Result<()> {
        match session.bucket() {
            None => self.console.write_line("/"),
            Some(bucket) => self
                .console
                .write_line(&format!("{}/{}", bucket.name, session.path())),
        }
        Ok(())
    }
}
