//! lls command - List the local working directory

use std::sync::Arc;

use async_trait::async_trait;
use bsh_core::{Console, Result, Session};

use super::Command;

pub struct Lls {
    console: Arc<dyn Console>,
}

impl Lls {
    pub fn new(console: Arc<dyn Console>) -> Self {
        Self { console }
    }
}

#[async_trait]
impl Command for Lls {
    fn name(&self) -> &'static str {
        "lls"
    }

    async fn run(&self, session: &mut Session, _args: &str) -> Result<()> {
        let mut files = Vec::new();
        let mut directories = Vec::new();

        for entry in std::fs::read_dir(session.local_dir())? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if entry.file_type()?.is_dir() {
                directories.push(format!("{name}{}", std::path::MAIN_SEPARATOR));
            } else {
                files.push(name);
            }
        }

        files.sort();
        directories.sort();

        for file in files {
            self.console.write_line(&file);
        }
        for directory in directories {
            self.console.write_line(&directory);
        }
        Ok(())
    }
}
