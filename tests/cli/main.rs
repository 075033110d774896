use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod diff;
mod find;
mod generate;
mod init;
mod prune;
mod scan;

const BIN_NAME: &str = "locscan";

pub const EN_MESSAGES: &str = r#"{
  "greeting": "Hello {name}",
  "farewell": "Goodbye",
  "unused": "Never used"
}
"#;

pub const FR_MESSAGES: &str = r#"{
  "greeting": "Bonjour {name}",
  "farewell": "Au revoir",
  "unused": "Jamais"
}
"#;

pub const APP_TSX: &str = "export const title = window.i18n('greeting', { name });\nconst k = 'farewell';\n";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Stops config discovery at the project root.
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// A project with English and French dictionaries and one source file.
    pub fn with_project() -> Result<Self> {
        let test = Self::new()?;
        test.write_file("_locales/en/messages.json", EN_MESSAGES)?;
        test.write_file("_locales/fr/messages.json", FR_MESSAGES)?;
        test.write_file("ts/app.tsx", APP_TSX)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd.env("LOCSCAN_DISABLE_TIMING", "1"); // Disable timing for stable output
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Result<Output> {
        self.command()
            .args(args)
            .output()
            .context("Failed to run locscan")
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
