//! Isolated project directory for running the `stackdev` binary

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Result of running a stackdev CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for TestResult {
    fn from(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

pub struct TestEnv {
    pub project_root: TempDir,
    pub home_dir: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: tempfile::tempdir().unwrap(),
            home_dir: tempfile::tempdir().unwrap(),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_stackdev")),
        }
    }

    pub fn root(&self) -> &Path {
        self.project_root.path()
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write a project file, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> &Self {
        let path = self.project_path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
        self
    }

    /// Project using `synth.sh` to build and `deploy_script` to deploy.
    pub fn with_scripts(synth_script: &str, deploy_script: &str) -> Self {
        let env = Self::new();
        env.write("synth.sh", synth_script)
            .write("deploy.sh", deploy_script)
            .write(
                "stackdev.toml",
                "[build]\ncommand = [\"sh\", \"synth.sh\"]\n\n[deploy]\ncommand = [\"sh\", \"deploy.sh\"]\n\n[watch]\ncooldown_ms = 0\n",
            );
        env
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.command(args).output().unwrap().into()
    }

    /// Command with a clean environment: no user config, no colors.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.bin);
        cmd.args(args)
            .current_dir(self.root())
            .env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"))
            .env("NO_COLOR", "1")
            .env("LANG", "en_US.UTF-8")
            .env_remove("STACKDEV_BUILD_COMMAND")
            .env_remove("STACKDEV_DEPLOY_COMMAND")
            .env_remove("STACKDEV_OUT_DIR")
            .env_remove("STACKDEV_COLOR");
        cmd
    }
}
