#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// An isolated home directory and store for one test.
pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::create_dir_all(dir.path().join("home")).unwrap();
        Self { dir }
    }

    pub fn home(&self) -> PathBuf {
        self.dir.path().join("home")
    }

    pub fn store(&self) -> PathBuf {
        self.dir.path().join("store")
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_nilai"));
        cmd.args(args);
        cmd.env("HOME", self.home());
        cmd.env("XDG_DATA_HOME", self.home().join("data"));
        cmd.env("XDG_CONFIG_HOME", self.home().join("config"));
        cmd.env_remove("NILAI_COLLECTION");
        cmd.env("NILAI_STORE", self.store());
        cmd.env("NO_COLOR", "1");
        cmd
    }

    /// Run the CLI with this sandbox's environment.
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args).output().expect("Failed to execute CLI")
    }

    /// Run without the NILAI_STORE override, so the config file applies.
    pub fn run_unpinned(&self, args: &[&str]) -> Output {
        let mut cmd = self.command(args);
        cmd.env_remove("NILAI_STORE");
        cmd.output().expect("Failed to execute CLI")
    }

    /// Run the CLI and expect success.
    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn submit(&self, nim: &str, nama: &str, mata_kuliah: &str, nilai: &str) -> Output {
        self.run(&[
            "submit",
            "--nim",
            nim,
            "--nama",
            nama,
            "--mata-kuliah",
            mata_kuliah,
            "--nilai",
            nilai,
        ])
    }
}

impl Sandbox {
    /// Run `watch`, feeding `input` on stdin.
    pub fn watch(&self, input: &str) -> Output {
        use std::io::Write;
        use std::process::Stdio;

        let mut child = self
            .command(&["watch"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn CLI");

        child
            .stdin
            .take()
            .expect("stdin")
            .write_all(input.as_bytes())
            .expect("Failed to write stdin");

        child.wait_with_output().expect("Failed to wait for CLI")
    }
}
