//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for testing devtester CLI behavior.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

pub use predicates;
pub use predicates::prelude::{Predicate, PredicateBooleanExt};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Trait for converting into a string predicate.
/// Allows passing `&str` (as contains) or any `Predicate<str>`.
pub trait IntoStrPredicate<P: Predicate<str>> {
    fn into_predicate(self) -> P;
}

impl IntoStrPredicate<predicates::str::ContainsPredicate> for &str {
    fn into_predicate(self) -> predicates::str::ContainsPredicate {
        predicates::str::contains(self)
    }
}

impl<P: Predicate<str>> IntoStrPredicate<P> for P {
    fn into_predicate(self) -> P {
        self
    }
}

/// Returns a Command configured to run the devtester binary
pub fn devtester_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("devtester"));
    cmd.env_remove("DEVTESTER_CONFIG")
        .env_remove("DEVTESTER_LOG")
        .env_remove("COLOR")
        .env("NO_COLOR", "1");
    cmd
}

/// Create a builder for `devtester <args>`
pub fn devtester(args: &[&str]) -> Builder {
    Builder::new(args)
}

/// Fluent builder for CLI invocations
pub struct Builder {
    args: Vec<String>,
    dir: Option<PathBuf>,
    envs: Vec<(String, String)>,
    stdin: Option<String>,
}

impl Builder {
    fn new(args: &[&str]) -> Self {
        Self {
            args: args.iter().map(|s| s.to_string()).collect(),
            dir: None,
            envs: Vec::new(),
            stdin: None,
        }
    }

    /// Request JSON output
    pub fn json(mut self) -> Self {
        self.args.extend(["-o".to_string(), "json".to_string()]);
        self
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Run in this directory
    pub fn pwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.dir = Some(path.into());
        self
    }

    /// Set an environment variable
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    /// Feed stdin
    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Run with fake tools from `project`'s bin directory first on PATH
    pub fn with_tools(self, project: &Project) -> Self {
        let path = std::env::var("PATH").unwrap_or_default();
        let bin = project.bin_dir();
        self.env("PATH", &format!("{}:{}", bin.display(), path))
    }

    fn output(self) -> std::process::Output {
        use std::io::Write;
        use std::process::Stdio;

        let mut cmd = devtester_cmd();
        cmd.args(&self.args);
        if let Some(dir) = self.dir {
            cmd.current_dir(dir);
        }
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        let mut child = cmd.spawn().unwrap();
        let mut stdin = child.stdin.take().unwrap();
        stdin
            .write_all(self.stdin.unwrap_or_default().as_bytes())
            .unwrap();
        drop(stdin);
        child.wait_with_output().unwrap()
    }

    /// Expect exit code 0
    pub fn passes(self) -> RunAssert {
        self.exits(0)
    }

    /// Expect exit code 1
    pub fn fails(self) -> RunAssert {
        self.exits(1)
    }

    /// Expect a specific exit code
    pub fn exits(self, code: i32) -> RunAssert {
        let output = self.output();
        assert_eq!(
            output.status.code(),
            Some(code),
            "expected exit code {}, got {:?}\nstdout: {}\nstderr: {}",
            code,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

/// Result of a run for chaining assertions
pub struct RunAssert {
    output: std::process::Output,
}

impl RunAssert {
    /// Get stdout as string
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// Get stderr as string
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Parse stdout as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.output.stdout).unwrap_or_else(|e| {
            panic!("stdout is not JSON ({e}):\n{}", self.stdout());
        })
    }

    /// Assert stdout equals expected (with diff on failure)
    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout(), expected);
        self
    }

    /// Assert stdout matches predicate.
    pub fn stdout_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = self.stdout();
        assert!(
            predicate.into_predicate().eval(&stdout),
            "stdout predicate failed:\n{}",
            stdout
        );
        self
    }

    /// Assert stdout does not match predicate.
    pub fn stdout_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = self.stdout();
        assert!(
            !predicate.into_predicate().eval(&stdout),
            "stdout should NOT match predicate:\n{}",
            stdout
        );
        self
    }

    /// Assert stderr matches predicate.
    pub fn stderr_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = self.stderr();
        assert!(
            predicate.into_predicate().eval(&stderr),
            "stderr predicate failed:\n{}",
            stderr
        );
        self
    }
}

/// Get path to a test fixture
pub fn fixture(name: &str) -> PathBuf {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR should be set");
    PathBuf::from(manifest_dir)
        .parent()
        .expect("parent should exist")
        .parent()
        .expect("grandparent should exist")
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Read a transcript fixture
pub fn transcript(name: &str) -> String {
    std::fs::read_to_string(fixture(&format!("transcripts/{name}.txt"))).unwrap()
}

// =============================================================================
// Project
// =============================================================================

/// Temporary Python project directory with helper methods.
///
/// ```ignore
/// let temp = Project::calc();
/// temp.config("[lint]\npassing_score = 8.0");
/// temp.fake_tool("pytest", "echo 'x.py::test_x PASSED'");
/// devtester(&["run"]).pwd(temp.path()).with_tools(&temp).passes();
/// ```
pub struct Project {
    dir: tempfile::TempDir,
    root: PathBuf,
}

impl Project {
    /// Create an empty project with no files
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = std::fs::canonicalize(dir.path()).unwrap();
        // Keeps config discovery from walking out of the project
        std::fs::create_dir(root.join(".git")).unwrap();
        Self { dir, root }
    }

    /// Create a `calc` package with an `Add` module and its unit test
    pub fn calc() -> Self {
        let temp = Self::empty();
        temp.file("src/calc/__init__.py", "");
        temp.file("src/calc/Add.py", "def add(a, b):\n    return a + b\n");
        temp.file(
            "src/calc/UnitTests/Add_UnitTest.py",
            "from calc.Add import add\n\n\ndef test_add():\n    assert add(1, 2) == 3\n",
        );
        temp
    }

    /// Get the project path
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Write devtester.toml (auto-prefixes with `version = 1` if not present)
    pub fn config(&self, content: &str) {
        let content = if content.contains("version") {
            content.to_string()
        } else {
            format!("version = 1\n{}", content)
        };
        self.file("devtester.toml", &content);
    }

    /// Write a file at the given path (parent directories created automatically)
    pub fn file(&self, path: impl AsRef<Path>, content: &str) {
        let full_path = self.root.join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full_path, content).unwrap();
    }

    /// Directory holding fake tools
    pub fn bin_dir(&self) -> PathBuf {
        self.root.join(".bin")
    }

    /// Install an executable shell script named `name` in the bin directory
    #[cfg(unix)]
    pub fn fake_tool(&self, name: &str, body: &str) {
        use std::os::unix::fs::PermissionsExt;

        let path = self.bin_dir().join(name);
        self.file(&path, &format!("#!/bin/sh\n{body}\n"));
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
}
