// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! External tool invocation (OCR, text extraction)

pub mod ocr;
pub mod text;

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::config::ToolsConfig;
use crate::{RefileError, Result};

/// A command line to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<OsString>,
    pub current_dir: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

/// Captured result of a finished tool
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    /// Exit code, `None` when killed by a signal
    pub status: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_string()
    }
}

/// Runs external programs; swapped for a fake in tests
#[async_trait]
pub trait ToolRunner: Send + Sync {
    /// Run to completion and capture output. A non-zero exit is not an error
    /// here; failing to start the program is.
    async fn run(&self, invocation: &Invocation) -> Result<ToolOutput>;

    /// Resolve a program name on the execution path
    fn locate(&self, program: &str) -> Option<PathBuf>;
}

/// Runs real processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

#[async_trait]
impl ToolRunner for SystemRunner {
    async fn run(&self, invocation: &Invocation) -> Result<ToolOutput> {
        debug!("Running {} {:?}", invocation.program, invocation.args);

        let mut command = tokio::process::Command::new(&invocation.program);
        command.args(&invocation.args).kill_on_drop(true);
        if let Some(ref dir) = invocation.current_dir {
            command.current_dir(dir);
        }

        let output = command.output().await?;

        Ok(ToolOutput {
            status: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }
}

/// The configured OCR and text extraction tools behind one runner
#[derive(Clone)]
pub struct Toolchain {
    runner: Arc<dyn ToolRunner>,
    config: ToolsConfig,
}

impl Toolchain {
    pub fn new(runner: Arc<dyn ToolRunner>, config: ToolsConfig) -> Self {
        Self { runner, config }
    }

    pub fn config(&self) -> &ToolsConfig {
        &self.config
    }

    /// Fail unless every required tool is on the execution path
    pub fn check_dependencies(&self) -> Result<()> {
        let missing: Vec<&str> = self.config.required()
            .into_iter()
            .filter(|tool| match self.runner.locate(tool) {
                Some(path) => {
                    debug!("Found {} at {:?}", tool, path);
                    false
                }
                None => true,
            })
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(RefileError::MissingDependency(missing.join(", ")))
        }
    }
}
