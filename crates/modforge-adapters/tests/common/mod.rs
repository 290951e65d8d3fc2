//! Shared fakes for the adapter integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use modforge_adapters::{GoRenderer, MemoryFilesystem, builtin};
use modforge_core::{
    application::{
        ApplicationError,
        ports::{CommandOutput, CommandRunner, Filesystem, RepositoryCloner},
    },
    domain::Settings,
    error::ForgeResult,
    prelude::{Generator, TemplateInstaller},
};

/// Stands in for the `go` binary: `mod init` writes `go.mod`, `mod tidy`
/// writes `go.sum`.
#[derive(Clone)]
pub struct FakeGo {
    fs: MemoryFilesystem,
    calls: Arc<Mutex<Vec<String>>>,
    fail_tidy: Arc<Mutex<bool>>,
}

impl FakeGo {
    pub fn new(fs: &MemoryFilesystem) -> Self {
        Self {
            fs: fs.clone(),
            calls: Arc::default(),
            fail_tidy: Arc::default(),
        }
    }

    pub fn fail_tidy(&self, fail: bool) {
        *self.fail_tidy.lock().unwrap() = fail;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for FakeGo {
    fn run(&self, dir: &Path, program: &str, args: &[String]) -> ForgeResult<CommandOutput> {
        let line = format!("{program} {}", args.join(" "));
        self.calls.lock().unwrap().push(line);

        match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
            ["mod", "init", module] => {
                self.fs
                    .write_file(&dir.join("go.mod"), &format!("module {module}\n\ngo 1.23\n"))?;
                Ok(CommandOutput::ok(format!("go: creating new go.mod: module {module}\n")))
            }
            ["mod", "tidy"] if *self.fail_tidy.lock().unwrap() => Ok(CommandOutput::failed(
                "go: finding module for package go.uber.org/zap\nnetwork unreachable\n",
            )),
            ["mod", "tidy"] => {
                self.fs.write_file(&dir.join("go.sum"), "")?;
                Ok(CommandOutput::ok(""))
            }
            _ => Ok(CommandOutput::ok("go1.22.4\n")),
        }
    }
}

/// Clones by copying a fixed set of files into the target.
pub struct FakeCloner {
    fs: MemoryFilesystem,
    files: Vec<(&'static str, Vec<u8>)>,
    pub fail: bool,
}

impl FakeCloner {
    pub fn new(fs: &MemoryFilesystem, files: Vec<(&'static str, Vec<u8>)>) -> Self {
        Self {
            fs: fs.clone(),
            files,
            fail: false,
        }
    }
}

impl RepositoryCloner for FakeCloner {
    fn fetch_into(&self, url: &str, into: &Path) -> ForgeResult<()> {
        for (rel, bytes) in &self.files {
            self.fs.insert_bytes(into.join(rel), bytes)?;
        }
        if self.fail {
            return Err(ApplicationError::Template {
                reason: format!("failed to clone {url}: connection reset"),
            }
            .into());
        }
        Ok(())
    }
}

pub fn generator(fs: &MemoryFilesystem, go: &FakeGo) -> Generator {
    Generator::new(
        builtin::registry(),
        Box::new(fs.clone()),
        Box::new(go.clone()),
        Box::new(GoRenderer::new()),
    )
}

pub fn installer(fs: &MemoryFilesystem, cloner: FakeCloner) -> TemplateInstaller {
    TemplateInstaller::new(builtin::registry(), Box::new(fs.clone()), Box::new(cloner))
}

pub fn settings(path: &str, adapters: &[&str]) -> Settings {
    Settings::builder()
        .module("example.com/foo")
        .go_version("1.22")
        .path(path)
        .adapters(adapters.iter().copied())
        .build(&builtin::registry())
        .unwrap()
}
