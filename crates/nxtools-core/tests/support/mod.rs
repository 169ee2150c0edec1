#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

use nxtools_core::process::{CommandRunner, CommandSpec, CommandStatus};

/// Records every command and fails the ones scripted to fail.
#[derive(Default)]
pub struct ScriptedRunner {
    calls: RefCell<Vec<CommandSpec>>,
    failures: HashMap<usize, i32>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the `index`-th call (0-based) exit with `code`.
    pub fn failing_at(mut self, index: usize, code: i32) -> Self {
        self.failures.insert(index, code);
        self
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }

    pub fn programs(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|c| c.program.clone())
            .collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, command: &CommandSpec) -> std::io::Result<CommandStatus> {
        let mut calls = self.calls.borrow_mut();
        let index = calls.len();
        calls.push(command.clone());
        Ok(match self.failures.get(&index) {
            Some(code) => CommandStatus::failure(*code),
            None => CommandStatus::success(),
        })
    }
}

pub fn write_pom(module_dir: &Path, body: &str) {
    std::fs::create_dir_all(module_dir).unwrap();
    std::fs::write(
        module_dir.join("pom.xml"),
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <project xmlns=\"http://maven.apache.org/POM/4.0.0\">\n\
             <modelVersion>4.0.0</modelVersion>\n{body}\n</project>\n"
        ),
    )
    .unwrap();
}

/// A module with its own version and a built artifact in `target/`.
pub fn write_module(module_dir: &Path, artifact_id: &str, version: &str, suffix: &str) {
    write_pom(
        module_dir,
        &format!("<artifactId>{artifact_id}</artifactId>\n<version>{version}</version>"),
    );
    let target = module_dir.join("target");
    std::fs::create_dir_all(&target).unwrap();
    std::fs::write(
        target.join(format!("{artifact_id}-{version}{suffix}")),
        format!("{artifact_id} build output"),
    )
    .unwrap();
}

pub fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
    use std::io::Write;

    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let file = std::fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored);
    for (name, data) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(data).unwrap();
    }
    zip.finish().unwrap();
}
