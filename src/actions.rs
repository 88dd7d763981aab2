//! GitHub Actions runtime integration: step outputs and input conventions.

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::error::Result;

/// Output holding the resolved version (JSON)
pub const OUTPUT_PREVIOUS_VERSION: &str = "previous_version";
/// Output holding the trimmed next version text
pub const OUTPUT_NEW_VERSION: &str = "new_version";
/// Output holding the full next tag
pub const OUTPUT_NEW_TAG: &str = "new_tag";

const MULTILINE_DELIMITER: &str = "AFFIRM_OUTPUT_EOF";

/// Destination for step outputs
pub trait OutputSink {
    /// Publish one named output for downstream steps
    fn set_output(&mut self, name: &str, value: &str) -> Result<()>;
}

/// Render one output in the `$GITHUB_OUTPUT` file format
pub fn format_output(name: &str, value: &str) -> String {
    if value.contains('\n') {
        format!(
            "{name}<<{delim}\n{value}\n{delim}\n",
            name = name,
            value = value,
            delim = MULTILINE_DELIMITER
        )
    } else {
        format!("{}={}\n", name, value)
    }
}

/// Appends outputs to the file named by `GITHUB_OUTPUT`
pub struct GithubOutputFile {
    path: PathBuf,
}

impl GithubOutputFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        GithubOutputFile { path: path.into() }
    }
}

impl OutputSink for GithubOutputFile {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(format_output(name, value).as_bytes())?;
        Ok(())
    }
}

/// Prints outputs on stdout when running outside a runner
pub struct StdoutOutputs;

impl OutputSink for StdoutOutputs {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(format_output(name, value).as_bytes())?;
        Ok(())
    }
}

/// Keeps outputs in memory
#[derive(Debug, Default)]
pub struct MemoryOutputs {
    values: BTreeMap<String, String>,
}

impl MemoryOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl OutputSink for MemoryOutputs {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        self.values.insert(name.to_string(), value.to_string());
        Ok(())
    }
}

/// Pick the output sink for the current environment
pub fn output_sink_from_env() -> Box<dyn OutputSink> {
    match std::env::var_os("GITHUB_OUTPUT") {
        Some(path) if !path.is_empty() => Box::new(GithubOutputFile::new(path)),
        _ => Box::new(StdoutOutputs),
    }
}

/// Whether the process runs inside a GitHub Actions runner
pub fn in_github_actions() -> bool {
    std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true")
}

/// Interpret a dry-run input: any value containing "true", ignoring case
pub fn is_dry_run(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.to_lowercase().contains("true"))
}
