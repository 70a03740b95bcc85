//! The ffmpeg invocation that applies a title plan.
//!
//! Only the command line is built here; running it belongs to whatever
//! executes tasks.

use std::path::{Path, PathBuf};

/// Suffix inserted before the extension of the default output file.
const OUTPUT_SUFFIX: &str = "titleforged";

/// Builder for a stream-copy ffmpeg command carrying metadata edits.
#[derive(Debug, Clone)]
pub struct TranscodeCommand {
    program: PathBuf,
    input: PathBuf,
    output: PathBuf,
    arguments: Vec<String>,
    copy_streams: bool,
}

impl TranscodeCommand {
    pub fn new(program: PathBuf, input: &Path, output: &Path) -> Self {
        Self {
            program,
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            arguments: Vec::new(),
            copy_streams: true,
        }
    }

    /// Assembled metadata arguments, inserted verbatim after the input.
    pub fn arguments(mut self, arguments: Vec<String>) -> Self {
        self.arguments = arguments;
        self
    }

    /// Whether to emit the default `-map 0 -c copy` directives. Turn off when
    /// the user's main options already carry their own map/copy directives.
    pub fn copy_streams(mut self, copy: bool) -> Self {
        self.copy_streams = copy;
        self
    }

    /// The full argv, program first.
    pub fn build(&self) -> Vec<String> {
        let mut argv = vec![
            self.program.to_string_lossy().to_string(),
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            "info".to_string(),
            "-i".to_string(),
            self.input.to_string_lossy().to_string(),
        ];

        if self.copy_streams {
            argv.extend(["-map", "0", "-c", "copy"].map(String::from));
        }

        argv.extend(self.arguments.iter().cloned());
        argv.push("-y".to_string());
        argv.push(self.output.to_string_lossy().to_string());
        argv
    }

    /// Render the argv as a shell-pasteable line.
    pub fn to_shell_string(&self) -> String {
        self.build()
            .iter()
            .map(|arg| shell_quote(arg))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// `<dir>/<stem>.titleforged.<ext>` next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    let name = match input.extension() {
        Some(ext) => format!("{stem}.{OUTPUT_SUFFIX}.{}", ext.to_string_lossy()),
        None => format!("{stem}.{OUTPUT_SUFFIX}"),
    };
    input.with_file_name(name)
}

fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_.,:/=+@%".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
