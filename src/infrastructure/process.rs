//! External command runner shared by the synth and deploy adapters

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// Lines of stderr kept in failure messages
const STDERR_TAIL: usize = 20;

/// Run `argv` in `cwd`, feeding `stdin` if given, and capture its output.
///
/// Returns a human-readable message on spawn failure or non-zero exit.
pub fn run_command(
    argv: &[String],
    cwd: &Path,
    envs: &[(&str, &str)],
    stdin: Option<&[u8]>,
) -> Result<Output, String> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| "command is empty".to_string())?;

    let mut command = Command::new(program);
    command
        .args(args)
        .current_dir(cwd)
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (key, value) in envs {
        command.env(key, value);
    }

    let mut child = command
        .spawn()
        .map_err(|e| format!("cannot run `{}`: {}", program, e))?;

    // stdin is fed while stdout and stderr drain, so a child that writes
    // before it reads cannot fill a pipe and stall both sides
    let output = std::thread::scope(|scope| {
        if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
            scope.spawn(move || {
                // A child that exits without reading stdin is reported by its status
                let _ = pipe.write_all(input);
            });
        }
        child.wait_with_output()
    })
    .map_err(|e| format!("`{}` did not complete: {}", program, e))?;

    if !output.status.success() {
        return Err(format!(
            "`{}` failed ({}){}",
            argv.join(" "),
            output.status,
            stderr_tail(&output.stderr)
        ));
    }
    Ok(output)
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        return String::new();
    }
    let start = lines.len().saturating_sub(STDERR_TAIL);
    format!(":\n{}", lines[start..].join("\n"))
}
