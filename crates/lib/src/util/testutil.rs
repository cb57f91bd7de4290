//! Test utilities for keel-lib.
//!
//! Cross-platform command lines for tests that spawn external processes.

/// A command line that runs `script` in the platform shell.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> Vec<String> {
  vec!["/bin/sh".to_string(), "-c".to_string(), script.to_string()]
}

#[cfg(windows)]
pub fn shell_cmd(script: &str) -> Vec<String> {
  vec!["cmd.exe".to_string(), "/C".to_string(), script.to_string()]
}

/// A command line that exits with `code`.
pub fn exit_with(code: i32) -> Vec<String> {
  shell_cmd(&format!("exit {}", code))
}

/// A command line that creates `filename` in the working directory.
#[cfg(unix)]
pub fn touch_file(filename: &str) -> Vec<String> {
  vec!["/usr/bin/touch".to_string(), filename.to_string()]
}

#[cfg(windows)]
pub fn touch_file(filename: &str) -> Vec<String> {
  vec![
    "powershell.exe".to_string(),
    "-NoProfile".to_string(),
    "-Command".to_string(),
    format!("New-Item -ItemType File -Path '{}' -Force | Out-Null", filename),
  ]
}
