//! Secret references in `config.toml`.
//!
//! - `pass::path/in/store` resolves through `pass show`, first line only
//! - `env::VAR_NAME` reads the environment
//! - anything else is used verbatim

/// Resolves a value that may be a secret reference.
pub fn resolve(value: &str) -> Result<String, String> {
    match value.split_once("::") {
        Some(("pass", path)) => from_pass(path),
        Some(("env", var)) => std::env::var(var)
            .map_err(|_| format!("environment variable `{}` is not set", var)),
        _ => Ok(value.to_string()),
    }
}

fn from_pass(path: &str) -> Result<String, String> {
    let output = std::process::Command::new("pass")
        .args(["show", path])
        .output()
        .map_err(|e| format!("failed to run `pass show {}`: {}", path, e))?;

    if !output.status.success() {
        return Err(format!(
            "`pass show {}` exited with {}: {}",
            path,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(str::to_string)
        .ok_or_else(|| format!("`pass show {}` produced no output", path))
}
