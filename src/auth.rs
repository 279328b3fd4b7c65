use crate::config::{config_dir, TmdbConfig};
use crate::error::{FlicksError, Result};

/// Older name for the key variable, still honoured
const LEGACY_API_KEY_ENV: &str = "TMDB_KEY";

/// Run a shell command and capture its trimmed stdout as the API key
fn try_key_command(command: &str) -> Option<String> {
    let output = std::process::Command::new("sh")
        .args(["-c", command])
        .output()
        .ok()?;

    if output.status.success() {
        let key = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !key.is_empty() {
            return Some(key);
        }
    }
    None
}

fn key_path() -> Option<std::path::PathBuf> {
    Some(config_dir()?.join("api_key"))
}

fn load_stored_key() -> Option<String> {
    let key = std::fs::read_to_string(key_path()?).ok()?;
    non_empty(&key)
}

fn save_key(key: &str) -> std::io::Result<()> {
    if let Some(path) = key_path() {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, key)?;
    }
    Ok(())
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn key_from_env(tmdb: &TmdbConfig) -> Option<String> {
    [tmdb.api_key_env.as_str(), LEGACY_API_KEY_ENV]
        .iter()
        .find_map(|var| std::env::var(var).ok().and_then(|v| non_empty(&v)))
}

/// Find the TMDB API key, trying in order:
/// 1. `--api-key`
/// 2. the env var named in the config (default `TMDB_API_KEY`), then `TMDB_KEY`
/// 3. stored key in ~/.config/flicks/api_key
/// 4. `api_key_command` from the config; a key found this way is stored
pub fn resolve_api_key(flag: Option<&str>, tmdb: &TmdbConfig) -> Result<String> {
    if let Some(key) = flag.and_then(non_empty) {
        return Ok(key);
    }

    if let Some(key) = key_from_env(tmdb) {
        return Ok(key);
    }

    if let Some(key) = load_stored_key() {
        return Ok(key);
    }

    if let Some(cmd) = &tmdb.api_key_command {
        if let Some(key) = try_key_command(cmd) {
            if let Err(e) = save_key(&key) {
                tracing::warn!(error = %e, "could not store API key");
            }
            return Ok(key);
        }
        tracing::warn!(command = %cmd, "api_key_command produced no key");
    }

    Err(FlicksError::Auth(format!(
        "No TMDB API key found. Pass --api-key, set {}, or configure api_key_command.",
        tmdb.api_key_env
    )))
}
