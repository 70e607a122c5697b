use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Flags that can be saved as defaults and layered under the CLI.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub no_presence: bool,
    pub title: Option<String>,
    pub presence_file: Option<PathBuf>,
    pub debug_log: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge `other` over `self`: booleans are or-ed, options from `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            no_presence: self.no_presence || other.no_presence,
            title: other.title.clone().or_else(|| self.title.clone()),
            presence_file: other
                .presence_file
                .clone()
                .or_else(|| self.presence_file.clone()),
            debug_log: other.debug_log.clone().or_else(|| self.debug_log.clone()),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }
}

fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return Some(PathBuf::from(appdata).join("braincache"));
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return Some(
                PathBuf::from(home)
                    .join("Library")
                    .join("Application Support")
                    .join("braincache"),
            );
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg).join("braincache"));
        }
        if let Some(home) = std::env::var_os("HOME") {
            return Some(PathBuf::from(home).join(".config").join("braincache"));
        }
    }

    None
}

pub fn global_config_path() -> PathBuf {
    config_dir().map_or_else(local_override_path, |dir| dir.join("config"))
}

/// Default location of the presence record, next to the global config.
pub fn default_presence_path() -> PathBuf {
    config_dir().map_or_else(
        || PathBuf::from(".braincache-presence.json"),
        |dir| dir.join("presence.json"),
    )
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".braincacherc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(line_tokens)
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Split a config line into a flag and its value. The value keeps inner
/// spaces so titles survive a save/load cycle.
fn line_tokens(line: &str) -> Vec<String> {
    match line.split_once(char::is_whitespace) {
        Some((flag, value)) if !flag.contains('=') => {
            vec![flag.to_string(), value.trim().to_string()]
        }
        _ => vec![line.to_string()],
    }
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# braincache defaults (saved with --save)".to_string());
    if flags.no_presence {
        lines.push("--no-presence".to_string());
    }
    if let Some(title) = &flags.title {
        lines.push(format!("--title {title}"));
    }
    if let Some(path) = &flags.presence_file {
        lines.push(format!("--presence-file {}", path.display()));
    }
    if let Some(path) = &flags.debug_log {
        lines.push(format!("--debug-log {}", path.display()));
    }
    if let Some(path) = &flags.log_file {
        lines.push(format!("--log-file {}", path.display()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        if token == "--no-presence" {
            flags.no_presence = true;
        } else if let Some((value, consumed)) = option_value(tokens, i, "--title") {
            flags.title = Some(value.to_string());
            i += consumed;
        } else if let Some((value, consumed)) = option_value(tokens, i, "--presence-file") {
            flags.presence_file = Some(PathBuf::from(value));
            i += consumed;
        } else if let Some((value, consumed)) = option_value(tokens, i, "--debug-log") {
            flags.debug_log = Some(PathBuf::from(value));
            i += consumed;
        } else if let Some((value, consumed)) = option_value(tokens, i, "--log-file") {
            flags.log_file = Some(PathBuf::from(value));
            i += consumed;
        }
        i += 1;
    }
    flags
}

/// Value of `name` at `tokens[i]`, in either `--name value` or
/// `--name=value` form, plus how many extra tokens it used.
fn option_value<'a>(tokens: &'a [String], i: usize, name: &str) -> Option<(&'a str, usize)> {
    let token = tokens[i].as_str();
    if token == name {
        return tokens.get(i + 1).map(|next| (next.as_str(), 1));
    }
    token
        .strip_prefix(name)
        .and_then(|rest| rest.strip_prefix('='))
        .map(|value| (value, 0))
}
