use anyhow::{bail, Context, Result};
use std::env;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

const PROJECT_CONFIG_NAME: &str = ".chunksumrc";

/// Configuration file handler for chunksum
///
/// The file is INI-like. Only the root-level `defaults` key is recognized; its
/// value is split shell-style and inserted in front of the command line flags.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub defaults: Option<String>,
}

impl ConfigFile {
    /// Find project-level .chunksumrc by walking up from `start`
    pub fn find_project_config_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let config_path = current.join(PROJECT_CONFIG_NAME);
            if config_path.is_file() {
                return Some(config_path);
            }
            if !current.pop() {
                // Reached filesystem root
                break;
            }
        }
        None
    }

    /// Find project-level .chunksumrc by walking up from the current directory
    pub fn find_project_config() -> Option<PathBuf> {
        let current = env::current_dir().ok()?;
        Self::find_project_config_from(&current)
    }

    /// Get list of user config file locations in order of preference
    pub fn get_user_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if cfg!(windows) {
            // 1. %APPDATA%\chunksum\config.ini
            // 2. %USERPROFILE%\.chunksumrc
            if let Ok(appdata) = env::var("APPDATA") {
                paths.push(PathBuf::from(appdata).join("chunksum").join("config.ini"));
            }
            if let Ok(userprofile) = env::var("USERPROFILE") {
                paths.push(PathBuf::from(userprofile).join(PROJECT_CONFIG_NAME));
            }
        } else {
            // 1. $XDG_CONFIG_HOME/chunksum/config.ini (falls back to ~/.config)
            // 2. ~/.chunksumrc
            let xdg_config = env::var("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    env::var("HOME")
                        .map(|h| PathBuf::from(h).join(".config"))
                        .unwrap_or_else(|_| PathBuf::from(".config"))
                });

            paths.push(xdg_config.join("chunksum").join("config.ini"));

            if let Ok(home) = env::var("HOME") {
                paths.push(PathBuf::from(home).join(PROJECT_CONFIG_NAME));
            }
        }

        paths
    }

    /// Load configuration with precedence: project > user > built-in defaults
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        // First existing user config file has the lowest precedence
        if let Some(path) = Self::get_user_config_paths()
            .into_iter()
            .find(|p| p.is_file())
        {
            config = Self::merge_configs(config, Self::load_from_path(&path)?);
        }

        if let Some(project_path) = Self::find_project_config() {
            config = Self::merge_configs(config, Self::load_from_path(&project_path)?);
        }

        Ok(config)
    }

    /// Load configuration with optional custom config file path
    pub fn load_with_custom_path(custom_path: Option<&str>) -> Result<Self> {
        match custom_path {
            Some(path) => Self::load_from_path(Path::new(path)),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Ok(Self::parse_ini_content(&content))
    }

    /// Parse INI content from string
    pub fn parse_ini_content(content: &str) -> Self {
        let mut defaults = None;
        let mut in_root_section = true;

        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                // Sections are reserved; keys inside them are ignored
                in_root_section = false;
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                if in_root_section && key.trim() == "defaults" {
                    defaults = Some(value.trim().to_string());
                }
            }
        }

        Self { defaults }
    }

    /// Merge two configuration objects, with the second taking precedence
    fn merge_configs(base: Self, overlay: Self) -> Self {
        Self {
            defaults: overlay.defaults.or(base.defaults),
        }
    }

    /// Insert configured default flags right after the program name
    pub fn process_args(&self, args: Vec<String>) -> Result<Vec<String>> {
        let Some(defaults) = &self.defaults else {
            return Ok(args);
        };

        let default_args = shell_words::split(defaults)
            .with_context(|| "Invalid defaults: failed to parse arguments".to_string())?;
        validate_default_args(&default_args)?;

        let mut args = args.into_iter();
        let mut result = Vec::with_capacity(default_args.len() + args.len());
        result.extend(args.next());
        result.extend(default_args);
        result.extend(args);

        Ok(result)
    }

    /// Describe configuration sources and the active defaults
    pub fn describe(custom_path: Option<&str>) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Configuration precedence: CLI > project {} > user config > defaults\n",
            PROJECT_CONFIG_NAME
        );

        match Self::load_with_custom_path(custom_path) {
            Ok(config) => match &config.defaults {
                Some(defaults) => {
                    let _ = writeln!(out, "Active defaults:\n  defaults = {}", defaults);
                }
                None => {
                    let _ = writeln!(out, "No defaults configured.");
                }
            },
            Err(e) => {
                let _ = writeln!(out, "Error loading configuration: {:#}", e);
            }
        }

        let _ = writeln!(out, "\nConfiguration search locations (in precedence order):");
        if let Some(path) = custom_path {
            let _ = writeln!(out, "  Custom: {} {}", path, found_marker(Path::new(path)));
        } else {
            match Self::find_project_config() {
                Some(path) => {
                    let _ = writeln!(out, "  1. Project: {} (found)", path.display());
                }
                None => {
                    let _ = writeln!(
                        out,
                        "  1. Project: {} (searched up directory tree, not found)",
                        PROJECT_CONFIG_NAME
                    );
                }
            }
            for (i, path) in Self::get_user_config_paths().iter().enumerate() {
                let _ = writeln!(out, "  {}. User: {} {}", i + 2, path.display(), found_marker(path));
            }
        }

        let _ = writeln!(out, "\nExample configuration file ({}):", PROJECT_CONFIG_NAME);
        let _ = writeln!(out, "# Flags applied to every chunksum command");
        let _ = write!(out, "defaults = --stats -v");

        out
    }

    /// Show configuration information with precedence details
    pub fn show_config(custom_path: Option<&str>) {
        println!("{}", Self::describe(custom_path));
    }
}

/// Long options whose value is the following argument
const VALUE_OPTIONS: &[&str] = &["--output-format", "--config-file"];

/// Whether `arg` is an option that consumes the next argument as its value
fn takes_separate_value(arg: &str) -> bool {
    if VALUE_OPTIONS.contains(&arg) {
        return true;
    }
    // A short cluster such as `-sF` ends with the option that takes the value
    !arg.starts_with("--") && arg.starts_with('-') && arg.ends_with('F')
}

/// Defaults may only carry flags and their values; FILE and WORKERS always
/// come from the command line.
fn validate_default_args(args: &[String]) -> Result<()> {
    let mut expects_value = false;
    for arg in args {
        if expects_value {
            expects_value = false;
            continue;
        }
        let is_flag = arg.len() > 1 && arg.starts_with('-') && arg.parse::<i64>().is_err();
        if !is_flag || arg == "--" {
            bail!(
                "Invalid defaults: '{}' is not an option; FILE and WORKERS must be given on the command line",
                arg
            );
        }
        expects_value = takes_separate_value(arg);
    }
    Ok(())
}

fn found_marker(path: &Path) -> &'static str {
    if path.is_file() {
        "(found)"
    } else {
        "(not found)"
    }
}
