use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;
use cross_xdg::BaseDirs;
use nu_ansi_term::Color;
use crate::theme::catppuccin::Mocha;

/// Environment variable pointing at an alternative config file.
pub const CONFIG_ENV: &str = "BEFUNGE_CONFIG";

#[derive(Debug, Clone, PartialEq)]
pub struct Colors {
    pub error: Color,
    pub caret: Color,
    pub source: Color,
    pub location: Color,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            error: Mocha::RED,
            caret: Mocha::YELLOW,
            source: Mocha::OVERLAY1,
            location: Mocha::PEACH,
        }
    }
}

/// Defaults for `befunge run`, overridden by environment variables and flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunDefaults {
    pub max_steps: Option<u64>,
    pub echo_source: bool,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub run: RunDefaults,
    pub colors: Colors,
}

static SETTINGS: OnceLock<Settings> = OnceLock::new();

pub fn settings() -> &'static Settings {
    SETTINGS.get_or_init(|| load().unwrap_or_default())
}

/// Location of the config file: `$BEFUNGE_CONFIG`, else `befunge.toml` in the
/// XDG config home.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }

    // On Linux: resolves to /home/<user>/.config
    // On Windows: resolves to C:\Users\<user>\.config
    // On macOS: resolves to /Users/<user>/.config
    let base_dirs = BaseDirs::new().ok()?;
    Some(base_dirs.config_home().join("befunge.toml"))
}

fn load() -> Option<Settings> {
    let content = fs::read_to_string(config_path()?).ok()?;
    Some(parse(&content))
}

/// Parse the config file. Unknown sections, unknown keys and bad values are
/// ignored and leave the default in place.
pub fn parse(content: &str) -> Settings {
    // Very small hand-rolled parser: [section] headers and key = value pairs.
    let mut section = String::new();
    let mut map: HashMap<(String, String), String> = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue; }
        if line.starts_with('[') && line.ends_with(']') {
            section = line[1..line.len()-1].trim().to_string();
            continue;
        }
        if let Some(eq) = line.find('=') {
            let key = line[..eq].trim().to_string();
            let val_raw = line[eq+1..].trim();
            // Accept quoted or unquoted
            let val = if val_raw.starts_with('"') && val_raw.ends_with('"') && val_raw.len() >= 2 {
                val_raw[1..val_raw.len()-1].to_string()
            } else { val_raw.to_string() };
            map.insert((section.clone(), key), val);
        }
    }

    let get = |section: &str, key: &str| map.get(&(section.to_string(), key.to_string()));

    let mut cfg = Settings::default();

    if let Some(v) = get("run", "max_steps").and_then(|s| s.parse().ok()) { cfg.run.max_steps = Some(v); }
    if let Some(v) = get("run", "echo_source").and_then(|s| s.parse().ok()) { cfg.run.echo_source = v; }
    if let Some(v) = get("run", "seed").and_then(|s| s.parse().ok()) { cfg.run.seed = Some(v); }

    macro_rules! set {
        ($field:ident, $key:literal) => {
            if let Some(v) = get("colors", $key).and_then(|s| parse_color(s)) { cfg.colors.$field = v; }
        };
    }

    set!(error, "error");
    set!(caret, "caret");
    set!(source, "source");
    set!(location, "location");

    cfg
}

fn parse_color(value: &str) -> Option<Color> {
    let s = value.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Some(Color::Rgb(r, g, b));
            }
        }
    } else {
        // Try named colors matching nu_ansi_term::Color variants
        let name = s.to_ascii_lowercase();
        return Some(match name.as_str() {
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "purple" | "magenta" => Color::Purple,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            "gray" | "grey" | "darkgray" | "dark_gray" => Color::DarkGray,
            "lightred" | "light_red" => Color::LightRed,
            "lightgreen" | "light_green" => Color::LightGreen,
            "lightblue" | "light_blue" => Color::LightBlue,
            "lightcyan" | "light_cyan" => Color::LightCyan,
            _ => return None,
        });
    }
    None
}
