//! Simple TOML parser for board configuration
//!
//! Handles only the subset the board file uses.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - `[timing]`, `[button.N]` and `[led.N]` section headers
//! - Comments (# ...)
//!
//! Button and LED sections must be numbered in order starting at 0.
//!
//! ```toml
//! [timing]
//! button_period_ms = 10
//!
//! [button.0]
//! pin = "^!gpio2"
//!
//! [led.0]
//! pin = "gpio25"
//! ```

use heapless::Vec;

use super::types::{BoardConfig, ConfigError, PinConfig};

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Timing,
    Button(usize),
    Led(usize),
}

/// Parse TOML configuration into a `BoardConfig`
///
/// Keys not given keep their defaults. The result is not validated; call
/// [`BoardConfig::validate`] before use.
pub fn parse_config(input: &str) -> Result<BoardConfig, ConfigError> {
    let mut config = BoardConfig::new();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            match section {
                Section::Button(index) => open_entry(&mut config.buttons, index)?,
                Section::Led(index) => open_entry(&mut config.leds, index)?,
                Section::Root | Section::Timing => {}
            }
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config)?;
        }
    }

    Ok(config)
}

/// Parse section header like "timing", "button.0" or "led.3"
fn parse_section_header(header: &str) -> Result<Section, ConfigError> {
    let header = header.trim();

    if header == "timing" {
        return Ok(Section::Timing);
    }

    let (kind, index) = header.split_once('.').ok_or(ConfigError::InvalidSection)?;
    let index: usize = index
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidSection)?;

    match kind.trim() {
        "button" => Ok(Section::Button(index)),
        "led" => Ok(Section::Led(index)),
        _ => Err(ConfigError::InvalidSection),
    }
}

/// Append a default pin for a numbered section
fn open_entry<const N: usize>(pins: &mut Vec<PinConfig, N>, index: usize) -> Result<(), ConfigError> {
    if index != pins.len() {
        return Err(ConfigError::InvalidSection);
    }
    pins.push(PinConfig::default())
        .map_err(|_| ConfigError::TooManyItems)
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    // Remove inline comments, unless the # sits inside a string
    let value = match value.find('#') {
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut BoardConfig,
) -> Result<(), ConfigError> {
    match section {
        Section::Root => Err(ConfigError::InvalidKey),

        Section::Timing => {
            let timing = &mut config.timing;
            let slot = match key {
                "heartbeat_ms" => &mut timing.heartbeat_ms,
                "button_period_ms" => &mut timing.button_period_ms,
                "debounce_ms" => &mut timing.debounce_ms,
                "stuck_timeout_ms" => &mut timing.stuck_timeout_ms,
                _ => return Err(ConfigError::InvalidKey),
            };
            *slot = parse_int(value)?;
            Ok(())
        }

        Section::Button(index) => apply_pin(config.buttons.get_mut(index), key, value),
        Section::Led(index) => apply_pin(config.leds.get_mut(index), key, value),
    }
}

fn apply_pin(entry: Option<&mut PinConfig>, key: &str, value: &str) -> Result<(), ConfigError> {
    let entry = entry.ok_or(ConfigError::InvalidSection)?;
    match key {
        // Modifiers in the pin string add to flags set by earlier keys
        "pin" => {
            let parsed = parse_pin(value)?;
            entry.pin = parsed.pin;
            entry.inverted |= parsed.inverted;
            entry.pull_up |= parsed.pull_up;
        }
        "inverted" => entry.inverted = parse_bool(value)?,
        "pull_up" => entry.pull_up = parse_bool(value)?,
        _ => return Err(ConfigError::InvalidKey),
    }
    Ok(())
}

fn parse_string(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::InvalidValue),
    }
}

/// Parse a pin string like "gpio11", "!gpio12" (active-low) or "^gpio4"
/// (pull-up); modifiers may be combined
pub fn parse_pin(value: &str) -> Result<PinConfig, ConfigError> {
    let mut s = parse_string(value);
    let mut inverted = false;
    let mut pull_up = false;

    loop {
        if let Some(rest) = s.strip_prefix('!') {
            inverted = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('^') {
            pull_up = true;
            s = rest;
        } else {
            break;
        }
    }

    let pin = s
        .strip_prefix("gpio")
        .ok_or(ConfigError::InvalidPin)?
        .parse()
        .map_err(|_| ConfigError::InvalidPin)?;

    Ok(PinConfig {
        pin,
        inverted,
        pull_up,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOARD: &str = r#"
# Demo board
[timing]
heartbeat_ms = 1
button_period_ms = 5   # faster sampling
debounce_ms = 300

[button.0]
pin = "^!gpio2"

[button.1]
pin = "gpio3"
pull_up = true

[led.0]
pin = "gpio25"
"#;

    #[test]
    fn test_parse_board() {
        let config = parse_config(BOARD).unwrap();
        assert_eq!(config.timing.button_period_ms, 5);
        assert_eq!(config.timing.debounce_ms, 300);
        assert_eq!(config.timing.stuck_timeout_ms, 30000);

        assert_eq!(config.buttons.len(), 2);
        assert_eq!(config.buttons[0], PinConfig::active_low_pullup(2));
        assert_eq!(config.buttons[1].pin, 3);
        assert!(config.buttons[1].pull_up);
        assert!(!config.buttons[1].inverted);

        assert_eq!(config.leds.len(), 1);
        assert_eq!(config.leds[0], PinConfig::new(25));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_flags_before_pin_are_kept() {
        let config = parse_config("[button.0]\npull_up = true\ninverted = true\npin = \"gpio3\"").unwrap();
        assert_eq!(config.buttons[0], PinConfig::active_low_pullup(3));

        let config = parse_config("[button.0]\npull_up = true\npin = \"!gpio4\"").unwrap();
        assert_eq!(config.buttons[0].pin, 4);
        assert!(config.buttons[0].pull_up);
        assert!(config.buttons[0].inverted);
    }

    #[test]
    fn test_empty_input_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), BoardConfig::new());
        assert_eq!(parse_config("# nothing\n\n").unwrap(), BoardConfig::new());
    }

    #[test]
    fn test_parse_pin() {
        let pin = parse_pin("gpio11").unwrap();
        assert_eq!(pin.pin, 11);
        assert!(!pin.inverted);
        assert!(!pin.pull_up);

        let pin = parse_pin("!gpio12").unwrap();
        assert_eq!(pin.pin, 12);
        assert!(pin.inverted);

        let pin = parse_pin("^gpio4").unwrap();
        assert_eq!(pin.pin, 4);
        assert!(pin.pull_up);

        let pin = parse_pin("\"^!gpio5\"").unwrap();
        assert_eq!(pin.pin, 5);
        assert!(pin.inverted);
        assert!(pin.pull_up);

        assert_eq!(parse_pin("pin5"), Err(ConfigError::InvalidPin));
        assert_eq!(parse_pin("gpio"), Err(ConfigError::InvalidPin));
        assert_eq!(parse_pin("gpio300"), Err(ConfigError::InvalidPin));
    }

    #[test]
    fn test_parse_section_header() {
        assert_eq!(parse_section_header("timing"), Ok(Section::Timing));
        assert_eq!(parse_section_header("button.3"), Ok(Section::Button(3)));
        assert_eq!(parse_section_header(" led.0 "), Ok(Section::Led(0)));
        assert_eq!(parse_section_header("display"), Err(ConfigError::InvalidSection));
        assert_eq!(parse_section_header("button.x"), Err(ConfigError::InvalidSection));
        assert_eq!(parse_section_header("motor.1"), Err(ConfigError::InvalidSection));
    }

    #[test]
    fn test_sections_must_be_in_order() {
        let input = "[button.1]\npin = \"gpio1\"\n";
        assert_eq!(parse_config(input), Err(ConfigError::InvalidSection));
    }

    #[test]
    fn test_too_many_leds() {
        let mut input = std::string::String::new();
        for i in 0..5 {
            input.push_str(&format!("[led.{}]\npin = \"gpio{}\"\n", i, i));
        }
        assert_eq!(parse_config(&input), Err(ConfigError::TooManyItems));
    }

    #[test]
    fn test_bad_keys_and_values() {
        assert_eq!(parse_config("debounce_ms = 5"), Err(ConfigError::InvalidKey));
        assert_eq!(
            parse_config("[timing]\nspeed = 5"),
            Err(ConfigError::InvalidKey)
        );
        assert_eq!(
            parse_config("[timing]\ndebounce_ms = soon"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(
            parse_config("[button.0]\npull_up = maybe"),
            Err(ConfigError::InvalidValue)
        );
    }

    #[test]
    fn test_inline_comment_inside_string() {
        assert_eq!(parse_key_value("name = \"a#b\""), Some(("name", "\"a#b\"")));
        assert_eq!(parse_key_value("pin = gpio3 # led"), Some(("pin", "gpio3")));
        assert_eq!(parse_key_value("pin ="), None);
    }
}
