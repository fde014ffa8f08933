use std::str::FromStr;

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("Unknown key \"{0}\"")]
    UnknownKey(String),

    #[error("Unknown modifier \"{0}\"")]
    UnknownModifier(String),

    #[error("Unknown action \"{0}\", expected one of start, next, clear, help, quit")]
    UnknownAction(String),

    #[error("Expected ACTION=KEY[,KEY...], but got \"{0}\"")]
    InvalidBinding(String),
}

/// A single key combination, e.g. `ctrl+c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    code: KeyCode,
    modifiers: KeyModifiers,
}

impl KeyPress {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Shift is part of the character for printable keys (`?` arrives as shift+`?` on most
    /// terminals), so it's not compared for those.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if self.code != event.code {
            return false;
        }

        match self.code {
            KeyCode::Char(_) => {
                self.modifiers.difference(KeyModifiers::SHIFT)
                    == event.modifiers.difference(KeyModifiers::SHIFT)
            }
            _ => self.modifiers == event.modifiers,
        }
    }
}

impl FromStr for KeyPress {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // A lone space or plus would be eaten by the split below
        if s == " " || s == "+" {
            let c = s.chars().next().unwrap_or(' ');
            return Ok(Self::new(KeyCode::Char(c), KeyModifiers::NONE));
        }

        let mut parts: Vec<&str> = s.split('+').collect();
        let key = parts.pop().unwrap_or_default();

        let mut modifiers = KeyModifiers::NONE;
        for m in parts {
            modifiers |= match m.to_ascii_lowercase().as_str() {
                "ctrl" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                _ => return Err(KeyError::UnknownModifier(m.to_string())),
            };
        }

        let code = match key.to_ascii_lowercase().as_str() {
            "esc" => KeyCode::Esc,
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "space" => KeyCode::Char(' '),
            "backspace" => KeyCode::Backspace,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return Err(KeyError::UnknownKey(key.to_string())),
                }
            }
        };

        Ok(Self::new(code, modifiers))
    }
}

/// A set of keys bound to one action, plus how the action is shown in the help view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help_key: String,
    help_desc: String,
}

impl Binding {
    /// Build a binding from key strings such as `"q"`, `"esc"` or `"ctrl+c"`.
    pub fn new(keys: &[&str], help_key: &str, help_desc: &str) -> Result<Self, KeyError> {
        let keys = keys
            .iter()
            .map(|k| k.parse())
            .collect::<Result<Vec<KeyPress>, _>>()?;

        Ok(Self {
            keys,
            help_key: help_key.to_string(),
            help_desc: help_desc.to_string(),
        })
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.keys.iter().any(|k| k.matches(event))
    }

    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    pub fn help_key(&self) -> &str {
        &self.help_key
    }

    pub fn help_desc(&self) -> &str {
        &self.help_desc
    }
}

/// Every key binding of the application.
///
/// Built once and handed to the model, which owns it for the rest of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    pub start: Binding,
    pub next: Binding,
    pub clear: Binding,
    pub help: Binding,
    pub quit: Binding,
}

impl KeyMap {
    /// Replace the keys of one action from an entry such as `next=enter` or `quit=q,ctrl+d`.
    ///
    /// The help text shows the first key of the new set. On error the map is left untouched.
    pub fn rebind(&mut self, entry: &str) -> Result<(), KeyError> {
        let Some((action, keys)) = entry.split_once('=') else {
            return Err(KeyError::InvalidBinding(entry.to_string()));
        };

        let keys: Vec<&str> = keys.split(',').map(str::trim).collect();
        let Some(&first) = keys.first().filter(|k| !k.is_empty()) else {
            return Err(KeyError::InvalidBinding(entry.to_string()));
        };

        let binding = match action.trim() {
            "start" => &mut self.start,
            "next" => &mut self.next,
            "clear" => &mut self.clear,
            "help" => &mut self.help,
            "quit" => &mut self.quit,
            other => return Err(KeyError::UnknownAction(other.to_string())),
        };

        let help_key = if first.eq_ignore_ascii_case("space") {
            "[Space]"
        } else {
            first
        };
        *binding = Binding::new(&keys, help_key, &binding.help_desc)?;

        Ok(())
    }

    /// Bindings shown in the one-line help.
    pub fn short_help(&self) -> Vec<&Binding> {
        vec![&self.help, &self.quit]
    }

    /// Bindings shown in the expanded help, one inner `Vec` per column.
    pub fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![&self.start, &self.next, &self.clear],
            vec![&self.help, &self.quit],
        ]
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        fn binding(keys: &[KeyPress], help_key: &str, help_desc: &str) -> Binding {
            Binding {
                keys: keys.to_vec(),
                help_key: help_key.to_string(),
                help_desc: help_desc.to_string(),
            }
        }

        const fn plain(c: char) -> KeyPress {
            KeyPress::new(KeyCode::Char(c), KeyModifiers::NONE)
        }

        Self {
            start: binding(&[plain(' ')], "[Space]", "start/stop animation"),
            next: binding(&[plain('n')], "n", "next generation"),
            clear: binding(&[plain('c')], "c", "clear grid"),
            help: binding(&[plain('?')], "?", "toggle help menu"),
            quit: binding(
                &[
                    plain('q'),
                    KeyPress::new(KeyCode::Esc, KeyModifiers::NONE),
                    KeyPress::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                ],
                "q",
                "quit",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn parse_keys() {
        assert_eq!(
            "ctrl+c".parse::<KeyPress>(),
            Ok(KeyPress::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
        );
        assert_eq!(
            "esc".parse::<KeyPress>(),
            Ok(KeyPress::new(KeyCode::Esc, KeyModifiers::NONE))
        );
        assert_eq!(
            " ".parse::<KeyPress>(),
            Ok(KeyPress::new(KeyCode::Char(' '), KeyModifiers::NONE))
        );
        assert_eq!(
            "space".parse::<KeyPress>(),
            Ok(KeyPress::new(KeyCode::Char(' '), KeyModifiers::NONE))
        );
        assert_eq!(
            "?".parse::<KeyPress>(),
            Ok(KeyPress::new(KeyCode::Char('?'), KeyModifiers::NONE))
        );
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            "hyper+c".parse::<KeyPress>(),
            Err(KeyError::UnknownModifier("hyper".into()))
        );
        assert_eq!(
            "escape".parse::<KeyPress>(),
            Err(KeyError::UnknownKey("escape".into()))
        );
        assert!(Binding::new(&["q", "nope"], "q", "quit").is_err());
    }

    #[test]
    fn shift_is_ignored_for_characters() {
        let help: KeyPress = "?".parse().unwrap();

        assert!(help.matches(&key(KeyCode::Char('?'), KeyModifiers::SHIFT)));
        assert!(help.matches(&key(KeyCode::Char('?'), KeyModifiers::NONE)));
        assert!(!help.matches(&key(KeyCode::Char('?'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn modifiers_must_match() {
        let quit = KeyMap::default().quit;

        assert!(quit.matches(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(quit.matches(&key(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(quit.matches(&key(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(!quit.matches(&key(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!quit.matches(&key(KeyCode::Esc, KeyModifiers::ALT)));
    }

    #[test]
    fn default_bindings_parse() {
        let keys = KeyMap::default();

        for binding in keys.full_help().into_iter().flatten() {
            assert!(!binding.keys().is_empty(), "{} has no keys", binding.help_desc());
        }

        assert_eq!(keys.quit.keys().len(), 3);
        assert_eq!(keys.short_help().len(), 2);
    }

    #[test]
    fn rebind_action() {
        let mut keys = KeyMap::default();

        keys.rebind("next=enter,ctrl+n").unwrap();

        assert!(keys.next.matches(&key(KeyCode::Enter, KeyModifiers::NONE)));
        assert!(keys.next.matches(&key(KeyCode::Char('n'), KeyModifiers::CONTROL)));
        assert!(!keys.next.matches(&key(KeyCode::Char('n'), KeyModifiers::NONE)));
        assert_eq!(keys.next.help_key(), "enter");
        assert_eq!(keys.next.help_desc(), "next generation");
    }

    #[test]
    fn rebind_errors_leave_map_untouched() {
        let mut keys = KeyMap::default();
        let before = keys.clone();

        assert_eq!(
            keys.rebind("jump=j"),
            Err(KeyError::UnknownAction("jump".into()))
        );
        assert_eq!(
            keys.rebind("next"),
            Err(KeyError::InvalidBinding("next".into()))
        );
        assert_eq!(
            keys.rebind("next="),
            Err(KeyError::InvalidBinding("next=".into()))
        );
        assert!(keys.rebind("quit=q,hyper+x").is_err());
        assert_eq!(keys, before);
    }
}
