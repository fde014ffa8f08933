use crate::keymap::Binding;
use crate::keymap::KeyMap;

const SHORT_SEPARATOR: &str = " • ";
const COLUMN_SEPARATOR: &str = "    ";
const ELLIPSIS: char = '…';

/// Renders the key bindings, either as a single line or as columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Maximum line width in columns. `0` means unlimited.
    pub width: usize,

    /// Show the full help instead of the one-line summary
    pub show_all: bool,
}

impl Help {
    pub fn toggle(&mut self) {
        self.show_all = !self.show_all;
    }

    pub fn view(&self, keys: &KeyMap) -> String {
        if self.show_all {
            self.full_view(&keys.full_help())
        } else {
            self.short_view(&keys.short_help())
        }
    }

    fn short_view(&self, bindings: &[&Binding]) -> String {
        let line = bindings
            .iter()
            .map(|b| format!("{} {}", b.help_key(), b.help_desc()))
            .collect::<Vec<_>>()
            .join(SHORT_SEPARATOR);

        self.truncate(line)
    }

    fn full_view(&self, columns: &[Vec<&Binding>]) -> String {
        let columns: Vec<Vec<String>> = columns
            .iter()
            .map(|column| {
                let key_w = column
                    .iter()
                    .map(|b| b.help_key().chars().count())
                    .max()
                    .unwrap_or(0);
                let desc_w = column
                    .iter()
                    .map(|b| b.help_desc().chars().count())
                    .max()
                    .unwrap_or(0);

                column
                    .iter()
                    .map(|b| format!("{:key_w$} {:desc_w$}", b.help_key(), b.help_desc()))
                    .collect()
            })
            .collect();

        let rows = columns.iter().map(Vec::len).max().unwrap_or(0);

        (0..rows)
            .map(|r| {
                let line = columns
                    .iter()
                    .map(|column| match column.get(r) {
                        Some(entry) => entry.clone(),
                        None => {
                            let w = column.first().map_or(0, |e| e.chars().count());
                            " ".repeat(w)
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(COLUMN_SEPARATOR);

                self.truncate(line.trim_end().to_string())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn truncate(&self, line: String) -> String {
        if self.width == 0 || line.chars().count() <= self.width {
            return line;
        }

        let mut s: String = line.chars().take(self.width.saturating_sub(1)).collect();
        s.push(ELLIPSIS);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_help() {
        let help = Help::default();

        assert_eq!(help.view(&KeyMap::default()), "? toggle help menu • q quit");
    }

    #[test]
    fn full_help() {
        let mut help = Help::default();
        help.toggle();

        insta::assert_snapshot!(help.view(&KeyMap::default()), @r"
        [Space] start/stop animation    ? toggle help menu
        n       next generation         q quit
        c       clear grid
        ");
    }

    #[test]
    fn truncates_to_width() {
        let help = Help {
            width: 10,
            show_all: false,
        };

        let view = help.view(&KeyMap::default());

        assert_eq!(view, "? toggle …");
        assert_eq!(view.chars().count(), 10);
    }

    #[test]
    fn toggle_twice_is_short_again() {
        let mut help = Help::default();
        help.toggle();
        help.toggle();

        assert!(!help.show_all);
    }
}
