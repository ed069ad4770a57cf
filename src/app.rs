use std::time::Instant;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};

use crate::config::Config;
use crate::engine::{EngineParams, FrameEngine, Snapshot};
use crate::ui::theme::Theme;

/// Application state: the frame engine plus the control flags the outer
/// loop reads. Quit tears the process down; reset makes `main` rebuild a
/// fresh `App` and run again.
pub struct App {
    pub engine: FrameEngine,
    pub snapshot: Snapshot,
    pub theme: Theme,
    pub config: Config,
    pub should_quit: bool,
    pub should_reset: bool,
    pub debug: bool,
}

impl App {
    pub fn new(mut config: Config, debug: bool) -> Result<Self> {
        config.normalize_theme(&Theme::available_themes());
        // Owned, not leaked: Ctrl+R rebuilds the whole App, so a fresh
        // theme is loaded (and the old one dropped) on every reset.
        let theme = Theme::load(&config.theme).unwrap_or_default();

        let params = EngineParams {
            width: config.width,
            player_position: config.player_position,
            fps: config.fps,
            round_size: config.round_size,
            ..EngineParams::default()
        };
        let mut engine = FrameEngine::new(params, theme.glyphs.clone())?;

        // Initial frame so there is a world to draw before the first tick.
        let snapshot = engine.tick(Instant::now());

        Ok(Self {
            engine,
            snapshot,
            theme,
            config,
            should_quit: false,
            should_reset: false,
            debug,
        })
    }

    /// Input boundary: decode a crossterm key event, route control keys,
    /// and feed everything else into the engine as a key label.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        // Press only; Repeat would inflate input, Release is not typing.
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('r') => {
                    self.should_reset = true;
                    return;
                }
                _ => {}
            }
        }

        if let Some(label) = key_label(key.code) {
            self.engine.key_event(&label, now);
        }

        // Esc both counts as a keystroke and toggles the pause flag.
        if key.code == KeyCode::Esc {
            self.engine.toggle_pause();
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        if self.debug {
            self.engine.debug(format!(
                "velocity={:.4} keys={}",
                self.engine.velocity(),
                self.engine.keys_in_round()
            ));
        }
        self.snapshot = self.engine.tick(now);
    }
}

/// Decode a key code into the engine's label vocabulary: printable chars
/// as themselves, special keys as the symbolic names `engine::keys`
/// documents. Keys with no typing meaning (arrows, paging) decode to
/// `None` and are dropped, deterministically.
pub fn key_label(code: KeyCode) -> Option<String> {
    match code {
        KeyCode::Char(' ') => Some("space".to_string()),
        KeyCode::Char(ch) => Some(ch.to_string()),
        KeyCode::Enter => Some("enter".to_string()),
        KeyCode::Tab | KeyCode::BackTab => Some("tab".to_string()),
        KeyCode::Backspace => Some("backspace".to_string()),
        KeyCode::Delete => Some("delete".to_string()),
        KeyCode::Esc => Some("esc".to_string()),
        KeyCode::CapsLock => Some("caps_lock".to_string()),
        KeyCode::Menu => Some("menu".to_string()),
        KeyCode::F(n) => Some(format!("f{n}")),
        KeyCode::Modifier(m) => modifier_label(m).map(str::to_string),
        _ => None,
    }
}

fn modifier_label(code: ModifierKeyCode) -> Option<&'static str> {
    match code {
        ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => Some("shift"),
        ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => Some("ctrl"),
        ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => Some("alt"),
        ModifierKeyCode::LeftSuper | ModifierKeyCode::RightSuper => Some("cmd"),
        ModifierKeyCode::LeftMeta | ModifierKeyCode::RightMeta => Some("cmd"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_label_printable() {
        assert_eq!(key_label(KeyCode::Char('a')).as_deref(), Some("a"));
        assert_eq!(key_label(KeyCode::Char('!')).as_deref(), Some("!"));
    }

    #[test]
    fn test_key_label_symbolic() {
        assert_eq!(key_label(KeyCode::Char(' ')).as_deref(), Some("space"));
        assert_eq!(key_label(KeyCode::Enter).as_deref(), Some("enter"));
        assert_eq!(key_label(KeyCode::Backspace).as_deref(), Some("backspace"));
        assert_eq!(key_label(KeyCode::F(5)).as_deref(), Some("f5"));
        assert_eq!(
            key_label(KeyCode::Modifier(ModifierKeyCode::LeftShift)).as_deref(),
            Some("shift")
        );
    }

    #[test]
    fn test_key_label_drops_navigation_keys() {
        assert_eq!(key_label(KeyCode::Up), None);
        assert_eq!(key_label(KeyCode::PageDown), None);
        assert_eq!(key_label(KeyCode::Home), None);
    }

    #[test]
    fn test_ctrl_c_quits_without_recording() {
        let mut app = App::new(Config::default(), false).unwrap();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        app.handle_key(key, Instant::now());
        assert!(app.should_quit);
        assert_eq!(app.engine.keys_in_round(), 0);
    }

    #[test]
    fn test_ctrl_r_requests_reset() {
        let mut app = App::new(Config::default(), false).unwrap();
        let key = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
        app.handle_key(key, Instant::now());
        assert!(app.should_reset);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_esc_toggles_pause_and_still_counts() {
        let mut app = App::new(Config::default(), false).unwrap();
        let now = Instant::now();
        app.handle_key(press(KeyCode::Esc), now);
        assert!(app.engine.is_paused());
        assert_eq!(app.engine.keys_in_round(), 1);
        app.handle_key(press(KeyCode::Esc), now);
        assert!(!app.engine.is_paused());
        assert_eq!(app.engine.keys_in_round(), 2);
    }

    #[test]
    fn test_repeat_and_release_events_do_not_count_as_input() {
        let mut app = App::new(Config::default(), false).unwrap();
        let now = Instant::now();
        let repeat =
            KeyEvent::new_with_kind(KeyCode::Char('a'), KeyModifiers::NONE, KeyEventKind::Repeat);
        let release =
            KeyEvent::new_with_kind(KeyCode::Char('a'), KeyModifiers::NONE, KeyEventKind::Release);
        app.handle_key(repeat, now);
        app.handle_key(release, now);
        assert_eq!(app.engine.keys_in_round(), 0);
        assert!(app.engine.is_idle());
    }

    #[test]
    fn test_typing_reaches_engine() {
        let mut app = App::new(Config::default(), false).unwrap();
        let now = Instant::now();
        for ch in "hello".chars() {
            app.handle_key(press(KeyCode::Char(ch)), now);
        }
        assert_eq!(app.engine.keys_in_round(), 5);
        assert!(!app.engine.is_idle());
    }
}
