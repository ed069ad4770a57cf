use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::engine::Snapshot;
use crate::ui::theme::Theme;

/// Status readout under the world: odometer, latest WPM sample, progress
/// through the current round, last key, and the optional debug line.
pub struct Hud<'a> {
    snapshot: &'a Snapshot,
    theme: &'a Theme,
}

impl<'a> Hud<'a> {
    pub fn new(snapshot: &'a Snapshot, theme: &'a Theme) -> Self {
        Self { snapshot, theme }
    }
}

impl Widget for Hud<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let colors = &self.theme.colors;
        let snap = self.snapshot;

        let mut spans = vec![
            Span::styled(
                format!(" {:.2}km ", snap.total_km),
                Style::default()
                    .fg(colors.header_fg())
                    .bg(colors.header_bg())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {:.2}wpm ", snap.current_wpm),
                Style::default().fg(colors.accent()),
            ),
            Span::styled(
                format!(" {}/{} ", snap.keys_in_round, snap.round_size),
                Style::default().fg(colors.fg()),
            ),
        ];

        if let Some(ref glyph) = snap.last_key_glyph {
            spans.push(Span::styled(
                format!(" [{glyph}] "),
                Style::default().fg(colors.player()),
            ));
        }

        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(colors.bg()))
            .render(Rect { height: 1, ..area }, buf);

        if area.height > 1 {
            if let Some(ref debug) = snap.debug_text {
                let line = Paragraph::new(Line::from(Span::styled(
                    format!(" DEBUG: {debug}"),
                    Style::default().fg(colors.paused()),
                )));
                line.render(
                    Rect {
                        y: area.y + 1,
                        height: 1,
                        ..area
                    },
                    buf,
                );
            }
        }
    }
}
