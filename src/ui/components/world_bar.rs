use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::Snapshot;
use crate::ui::theme::Theme;

/// The scrolling world row. While paused the world is suppressed and a
/// resume hint shown instead; keystroke accounting continues underneath.
pub struct WorldBar<'a> {
    snapshot: &'a Snapshot,
    theme: &'a Theme,
}

impl<'a> WorldBar<'a> {
    pub fn new(snapshot: &'a Snapshot, theme: &'a Theme) -> Self {
        Self { snapshot, theme }
    }

    fn glyph_style(&self, glyph: &str) -> Style {
        let colors = &self.theme.colors;
        let glyphs = &self.theme.glyphs;
        if glyph == glyphs.player {
            Style::default()
                .fg(colors.player())
                .add_modifier(Modifier::BOLD)
        } else if glyph == glyphs.trail {
            Style::default().fg(colors.trail())
        } else if glyph == glyphs.tree {
            Style::default().fg(colors.tree())
        } else if glyph == glyphs.cloud {
            Style::default().fg(colors.cloud())
        } else {
            Style::default().fg(colors.rail())
        }
    }
}

impl Widget for WorldBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" railbar ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if self.snapshot.paused {
            let hint = Paragraph::new(Line::from(Span::styled(
                " paused, Esc to resume ",
                Style::default()
                    .fg(colors.paused())
                    .add_modifier(Modifier::BOLD),
            )));
            hint.render(inner, buf);
            return;
        }

        let spans: Vec<Span> = self
            .snapshot
            .world
            .iter()
            .map(|glyph| Span::styled(glyph.clone(), self.glyph_style(glyph)))
            .collect();
        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}
