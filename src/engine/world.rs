use serde::{Deserialize, Serialize};

use crate::engine::lane::{Glyph, Lane};

/// Velocity above which the rider leaves a sparking trail.
pub const TRAIL_THRESHOLD: f64 = 0.9;

/// The glyph vocabulary of one world: what the engine appends to lanes
/// and what the compositor fills and overlays with. Themes provide these.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GlyphSet {
    pub rail: Glyph,
    pub player: Glyph,
    pub trail: Glyph,
    pub tree: Glyph,
    pub cloud: Glyph,
}

impl Default for GlyphSet {
    fn default() -> Self {
        Self {
            rail: "..".to_string(),
            player: "#".to_string(),
            trail: "`".to_string(),
            tree: "|".to_string(),
            cloud: "~".to_string(),
        }
    }
}

/// Merge the two lanes into one renderable row: foreground wins over
/// background, background over the rail filler. The rider marker is then
/// forced at `player_position`, and at high speed one or two trail glyphs
/// are written behind it, the second one blinking on `trail_phase`.
///
/// Pure function of its arguments; the engine owns the phase counter.
pub fn compose(
    foreground: &Lane,
    background: &Lane,
    glyphs: &GlyphSet,
    player_position: usize,
    velocity: f64,
    trail_phase: u64,
) -> Vec<Glyph> {
    debug_assert_eq!(foreground.width(), background.width());
    debug_assert!(player_position < foreground.width());

    let mut world: Vec<Glyph> = (0..foreground.width())
        .map(|i| {
            foreground
                .get(i)
                .or_else(|| background.get(i))
                .cloned()
                .unwrap_or_else(|| glyphs.rail.clone())
        })
        .collect();

    world[player_position] = glyphs.player.clone();

    if velocity > TRAIL_THRESHOLD {
        if player_position >= 1 {
            world[player_position - 1] = glyphs.trail.clone();
        }
        if player_position >= 2 && (trail_phase % 3 == 0 || trail_phase % 2 == 0) {
            world[player_position - 2] = glyphs.trail.clone();
        }
    }

    world
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::lane::Lane;

    fn lanes(width: usize) -> (Lane, Lane) {
        (Lane::new(width), Lane::new(width))
    }

    #[test]
    fn test_empty_lanes_compose_to_rail_and_player() {
        let (fg, bg) = lanes(8);
        let glyphs = GlyphSet::default();
        let world = compose(&fg, &bg, &glyphs, 3, 0.0, 0);
        assert_eq!(world.len(), 8);
        assert_eq!(world[3], glyphs.player);
        for (i, g) in world.iter().enumerate() {
            if i != 3 {
                assert_eq!(*g, glyphs.rail);
            }
        }
    }

    #[test]
    fn test_foreground_wins_over_background() {
        let (mut fg, mut bg) = lanes(4);
        for _ in 0..4 {
            fg.advance(Some("|".to_string()));
            bg.advance(Some("~".to_string()));
        }
        let glyphs = GlyphSet::default();
        let world = compose(&fg, &bg, &glyphs, 0, 0.0, 0);
        // Index 0 is the player; the rest show the foreground tree.
        assert!(world[1..].iter().all(|g| g == "|"));
    }

    #[test]
    fn test_background_shows_through_empty_foreground() {
        let (fg, mut bg) = lanes(4);
        for _ in 0..4 {
            bg.advance(Some("~".to_string()));
        }
        let glyphs = GlyphSet::default();
        let world = compose(&fg, &bg, &glyphs, 0, 0.0, 0);
        assert!(world[1..].iter().all(|g| g == "~"));
    }

    #[test]
    fn test_no_trail_at_or_below_threshold() {
        let (fg, bg) = lanes(8);
        let glyphs = GlyphSet::default();
        let world = compose(&fg, &bg, &glyphs, 3, TRAIL_THRESHOLD, 0);
        assert_eq!(world[2], glyphs.rail);
        assert_eq!(world[1], glyphs.rail);
    }

    #[test]
    fn test_trail_appears_above_threshold() {
        let (fg, bg) = lanes(8);
        let glyphs = GlyphSet::default();
        // Phase 0: 0 % 3 == 0, both trail slots lit.
        let world = compose(&fg, &bg, &glyphs, 3, 0.95, 0);
        assert_eq!(world[2], glyphs.trail);
        assert_eq!(world[1], glyphs.trail);
    }

    #[test]
    fn test_second_trail_slot_blinks_with_phase() {
        let (fg, bg) = lanes(8);
        let glyphs = GlyphSet::default();
        // 1 is neither divisible by 2 nor 3: second slot off.
        let world = compose(&fg, &bg, &glyphs, 3, 0.95, 1);
        assert_eq!(world[2], glyphs.trail);
        assert_eq!(world[1], glyphs.rail);
        // 4 is divisible by 2: second slot on.
        let world = compose(&fg, &bg, &glyphs, 3, 0.95, 4);
        assert_eq!(world[1], glyphs.trail);
    }

    #[test]
    fn test_compose_is_pure() {
        let (mut fg, mut bg) = lanes(6);
        fg.advance(Some("|".to_string()));
        bg.advance(Some("~".to_string()));
        let glyphs = GlyphSet::default();
        let a = compose(&fg, &bg, &glyphs, 2, 0.5, 7);
        let b = compose(&fg, &bg, &glyphs, 2, 0.5, 7);
        assert_eq!(a, b);
    }

    #[test]
    fn test_player_near_head_truncates_trail() {
        let (fg, bg) = lanes(8);
        let glyphs = GlyphSet::default();
        // Player at index 1: only one slot behind it exists.
        let world = compose(&fg, &bg, &glyphs, 1, 0.95, 0);
        assert_eq!(world[0], glyphs.trail);
        assert_eq!(world[1], glyphs.player);
    }
}
