use glam::Vec2;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::entities::{EnemyState, PowerUpKind, Star};
use crate::game::{Backdrop, Game, Screen};
use crate::snapshot::WorldSnapshot;

/// Maps arena coordinates onto terminal cells
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub area: Rect,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(area: Rect, width: f32, height: f32) -> Self {
        Self {
            area,
            width,
            height,
        }
    }

    /// Cell under an arena position, or `None` when it is off screen
    pub fn cell(&self, pos: Vec2) -> Option<(u16, u16)> {
        if self.area.width == 0 || self.area.height == 0 {
            return None;
        }
        if pos.x < 0.0 || pos.y < 0.0 || pos.x >= self.width || pos.y >= self.height {
            return None;
        }
        let col = (pos.x / self.width * f32::from(self.area.width)) as u16;
        let row = (pos.y / self.height * f32::from(self.area.height)) as u16;
        Some((
            self.area.x + col.min(self.area.width - 1),
            self.area.y + row.min(self.area.height - 1),
        ))
    }

    fn put(&self, buffer: &mut Buffer, pos: Vec2, glyph: &str, style: Style) {
        if let Some((x, y)) = self.cell(pos) {
            buffer.set_string(x, y, glyph, style);
        }
    }
}

/// Group digits in thousands: 1234567 -> "1,234,567"
pub fn format_score(score: u64) -> String {
    let digits = score.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn enemy_glyph(state: EnemyState) -> (&'static str, Color) {
    match state {
        EnemyState::Entering => ("w", Color::Magenta),
        EnemyState::Patrolling => ("W", Color::Red),
        EnemyState::Attacking => ("V", Color::LightRed),
        EnemyState::Exiting => ("v", Color::DarkGray),
    }
}

fn power_up_glyph(kind: PowerUpKind) -> (&'static str, Color) {
    match kind {
        PowerUpKind::Spread => ("S", Color::Cyan),
        PowerUpKind::Rapid => ("R", Color::Yellow),
        PowerUpKind::Shield => ("O", Color::Blue),
        PowerUpKind::Multiplier => ("x", Color::Green),
    }
}

/// Handles all rendering responsibilities for the game
#[derive(Debug, Default)]
pub struct GameRenderer {}

impl GameRenderer {
    pub fn new() -> Self {
        Self {}
    }

    /// Main render method that dispatches to screen-specific renderers
    pub fn render(&self, frame: &mut Frame, game: &Game, fps: u32) {
        match game.screen() {
            Screen::Menu(backdrop) => self.render_menu(frame, game, backdrop),
            Screen::Play(session) => self.render_play(frame, &session.snapshot(), fps),
            Screen::GameOver { score, backdrop } => {
                self.render_game_over(frame, game, *score, backdrop)
            }
        }
    }

    fn render_stars(&self, buffer: &mut Buffer, viewport: &Viewport, stars: &[Star]) {
        for star in stars {
            let (glyph, color) = if star.size > 1 {
                ("*", Color::Gray)
            } else {
                (".", Color::DarkGray)
            };
            viewport.put(buffer, star.pos, glyph, Style::default().fg(color));
        }
    }

    fn render_play(&self, frame: &mut Frame, snapshot: &WorldSnapshot, fps: u32) {
        let area = frame.area();

        // Hit flash tints the border; fades with intensity
        let border_color = if snapshot.flash > 0.5 {
            Color::LightRed
        } else if snapshot.flash > 0.0 {
            Color::Red
        } else {
            Color::DarkGray
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(" Galactic Traveler ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Top row of the inner area is the HUD
        let hud_area = Rect {
            height: inner.height.min(1),
            ..inner
        };
        let arena = Rect {
            y: inner.y + hud_area.height,
            height: inner.height.saturating_sub(hud_area.height),
            ..inner
        };
        let viewport = Viewport::new(arena, snapshot.width, snapshot.height);

        let buffer = frame.buffer_mut();
        self.render_stars(buffer, &viewport, &snapshot.stars);

        for projectile in &snapshot.projectiles {
            let (glyph, color) = if projectile.friendly {
                ("|", Color::Yellow)
            } else {
                ("!", Color::Magenta)
            };
            viewport.put(buffer, projectile.pos, glyph, Style::default().fg(color));
        }

        for enemy in &snapshot.enemies {
            let (glyph, color) = enemy_glyph(enemy.state);
            viewport.put(
                buffer,
                enemy.pos,
                glyph,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            );
        }

        for power_up in &snapshot.power_ups {
            let (glyph, color) = power_up_glyph(power_up.kind);
            viewport.put(
                buffer,
                power_up.pos,
                glyph,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            );
        }

        let player = &snapshot.player;
        if player.lives > 0 {
            let style = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);
            viewport.put(buffer, player.pos, "A", style);
            if player.shielded {
                let ring = Style::default().fg(Color::Cyan);
                let offset = Vec2::new(snapshot.width / f32::from(arena.width.max(1)), 0.0);
                viewport.put(buffer, player.pos - offset, "(", ring);
                viewport.put(buffer, player.pos + offset, ")", ring);
            }
        }

        frame.render_widget(Paragraph::new(self.hud_line(snapshot, fps)), hud_area);

        let controls = Line::from(Span::styled(
            " WASD/Arrows: Move  Space: Fire  P/Esc: Pause  Q: Quit ",
            Style::default().fg(Color::DarkGray),
        ));
        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: area.height.min(1),
        };
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);

        if snapshot.paused {
            self.render_paused(frame);
        }
    }

    fn hud_line(&self, snapshot: &WorldSnapshot, fps: u32) -> Line<'static> {
        let label = Style::default().fg(Color::DarkGray);
        let bold = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);

        let mut spans = vec![
            Span::styled("Score: ", label),
            Span::styled(format_score(snapshot.score), bold(Color::Yellow)),
            Span::styled("  Wave: ", label),
            Span::styled(snapshot.wave.to_string(), bold(Color::Cyan)),
            Span::styled("  Lives: ", label),
            Span::styled("♥".repeat(snapshot.player.lives as usize), bold(Color::Red)),
            Span::styled("  Mult: ", label),
            Span::styled(format!("x{:.1}", snapshot.multiplier), bold(Color::Green)),
        ];

        let flags: Vec<&str> = [
            (snapshot.player.spread, "SPREAD"),
            (snapshot.player.rapid, "RAPID"),
            (snapshot.player.shielded, "SHIELD"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect();
        if !flags.is_empty() {
            spans.push(Span::styled("  ", label));
            spans.push(Span::styled(flags.join(" "), bold(Color::Magenta)));
        }

        if let Some(message) = &snapshot.message {
            spans.push(Span::styled(format!("  {message}"), Style::default().fg(Color::White)));
        }

        spans.push(Span::styled("  FPS: ", label));
        spans.push(Span::styled(fps.to_string(), bold(Color::White)));
        Line::from(spans)
    }

    /// Renders the pause overlay on top of the arena
    fn render_paused(&self, frame: &mut Frame) {
        let area = frame.area();
        let pause_text = vec![
            Line::from(""),
            Line::from("PAUSED").centered().bold().yellow(),
            Line::from(""),
            Line::from("Press P to resume").centered().white(),
        ];

        let width = area.width.min(30);
        let height = area.height.min(6);
        let pause_area = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        frame.render_widget(Clear, pause_area);
        frame.render_widget(
            Paragraph::new(pause_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                )
                .alignment(Alignment::Center),
            pause_area,
        );
    }

    fn render_menu(&self, frame: &mut Frame, game: &Game, backdrop: &Backdrop) {
        let area = frame.area();
        let settings = game.settings();
        let viewport = Viewport::new(area, settings.width, settings.height);
        self.render_stars(frame.buffer_mut(), &viewport, &backdrop.starfield.stars);

        let prompt = if backdrop.prompt_visible() {
            Line::from("Press ENTER to Start").centered().white()
        } else {
            Line::from("")
        };

        let mut text = vec![
            Line::from("GALACTIC TRAVELER").centered().bold().cyan(),
            Line::from(""),
            Line::from("Waves • Patterns • Power-ups • Multipliers")
                .centered()
                .gray(),
            Line::from(""),
            prompt,
            Line::from(""),
            Line::from("Move: WASD/Arrows   Shoot: Space   Pause: P/Esc   Quit: Q")
                .centered()
                .dark_gray(),
        ];
        if game.best_score() > 0 {
            text.push(Line::from(""));
            text.push(
                Line::from(format!("Best: {}", format_score(game.best_score())))
                    .centered()
                    .yellow(),
            );
        }

        self.render_centered(frame, text);
    }

    fn render_game_over(&self, frame: &mut Frame, game: &Game, score: u64, backdrop: &Backdrop) {
        let area = frame.area();
        let settings = game.settings();
        let viewport = Viewport::new(area, settings.width, settings.height);
        self.render_stars(frame.buffer_mut(), &viewport, &backdrop.starfield.stars);

        let prompt = if backdrop.prompt_visible() {
            Line::from("Press ENTER to Play Again").centered().white()
        } else {
            Line::from("")
        };

        let text = vec![
            Line::from("╔═══════════════════════════╗").centered().red(),
            Line::from("║         GAME OVER         ║")
                .centered()
                .red()
                .bold(),
            Line::from("╚═══════════════════════════╝").centered().red(),
            Line::from(""),
            Line::from(format!("Final Score: {}", format_score(score)))
                .centered()
                .yellow()
                .bold(),
            Line::from(format!("Best: {}", format_score(game.best_score())))
                .centered()
                .cyan(),
            Line::from(""),
            prompt,
            Line::from("Quit: Q / Esc").centered().dark_gray(),
        ];

        self.render_centered(frame, text);
    }

    fn render_centered(&self, frame: &mut Frame, text: Vec<Line<'static>>) {
        let area = frame.area();
        let height = (text.len() as u16).min(area.height);
        let text_area = Rect {
            x: area.x,
            y: area.y + (area.height - height) / 2,
            width: area.width,
            height,
        };
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), text_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_scales_corners() {
        let viewport = Viewport::new(Rect::new(2, 1, 90, 26), 900.0, 650.0);
        assert_eq!(viewport.cell(Vec2::new(0.0, 0.0)), Some((2, 1)));
        assert_eq!(viewport.cell(Vec2::new(450.0, 325.0)), Some((47, 14)));
        assert_eq!(viewport.cell(Vec2::new(899.9, 649.9)), Some((91, 26)));
    }

    #[test]
    fn test_viewport_rejects_off_screen() {
        let viewport = Viewport::new(Rect::new(0, 0, 90, 26), 900.0, 650.0);
        assert_eq!(viewport.cell(Vec2::new(-1.0, 10.0)), None);
        assert_eq!(viewport.cell(Vec2::new(10.0, -40.0)), None);
        assert_eq!(viewport.cell(Vec2::new(900.0, 10.0)), None);
        assert_eq!(viewport.cell(Vec2::new(10.0, 700.0)), None);

        let empty = Viewport::new(Rect::new(0, 0, 0, 0), 900.0, 650.0);
        assert_eq!(empty.cell(Vec2::new(10.0, 10.0)), None);
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0), "0");
        assert_eq!(format_score(999), "999");
        assert_eq!(format_score(1000), "1,000");
        assert_eq!(format_score(1234567), "1,234,567");
    }

    #[test]
    fn test_glyphs_distinguish_states_and_kinds() {
        let states = [
            EnemyState::Entering,
            EnemyState::Patrolling,
            EnemyState::Attacking,
            EnemyState::Exiting,
        ];
        let glyphs: Vec<&str> = states.iter().map(|s| enemy_glyph(*s).0).collect();
        for (i, glyph) in glyphs.iter().enumerate() {
            assert!(!glyphs[i + 1..].contains(glyph));
        }

        let kinds: Vec<&str> = PowerUpKind::DROP_TABLE
            .iter()
            .map(|(kind, _)| power_up_glyph(*kind).0)
            .collect();
        for (i, glyph) in kinds.iter().enumerate() {
            assert!(!kinds[i + 1..].contains(glyph));
        }
    }
}
