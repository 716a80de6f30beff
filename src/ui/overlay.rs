// Centered message box drawn over the playfield

use ratatui::{
    layout::{Alignment, Margin, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::game::{Phase, Side, Snapshot};

use super::render::KeyHints;

/// A message to display in the center of the playfield
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayMessage {
    pub lines: Vec<String>,
    pub title: Option<String>,
    pub style: OverlayStyle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayStyle {
    /// Prompts (white on cyan border)
    Info,
    /// Match result (green)
    Success,
}

impl OverlayMessage {
    pub fn info(lines: Vec<String>) -> Self {
        Self {
            lines,
            title: None,
            style: OverlayStyle::Info,
        }
    }

    pub fn success(lines: Vec<String>) -> Self {
        Self {
            lines,
            title: None,
            style: OverlayStyle::Success,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// The prompt matching the match phase, if any.
    pub fn for_snapshot(snapshot: &Snapshot, hints: &KeyHints) -> Option<Self> {
        match snapshot.phase {
            Phase::Ready => Some(Self::info(vec![format!("Press {} to Play", hints.start)])),
            Phase::MatchOver => {
                let winner = match snapshot.winner {
                    Some(Side::Left) => "Player 1 Wins!",
                    Some(Side::Right) => "Player 2 Wins!",
                    None => "Game Over",
                };
                Some(
                    Self::success(vec![
                        winner.to_string(),
                        String::new(),
                        format!("{} to Rematch  |  {} to Quit", hints.reset, hints.quit),
                    ])
                    .with_title("Match Over"),
                )
            }
            Phase::Active | Phase::ServingWait => None,
        }
    }

    fn border_color(&self) -> Color {
        match self.style {
            OverlayStyle::Info => Color::Cyan,
            OverlayStyle::Success => Color::Green,
        }
    }

    fn text_color(&self) -> Color {
        match self.style {
            OverlayStyle::Info => Color::White,
            OverlayStyle::Success => Color::LightGreen,
        }
    }
}

pub fn render_overlay(frame: &mut Frame, message: &OverlayMessage, area: Rect) {
    let max_line_length = message
        .lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0) as u16;

    let overlay_width = (max_line_length + 6).min(area.width.saturating_sub(4));
    let overlay_height = (message.lines.len() as u16 + 4).min(area.height.saturating_sub(2));

    let overlay_area = Rect {
        x: area.x + area.width.saturating_sub(overlay_width) / 2,
        y: area.y + area.height.saturating_sub(overlay_height) / 2,
        width: overlay_width,
        height: overlay_height,
    };

    frame.render_widget(Clear, overlay_area);

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(message.border_color()))
        .style(Style::default().bg(Color::Rgb(20, 20, 20)));
    if let Some(ref title) = message.title {
        block = block.title(format!(" {} ", title));
    }
    frame.render_widget(block, overlay_area);

    let text_lines: Vec<Line> = message
        .lines
        .iter()
        .map(|line| {
            Line::from(Span::styled(
                line.clone(),
                Style::default().fg(message.text_color()),
            ))
        })
        .collect();

    let paragraph = Paragraph::new(text_lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, overlay_area.inner(Margin::new(2, 1)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, KeyBindings};
    use crate::env::SeededRandom;
    use crate::game::Match;

    #[test]
    fn test_ready_prompt() {
        let mut rng = SeededRandom::from_seed(1);
        let game = Match::new(&Config::default(), &mut rng);
        let keys = KeyBindings::default();
        let hints = KeyHints::from_bindings(&keys);
        let overlay = OverlayMessage::for_snapshot(&game.snapshot(), &hints).unwrap();
        assert_eq!(overlay.lines, vec!["Press Space to Play".to_string()]);
        assert_eq!(overlay.style, OverlayStyle::Info);
    }

    #[test]
    fn test_match_over_names_winner() {
        let mut rng = SeededRandom::from_seed(1);
        let mut game = Match::new(&Config::default(), &mut rng);
        game.round.score_right = 5;
        game.round.check_match_over();
        let keys = KeyBindings::default();
        let hints = KeyHints::from_bindings(&keys);
        let overlay = OverlayMessage::for_snapshot(&game.snapshot(), &hints).unwrap();
        assert_eq!(overlay.lines[0], "Player 2 Wins!");
        assert_eq!(overlay.title.as_deref(), Some("Match Over"));
    }

    #[test]
    fn test_prompts_use_configured_keys() {
        let mut rng = SeededRandom::from_seed(1);
        let mut game = Match::new(&Config::default(), &mut rng);
        let mut keys = KeyBindings::default();
        keys.start = "Enter".to_string();
        keys.reset = "N".to_string();
        keys.quit = "X".to_string();
        let hints = KeyHints::from_bindings(&keys);

        let ready = OverlayMessage::for_snapshot(&game.snapshot(), &hints).unwrap();
        assert_eq!(ready.lines[0], "Press Enter to Play");

        game.round.score_left = 5;
        game.round.check_match_over();
        let over = OverlayMessage::for_snapshot(&game.snapshot(), &hints).unwrap();
        assert_eq!(over.lines[2], "N to Rematch  |  X to Quit");
    }

    #[test]
    fn test_no_overlay_during_play() {
        let mut rng = SeededRandom::from_seed(1);
        let mut game = Match::new(&Config::default(), &mut rng);
        game.round.phase = Phase::Active;
        let keys = KeyBindings::default();
        let hints = KeyHints::from_bindings(&keys);
        assert!(OverlayMessage::for_snapshot(&game.snapshot(), &hints).is_none());
    }
}
