use std::time::Instant;

use anyhow::Result;
use ratatui::Terminal;

use crate::config::Config;
use crate::env::{RandomSource, SystemClock};
use crate::game::{KeyMap, KeyTracker, Match, Side, TickEvents};
use crate::ui::{self, KeyHints, OverlayMessage};

use super::common::{frame_duration, limit_frame_rate};

/// Run a match on one keyboard until the player quits.
///
/// Each side is human or AI according to the config and the in-game toggles.
pub fn run_game_local<B, R>(
    terminal: &mut Terminal<B>,
    config: &Config,
    rng: &mut R,
    release_events: bool,
) -> Result<()>
where
    B: ratatui::backend::Backend,
    R: RandomSource,
{
    let keymap = KeyMap::from_bindings(&config.keybindings)?;
    let mut keys = KeyTracker::new(keymap, config.display.key_hold_frames);
    if release_events {
        keys.enable_release_tracking();
    }

    let mut game = Match::new(config, rng);
    let mut clock = SystemClock::new();
    let frame = frame_duration(config.display.target_fps);
    let hints = KeyHints::from_bindings(&config.keybindings);

    tracing::info!(
        left = ?game.controls.left,
        right = ?game.controls.right,
        winning_score = game.round.winning_score,
        "match ready"
    );

    loop {
        let now = Instant::now();
        clock.tick();

        keys.poll()?;
        let input = keys.take_input();
        if input.quit {
            tracing::info!(
                left = game.round.score_left,
                right = game.round.score_right,
                "quit"
            );
            return Ok(());
        }

        let events = game.step(&input, rng, &clock);
        log_events(&game, &events);

        let snapshot = game.snapshot();
        let overlay = OverlayMessage::for_snapshot(&snapshot, &hints);
        terminal.draw(|f| ui::render(f, &snapshot, &config.display, &hints, overlay.as_ref()))?;

        limit_frame_rate(now, frame);
    }
}

fn log_events(game: &Match, events: &TickEvents) {
    if let Some(side) = events.toggled {
        tracing::info!(?side, mode = ?game.controls.get(side), "control mode toggled");
    }
    if events.started {
        tracing::info!("serve");
    }
    if let Some(side) = events.paddle_bounce {
        tracing::debug!(?side, vx = game.ball.vx, vy = game.ball.vy, "paddle bounce");
    }
    if let Some(scorer) = events.point {
        tracing::info!(
            ?scorer,
            points = game.round.score(scorer),
            left = game.round.score_left,
            right = game.round.score_right,
            "point"
        );
    }
    if events.served {
        tracing::debug!(vx = game.ball.vx, vy = game.ball.vy, "ball re-served");
    }
    if events.point.is_some() {
        if let Some(winner) = events.match_over {
            let label = match winner {
                Side::Left => "left",
                Side::Right => "right",
            };
            tracing::info!(winner = label, "match over");
        }
    }
    if events.reset {
        tracing::info!("match reset");
    }
}
