use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::{Line as TextLine, Span},
    widgets::{
        canvas::{Canvas, Circle, Context, Line, Rectangle},
        Block, Borders, Paragraph,
    },
    Frame,
};

use crate::config::{DisplayConfig, KeyBindings};
use crate::game::{Side, Snapshot};

use super::overlay::{render_overlay, OverlayMessage};

/// Key names shown in on-screen hints, as configured.
#[derive(Debug, Clone, Copy)]
pub struct KeyHints<'a> {
    pub toggle_left_ai: &'a str,
    pub toggle_right_ai: &'a str,
    pub start: &'a str,
    pub reset: &'a str,
    pub quit: &'a str,
}

impl<'a> KeyHints<'a> {
    pub fn from_bindings(keys: &'a KeyBindings) -> Self {
        Self {
            toggle_left_ai: &keys.toggle_left_ai,
            toggle_right_ai: &keys.toggle_right_ai,
            start: &keys.start,
            reset: &keys.reset,
            quit: &keys.quit,
        }
    }
}

// Score line, AI status line, spacer
const HEADER_ROWS: u16 = 3;

fn rgb(c: [u8; 3]) -> Color {
    Color::Rgb(c[0], c[1], c[2])
}

/// Draw one frame from a snapshot. Never touches the simulation.
pub fn render(
    frame: &mut Frame,
    snapshot: &Snapshot,
    display: &DisplayConfig,
    hints: &KeyHints,
    overlay: Option<&OverlayMessage>,
) {
    let area = frame.area();

    let bg = Block::default().style(Style::default().bg(Color::Rgb(0, 0, 0)));
    frame.render_widget(bg, area);

    let [header, playfield] =
        Layout::vertical([Constraint::Length(HEADER_ROWS), Constraint::Min(0)]).areas(area);

    draw_header(frame, snapshot, display, hints, header);
    draw_field(frame, snapshot, display, playfield);

    if let Some(message) = overlay {
        render_overlay(frame, message, playfield);
    }
}

fn draw_header(
    frame: &mut Frame,
    snapshot: &Snapshot,
    display: &DisplayConfig,
    hints: &KeyHints,
    area: Rect,
) {
    let score = Paragraph::new(format!("{}  -  {}", snapshot.score_left, snapshot.score_right))
        .style(Style::default().fg(rgb(display.score_color)))
        .alignment(Alignment::Center);
    frame.render_widget(score, Rect { height: 1, ..area });

    let status = TextLine::from(vec![
        ai_label("AI Left", snapshot.left_ai, hints.toggle_left_ai),
        Span::raw("    "),
        ai_label("AI Right", snapshot.right_ai, hints.toggle_right_ai),
    ]);
    let status = Paragraph::new(status).alignment(Alignment::Center);
    frame.render_widget(
        status,
        Rect {
            y: area.y + 1,
            height: 1,
            ..area
        },
    );
}

fn ai_label(name: &str, enabled: bool, key: &str) -> Span<'static> {
    let (state, color) = if enabled {
        ("ON", Color::Green)
    } else {
        ("OFF", Color::DarkGray)
    };
    Span::styled(
        format!("{}: {} ({} to toggle)", name, state, key),
        Style::default().fg(color),
    )
}

fn draw_field(frame: &mut Frame, snapshot: &Snapshot, display: &DisplayConfig, area: Rect) {
    let field = snapshot.field;
    let width = field.width as f64;
    let height = field.height as f64;

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(Color::Gray)),
        )
        .background_color(Color::Rgb(0, 0, 0))
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            draw_center_line(ctx, width, height, rgb(display.center_line_color));
            ctx.layer();

            let paddle_color = rgb(display.paddle_color);
            draw_paddle(ctx, snapshot, Side::Left, paddle_color);
            draw_paddle(ctx, snapshot, Side::Right, paddle_color);

            // Canvas y grows upward, field y grows downward
            ctx.draw(&Circle {
                x: snapshot.ball.x as f64,
                y: height - snapshot.ball.y as f64,
                radius: field.ball_radius as f64,
                color: rgb(display.ball_color),
            });
        });

    frame.render_widget(canvas, area);
}

fn draw_center_line(ctx: &mut Context, width: f64, height: f64, color: Color) {
    let x = width / 2.0;
    let dash = height / 32.0;
    let mut y = 0.0;
    while y < height {
        ctx.draw(&Line::new(x, y, x, (y + dash).min(height), color));
        y += dash * 2.0;
    }
}

fn draw_paddle(ctx: &mut Context, snapshot: &Snapshot, side: Side, color: Color) {
    let field = snapshot.field;
    let (x, top) = match side {
        Side::Left => (0.0, snapshot.left_paddle),
        Side::Right => (field.width - field.paddle_width, snapshot.right_paddle),
    };
    ctx.draw(&Rectangle {
        x: x as f64,
        y: (field.height - top - field.paddle_height) as f64,
        width: field.paddle_width as f64,
        height: field.paddle_height as f64,
        color,
    });
}
