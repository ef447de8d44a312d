//! Frame rendering.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use keepsake_engine::RoundController;
use keepsake_types::{CelebrationStage, MenuVariant, TileState};

use crate::effects::{StageEffect, apply_stage_effect, confetti_position};
use crate::surface::{BOARD_COLUMNS, Screen, TerminalSurface, TileView};
use crate::theme::{Glyphs, Palette, glyphs, palette, styles};

const TILE_WIDTH: u16 = 6;
const TILE_HEIGHT: u16 = 3;
const MENU_WIDTH: u16 = 56;
const LETTER_WIDTH: u16 = 40;

/// Main draw function.
pub fn draw(frame: &mut Frame, controller: &RoundController<TerminalSurface>) {
    let surface = controller.surface();
    let options = surface.options();
    let palette = palette(options);
    let glyphs = glyphs(options);

    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let [header, body, cue, hints] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .areas(frame.area());

    draw_header(frame, header, controller, &palette, &glyphs);
    match surface.screen() {
        Screen::Menu(variant) => {
            draw_menu(frame, body, variant, controller.settings().round_duration_secs, &palette);
        }
        Screen::Board => draw_board(frame, body, surface, &palette, &glyphs),
        Screen::Celebration(stage) => draw_celebration(frame, body, surface, stage, &palette, &glyphs),
    }
    draw_confetti(frame, body, surface, &palette, &glyphs);
    draw_cue(frame, cue, surface, &palette, &glyphs);
    draw_hints(frame, hints, surface.screen(), surface.actions_visible(), &palette);
}

fn draw_header(
    frame: &mut Frame,
    area: Rect,
    controller: &RoundController<TerminalSurface>,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let surface = controller.surface();
    let separator = Span::styled(format!(" {} ", glyphs.separator), styles::key_hint(palette));
    let mut spans = vec![Span::styled("Keepsake", styles::title(palette))];

    if surface.screen() == Screen::Board {
        let (matched, total) = surface.progress();
        spans.push(separator.clone());
        spans.push(Span::styled(
            format!("{} {}", glyphs.timer, surface.timer()),
            styles::timer(palette, surface.is_time_low()),
        ));
        spans.push(separator.clone());
        spans.push(Span::styled(
            format!("{} {matched}/{total}", glyphs.pairs),
            Style::default().fg(palette.text_secondary),
        ));
    }

    spans.push(separator);
    let sound = if controller.sound_enabled() {
        glyphs.sound_on
    } else {
        glyphs.sound_off
    };
    spans.push(Span::styled(sound, Style::default().fg(palette.text_secondary)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// "2 minutes", "1 minute 30 seconds", "45 seconds".
fn describe_duration(seconds: u32) -> String {
    fn unit(count: u32, name: &str) -> String {
        if count == 1 {
            format!("1 {name}")
        } else {
            format!("{count} {name}s")
        }
    }

    let (minutes, rest) = (seconds / 60, seconds % 60);
    match (minutes, rest) {
        (0, secs) => unit(secs, "second"),
        (mins, 0) => unit(mins, "minute"),
        (mins, secs) => format!("{} {}", unit(mins, "minute"), unit(secs, "second")),
    }
}

fn draw_menu(
    frame: &mut Frame,
    area: Rect,
    variant: MenuVariant,
    round_secs: u32,
    palette: &Palette,
) {
    let key = styles::key_highlight(palette);
    let text = Style::default().fg(palette.text_primary);
    let lines = match variant {
        MenuVariant::Welcome => vec![
            Line::from(Span::styled("Welcome to Memory Match!", styles::title(palette))),
            Line::default(),
            Line::from(Span::styled(
                "Match all the tiles to reveal a special message.",
                text,
            )),
            Line::from(Span::styled(
                format!(
                    "You have {} to complete the challenge.",
                    describe_duration(round_secs)
                ),
                Style::default().fg(palette.text_secondary),
            )),
            Line::default(),
            Line::from(vec![Span::styled("[s]", key), Span::styled(" Start game", text)]),
        ],
        MenuVariant::TimeUp => vec![
            Line::from(Span::styled(
                "Time's Up!",
                Style::default()
                    .fg(palette.error)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::styled(
                "You ran out of time. Would you like to try again?",
                text,
            )),
            Line::default(),
            Line::from(vec![
                Span::styled("[s]", key),
                Span::styled(" Try again   ", text),
                Span::styled("[m]", key),
                Span::styled(" Back to menu", text),
            ]),
        ],
    };

    let height = lines.len() as u16 + 2;
    let rect = centered(area, MENU_WIDTH, height);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.bg_border))
        .style(Style::default().bg(palette.bg_panel));
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        rect,
    );
}

fn draw_board(
    frame: &mut Frame,
    area: Rect,
    surface: &TerminalSurface,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let tiles = surface.tiles();
    let rows = tiles.len().div_ceil(BOARD_COLUMNS) as u16;
    let grid = centered(
        area,
        TILE_WIDTH * BOARD_COLUMNS as u16,
        TILE_HEIGHT * rows,
    );

    for (index, tile) in tiles.iter().enumerate() {
        let col = (index % BOARD_COLUMNS) as u16;
        let row = (index / BOARD_COLUMNS) as u16;
        let rect = Rect {
            x: grid.x + col * TILE_WIDTH,
            y: grid.y + row * TILE_HEIGHT,
            width: TILE_WIDTH,
            height: TILE_HEIGHT,
        };
        // Terminal too small: drop what does not fit rather than overdraw.
        if area.intersection(rect) != rect {
            continue;
        }
        draw_tile(frame, rect, tile, index == surface.cursor(), palette, glyphs);
    }
}

fn draw_tile(
    frame: &mut Frame,
    rect: Rect,
    tile: &TileView,
    selected: bool,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let (face, style) = match tile.state {
        TileState::Hidden => (glyphs.hidden_tile, styles::tile_hidden(palette)),
        TileState::Revealed => (tile.symbol.as_str(), styles::tile_revealed(palette)),
        TileState::Matched => (tile.symbol.as_str(), styles::tile_matched(palette)),
    };
    let (border_type, border_style) = if selected {
        (BorderType::Thick, styles::cursor(palette))
    } else {
        (BorderType::Rounded, Style::default().fg(palette.bg_border))
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .style(style);
    frame.render_widget(
        Paragraph::new(face)
            .alignment(Alignment::Center)
            .block(block),
        rect,
    );
}

fn draw_celebration(
    frame: &mut Frame,
    area: Rect,
    surface: &TerminalSurface,
    stage: CelebrationStage,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let order = |s: CelebrationStage| CelebrationStage::ORDER.iter().position(|o| *o == s);
    let reached = |s: CelebrationStage| order(stage) >= order(s);
    let effect = StageEffect::for_stage(stage);
    let progress = surface.stage_progress();

    let envelope = if reached(CelebrationStage::EnvelopeOpen) {
        glyphs.envelope_open
    } else {
        glyphs.envelope_closed
    };
    let message_lines: Vec<&str> = surface.letter_message().lines().collect();
    let letter_height = if reached(CelebrationStage::LetterReveal) {
        message_lines.len().max(1) as u16 + 4
    } else {
        0
    };
    let envelope_height = envelope.len() as u16;

    let [title_area, letter_area, envelope_area, buttons_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(letter_height),
        Constraint::Length(envelope_height),
        Constraint::Length(2),
    ])
    .flex(Flex::Center)
    .areas(area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled("You found every pair!", styles::title(palette))))
            .alignment(Alignment::Center),
        title_area,
    );

    let envelope_width = envelope.iter().map(|line| line.width()).max().unwrap_or(0) as u16;
    let mut envelope_rect = centered(envelope_area, envelope_width, envelope_height);
    if stage == CelebrationStage::Opening {
        envelope_rect = apply_stage_effect(effect, progress, envelope_rect, area);
    }
    let art: Vec<Line> = envelope
        .iter()
        .map(|line| Line::from(Span::styled(*line, Style::default().fg(palette.primary))))
        .collect();
    frame.render_widget(Paragraph::new(art), envelope_rect);

    if letter_height > 0 {
        let widest = message_lines
            .iter()
            .map(|line| line.width())
            .max()
            .unwrap_or(0) as u16;
        let width = LETTER_WIDTH.max(widest + 4);
        let mut letter_rect = centered(letter_area, width, letter_height);
        if stage == CelebrationStage::LetterReveal {
            letter_rect = apply_stage_effect(effect, progress, letter_rect, area);
        }
        let body: Vec<Line> = if reached(CelebrationStage::MessageShow) {
            message_lines.iter().map(|line| Line::from(*line)).collect()
        } else {
            vec![Line::from("♥")]
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .title(" A letter for you ")
            .style(styles::letter(palette));
        frame.render_widget(Clear, letter_rect);
        frame.render_widget(
            Paragraph::new(body)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block.padding(Padding::vertical(1))),
            letter_rect,
        );
    }

    if stage == CelebrationStage::ActionButtons {
        let key = styles::key_highlight(palette);
        let text = Style::default().fg(palette.text_primary);
        let buttons = Line::from(vec![
            Span::styled("[s]", key),
            Span::styled(" Play again   ", text),
            Span::styled("[m]", key),
            Span::styled(" Menu", text),
        ]);
        let rect = apply_stage_effect(effect, progress, buttons_area, area);
        frame.render_widget(Paragraph::new(buttons).alignment(Alignment::Center), rect);
    }
}

fn draw_confetti(
    frame: &mut Frame,
    area: Rect,
    surface: &TerminalSurface,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let buffer = frame.buffer_mut();
    for particle in surface.confetti().particles() {
        let Some(position) = confetti_position(particle, area) else {
            continue;
        };
        let symbol = if particle.round {
            glyphs.confetti_round
        } else {
            glyphs.confetti_square
        };
        if let Some(cell) = buffer.cell_mut(position) {
            cell.set_symbol(symbol).set_fg(palette.confetti(particle.color));
        }
    }
}

fn draw_cue(
    frame: &mut Frame,
    area: Rect,
    surface: &TerminalSurface,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let Some(flash) = surface.cue_flash() else {
        return;
    };
    let color = if flash.progress() < 0.5 {
        palette.accent
    } else {
        palette.text_muted
    };
    frame.render_widget(
        Paragraph::new(format!("{} {}", glyphs.cue, flash.cue)).style(Style::default().fg(color)),
        area,
    );
}

fn draw_hints(frame: &mut Frame, area: Rect, screen: Screen, actions: bool, palette: &Palette) {
    let mut pairs: Vec<(&str, &str)> = match screen {
        Screen::Board => vec![("arrows/hjkl", "move"), ("enter", "flip")],
        Screen::Menu(MenuVariant::Welcome) => vec![("s", "start")],
        Screen::Menu(MenuVariant::TimeUp) => vec![("s", "retry"), ("m", "menu")],
        Screen::Celebration(_) if actions => vec![("s", "play again"), ("m", "menu")],
        Screen::Celebration(_) => Vec::new(),
    };
    pairs.extend([("t", "sound"), ("q", "quit")]);

    let mut spans = Vec::new();
    for (key, action) in pairs {
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(key, styles::key_highlight(palette)));
        spans.push(Span::styled(format!(" {action}"), styles::key_hint(palette)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
