use std::thread;
use std::time::Instant;

use once_cell::sync::OnceCell;
use raylib::prelude::*;

use crate::app::{App, Mode, Theme};
use crate::game::{Cell, Player};

const MARGIN: f32 = 20.0;
const CELL_SIZE: f32 = 110.0;
const CELL_GAP: f32 = 8.0;
const BOARD_SIZE: f32 = 3.0 * CELL_SIZE + 2.0 * CELL_GAP;
const WINDOW_WIDTH: i32 = (BOARD_SIZE + 2.0 * MARGIN) as i32;
const WINDOW_HEIGHT: i32 = 660;

const HEADER_Y: f32 = 16.0;
const MODE_Y: f32 = 64.0;
const SCORE_Y: f32 = 116.0;
const BOARD_Y: f32 = 192.0;
const CONTROLS_Y: f32 = 554.0;
const DRAWS_Y: i32 = 610;

const BUTTON_HEIGHT: f32 = 40.0;
const BUTTON_TEXT_SIZE: i32 = 18;
const MARK_TEXT_SIZE: i32 = 64;

// Rendering must stay on the thread that created the window.
static MAIN_THREAD_ID: OnceCell<thread::ThreadId> = OnceCell::new();

pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub primary: Color,
    pub on_primary: Color,
    pub secondary: Color,
    pub on_secondary: Color,
    pub accent: Color,
}

impl Theme {
    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                background: Color::new(248, 249, 250, 255),
                surface: Color::new(255, 255, 255, 255),
                text: Color::new(33, 37, 41, 255),
                muted: Color::new(108, 117, 125, 255),
                border: Color::new(222, 226, 230, 255),
                primary: Color::new(25, 118, 210, 255),
                on_primary: Color::new(255, 255, 255, 255),
                secondary: Color::new(255, 193, 7, 255),
                on_secondary: Color::new(40, 30, 0, 255),
                accent: Color::new(255, 82, 82, 255),
            },
            Theme::Dark => Palette {
                background: Color::new(26, 26, 46, 255),
                surface: Color::new(40, 42, 66, 255),
                text: Color::new(237, 237, 237, 255),
                muted: Color::new(160, 163, 189, 255),
                border: Color::new(60, 63, 94, 255),
                primary: Color::new(100, 168, 240, 255),
                on_primary: Color::new(16, 24, 40, 255),
                secondary: Color::new(255, 205, 60, 255),
                on_secondary: Color::new(40, 30, 0, 255),
                accent: Color::new(255, 99, 99, 255),
            },
        }
    }
}

/// Every clickable region, computed once per frame and shared between hit
/// testing and drawing.
struct Layout {
    theme_btn: Rectangle,
    pvp_btn: Rectangle,
    ai_btn: Rectangle,
    cells: [Rectangle; 9],
    reset_btn: Rectangle,
    new_round_btn: Rectangle,
}

impl Layout {
    fn new() -> Self {
        let half = (BOARD_SIZE - 10.0) / 2.0;
        let mut cells = [Rectangle::new(0.0, 0.0, 0.0, 0.0); 9];
        for (i, cell) in cells.iter_mut().enumerate() {
            let row = (i / 3) as f32;
            let col = (i % 3) as f32;
            *cell = Rectangle::new(
                MARGIN + col * (CELL_SIZE + CELL_GAP),
                BOARD_Y + row * (CELL_SIZE + CELL_GAP),
                CELL_SIZE,
                CELL_SIZE,
            );
        }
        Layout {
            theme_btn: Rectangle::new(
                MARGIN + BOARD_SIZE - 96.0,
                HEADER_Y,
                96.0,
                36.0,
            ),
            pvp_btn: Rectangle::new(MARGIN, MODE_Y, half, BUTTON_HEIGHT),
            ai_btn: Rectangle::new(MARGIN + half + 10.0, MODE_Y, half, BUTTON_HEIGHT),
            cells,
            reset_btn: Rectangle::new(MARGIN, CONTROLS_Y, 110.0, BUTTON_HEIGHT),
            new_round_btn: Rectangle::new(
                MARGIN + BOARD_SIZE - 110.0,
                CONTROLS_Y,
                110.0,
                BUTTON_HEIGHT,
            ),
        }
    }
}

pub struct Client {
    rl: RaylibHandle,
    thread: RaylibThread,
}

pub fn init() -> Client {
    let (mut rl, thread) = raylib::init()
        .size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .title("Tic Tac Toe")
        .build();
    rl.set_target_fps(60);
    Client { rl, thread }
}

/// Runs the event loop until the window is closed.
pub fn run(app: &mut App, client: &mut Client) {
    while !client.rl.window_should_close() {
        app.tick(Instant::now());
        frame(app, client);
    }
}

fn frame(app: &mut App, client: &mut Client) {
    let main_thread_id = MAIN_THREAD_ID.get_or_init(|| thread::current().id());
    assert_eq!(
        *main_thread_id,
        thread::current().id(),
        "Rendering must be called from the main thread"
    );

    let layout = Layout::new();
    let mouse = client.rl.get_mouse_position();
    if client
        .rl
        .is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT)
    {
        dispatch_click(app, &layout, mouse);
    }

    let palette = app.theme().palette();
    let mut d = client.rl.begin_drawing(&client.thread);
    d.clear_background(palette.background);

    draw_header(&mut d, &layout, app, &palette);
    draw_mode_toggle(&mut d, &layout, app, &palette);
    draw_score_panel(&mut d, app, &palette);
    draw_board(&mut d, &layout, app, &palette);
    draw_controls(&mut d, &layout, app, &palette);
}

fn dispatch_click(app: &mut App, layout: &Layout, mouse: Vector2) {
    let now = Instant::now();
    if layout.theme_btn.check_collision_point_rec(mouse) {
        app.toggle_theme();
        return;
    }
    if layout.pvp_btn.check_collision_point_rec(mouse) {
        app.set_mode(Mode::PlayerVsPlayer, now);
        return;
    }
    if layout.ai_btn.check_collision_point_rec(mouse) {
        app.set_mode(Mode::PlayerVsComputer, now);
        return;
    }
    if layout.reset_btn.check_collision_point_rec(mouse) {
        app.reset_all(now);
        return;
    }
    if layout.new_round_btn.check_collision_point_rec(mouse) {
        if app.can_new_round() {
            app.new_round(now);
        }
        return;
    }
    for (i, cell) in layout.cells.iter().enumerate() {
        if cell.check_collision_point_rec(mouse) {
            app.apply_move(i, now);
            return;
        }
    }
}

fn draw_button(
    d: &mut RaylibDrawHandle,
    rect: Rectangle,
    label: &str,
    fill: Color,
    text: Color,
) {
    d.draw_rectangle_rounded(rect, 0.25, 6, fill);
    let width = d.measure_text(label, BUTTON_TEXT_SIZE);
    d.draw_text(
        label,
        (rect.x + (rect.width - width as f32) / 2.0) as i32,
        (rect.y + (rect.height - BUTTON_TEXT_SIZE as f32) / 2.0) as i32,
        BUTTON_TEXT_SIZE,
        text,
    );
}

fn draw_header(d: &mut RaylibDrawHandle, layout: &Layout, app: &App, palette: &Palette) {
    d.draw_text("Tic Tac Toe", MARGIN as i32, (HEADER_Y + 4.0) as i32, 26, palette.text);
    let label = match app.theme() {
        Theme::Light => "Dark",
        Theme::Dark => "Light",
    };
    draw_button(d, layout.theme_btn, label, palette.surface, palette.text);
}

fn draw_mode_toggle(d: &mut RaylibDrawHandle, layout: &Layout, app: &App, palette: &Palette) {
    let switchable = app.can_set_mode();
    let buttons = [
        (layout.pvp_btn, "2 Players", Mode::PlayerVsPlayer, palette.primary, palette.on_primary),
        (layout.ai_btn, "vs Computer", Mode::PlayerVsComputer, palette.secondary, palette.on_secondary),
    ];
    for (rect, label, mode, active_fill, active_text) in buttons {
        let active = app.mode() == mode;
        let (fill, text) = if active {
            (active_fill, active_text)
        } else if switchable {
            (palette.surface, palette.text)
        } else {
            (palette.surface, palette.muted)
        };
        draw_button(d, rect, label, fill, text);
    }
}

fn draw_score_panel(d: &mut RaylibDrawHandle, app: &App, palette: &Palette) {
    let scores = app.scores();
    let y = SCORE_Y as i32;

    d.draw_text("X", MARGIN as i32 + 8, y + 8, 30, palette.primary);
    d.draw_text(&format!("{}", scores.x), MARGIN as i32 + 40, y + 12, 24, palette.text);

    let o_label = format!("{}", scores.o);
    let o_width = d.measure_text(&o_label, 24);
    let right = (MARGIN + BOARD_SIZE) as i32;
    d.draw_text(&o_label, right - 8 - o_width, y + 12, 24, palette.text);
    d.draw_text("O", right - 40 - o_width, y + 8, 30, palette.secondary);

    let turn = format!("Turn: {}", app.game().current_player());
    let turn_width = d.measure_text(&turn, 20);
    let center_x = WINDOW_WIDTH / 2;
    d.draw_text(&turn, center_x - turn_width / 2, y + 4, 20, palette.text);

    let mode_label = match app.mode() {
        Mode::PlayerVsPlayer => "vs Player",
        Mode::PlayerVsComputer => "vs Computer",
    };
    let mode_width = d.measure_text(mode_label, 14);
    d.draw_text(mode_label, center_x - mode_width / 2, y + 32, 14, palette.muted);
}

fn draw_board(d: &mut RaylibDrawHandle, layout: &Layout, app: &App, palette: &Palette) {
    let winning_line = app.game().winning_line();
    for (i, rect) in layout.cells.iter().enumerate() {
        let winning = winning_line.is_some_and(|line| line.contains(&i));

        d.draw_rectangle_rounded(*rect, 0.08, 6, palette.surface);
        if winning {
            d.draw_rectangle_lines_ex(*rect, 3.0, palette.accent);
        } else {
            d.draw_rectangle_lines_ex(*rect, 1.0, palette.border);
        }

        let (label, color) = match app.game().board()[i] {
            Cell::Empty => continue,
            Cell::Occupied(Player::X) => ("X", palette.primary),
            Cell::Occupied(Player::O) => ("O", palette.secondary),
        };
        let width = d.measure_text(label, MARK_TEXT_SIZE);
        d.draw_text(
            label,
            (rect.x + (rect.width - width as f32) / 2.0) as i32,
            (rect.y + (rect.height - MARK_TEXT_SIZE as f32) / 2.0) as i32,
            MARK_TEXT_SIZE,
            color,
        );
    }
}

fn draw_controls(d: &mut RaylibDrawHandle, layout: &Layout, app: &App, palette: &Palette) {
    draw_button(d, layout.reset_btn, "Reset All", palette.accent, Color::WHITE);

    let (fill, text) = if app.can_new_round() {
        (palette.primary, palette.on_primary)
    } else {
        (palette.surface, palette.muted)
    };
    draw_button(d, layout.new_round_btn, "New Round", fill, text);

    let label = app.result_label();
    let width = d.measure_text(&label, 16);
    d.draw_text(
        &label,
        WINDOW_WIDTH / 2 - width / 2,
        (CONTROLS_Y + 12.0) as i32,
        16,
        palette.text,
    );

    let draws = format!("Draws: {}", app.scores().draws);
    let draws_width = d.measure_text(&draws, 16);
    d.draw_text(&draws, WINDOW_WIDTH / 2 - draws_width / 2, DRAWS_Y, 16, palette.muted);
}
