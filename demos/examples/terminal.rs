// Copyright 2026 the Whorl Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animate a pattern in the terminal.
//!
//! Each character cell shows two pixels stacked vertically using the upper
//! half block, so the canvas is as wide as the terminal and twice as tall
//! (minus the status line). Only cells that changed since the previous frame
//! are redrawn. Resizing the terminal starts a fresh pattern sized to it.
//!
//! Quit with `q`, `Esc`, or `Ctrl-C`.
//!
//! Run:
//! - `cargo run -p whorl_demos --example terminal`

use std::io::{self, Write};
use std::process;
use std::time::Duration;

use anyhow::{Result, bail};
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{cursor, execute, queue, style, terminal};
use rand::SeedableRng;
use rand::rngs::StdRng;
use whorl::Config;
use whorl_raster::{Canvas, FramePacer, MAGENTA, Rgb, Stage};

/// Rows reserved below the canvas for the status line.
const STATUS_ROWS: u16 = 1;
const UPPER_HALF: char = '\u{2580}';

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let (cols, rows) = terminal::size()?;
    if cols < 8 || rows < 4 + STATUS_ROWS {
        bail!(
            "Terminal too small: need at least 8x{}, have {cols}x{rows}",
            4 + STATUS_ROWS
        );
    }

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::Clear(terminal::ClearType::All),
    )?;

    let result = run_loop(&mut stdout, cols, rows);

    // Always restore terminal state.
    let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn new_stage(cols: u16, rows: u16) -> Stage<StdRng> {
    let width = u32::from(cols);
    let height = u32::from(rows.saturating_sub(STATUS_ROWS)) * 2;
    Stage::new(width, height, Config::default(), StdRng::from_entropy())
}

fn run_loop(stdout: &mut io::Stdout, cols: u16, rows: u16) -> Result<()> {
    let mut stage = new_stage(cols, rows);
    let mut pacer = FramePacer::new(stage.pattern().config().fps);
    let mut shown: Vec<(Rgb<u8>, Rgb<u8>)> = Vec::new();
    let mut frame_no: u64 = 0;

    loop {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(());
                    }
                    _ => {}
                },
                Event::Resize(c, r) if c >= 8 && r >= 4 + STATUS_ROWS => {
                    stage = new_stage(c, r);
                    shown.clear();
                    queue!(stdout, terminal::Clear(terminal::ClearType::All))?;
                }
                _ => {}
            }
        }

        let frame = stage.tick();
        present(stdout, frame, &mut shown)?;
        frame_no += 1;
        render_status(stdout, &stage, frame_no)?;
        stdout.flush()?;
        pacer.wait();
    }
}

/// Queue every cell whose pair of pixels differs from what is on screen.
fn present(stdout: &mut io::Stdout, frame: &Canvas, shown: &mut Vec<(Rgb<u8>, Rgb<u8>)>) -> Result<()> {
    let cols = frame.width();
    let cell_rows = frame.height() / 2;
    let total = (cols * cell_rows) as usize;
    if shown.len() != total {
        shown.clear();
        shown.resize(total, (MAGENTA, MAGENTA));
    }
    for row in 0..cell_rows {
        for col in 0..cols {
            let top = *frame.image().get_pixel(col, row * 2);
            let bottom = *frame.image().get_pixel(col, row * 2 + 1);
            let slot = &mut shown[(row * cols + col) as usize];
            if *slot == (top, bottom) {
                continue;
            }
            *slot = (top, bottom);
            let mut cs = style::ContentStyle::default();
            cs.foreground_color = Some(to_ct_color(top));
            cs.background_color = Some(to_ct_color(bottom));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Canvas dimensions come from the terminal size."
            )]
            let (x, y) = (col as u16, row as u16);
            queue!(
                stdout,
                cursor::MoveTo(x, y),
                style::PrintStyledContent(style::StyledContent::new(cs, UPPER_HALF)),
            )?;
        }
    }
    Ok(())
}

fn render_status(stdout: &mut io::Stdout, stage: &Stage<StdRng>, frame_no: u64) -> Result<()> {
    let pattern = stage.pattern();
    let symmetry = match pattern.goal() {
        Some(goal) => format!("{} -> {goal}", pattern.symmetry()),
        None => pattern.symmetry().to_string(),
    };
    let status = format!(
        " frame {frame_no} | segments {} | symmetry {symmetry} | spin {:+.2} | q: quit ",
        pattern.complexity(),
        pattern.spin(),
    );
    let mut cs = style::ContentStyle::default();
    cs.attributes.set(style::Attribute::Dim);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Canvas height comes from the terminal size."
    )]
    let y = (stage.frame().height() / 2) as u16;
    queue!(
        stdout,
        cursor::MoveTo(0, y),
        terminal::Clear(terminal::ClearType::CurrentLine),
        style::PrintStyledContent(style::StyledContent::new(cs, status)),
    )?;
    Ok(())
}

fn to_ct_color(Rgb([r, g, b]): Rgb<u8>) -> style::Color {
    style::Color::Rgb { r, g, b }
}
