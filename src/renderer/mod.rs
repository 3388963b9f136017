//! Terminal renderer
//!
//! Frame composition is pure (a `String`), so it can be tested without a
//! terminal; only `render` touches the screen.

use std::fmt::Write as _;
use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use crate::core::types::{Position, MAX_LIFE};
use crate::game::Game;

const LIFE_BAR_SEGMENTS: i32 = 10;

pub struct TerminalRenderer {
    use_basic_icons: bool,
}

impl TerminalRenderer {
    pub fn new(use_basic_icons: bool) -> Self {
        Self { use_basic_icons }
    }

    /// Compose one frame: the grid, tick counters, then one line per fighter
    pub fn draw(&self, game: &Game) -> String {
        let world = game.world();
        let (width, height) = world.size();

        let mut frame = String::with_capacity((width as usize + 1) * height as usize);
        for y in 0..height {
            for x in 0..width {
                let icon = world
                    .visible_at(Position::new(x, y))
                    .map(|thing| thing.icon(self.use_basic_icons))
                    .unwrap_or(' ');
                frame.push(icon);
            }
            frame.push('\n');
        }

        let _ = writeln!(frame, "ticks: {}  deaths: {}", world.t(), world.deaths());

        for id in game.fighter_ids() {
            let fighter = world.thing(id);
            if fighter.is_alive() {
                let life = fighter.life().unwrap_or(0);
                let _ = writeln!(
                    frame,
                    "{} {} {:3} {}",
                    fighter.name,
                    self.life_bar(life),
                    life,
                    fighter.status()
                );
            } else {
                let skull = if self.use_basic_icons { 'X' } else { '☠' };
                let _ = writeln!(frame, "{} {} [dead]", fighter.name, skull);
            }
        }
        frame
    }

    fn life_bar(&self, life: i32) -> String {
        let filled = (life.clamp(0, MAX_LIFE) * LIFE_BAR_SEGMENTS + MAX_LIFE - 1) / MAX_LIFE;
        let (full, empty) = if self.use_basic_icons {
            ('#', '.')
        } else {
            ('█', '░')
        };
        (0..LIFE_BAR_SEGMENTS)
            .map(|segment| if segment < filled { full } else { empty })
            .collect()
    }

    /// Clear the terminal and print the current frame
    ///
    /// Counters are drawn in cyan, living fighters in green, the fallen in
    /// dark grey; the grid itself keeps the terminal's default color.
    pub fn render(&self, game: &Game, out: &mut impl Write) -> io::Result<()> {
        queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;

        let frame = self.draw(game);
        let grid_rows = game.world().size().1 as usize;
        for (index, line) in frame.lines().enumerate() {
            if index < grid_rows {
                queue!(out, Print(line), Print("\r\n"))?;
                continue;
            }
            let color = if index == grid_rows {
                Color::Cyan
            } else if line.contains("[dead]") {
                Color::DarkGrey
            } else {
                Color::Green
            };
            queue!(
                out,
                SetForegroundColor(color),
                Print(line),
                ResetColor,
                Print("\r\n")
            )?;
        }
        out.flush()
    }
}
