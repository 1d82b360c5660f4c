use crate::layout::{BoardLayout, CELL_WIDTH};
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use minegrid_core::{CellCount, CellValue, Coord2, EngineCell, GameStatus};
use std::io::{self, Write};

/// How a single cell is drawn.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Glyph {
    pub symbol: char,
    pub fg: Color,
    pub bg: Color,
}

impl Glyph {
    const fn new(symbol: char, fg: Color, bg: Color) -> Self {
        Self { symbol, fg, bg }
    }
}

pub(crate) fn cell_glyph(cell: EngineCell, triggered: bool) -> Glyph {
    match cell {
        EngineCell::Hidden => Glyph::new('·', Color::Black, Color::Grey),
        EngineCell::Flagged => Glyph::new('F', Color::Green, Color::Grey),
        EngineCell::Revealed(CellValue::Mine) if triggered => {
            Glyph::new('*', Color::White, Color::Red)
        }
        EngineCell::Revealed(CellValue::Mine) => Glyph::new('*', Color::Red, Color::Reset),
        EngineCell::Revealed(CellValue::Count(0)) => Glyph::new(' ', Color::Reset, Color::Reset),
        EngineCell::Revealed(CellValue::Count(count)) => {
            let symbol = char::from_digit(count.into(), 10).unwrap_or('?');
            Glyph::new(symbol, Color::Blue, Color::Reset)
        }
    }
}

pub(crate) fn clear<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, ResetColor, Clear(ClearType::All))
}

pub(crate) fn draw_counter<W: Write>(
    out: &mut W,
    layout: &BoardLayout,
    remaining: CellCount,
) -> io::Result<()> {
    let (column, row) = layout.counter_position();
    queue!(
        out,
        MoveTo(column, row),
        Clear(ClearType::CurrentLine),
        Print(format!("Mines left: {}", remaining))
    )
}

pub(crate) fn draw_cell<W: Write>(
    out: &mut W,
    layout: &BoardLayout,
    coords: Coord2,
    glyph: Glyph,
) -> io::Result<()> {
    let (column, row) = layout.cell_origin(coords);
    let pad = " ".repeat(usize::from(CELL_WIDTH / 2));
    queue!(
        out,
        MoveTo(column, row),
        SetForegroundColor(glyph.fg),
        SetBackgroundColor(glyph.bg),
        Print(format!("{pad}{}{pad}", glyph.symbol)),
        ResetColor
    )
}

/// End-of-game message and the button that starts a new game.
pub(crate) fn draw_banner<W: Write>(
    out: &mut W,
    layout: &BoardLayout,
    status: GameStatus,
) -> io::Result<()> {
    let (column, row) = layout.message_position();
    let button = layout.play_again_button();
    let message = match status {
        GameStatus::InProgress => return clear_banner(out, layout),
        GameStatus::Won => "You won!",
        GameStatus::Lost => "Game over! You lost.",
    };
    queue!(
        out,
        MoveTo(column, row),
        Clear(ClearType::CurrentLine),
        Print(message),
        MoveTo(button.x, button.y),
        SetForegroundColor(Color::Black),
        SetBackgroundColor(Color::Grey),
        Print(layout.play_again_label()),
        ResetColor
    )
}

pub(crate) fn clear_banner<W: Write>(out: &mut W, layout: &BoardLayout) -> io::Result<()> {
    let (column, row) = layout.message_position();
    let button = layout.play_again_button();
    queue!(
        out,
        MoveTo(column, row),
        Clear(ClearType::CurrentLine),
        MoveTo(0, button.y),
        Clear(ClearType::CurrentLine)
    )
}
