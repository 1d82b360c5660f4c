use minegrid_core::{Coord, Coord2};

/// Terminal columns taken by one grid cell.
pub(crate) const CELL_WIDTH: u16 = 3;
/// Terminal rows taken by one grid cell.
pub(crate) const CELL_HEIGHT: u16 = 1;
/// Top-left corner of the board, below the mine counter.
pub(crate) const BOARD_ORIGIN: (u16, u16) = (1, 2);

const PLAY_AGAIN: &str = "[ Play again ]";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub(crate) const fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && column - self.x < self.width
            && row >= self.y
            && row - self.y < self.height
    }
}

/// Where the board and the widgets around it sit on screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct BoardLayout {
    origin: (u16, u16),
    size: Coord,
}

impl BoardLayout {
    pub(crate) fn new(size: Coord) -> Self {
        Self {
            origin: BOARD_ORIGIN,
            size,
        }
    }

    /// Maps a terminal position to the grid cell drawn there, if any.
    pub(crate) fn cell_at(&self, column: u16, row: u16) -> Option<Coord2> {
        let dx = column.checked_sub(self.origin.0)?;
        let dy = row.checked_sub(self.origin.1)?;
        let x = Coord::try_from(dx / CELL_WIDTH).ok()?;
        let y = Coord::try_from(dy / CELL_HEIGHT).ok()?;
        (x < self.size && y < self.size).then_some((x, y))
    }

    /// Terminal position of the top-left corner of a cell.
    pub(crate) fn cell_origin(&self, (x, y): Coord2) -> (u16, u16) {
        (
            self.origin.0 + u16::from(x) * CELL_WIDTH,
            self.origin.1 + u16::from(y) * CELL_HEIGHT,
        )
    }

    pub(crate) fn board_rect(&self) -> Rect {
        Rect {
            x: self.origin.0,
            y: self.origin.1,
            width: u16::from(self.size) * CELL_WIDTH,
            height: u16::from(self.size) * CELL_HEIGHT,
        }
    }

    pub(crate) fn counter_position(&self) -> (u16, u16) {
        (self.origin.0, 0)
    }

    pub(crate) fn message_position(&self) -> (u16, u16) {
        let board = self.board_rect();
        (board.x, board.y + board.height + 1)
    }

    pub(crate) fn play_again_label(&self) -> &'static str {
        PLAY_AGAIN
    }

    /// The button shown under the end-of-game message, centered on the board.
    pub(crate) fn play_again_button(&self) -> Rect {
        let board = self.board_rect();
        let width = PLAY_AGAIN.len() as u16;
        let (_, message_row) = self.message_position();
        Rect {
            x: board.x + board.width.saturating_sub(width) / 2,
            y: message_row + 2,
            width,
            height: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_cell_by_integer_division() {
        let layout = BoardLayout::new(10);
        let (x0, y0) = BOARD_ORIGIN;

        assert_eq!(layout.cell_at(x0, y0), Some((0, 0)));
        assert_eq!(layout.cell_at(x0 + CELL_WIDTH - 1, y0), Some((0, 0)));
        assert_eq!(layout.cell_at(x0 + CELL_WIDTH, y0), Some((1, 0)));
        assert_eq!(layout.cell_at(x0 + 3 * CELL_WIDTH + 1, y0 + 4), Some((3, 4)));
    }

    #[test]
    fn rejects_positions_outside_board() {
        let layout = BoardLayout::new(4);
        let (x0, y0) = BOARD_ORIGIN;

        assert_eq!(layout.cell_at(x0 - 1, y0), None);
        assert_eq!(layout.cell_at(x0, y0 - 1), None);
        assert_eq!(layout.cell_at(x0 + 4 * CELL_WIDTH, y0), None);
        assert_eq!(layout.cell_at(x0, y0 + 4 * CELL_HEIGHT), None);
        assert_eq!(layout.cell_at(u16::MAX, u16::MAX), None);
    }

    #[test]
    fn cell_origin_maps_back_to_the_cell() {
        let layout = BoardLayout::new(10);
        for coords in [(0, 0), (9, 9), (4, 7)] {
            let (column, row) = layout.cell_origin(coords);
            assert_eq!(layout.cell_at(column, row), Some(coords));
        }
    }

    #[test]
    fn play_again_button_sits_below_board() {
        let layout = BoardLayout::new(10);
        let button = layout.play_again_button();
        let board = layout.board_rect();

        assert!(button.y >= board.y + board.height);
        assert!(button.contains(button.x, button.y));
        assert!(button.contains(button.x + button.width - 1, button.y));
        assert!(!button.contains(button.x + button.width, button.y));
        assert!(!button.contains(button.x, button.y + 1));
        assert_eq!(layout.cell_at(button.x, button.y), None);
    }
}
