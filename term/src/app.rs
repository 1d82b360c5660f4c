use crate::animation::MineRevealAnimation;
use crate::layout::BoardLayout;
use crate::render;
use bitflags::bitflags;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use minegrid_core::{
    self as game, Coord2, EngineCell, Game, LayoutGenerator, RandomLayoutGenerator,
    RevealOutcome,
};
use std::collections::BTreeSet;
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Upper bound on how long the loop blocks waiting for input.
const IDLE_POLL: Duration = Duration::from_millis(250);

bitflags! {
    /// Parts of the screen that need drawing again.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub(crate) struct Redraw: u8 {
        const CLEAR   = 1;
        const COUNTER = 1 << 1;
        const BOARD   = 1 << 2;
        const BANNER  = 1 << 3;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Control {
    Continue,
    Quit,
}

/// Presentation state around a [`Game`]: input mapping, loss animation, redraw
/// bookkeeping.
#[derive(Debug)]
pub(crate) struct App<G = RandomLayoutGenerator> {
    game: Game<G>,
    layout: BoardLayout,
    animation: MineRevealAnimation,
    redraw: Redraw,
    dirty_cells: Vec<Coord2>,
}

impl<G: LayoutGenerator> App<G> {
    pub(crate) fn new(game: Game<G>) -> Self {
        let layout = BoardLayout::new(game.size());
        Self {
            game,
            layout,
            animation: Default::default(),
            redraw: Redraw::all(),
            dirty_cells: Vec::new(),
        }
    }

    /// The end-of-game banner waits for the loss animation to finish.
    fn shows_banner(&self) -> bool {
        self.game.status().is_finished() && !self.animation.is_running()
    }

    pub(crate) fn poll_timeout(&self, now: Instant) -> Duration {
        self.animation
            .time_to_next_step(now)
            .map_or(IDLE_POLL, |wait| wait.min(IDLE_POLL))
    }

    pub(crate) fn tick(&mut self, now: Instant) {
        let shown = self.animation.tick(now);
        if shown.is_empty() {
            return;
        }
        log::trace!("mines shown: {:?}", shown);
        self.dirty_cells.extend(shown);
        if !self.animation.is_running() {
            self.redraw |= Redraw::BANNER;
        }
    }

    pub(crate) fn handle_event(&mut self, event: Event, now: Instant) -> game::Result<Control> {
        match event {
            Event::Key(key) => return self.on_key(key),
            Event::Mouse(mouse) => self.on_mouse(mouse, now)?,
            Event::Resize(..) => self.redraw = Redraw::all(),
            _ => {}
        }
        Ok(Control::Continue)
    }

    fn on_key(&mut self, key: KeyEvent) -> game::Result<Control> {
        if key.kind == KeyEventKind::Release {
            return Ok(Control::Continue);
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(Control::Quit);
            }
            KeyCode::Char('q') | KeyCode::Esc => return Ok(Control::Quit),
            KeyCode::Char('r') => self.new_game()?,
            _ => {}
        }
        Ok(Control::Continue)
    }

    fn on_mouse(&mut self, mouse: MouseEvent, now: Instant) -> game::Result<()> {
        let MouseEventKind::Down(button) = mouse.kind else {
            return Ok(());
        };

        if self.game.status().is_finished() {
            if self.shows_banner()
                && self
                    .layout
                    .play_again_button()
                    .contains(mouse.column, mouse.row)
            {
                self.new_game()?;
            }
            return Ok(());
        }

        let Some(coords) = self.layout.cell_at(mouse.column, mouse.row) else {
            log::trace!("click outside board at ({}, {})", mouse.column, mouse.row);
            return Ok(());
        };

        match button {
            MouseButton::Left => {
                log::debug!("reveal cell: {:?}", coords);
                let flagged_mines = self.flagged_mines();
                let outcome = self.game.reveal(coords)?;
                if outcome.has_update() {
                    self.apply_reveal(outcome, flagged_mines, now);
                }
            }
            MouseButton::Right => {
                log::debug!("mark cell: {:?}", coords);
                if self.game.toggle_flag(coords)?.has_update() {
                    self.dirty_cells.push(coords);
                    self.redraw |= Redraw::COUNTER;
                }
            }
            MouseButton::Middle => {}
        }
        Ok(())
    }

    /// Mines currently carrying a flag; the loss reveal clears them in the engine.
    fn flagged_mines(&self) -> BTreeSet<Coord2> {
        self.game
            .engine()
            .mine_layout()
            .mines()
            .filter(|&coords| self.game.is_flagged(coords) == Ok(true))
            .collect()
    }

    fn apply_reveal(
        &mut self,
        outcome: RevealOutcome,
        flagged_mines: BTreeSet<Coord2>,
        now: Instant,
    ) {
        match outcome {
            RevealOutcome::Unchanged => {}
            RevealOutcome::Revealed { cells } => self.dirty_cells.extend(cells),
            RevealOutcome::Won { cells } => {
                self.dirty_cells.extend(cells);
                self.redraw |= Redraw::BANNER;
            }
            RevealOutcome::Lost { triggered, mines } => {
                log::debug!("lost on {:?}", triggered);
                self.animation.start(&mines, flagged_mines, now);
                self.tick(now);
            }
        }
    }

    fn new_game(&mut self) -> game::Result<()> {
        self.game.reset()?;
        self.animation.clear();
        self.dirty_cells.clear();
        self.redraw = Redraw::all();
        log::debug!("new game");
        Ok(())
    }

    /// Cell as the player should currently see it.
    fn visible_cell(&self, coords: Coord2) -> game::Result<EngineCell> {
        if self.animation.is_pending_flag(coords) {
            return Ok(EngineCell::Flagged);
        }
        if self.animation.is_pending(coords) {
            return Ok(EngineCell::Hidden);
        }
        self.game.cell_at(coords)
    }

    fn draw_cell<W: Write>(&self, out: &mut W, coords: Coord2) -> io::Result<()> {
        let cell = self.visible_cell(coords).map_err(io::Error::other)?;
        let triggered = self.game.engine().triggered_mine() == Some(coords);
        render::draw_cell(out, &self.layout, coords, render::cell_glyph(cell, triggered))
    }

    pub(crate) fn draw<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if self.redraw.is_empty() && self.dirty_cells.is_empty() {
            return Ok(());
        }

        if self.redraw.contains(Redraw::CLEAR) {
            render::clear(out)?;
        }
        if self.redraw.contains(Redraw::COUNTER) {
            render::draw_counter(out, &self.layout, self.game.remaining_mines())?;
        }
        if self.redraw.contains(Redraw::BOARD) {
            let size = self.game.size();
            for x in 0..size {
                for y in 0..size {
                    self.draw_cell(out, (x, y))?;
                }
            }
        } else {
            for &coords in &self.dirty_cells {
                self.draw_cell(out, coords)?;
            }
        }
        if self.redraw.contains(Redraw::BANNER) {
            if self.shows_banner() {
                render::draw_banner(out, &self.layout, self.game.status())?;
            } else {
                render::clear_banner(out, &self.layout)?;
            }
        }

        self.redraw = Redraw::empty();
        self.dirty_cells.clear();
        out.flush()
    }
}
