//! # Console Collaborators
//!
//! Line-based input and text rendering over any `BufRead`/`Write` pair.
//! The turn layout matches the original terminal game: the remaining-turn
//! count, each piece's coordinates and linear position, then the board one
//! marker per cell with a line break after every `width` cells.

use crate::game::{GamePhase, TurnView};
use crate::io::{CommandSource, GameDisplay};
use crate::{config, LamplightResult};
use std::collections::HashSet;
use std::io::{BufRead, ErrorKind, Write};

/// Reads one command line per turn from a buffered reader.
pub struct ConsoleInput<R> {
    reader: R,
}

impl<R: BufRead> ConsoleInput<R> {
    /// Wraps a buffered reader, typically a locked stdin.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> CommandSource for ConsoleInput<R> {
    fn next_command_line(&mut self) -> LamplightResult<String> {
        let mut line = String::new();
        let bytes = self.reader.read_line(&mut line)?;
        if bytes == 0 {
            return Err(std::io::Error::new(
                ErrorKind::UnexpectedEof,
                "command input closed mid-session",
            )
            .into());
        }
        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
    }
}

/// Renders turns and the final outcome to a writer, typically stdout.
pub struct ConsoleDisplay<W> {
    writer: W,
}

impl<W: Write> ConsoleDisplay<W> {
    /// Wraps a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the display and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> GameDisplay for ConsoleDisplay<W> {
    fn show_turn(&mut self, view: &TurnView) -> LamplightResult<()> {
        writeln!(self.writer, "{}", view.remaining_turns)?;
        writeln!(self.writer)?;

        let explorer = view.explorer.position;
        writeln!(
            self.writer,
            "{} {} {} {}",
            config::EXPLORER_MARKER,
            explorer.x,
            explorer.y,
            explorer.to_index(view.width)
        )?;
        for adversary in &view.adversaries {
            writeln!(
                self.writer,
                "{} {} {} {}",
                config::ADVERSARY_MARKER,
                adversary.position.x,
                adversary.position.y,
                adversary.position.to_index(view.width)
            )?;
        }
        writeln!(self.writer)?;

        let explorer_index = explorer.to_index(view.width);
        let adversary_cells: HashSet<u32> = view
            .adversaries
            .iter()
            .map(|piece| piece.position.to_index(view.width))
            .collect();
        for index in 0..view.width * view.height {
            let marker = if index == explorer_index {
                config::EXPLORER_MARKER
            } else if adversary_cells.contains(&index) {
                config::ADVERSARY_MARKER
            } else {
                config::EMPTY_MARKER
            };
            write!(self.writer, "{}", marker)?;
            if (index + 1) % view.width == 0 {
                writeln!(self.writer)?;
            }
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }

    fn show_outcome(&mut self, phase: GamePhase) -> LamplightResult<()> {
        match phase {
            GamePhase::Won => writeln!(self.writer, "YOU WIN")?,
            GamePhase::Lost => writeln!(self.writer, "YOU LOSE")?,
            GamePhase::Playing => {}
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_one_line_per_call() {
        let mut input = ConsoleInput::new(Cursor::new("dd\nwasd\n"));
        assert_eq!(input.next_command_line().unwrap(), "dd");
        assert_eq!(input.next_command_line().unwrap(), "wasd");
    }

    #[test]
    fn test_trims_crlf() {
        let mut input = ConsoleInput::new(Cursor::new("ss\r\n"));
        assert_eq!(input.next_command_line().unwrap(), "ss");
    }

    #[test]
    fn test_eof_is_an_error() {
        let mut input = ConsoleInput::new(Cursor::new(""));
        assert!(input.next_command_line().is_err());
    }
}
