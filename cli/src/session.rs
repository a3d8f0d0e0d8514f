use std::io::{self, BufRead, Write};

use minegrid_core::{Activation, FlagToggle, GridEngine, from_cell_index};

use crate::input::{Command, HELP};
use crate::render::render;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Reads commands line by line and drives one engine until the player quits or input ends.
pub struct Session<R, W> {
    engine: GridEngine,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(engine: GridEngine, input: R, output: W) -> Self {
        Self {
            engine,
            input,
            output,
        }
    }

    pub fn engine(&self) -> &GridEngine {
        &self.engine
    }

    pub fn run(&mut self) -> io::Result<()> {
        render(&self.engine, &mut self.output)?;

        loop {
            let Some(line) = self.prompt("> ")? else {
                return Ok(());
            };

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(err) => {
                    writeln!(self.output, "{err}")?;
                    continue;
                }
            };
            log::trace!("Command {:?}", command);

            if self.apply(command)? == Flow::Quit {
                return Ok(());
            }
        }
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    fn apply(&mut self, command: Command) -> io::Result<Flow> {
        let result = match command {
            Command::Reveal(coords) => self.engine.activate(coords),
            Command::RevealIndex(index) => match from_cell_index(index, self.engine.size()) {
                Some(coords) => self.engine.activate(coords),
                None => {
                    writeln!(self.output, "There is no cell number {index}")?;
                    return Ok(Flow::Continue);
                }
            },
            Command::Flag(coords) => self.engine.toggle_flag(coords).map(Activation::Toggled),
            Command::FlagMode => {
                let enabled = !self.engine.state().flag_mode;
                let cells = self.engine.set_flag_mode(enabled);
                log::debug!("Flag mode {}, {} flaggable cells", enabled, cells.len());
                return self.redraw();
            }
            Command::Hint => {
                let enabled = !self.engine.state().hint_mode;
                let cells = self.engine.set_hint_mode(enabled);
                if enabled && cells.is_empty() {
                    writeln!(self.output, "No hidden bomb to hint at")?;
                }
                return self.redraw();
            }
            Command::Restart => {
                self.engine.restart();
                return self.redraw();
            }
            Command::Help => {
                writeln!(self.output, "{HELP}")?;
                return Ok(Flow::Continue);
            }
            Command::Quit => return Ok(Flow::Quit),
        };

        match result {
            Ok(activation) => self.report(activation),
            Err(err) => {
                writeln!(self.output, "{err}")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn report(&mut self, activation: Activation) -> io::Result<Flow> {
        log::debug!("Move result {:?}", activation);

        match activation {
            Activation::NoOp | Activation::Toggled(FlagToggle::NoOp) => Ok(Flow::Continue),
            Activation::Lost(_) => {
                render(&self.engine, &mut self.output)?;
                writeln!(self.output, "KABOOM!")?;
                self.offer_restart()
            }
            Activation::Won(_) => {
                render(&self.engine, &mut self.output)?;
                writeln!(self.output, "VICTORY! Mines sweeped!")?;
                self.offer_restart()
            }
            _ => self.redraw(),
        }
    }

    fn offer_restart(&mut self) -> io::Result<Flow> {
        let Some(answer) = self.prompt("Restart? [y/n] ")? else {
            return Ok(Flow::Quit);
        };

        if matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes") {
            self.engine.restart();
            self.redraw()
        } else {
            Ok(Flow::Continue)
        }
    }

    fn redraw(&mut self) -> io::Result<Flow> {
        render(&self.engine, &mut self.output)?;
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minegrid_core::{GameConfig, Phase};

    fn play(script: &str) -> (GridEngine, String) {
        let config = GameConfig::new(5, 5, 5).unwrap();
        let mines = [(2, 0), (2, 1), (2, 2), (2, 3), (2, 4)];
        let engine = GridEngine::from_mine_coords(config, &mines).unwrap();

        let mut output = Vec::new();
        let mut session = Session::new(engine, script.as_bytes(), &mut output);
        session.run().unwrap();
        let engine = session.engine().clone();

        (engine, String::from_utf8(output).unwrap())
    }

    #[test]
    fn winning_then_restarting() {
        let (engine, output) = play("r 0 0\nc 4\ny\nq\n");

        assert!(output.contains("VICTORY! Mines sweeped!"));
        assert!(engine.state().is_first_move());
    }

    #[test]
    fn losing_and_declining_restart_keeps_board() {
        let (engine, output) = play("r 2 2\nn o\nr 0 0\n");

        assert!(output.contains("KABOOM!"));
        assert_eq!(engine.phase(), Phase::Lost);
        assert!(!engine.cell_at((0, 0)).unwrap().is_cleared());
    }

    #[test]
    fn flag_mode_command_turns_reveals_into_flags() {
        let (engine, output) = play("m\nr 3 3\n");

        assert!(output.contains("[flag mode]"));
        assert!(engine.cell_at((3, 3)).unwrap().is_flagged());
        assert_eq!(engine.bombs_remaining(), 4);
    }

    #[test]
    fn bad_input_is_reported_and_skipped() {
        let (engine, output) = play("r 9 9\nc 25\nzap\nf 1 1\n");

        assert!(output.contains("Coordinates (9, 9) are out of bounds"));
        assert!(output.contains("There is no cell number 25"));
        assert!(output.contains("Unknown command `zap`"));
        assert!(engine.cell_at((1, 1)).unwrap().is_flagged());
    }
}
