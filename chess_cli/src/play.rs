//! The interactive game loop: prints the board, reads one command per line,
//! and hands moves to the rules engine.

use std::io::{self, BufRead, Write};

use log::debug;
use rchess::ui::renderer::BoardRenderer;
use rchess::{parse_square, ChessError, Color, Game, GameStatus, Move, Promotion};

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    Resigned { winner: Color },
    Draw,
    Quit,
    EndOfInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Move { mv: Move, offers_draw: bool },
    Resign,
    Quit,
}

/// Parse `e2 e4`, `e7 e8 N`, `e2 e4 draw?`, `resign` or `quit`.
pub fn parse_command(line: &str) -> Result<Command, ChessError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        ["quit"] | ["q"] => Ok(Command::Quit),
        ["resign"] => Ok(Command::Resign),
        [from, to, rest @ ..] => {
            let mut mv = Move::new(parse_square(from)?, parse_square(to)?);
            let mut offers_draw = false;
            for token in rest {
                let mut chars = token.chars();
                match (chars.next(), chars.next()) {
                    _ if *token == "draw?" => offers_draw = true,
                    (Some(c), None) => {
                        let promotion = Promotion::from_letter(c)
                            .ok_or_else(|| ChessError::InvalidNotation(token.to_string()))?;
                        mv = mv.with_promotion(promotion);
                    }
                    _ => return Err(ChessError::InvalidNotation(token.to_string())),
                }
            }
            Ok(Command::Move { mv, offers_draw })
        }
        _ => Err(ChessError::InvalidNotation(line.to_string())),
    }
}

fn title(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}

pub fn run<R, W>(game: &mut Game, input: R, out: &mut W, cfg: &Config) -> io::Result<Outcome>
where
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();
    let mut draw_offered = false;

    loop {
        writeln!(out)?;
        write!(out, "{}", BoardRenderer::render(game.board(), cfg.style(), cfg.coordinates))?;

        let status = match game.status() {
            Ok(status) => status,
            Err(e) => {
                writeln!(out, "{}", e)?;
                return Ok(Outcome::Quit);
            }
        };
        match status {
            GameStatus::Checkmate { winner } => {
                writeln!(out, "Checkmate")?;
                writeln!(out, "{} wins", title(winner))?;
                return Ok(Outcome::Checkmate { winner });
            }
            GameStatus::Stalemate => {
                writeln!(out, "Stalemate")?;
                return Ok(Outcome::Stalemate);
            }
            GameStatus::Check => writeln!(out, "Check")?,
            GameStatus::InProgress => {}
        }

        let side = game.current_player();
        loop {
            write!(out, "{}'s move: ", title(side))?;
            out.flush()?;
            let Some(line) = lines.next() else {
                return Ok(Outcome::EndOfInput);
            };
            let line = line?;
            let line = line.trim();

            if std::mem::take(&mut draw_offered) && line == "draw" {
                writeln!(out, "Draw")?;
                return Ok(Outcome::Draw);
            }

            match parse_command(line) {
                Ok(Command::Quit) => return Ok(Outcome::Quit),
                Ok(Command::Resign) => {
                    let winner = side.opposite();
                    writeln!(out, "{} wins", title(winner))?;
                    return Ok(Outcome::Resigned { winner });
                }
                Ok(Command::Move { mv, offers_draw }) => {
                    let mut promotion = mv.promotion.unwrap_or(cfg.default_promotion.into());
                    match game.play(mv.from, mv.to, &mut promotion) {
                        Ok(_) => {
                            draw_offered = offers_draw;
                            break;
                        }
                        Err(e) => {
                            debug!("{}: {}", mv, e);
                            writeln!(out, "Illegal move, try again")?;
                        }
                    }
                }
                Err(e) => {
                    debug!("{}", e);
                    writeln!(out, "Invalid input format")?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_script(script: &str) -> (Outcome, String) {
        let mut game = Game::new();
        let mut out = Vec::new();
        let outcome = run(&mut game, script.as_bytes(), &mut out, &Config::default()).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn parses_moves_and_keywords() {
        let e2 = parse_square("e2").unwrap();
        let e4 = parse_square("e4").unwrap();
        assert_eq!(
            parse_command("e2 e4").unwrap(),
            Command::Move { mv: Move::new(e2, e4), offers_draw: false }
        );
        assert_eq!(
            parse_command("e2 e4 draw?").unwrap(),
            Command::Move { mv: Move::new(e2, e4), offers_draw: true }
        );
        match parse_command("a7 a8 n").unwrap() {
            Command::Move { mv, .. } => assert_eq!(mv.promotion, Some(Promotion::Knight)),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(parse_command("resign").unwrap(), Command::Resign);
        assert_eq!(parse_command("quit").unwrap(), Command::Quit);
        assert!(parse_command("e9 e4").is_err());
        assert!(parse_command("e2").is_err());
        assert!(parse_command("a7 a8 X").is_err());
    }

    #[test]
    fn fools_mate_ends_the_game() {
        let (outcome, text) = play_script("f2 f3\ne7 e5\ng2 g4\nd8 h4\n");
        assert_eq!(outcome, Outcome::Checkmate { winner: Color::Black });
        assert!(text.contains("Checkmate\nBlack wins"));
    }

    #[test]
    fn illegal_and_malformed_input_reprompts() {
        let (outcome, text) = play_script("e2 e5\nzz\ne2 e4\n");
        assert_eq!(outcome, Outcome::EndOfInput);
        assert!(text.contains("Illegal move, try again"));
        assert!(text.contains("Invalid input format"));
        assert!(text.contains("Black's move: "));
    }

    #[test]
    fn resign_and_draw() {
        let (outcome, _) = play_script("e2 e4\nresign\n");
        assert_eq!(outcome, Outcome::Resigned { winner: Color::White });

        let (outcome, text) = play_script("e2 e4 draw?\ndraw\n");
        assert_eq!(outcome, Outcome::Draw);
        assert!(text.ends_with("Draw\n"));
    }
}
