use crate::game::board::Board;
use crate::game::piece::{Color, Piece, PieceKind};
use crate::game::square::Square;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStyle {
    /// Chess glyphs, one character per square.
    #[default]
    Unicode,
    /// Two-letter names such as `wK` and `bp`, with `##` for dark empty squares.
    Ascii,
}

/// Simple text renderer for the board.
pub struct BoardRenderer;

impl BoardRenderer {
    /// Draw rank 8 at the top and rank 1 at the bottom. `coordinates`
    /// adds rank numbers on the right and file letters underneath.
    pub fn render(board: &Board, style: RenderStyle, coordinates: bool) -> String {
        let mut output = String::new();
        for row in 0..8u8 {
            for col in 0..8u8 {
                let Some(sq) = Square::new(row, col) else { continue };
                let cell = match board.piece_at(sq) {
                    Some(piece) => Self::piece_cell(&piece, style),
                    None => Self::empty_cell(row, col, style),
                };
                output.push_str(&cell);
                output.push(' ');
            }
            if coordinates {
                output.push_str(&(8 - row).to_string());
            }
            let trimmed = output.trim_end_matches(' ').len();
            output.truncate(trimmed);
            output.push('\n');
        }
        if coordinates {
            let width: usize = match style {
                RenderStyle::Unicode => 1,
                RenderStyle::Ascii => 2,
            };
            let files: Vec<String> = ('a'..='h').map(|f| format!("{:<width$}", f)).collect();
            output.push_str(files.join(" ").trim_end());
            output.push('\n');
        }
        output
    }

    fn piece_cell(piece: &Piece, style: RenderStyle) -> String {
        match style {
            RenderStyle::Ascii => piece.name(),
            RenderStyle::Unicode => {
                let ch = match (piece.color, piece.kind) {
                    (Color::White, PieceKind::Pawn) => '♙',
                    (Color::White, PieceKind::Rook) => '♖',
                    (Color::White, PieceKind::Knight) => '♘',
                    (Color::White, PieceKind::Bishop) => '♗',
                    (Color::White, PieceKind::Queen) => '♕',
                    (Color::White, PieceKind::King) => '♔',
                    (Color::Black, PieceKind::Pawn) => '♟',
                    (Color::Black, PieceKind::Rook) => '♜',
                    (Color::Black, PieceKind::Knight) => '♞',
                    (Color::Black, PieceKind::Bishop) => '♝',
                    (Color::Black, PieceKind::Queen) => '♛',
                    (Color::Black, PieceKind::King) => '♚',
                };
                ch.to_string()
            }
        }
    }

    fn empty_cell(row: u8, col: u8, style: RenderStyle) -> String {
        let light = (row + col) % 2 == 0;
        match (style, light) {
            (RenderStyle::Unicode, _) => ".".to_string(),
            (RenderStyle::Ascii, true) => "  ".to_string(),
            (RenderStyle::Ascii, false) => "##".to_string(),
        }
    }
}
