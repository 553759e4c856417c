pub mod board;
pub mod engine;
pub mod error;
pub mod movement;
pub mod mv;
pub mod piece;
pub mod square;
