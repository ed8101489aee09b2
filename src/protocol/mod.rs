//! Line protocol handling.
//!
//! This module implements the command parser for the main loop and the
//! compact notation used to read and print a round's placements.

pub mod notation;
pub mod parser;

pub use notation::{
    format_assignment, format_placements, parse_assignment, parse_id_list, NotationError,
};
pub use parser::{parse_command, Command, NewGameParams};
