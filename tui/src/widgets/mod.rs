//! Custom widgets

mod text_block;

pub use text_block::{wrap_lines, TextBlock, CURSOR};
