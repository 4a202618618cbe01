//! C stub generation for instructions found by `sailgen-parser`.

pub mod c_emitter;
pub mod options;

pub use c_emitter::{HEADER, generate, render_instruction};
pub use options::{EmitOptions, MnemonicStyle};
