//! Input and evaluation core of a scientific keypad calculator.
//!
//! Button presses edit an [`ExpressionBuffer`]; on "=" the buffer text goes
//! through [`normalize`] (implicit multiplication) and then [`evaluate`],
//! which yields a number or a single [`EvaluationResult::Error`].

pub mod buffer;
pub mod calc_engine;
pub mod format;
pub mod keymap;
pub mod normalize;
pub mod session;

pub use buffer::{edit, BinaryOp, Constant, EditOp, ExpressionBuffer, Function};
pub use calc_engine::{evaluate, AngleMode, EvaluationResult, Number};
pub use format::format;
pub use normalize::normalize;
