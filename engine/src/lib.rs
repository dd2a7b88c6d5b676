mod bits;
mod booth;
pub mod error;

pub use bits::{Bits, MAX_WIDTH};
pub use booth::{
    multiply, Multiplication, StepAction, TraceStep, ACCUMULATOR_WIDTH, OPERAND_WIDTH,
};
pub use error::RangeError;
