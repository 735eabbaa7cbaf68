pub mod evaluator;
pub mod value;

pub use evaluator::{EvalError, EvalResult, Evaluator};
pub use value::{Number, Value, ValueMap};
