//! Calculus routines (differentiation and numeric integration).

pub mod differentiate;
pub mod integrate;

pub use differentiate::differentiate;
pub use integrate::{evaluate, evaluate_constant, integrate};
