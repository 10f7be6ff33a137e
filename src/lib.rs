//! Calculatrice RPN — évaluateur d'expressions infixes en flottant.
//!
//! `evaluate("2+3×4") == Some(14.0)`. Symboles acceptés : `× ÷ + - ± √ ² x²
//! sin cos tan π e ( ) =`.

pub mod affichage;
pub mod noyau;

pub use noyau::{eval_expression, evaluate, Demarche, ErreurEval};
