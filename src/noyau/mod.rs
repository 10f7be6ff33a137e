//! Noyau d'évaluation flottante
//!
//! Organisation interne :
//! - operateurs.rs : table statique symbole -> métadonnées
//! - jetons.rs     : jetons + tokenisation (implicites, moins unaire, noms collés)
//! - rpn.rs        : shunting-yard + réduction de la RPN
//! - erreur.rs     : causes d'échec
//! - eval.rs       : pipeline complet

pub mod erreur;
pub mod eval;
pub mod jetons;
pub mod operateurs;
pub mod rpn;

#[cfg(test)]
mod tests_proprietes;

// API publique minimale
pub use erreur::ErreurEval;
pub use eval::{eval_expression, evaluate, Demarche};
