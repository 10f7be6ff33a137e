// src/noyau/erreur.rs

use thiserror::Error;

/// Échecs possibles du pipeline jetons -> RPN -> valeur.
///
/// `evaluate` les rabat tous sur `None` ; `eval_expression` les conserve
/// (utile pour la démarche et les tests).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurEval {
    /// Fragment de texte qui ne correspond à aucun nombre ni symbole connu.
    #[error("fragment non reconnu: {fragment:?}")]
    Tokenisation { fragment: String },

    /// Opérateur rencontré sans assez d'opérandes sur la pile.
    #[error("opérandes insuffisants pour '{symbole}'")]
    PileInsuffisante { symbole: &'static str },

    /// Fin de RPN avec zéro ou plusieurs valeurs restantes.
    #[error("expression malformée ({restants} valeur(s) restante(s))")]
    ExpressionMalformee { restants: usize },

    /// Jeton qui n'a rien à faire dans une RPN (parenthèse, égal...).
    #[error("jeton inattendu en RPN: {jeton:?}")]
    JetonInattendu { jeton: String },
}
