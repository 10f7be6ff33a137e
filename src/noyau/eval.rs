//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> RPN (shunting-yard) -> réduction sur pile -> f64
//!
//! Aucun état partagé entre deux appels : la table des opérateurs est en
//! lecture seule, tout le reste est local à l'appel.

use tracing::{debug, trace};

use super::erreur::ErreurEval;
use super::jetons::{format_tokens, tokenize};
use super::rpn::{eval_rpn, to_rpn};

/// Trace d'une évaluation (panneau "démarche").
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
}

/// API détaillée : valeur + démarche, ou la cause exacte de l'échec.
pub fn eval_expression(expr_str: &str) -> Result<(f64, Demarche), ErreurEval> {
    // 1) Jetons
    let jetons = tokenize(expr_str)?;
    let jetons_txt = format_tokens(&jetons);
    trace!(jetons = %jetons_txt, "tokenisation");

    // 2) RPN
    let rpn = to_rpn(&jetons);
    let rpn_txt = format_tokens(&rpn);
    trace!(rpn = %rpn_txt, "conversion postfixe");

    // 3) Valeur
    let valeur = eval_rpn(&rpn)?;

    let d = Demarche {
        jetons: jetons_txt,
        rpn: rpn_txt,
    };

    Ok((valeur, d))
}

/// API publique : `Some(valeur)` ou `None`, sans distinction de cause.
///
/// L'appelant (saisie, affichage) décide seul quoi faire d'un échec.
pub fn evaluate(expression: &str) -> Option<f64> {
    match eval_expression(expression) {
        Ok((valeur, _d)) => Some(valeur),
        Err(e) => {
            debug!(expression, erreur = %e, "évaluation échouée");
            None
        }
    }
}
