// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> valeur
//
// Règles de dépilement (to_rpn) :
// - on ne dépile que si l'opérateur ENTRANT est associatif à gauche
//   et que le sommet a une précédence >= à la sienne ;
// - un opérateur entrant associatif à droite ne dépile jamais : les chaînes
//   √√x, sin-x... s'empilent et ne se déroulent qu'en fin d'entrée ou à ')'.
//
// NOTE: c'est volontairement différent du shunting-yard "manuel" (qui
// regarderait aussi l'associativité sur les égalités). Les résultats
// attendus des tests reposent sur cette règle : ne pas "corriger".

use super::erreur::ErreurEval;
use super::jetons::Tok;
use super::operateurs::Associativite;

fn precedence(t: &Tok) -> u8 {
    match t {
        Tok::Unaire(op) => op.precedence,
        Tok::Binaire(op) => op.precedence,
        _ => 0,
    }
}

fn assoc(t: &Tok) -> Associativite {
    match t {
        Tok::Unaire(op) => op.assoc,
        Tok::Binaire(op) => op.assoc,
        _ => Associativite::Gauche,
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Num(2), Binaire(+), Num(3), Binaire(×), Num(4)]
///   rpn:    [Num(2), Num(3), Num(4), Binaire(×), Binaire(+)]
///
/// Jamais d'erreur ici : une ')' orpheline vide la pile, une '(' non fermée
/// est abandonnée en fin d'entrée. Les incohérences restantes sont détectées
/// par `eval_rpn`.
pub fn to_rpn(tokens: &[Tok]) -> Vec<Tok> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Tok> = Vec::new();

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num { .. } | Tok::Const { .. } => out.push(tok),

            Tok::Unaire(_) | Tok::Binaire(_) => {
                let doit_pop = |top: &Tok| {
                    !matches!(top, Tok::LPar)
                        && assoc(&tok) == Associativite::Gauche
                        && precedence(top) >= precedence(&tok)
                };

                while let Some(top) = ops.pop() {
                    if doit_pop(&top) {
                        out.push(top);
                    } else {
                        ops.push(top);
                        break;
                    }
                }

                ops.push(tok);
            }

            Tok::LPar => ops.push(tok),

            Tok::RPar => {
                // dépile jusqu'à '(' (qui est jetée)
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        break;
                    }
                    out.push(top);
                }
            }

            Tok::Egal | Tok::Clear(_) => {}
        }
    }

    // vide la pile ops ; les '(' non fermées disparaissent
    while let Some(op) = ops.pop() {
        if !matches!(op, Tok::LPar) {
            out.push(op);
        }
    }

    out
}

/// Réduit une RPN à une valeur unique.
///
/// Arithmétique flottante standard : ÷0 donne ±∞ ou NaN, pas une erreur.
pub fn eval_rpn(rpn: &[Tok]) -> Result<f64, ErreurEval> {
    let mut st: Vec<f64> = Vec::with_capacity(rpn.len());

    for tok in rpn {
        match tok {
            Tok::Num { valeur, .. } | Tok::Const { valeur, .. } => st.push(*valeur),

            Tok::Unaire(op) => {
                let x = st.pop().ok_or(ErreurEval::PileInsuffisante {
                    symbole: op.symbole,
                })?;
                st.push(op.fonction.appliquer(x));
            }

            Tok::Binaire(op) => {
                let manque = ErreurEval::PileInsuffisante {
                    symbole: op.symbole,
                };
                // droite d'abord, puis gauche
                let b = st.pop().ok_or_else(|| manque.clone())?;
                let a = st.pop().ok_or(manque)?;
                st.push(op.fonction.appliquer(a, b));
            }

            Tok::LPar | Tok::RPar | Tok::Egal | Tok::Clear(_) => {
                return Err(ErreurEval::JetonInattendu {
                    jeton: tok.to_string(),
                })
            }
        }
    }

    match st.as_slice() {
        [v] => Ok(*v),
        reste => Err(ErreurEval::ExpressionMalformee {
            restants: reste.len(),
        }),
    }
}
