// src/noyau/operateurs.rs
//
// Table des opérateurs (statique, construite une fois, jamais modifiée).
//
// Clé = texte exact du bouton / symbole tapé.
// La clé "-" désigne la soustraction binaire : le moins unaire est décidé
// par la tokenisation selon le contexte (voir jetons.rs). "±" est l'alias
// direct de la négation.

use std::collections::HashMap;
use std::sync::OnceLock;

use num_traits::{Float, FloatConst};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Associativite {
    Gauche,
    Droite,
}

/// Fonction d'un opérateur unaire (donnée simple, comparable en test).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FnUnaire {
    Negation,
    Racine,
    Carre,
    Sin,
    Cos,
    Tan,
}

impl FnUnaire {
    pub fn appliquer<F: Float>(self, x: F) -> F {
        match self {
            FnUnaire::Negation => -x,
            FnUnaire::Racine => x.sqrt(),
            FnUnaire::Carre => x * x,
            FnUnaire::Sin => x.sin(),
            FnUnaire::Cos => x.cos(),
            FnUnaire::Tan => x.tan(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FnBinaire {
    Addition,
    Soustraction,
    Multiplication,
    Division,
}

impl FnBinaire {
    /// Arithmétique flottante pure : pas de contrôle de domaine (÷0 => ±∞ / NaN).
    pub fn appliquer<F: Float>(self, a: F, b: F) -> F {
        match self {
            FnBinaire::Addition => a + b,
            FnBinaire::Soustraction => a - b,
            FnBinaire::Multiplication => a * b,
            FnBinaire::Division => a / b,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpUnaire {
    pub fonction: FnUnaire,
    pub precedence: u8,
    pub assoc: Associativite,
    pub symbole: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpBinaire {
    pub fonction: FnBinaire,
    pub precedence: u8,
    pub assoc: Associativite,
    pub symbole: &'static str,
}

/// Métadonnées associées à une clé de la table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operateur {
    Constante { valeur: f64, symbole: &'static str },
    Ouvrante,
    Fermante,
    Unaire(OpUnaire),
    Binaire(OpBinaire),
    Egal,
    Clear(&'static str),
}

/* ------------------------ Opérateurs nommés ------------------------ */

const fn unaire(
    fonction: FnUnaire,
    precedence: u8,
    assoc: Associativite,
    symbole: &'static str,
) -> OpUnaire {
    OpUnaire {
        fonction,
        precedence,
        assoc,
        symbole,
    }
}

const fn binaire(fonction: FnBinaire, precedence: u8, symbole: &'static str) -> OpBinaire {
    OpBinaire {
        fonction,
        precedence,
        assoc: Associativite::Gauche,
        symbole,
    }
}

pub const MULTIPLICATION: OpBinaire = binaire(FnBinaire::Multiplication, 4, "×");
pub const DIVISION: OpBinaire = binaire(FnBinaire::Division, 4, "÷");
pub const ADDITION: OpBinaire = binaire(FnBinaire::Addition, 2, "+");
pub const SOUSTRACTION: OpBinaire = binaire(FnBinaire::Soustraction, 2, "-");

pub const NEGATION: OpUnaire = unaire(FnUnaire::Negation, 6, Associativite::Droite, "-");
pub const RACINE: OpUnaire = unaire(FnUnaire::Racine, 8, Associativite::Droite, "√");
pub const CARRE: OpUnaire = unaire(FnUnaire::Carre, 8, Associativite::Gauche, "²");
pub const SIN: OpUnaire = unaire(FnUnaire::Sin, 8, Associativite::Droite, "sin");
pub const COS: OpUnaire = unaire(FnUnaire::Cos, 8, Associativite::Droite, "cos");
pub const TAN: OpUnaire = unaire(FnUnaire::Tan, 8, Associativite::Droite, "tan");

/* ------------------------ Table (lazy, lecture seule) ------------------------ */

fn table() -> &'static HashMap<&'static str, Operateur> {
    static TABLE: OnceLock<HashMap<&'static str, Operateur>> = OnceLock::new();

    TABLE.get_or_init(|| {
        let mut t = HashMap::new();

        t.insert("=", Operateur::Egal);
        t.insert("C", Operateur::Clear("C"));
        t.insert("AC", Operateur::Clear("AC"));

        t.insert(
            "π",
            Operateur::Constante {
                valeur: f64::PI(),
                symbole: "π",
            },
        );
        t.insert(
            "e",
            Operateur::Constante {
                valeur: f64::E(),
                symbole: "e",
            },
        );

        t.insert("(", Operateur::Ouvrante);
        t.insert(")", Operateur::Fermante);

        for op in [MULTIPLICATION, DIVISION, ADDITION, SOUSTRACTION] {
            t.insert(op.symbole, Operateur::Binaire(op));
        }

        for op in [RACINE, CARRE, SIN, COS, TAN] {
            t.insert(op.symbole, Operateur::Unaire(op));
        }
        t.insert("x²", Operateur::Unaire(CARRE));
        t.insert("±", Operateur::Unaire(NEGATION));

        t
    })
}

/// Recherche exacte d'un symbole.
pub fn lookup(symbole: &str) -> Option<&'static Operateur> {
    table().get(symbole)
}

/// Vrai si `debut` est le préfixe (non vide) d'au moins une clé.
pub fn is_prefix(debut: &str) -> bool {
    !debut.is_empty() && table().keys().any(|k| k.starts_with(debut))
}

/// Vrai si `symbole` est une clé ET qu'aucune clé plus longue ne le prolonge.
/// Dans ce cas la tokenisation peut l'émettre sans attendre le caractère suivant.
pub fn is_terminal(symbole: &str) -> bool {
    lookup(symbole).is_some()
        && !table()
            .keys()
            .any(|k| k.len() > symbole.len() && k.starts_with(symbole))
}
