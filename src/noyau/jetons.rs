// src/noyau/jetons.rs
//
// Tokenisation d'une saisie "boutons de calculatrice" : pas de séparateur
// obligatoire, noms collés (sin30), multiplication implicite (2π, )(, 2√3),
// moins unaire décidé par le contexte.
//
// Deux accumulateurs :
// - `nombre`  : littéral numérique en cours (chiffres + un seul '.')
// - `symbole` : nom multi-caractère en cours (sin, cos, tan, x², AC)

use std::fmt;

use super::erreur::ErreurEval;
use super::operateurs::{
    is_prefix, is_terminal, lookup, Associativite, FnBinaire, OpBinaire, OpUnaire, Operateur,
    MULTIPLICATION, NEGATION,
};

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num { valeur: f64, texte: String },
    Const { valeur: f64, symbole: &'static str },
    LPar,
    RPar,
    Unaire(OpUnaire),
    Binaire(OpBinaire),
    Egal,
    /// Jamais produit par `tokenize` (C / AC y sont refusés).
    Clear(&'static str),
}

impl Tok {
    /// Texte d'origine du jeton (sert à ré-afficher l'expression).
    pub fn symbole(&self) -> &str {
        match self {
            Tok::Num { texte, .. } => texte,
            Tok::Const { symbole, .. } => symbole,
            Tok::LPar => "(",
            Tok::RPar => ")",
            Tok::Unaire(op) => op.symbole,
            Tok::Binaire(op) => op.symbole,
            Tok::Egal => "=",
            Tok::Clear(s) => s,
        }
    }
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbole())
    }
}

/// Tokenize une chaîne en jetons.
///
/// Échoue si un fragment ne correspond à aucun nombre ni symbole de la table,
/// ou si `C` / `AC` apparaît dans l'expression.
/// Un `=` termine la lecture : la suite est ignorée.
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurEval> {
    let mut t = Tokeniseur::default();

    for c in s.chars() {
        if t.termine {
            break;
        }
        t.caractere(c)?;
    }

    if !t.termine {
        t.flush_symbole()?;
        t.flush_nombre()?;
    }

    Ok(t.out)
}

/// Format utilitaire (démarche) : jetons séparés par une espace.
/// Le texte produit se re-tokenize en la même suite de symboles.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .map(Tok::symbole)
        .collect::<Vec<_>>()
        .join(" ")
}

/* ------------------------ État de lecture ------------------------ */

#[derive(Default)]
struct Tokeniseur {
    out: Vec<Tok>,
    nombre: String,
    symbole: String,
    termine: bool,
}

impl Tokeniseur {
    fn caractere(&mut self, c: char) -> Result<(), ErreurEval> {
        if c.is_whitespace() {
            self.flush_symbole()?;
            return self.flush_nombre();
        }

        if c.is_ascii_digit() || c == '.' {
            self.flush_symbole()?;
            if !self.termine {
                self.chiffre(c);
            }
            return Ok(());
        }

        let mut candidat = self.symbole.clone();
        candidat.push(c);

        if is_prefix(&candidat) {
            self.symbole = candidat;
            if is_terminal(&self.symbole) {
                self.flush_symbole()?;
            }
            return Ok(());
        }

        // Le caractère ne prolonge plus aucun nom : on émet ce qui était
        // reconnu jusque-là, puis on rejoue `c` sur un tampon vide.
        // Avec la table actuelle toute clé est terminale (déjà émise plus
        // haut), donc un tampon qui arrive ici n'est qu'un préfixe et
        // flush_symbole échoue. Le rejeu ne sert que si une clé devient un
        // jour préfixe d'une clé plus longue.
        if !self.symbole.is_empty() {
            self.flush_symbole()?;
            if self.termine {
                return Ok(());
            }
            return self.caractere(c);
        }

        Err(ErreurEval::Tokenisation {
            fragment: c.to_string(),
        })
    }

    fn chiffre(&mut self, c: char) {
        if self.nombre.is_empty() {
            self.push_implicite();
        }

        if c == '.' {
            if self.nombre.is_empty() {
                self.nombre.push('0');
            } else if self.nombre.contains('.') {
                // point décimal redondant : ignoré
                return;
            }
        }

        self.nombre.push(c);
    }

    fn flush_nombre(&mut self) -> Result<(), ErreurEval> {
        if self.nombre.is_empty() {
            return Ok(());
        }

        let texte = std::mem::take(&mut self.nombre);
        let valeur = texte
            .parse::<f64>()
            .map_err(|_| ErreurEval::Tokenisation {
                fragment: texte.clone(),
            })?;

        self.out.push(Tok::Num { valeur, texte });
        Ok(())
    }

    /// Le tampon symbole doit être une clé exacte, sinon la saisie est invalide.
    fn flush_symbole(&mut self) -> Result<(), ErreurEval> {
        if self.symbole.is_empty() {
            return Ok(());
        }

        let nom = std::mem::take(&mut self.symbole);
        match lookup(&nom) {
            Some(op) => self.emettre(op),
            None => Err(ErreurEval::Tokenisation { fragment: nom }),
        }
    }

    fn emettre(&mut self, op: &Operateur) -> Result<(), ErreurEval> {
        match *op {
            Operateur::Constante { valeur, symbole } => {
                self.flush_nombre()?;
                self.push_implicite();
                self.out.push(Tok::Const { valeur, symbole });
            }

            Operateur::Ouvrante => {
                self.flush_nombre()?;
                self.push_implicite();
                self.out.push(Tok::LPar);
            }

            Operateur::Fermante => {
                self.flush_nombre()?;
                self.out.push(Tok::RPar);
            }

            Operateur::Binaire(b) => {
                self.flush_nombre()?;
                if b.fonction == FnBinaire::Soustraction && self.attend_operande() {
                    self.out.push(Tok::Unaire(NEGATION));
                } else {
                    self.out.push(Tok::Binaire(b));
                }
            }

            Operateur::Unaire(u) => {
                self.flush_nombre()?;
                if u.assoc == Associativite::Droite {
                    self.push_implicite();
                }
                self.out.push(Tok::Unaire(u));
            }

            Operateur::Egal => {
                self.flush_nombre()?;
                self.out.push(Tok::Egal);
                self.termine = true;
            }

            Operateur::Clear(s) => {
                return Err(ErreurEval::Tokenisation {
                    fragment: s.to_string(),
                })
            }
        }

        Ok(())
    }

    /// Le dernier jeton termine une valeur : un opérande qui suit sans
    /// opérateur explicite implique une multiplication.
    fn ferme_operande(&self) -> bool {
        match self.out.last() {
            Some(Tok::Num { .. } | Tok::Const { .. } | Tok::RPar) => true,
            Some(Tok::Unaire(u)) => u.assoc == Associativite::Gauche,
            _ => false,
        }
    }

    /// Position où un '-' ne peut être qu'un moins unaire.
    fn attend_operande(&self) -> bool {
        match self.out.last() {
            None | Some(Tok::LPar | Tok::Binaire(_)) => true,
            Some(Tok::Unaire(u)) => u.assoc == Associativite::Droite,
            _ => false,
        }
    }

    fn push_implicite(&mut self) {
        if self.ferme_operande() {
            self.out.push(Tok::Binaire(MULTIPLICATION));
        }
    }
}
