// src/affichage.rs
//
// Affichage côté appelant : le noyau rend un f64 brut, c'est ici qu'on
// décide du nombre de décimales. Pas de séparateur de milliers.

/// Nombre de décimales par défaut (aligné sur l'afficheur d'origine).
pub const CHIFFRES_DEFAUT: usize = 14;

/// Garde-fou : au-delà, le f64 n'a de toute façon plus de chiffres utiles.
pub const CHIFFRES_MAX: usize = 17;

/// Arrondi à `chiffres` décimales, sans zéros de queue.
pub fn format_resultat(valeur: f64, chiffres: usize) -> String {
    if valeur.is_nan() {
        return "NaN".to_string();
    }
    if valeur.is_infinite() {
        return if valeur > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let chiffres = chiffres.min(CHIFFRES_MAX);
    let brut = format!("{valeur:.chiffres$}");

    let net = if brut.contains('.') {
        brut.trim_end_matches('0').trim_end_matches('.')
    } else {
        brut.as_str()
    };

    // -0.0000001 arrondi => "-0"
    if net == "-0" {
        "0".to_string()
    } else {
        net.to_string()
    }
}
