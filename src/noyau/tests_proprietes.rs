//! Tests de propriétés : résultats attendus du pipeline complet + robustesse.
//!
//! - valeurs de référence (précédence, implicites, moins unaire, ²)
//! - entrées malformées => None, jamais de panique
//! - idempotence et appels concurrents (aucun état caché)
//! - fuzz déterministe (seed fixe) sous budget temps

use std::time::{Duration, Instant};

use super::evaluate;

const EPS: f64 = 1e-12;

fn eval_ok(expr: &str) -> f64 {
    evaluate(expr).unwrap_or_else(|| panic!("évaluation échouée: expr={expr:?}"))
}

fn assert_proche(expr: &str, attendu: f64) {
    let v = eval_ok(expr);
    assert!(
        (v - attendu).abs() < EPS,
        "expr={expr:?} obtenu={v} attendu={attendu}"
    );
}

fn assert_none(expr: &str) {
    assert_eq!(evaluate(expr), None, "expr={expr:?}");
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Valeurs de référence ------------------------ */

#[test]
fn prop_precedence() {
    assert_proche("2+3×4", 14.0);
    assert_proche("(2+3)×4", 20.0);
    assert_ne!(evaluate("2+3×4"), evaluate("(2+3)×4"));
    assert_proche("10-4÷2", 8.0);
    assert_proche("8÷4÷2", 1.0);
    assert_proche("10-3-2", 5.0);
}

#[test]
fn prop_unaires_droits_chaines() {
    assert_proche("√√16", 2.0);
    assert_proche("√16+1", 5.0);
    assert_proche("2×√4+1", 5.0);
    assert_proche("--3", 3.0);
}

#[test]
fn prop_multiplication_implicite() {
    assert_proche("2π", 2.0 * std::f64::consts::PI);
    assert_proche("3(4)", 12.0);
    assert_proche("(2)(3)", 6.0);
    assert_proche("(1+1)3", 6.0);
    assert_proche("2√9", 6.0);
    assert_proche("2e", 2.0 * std::f64::consts::E);
    assert_proche("3²2", 18.0);
}

#[test]
fn prop_moins_unaire() {
    assert_proche("-5+3", -2.0);
    assert_proche("5-3", 2.0);
    assert_proche("5×-3", -15.0);
    assert_proche("-(2+3)", -5.0);
    assert_proche("2--3", 5.0);
    assert_proche("±4+1", -3.0);
    // la négation (6) passe après ² (8)
    assert_proche("-3²", -9.0);
}

#[test]
fn prop_carre() {
    assert_proche("3²", 9.0);
    assert_proche("2×3²", 18.0);
    assert_proche("3x²", 9.0);
    assert_proche("(1+2)²", 9.0);
    assert_proche("3²²", 81.0);
}

#[test]
fn prop_trig() {
    assert_proche("sin0", 0.0);
    assert_proche("cos0", 1.0);
    assert_proche("cos(π)", -1.0);
    assert_proche("sin(π÷2)", 1.0);
    assert_proche("tan(π÷4)", 1.0);
    assert_proche("2sin(π÷6)", 1.0);
}

#[test]
fn prop_decimaux() {
    assert_proche(".5+.5", 1.0);
    assert_proche("1.5×2", 3.0);
    // second point ignoré : 1.2.5 == 1.25
    assert_proche("1.2.5", 1.25);
}

#[test]
fn prop_flottant_standard() {
    assert_eq!(evaluate("1÷0"), Some(f64::INFINITY));
    assert_eq!(evaluate("-1÷0"), Some(f64::NEG_INFINITY));
    assert!(evaluate("0÷0").is_some_and(f64::is_nan));
    assert!(evaluate("√-1").is_some_and(f64::is_nan));
}

/* ------------------------ Entrées malformées ------------------------ */

#[test]
fn prop_malformees_none() {
    assert_none("+");
    assert_none("3+");
    assert_none("×3");
    assert_none("");
    assert_none("   ");
    assert_none("()");
    assert_none("√");
    assert_none("sinx");
    assert_none("2$3");
    assert_none("C");
    assert_none("1+AC");
}

#[test]
fn prop_parentheses_equilibrees_silencieusement() {
    // '(' non fermées : abandonnées
    assert_proche("((3)", 3.0);
    assert_proche("(2+3", 5.0);
    assert_proche("2×(3+1", 8.0);
}

/* ------------------------ Sans état caché ------------------------ */

#[test]
fn prop_idempotence() {
    for expr in ["2+3×4", "√√16", "2π", "-5+3", "3+", "((3)", "sin(π÷2)"] {
        let a = evaluate(expr).map(f64::to_bits);
        let b = evaluate(expr).map(f64::to_bits);
        assert_eq!(a, b, "expr={expr:?}");
    }
}

#[test]
fn prop_appels_concurrents() {
    let exprs = ["2+3×4", "(2)(3)", "5×-3", "3²", "3+", "√√16"];
    let attendus: Vec<Option<u64>> = exprs
        .iter()
        .map(|e| evaluate(e).map(f64::to_bits))
        .collect();

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..50 {
                    for (e, att) in exprs.iter().zip(&attendus) {
                        assert_eq!(evaluate(e).map(f64::to_bits), *att, "expr={e:?}");
                    }
                }
            });
        }
    });
}

/* ------------------------ Fuzz déterministe ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/// Fragments "boutons" : mélange volontaire de saisies valides et absurdes.
const FRAGMENTS: &[&str] = &[
    "0", "1", "2", "7", "42", ".", "3.5", "π", "e", "(", ")", "×", "÷", "+", "-", "±", "√", "²",
    "x²", "sin", "cos", "tan", " ", "s", "=",
];

fn gen_saisie(rng: &mut Rng, longueur: usize) -> String {
    let mut s = String::new();
    for _ in 0..longueur {
        s.push_str(FRAGMENTS[rng.pick(FRAGMENTS.len() as u32) as usize]);
    }
    s
}

#[test]
fn fuzz_sans_panique_et_deterministe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);
    let mut seen_ok = 0usize;
    let mut seen_none = 0usize;

    for k in 0..2000 {
        if k % 100 == 0 {
            budget(t0, max);
        }

        let saisie = gen_saisie(&mut rng, 1 + (k % 12));
        let a = evaluate(&saisie).map(f64::to_bits);
        let b = evaluate(&saisie).map(f64::to_bits);
        assert_eq!(a, b, "non déterministe: {saisie:?}");

        if a.is_some() {
            seen_ok += 1;
        } else {
            seen_none += 1;
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne "balaye" rien.
    assert!(seen_ok > 20, "trop peu de succès: {seen_ok}");
    assert!(seen_none > 50, "trop peu d'échecs: {seen_none}");
}

/* ------------------------ Stress contrôlé ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

#[test]
fn stress_somme_balancee() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = somme_balancee(".5", 800);
    assert_proche(&expr, 400.0);
    budget(t0, max);
}

#[test]
fn stress_longue_chaine_racines() {
    // √ répété : tout s'empile (unaires droits), déroulé en fin d'entrée
    let expr = format!("{}65536", "√".repeat(4));
    assert_proche(&expr, 2.0);

    let expr = format!("{}2", "√".repeat(500));
    assert_proche(&expr, 1.0);
}
