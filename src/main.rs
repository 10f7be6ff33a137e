// src/main.rs
//
// Calculatrice RPN — point d'entrée ligne de commande
// ---------------------------------------------------
// Rôle (appelant du noyau) :
// - assembler les expressions (arguments, sinon stdin ligne par ligne)
// - appeler `evaluate` et formater le résultat
// - sur échec : afficher "Erreur" et repartir propre sur l'expression suivante

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use calculatrice_rpn::affichage::{format_resultat, CHIFFRES_DEFAUT};
use calculatrice_rpn::eval_expression;

/// Texte affiché quand une expression ne s'évalue pas.
const TEXTE_ERREUR: &str = "Erreur";

/// Évalue des expressions de calculatrice (× ÷ + - √ ² sin cos tan π e).
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Nombre maximal de décimales affichées.
    #[arg(short, long, default_value_t = CHIFFRES_DEFAUT)]
    chiffres: usize,

    /// Affiche aussi les jetons et la RPN de chaque expression.
    #[arg(short, long)]
    demarche: bool,

    /// Expressions à évaluer ; sans argument, lecture de stdin.
    /// Une expression qui commence par '-' se passe après `--`.
    expressions: Vec<String>,
}

/* ------------------------ Journalisation ------------------------ */

fn installer_logs() {
    let filtre = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filtre)
        .with_writer(io::stderr)
        .init();
}

/* ------------------------ Évaluation d'une ligne ------------------------ */

/// Écrit le résultat (ou l'erreur) ; renvoie `false` si l'évaluation a échoué.
fn traiter(out: &mut impl Write, expr: &str, args: &Args) -> Result<bool> {
    match eval_expression(expr) {
        Ok((valeur, d)) => {
            if args.demarche {
                writeln!(out, "jetons: {}", d.jetons)?;
                writeln!(out, "rpn:    {}", d.rpn)?;
            }
            writeln!(out, "{}", format_resultat(valeur, args.chiffres))?;
            Ok(true)
        }
        Err(e) => {
            tracing::info!(expression = expr, erreur = %e, "échec");
            writeln!(out, "{TEXTE_ERREUR}")?;
            Ok(false)
        }
    }
}

fn run(args: &Args) -> Result<bool> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut tout_ok = true;

    if args.expressions.is_empty() {
        // lignes brutes : un octet non UTF-8 n'invalide que sa propre ligne
        for brut in io::stdin().lock().split(b'\n') {
            let ligne = match String::from_utf8(brut?) {
                Ok(l) => l,
                Err(e) => {
                    tracing::info!(erreur = %e, "ligne non UTF-8");
                    writeln!(out, "{TEXTE_ERREUR}")?;
                    tout_ok = false;
                    continue;
                }
            };
            if ligne.trim().is_empty() {
                continue;
            }
            tout_ok &= traiter(&mut out, ligne.trim_end_matches('\r'), args)?;
        }
    } else {
        for expr in &args.expressions {
            tout_ok &= traiter(&mut out, expr, args)?;
        }
    }

    Ok(tout_ok)
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    installer_logs();

    let code = if run(&args)? {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    };
    Ok(code)
}
