//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> canonise (jetons) -> RPN -> Expr -> mode d’angle -> évaluation f64
//!
//! Remarque : la grammaire est FERMÉE. Rien n’est jamais exécuté en dehors de
//! `evaluer`, qui ne connaît que les noeuds de `Expr`.

use std::f64::consts;

use tracing::{debug, trace};

use super::canon::{canonise, Contexte};
use super::erreur::ErreurCalc;
use super::expr::{Expr, Fonction};
use super::jetons::{format_tokens, tokenize};
use super::rpn::{from_rpn, to_rpn};
use super::trig::applique_mode_angle;

/// Tampon (syntaxe de surface) -> expression canonique.
pub fn normalise(entree: &str, ctx: &Contexte) -> Result<Expr, ErreurCalc> {
    let s = entree.trim();
    if s.is_empty() {
        return Err(ErreurCalc::syntaxe("Entrée vide"));
    }

    // 1) Jetons
    let jetons = tokenize(s)?;
    trace!(jetons = %format_tokens(&jetons), "jetons lus");

    // 2) Canonisation (ordre fixe)
    let canon = canonise(jetons, ctx)?;

    // 3) RPN
    let rpn = to_rpn(&canon)?;
    trace!(rpn = %format_tokens(&rpn), "rpn");

    // 4) AST (Expr) + mode d’angle
    let expr = from_rpn(&rpn)?;
    Ok(applique_mode_angle(expr, ctx.mode_angle))
}

/// API publique : normalise puis évalue.
pub fn eval_expression(entree: &str, ctx: &Contexte) -> Result<f64, ErreurCalc> {
    let expr = normalise(entree, ctx)?;
    debug!(entree, canon = %expr, "expression canonique");
    evaluer(&expr)
}

fn fini(v: f64, quoi: &str) -> Result<f64, ErreurCalc> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ErreurCalc::arithmetique(format!("{quoi} : résultat non fini")))
    }
}

/// Évalue une expression canonique. Chaque noeud doit rester fini.
pub fn evaluer(expr: &Expr) -> Result<f64, ErreurCalc> {
    use Expr::*;

    match expr {
        Num(v) => fini(*v, "littéral"),
        Pi => Ok(consts::PI),
        Expr::E => Ok(consts::E),

        Neg(x) => Ok(-evaluer(x)?),

        Add(a, b) => fini(evaluer(a)? + evaluer(b)?, "addition"),
        Sub(a, b) => fini(evaluer(a)? - evaluer(b)?, "soustraction"),
        Mul(a, b) => fini(evaluer(a)? * evaluer(b)?, "multiplication"),

        Div(a, b) => {
            let a = evaluer(a)?;
            let b = evaluer(b)?;
            if b == 0.0 {
                return Err(ErreurCalc::arithmetique("division par zéro"));
            }
            fini(a / b, "division")
        }

        Pow(a, b) => puissance(evaluer(a)?, evaluer(b)?),

        Racine(n, x) => racine_n(evaluer(n)?, evaluer(x)?),

        Expr::Fonction(f, x) => applique(*f, evaluer(x)?),
    }
}

fn puissance(a: f64, b: f64) -> Result<f64, ErreurCalc> {
    let v = a.powf(b);
    if v.is_nan() {
        return Err(ErreurCalc::domaine(format!("puissance : {a}^{b} non réel")));
    }
    fini(v, "puissance")
}

/// x^(1/n), racine réelle d’un négatif si n est un entier impair.
fn racine_n(n: f64, x: f64) -> Result<f64, ErreurCalc> {
    if n == 0.0 {
        return Err(ErreurCalc::domaine("racine d’indice nul"));
    }
    if x >= 0.0 {
        return fini(x.powf(1.0 / n), "racine");
    }

    let impair = n.fract() == 0.0 && n.abs() % 2.0 == 1.0;
    if !impair {
        return Err(ErreurCalc::domaine("racine paire d’un négatif"));
    }
    fini(-(-x).powf(1.0 / n), "racine")
}

fn applique(f: Fonction, x: f64) -> Result<f64, ErreurCalc> {
    let v = match f {
        Fonction::Sin => x.sin(),
        Fonction::Cos => x.cos(),
        Fonction::Tan => x.tan(),

        Fonction::Arcsin | Fonction::Arccos if !(-1.0..=1.0).contains(&x) => {
            return Err(ErreurCalc::domaine(format!("{}({x}) hors [-1, 1]", f.nom())));
        }
        Fonction::Arcsin => x.asin(),
        Fonction::Arccos => x.acos(),
        Fonction::Arctan => x.atan(),

        Fonction::Log | Fonction::Ln if x <= 0.0 => {
            return Err(ErreurCalc::domaine(format!("{}({x}) : argument ≤ 0", f.nom())));
        }
        Fonction::Log => x.log10(),
        Fonction::Ln => x.ln(),

        Fonction::Sqrt if x < 0.0 => {
            return Err(ErreurCalc::domaine("√ : argument négatif"));
        }
        Fonction::Sqrt => x.sqrt(),
        Fonction::Cbrt => x.cbrt(),
    };
    fini(v, f.nom())
}
