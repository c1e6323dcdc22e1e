//! Tests scientifiques (campagne) : propriétés du pipeline + limites contrôlées.
//!
//! - déterminisme : même tampon + même contexte => même issue
//! - idempotence  : la forme canonique relue (radian) redonne le même arbre
//! - aller-retour : format_nombre(v) relu redonne exactement v
//! - symétrie degré / radian, factorielle, division par zéro
//! - stress borné (profondeur, longueur, gros littéraux) sous budget temps

use std::time::{Duration, Instant};

use super::erreur::GenreErreur;
use super::eval::normalise;
use super::{eval_expression, format_nombre, Contexte, ModeAngle};

const EPS: f64 = 1e-9;

fn ctx(mode: ModeAngle) -> Contexte {
    Contexte::new(mode, None)
}

fn eval_ok(expr: &str, mode: ModeAngle) -> f64 {
    eval_expression(expr, &ctx(mode)).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_genre(expr: &str, attendu: GenreErreur) {
    match eval_expression(expr, &ctx(ModeAngle::Radian)) {
        Ok(v) => panic!("expr={expr:?} devait échouer, a donné {v}"),
        Err(e) => assert_eq!(e.genre(), attendu, "expr={expr:?} err={e}"),
    }
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

const CAMPAGNE: &[&str] = &[
    "1+2×3",
    "2^3^2",
    "-2^2",
    "2×-3",
    "sin30+cos(60)",
    "sin⁻¹(0.5)",
    "tan⁻¹1",
    "3²+4²",
    "(1+1)⁻¹",
    "2π",
    "πe",
    "2(3+1)(4)",
    "√(16)+³√27",
    "3ⁿ√(-27)",
    "log(1000)+ln e",
    "5!÷3!",
    "1.5E-8×2E3",
    "12.5/100",
    "sin(cos(tan(0.5)))",
];

/* ------------------------ Propriétés ------------------------ */

#[test]
fn sci_determinisme() {
    for mode in [ModeAngle::Degre, ModeAngle::Radian] {
        for expr in CAMPAGNE {
            let a = eval_expression(expr, &ctx(mode));
            let b = eval_expression(expr, &ctx(mode));
            match (a, b) {
                (Ok(x), Ok(y)) => assert_eq!(x.to_bits(), y.to_bits(), "expr={expr:?}"),
                (Err(x), Err(y)) => assert_eq!(x, y, "expr={expr:?}"),
                (a, b) => panic!("expr={expr:?} issues différentes: {a:?} / {b:?}"),
            }
        }
    }
}

#[test]
fn sci_idempotence_forme_canonique() {
    let radian = ctx(ModeAngle::Radian);
    for mode in [ModeAngle::Degre, ModeAngle::Radian] {
        for expr in CAMPAGNE {
            let e = normalise(expr, &ctx(mode)).unwrap_or_else(|err| panic!("{expr:?}: {err}"));
            let texte = e.to_string();
            let relu = normalise(&texte, &radian).unwrap_or_else(|err| panic!("{texte:?}: {err}"));
            assert_eq!(relu, e, "expr={expr:?} canon={texte:?}");
        }
    }
}

#[test]
fn sci_aller_retour_format() {
    for expr in CAMPAGNE {
        let v = eval_ok(expr, ModeAngle::Radian);
        let texte = format_nombre(v);
        let relu = eval_ok(&texte, ModeAngle::Radian);
        assert_eq!(relu.to_bits(), v.to_bits(), "expr={expr:?} texte={texte:?}");
    }

    for v in [1e21, 2.5e-8, -7.25e300, 0.1 + 0.2, 1.0 / 3.0, -123456.789] {
        let texte = format_nombre(v);
        assert_eq!(eval_ok(&texte, ModeAngle::Radian), v, "texte={texte:?}");
    }
}

#[test]
fn sci_symetrie_degre_radian() {
    assert!((eval_ok("sin(90)", ModeAngle::Degre) - 1.0).abs() < EPS);
    assert!((eval_ok("sin(π/2)", ModeAngle::Radian) - 1.0).abs() < EPS);

    // même angle, deux unités
    for (deg, rad) in [("30", "π/6"), ("45", "π/4"), ("120", "2π/3")] {
        for f in ["sin", "cos", "tan"] {
            let a = eval_ok(&format!("{f}({deg})"), ModeAngle::Degre);
            let b = eval_ok(&format!("{f}({rad})"), ModeAngle::Radian);
            assert!((a - b).abs() < EPS, "{f}: {a} vs {b}");
        }
    }
}

#[test]
fn sci_periodicite_degres() {
    for x in [0, 15, 30, 77, 90, 200] {
        let a = eval_ok(&format!("sin({x})"), ModeAngle::Degre);
        let b = eval_ok(&format!("sin({x}+360)"), ModeAngle::Degre);
        assert!((a - b).abs() < EPS, "sin({x})");
    }
}

#[test]
fn sci_trig_inverse_composee() {
    for x in ["0.1", "0.5", "0.9"] {
        let v = eval_ok(&format!("sin(sin⁻¹({x}))"), ModeAngle::Degre);
        let attendu: f64 = x.parse().unwrap();
        assert!((v - attendu).abs() < EPS, "x={x} v={v}");
    }
}

#[test]
fn sci_factorielle() {
    assert_eq!(eval_ok("5!", ModeAngle::Radian), 120.0);
    assert_eq!(eval_ok("0!", ModeAngle::Radian), 1.0);
    assert_eq!(eval_ok("2×3!", ModeAngle::Radian), 12.0);
    assert!(eval_ok("170!", ModeAngle::Radian).is_finite());
    assert_genre("-1!", GenreErreur::Domaine);
    assert_genre("2.5!", GenreErreur::Domaine);
    assert_genre("171!", GenreErreur::Arithmetique);
    assert_genre("(3)!", GenreErreur::Syntaxe);
}

#[test]
fn sci_erreurs_classees() {
    assert_genre("5/0", GenreErreur::Arithmetique);
    assert_genre("1÷(2-2)", GenreErreur::Arithmetique);
    assert_genre("Ans+1", GenreErreur::Reference);
    assert_genre("log(-1)", GenreErreur::Domaine);
    assert_genre("((1)", GenreErreur::Syntaxe);
    assert_genre("3+", GenreErreur::Syntaxe);
    assert_genre("E5", GenreErreur::Syntaxe);
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_profondeur_sqrt_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let mut expr = "4".to_string();
    for k in 0..60 {
        expr = if k % 2 == 0 {
            format!("√({expr})")
        } else {
            format!("({expr})²")
        };
        budget(t0, max);
    }

    let v = eval_ok(&expr, ModeAngle::Radian);
    assert!((v - 4.0).abs() < 1e-6, "v={v}");
}

#[test]
fn sci_stress_taille_somme_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let mut expr = String::new();
    for k in 0..80 {
        if k > 0 {
            expr.push_str(" + ");
        }
        expr.push_str("1/2");
        budget(t0, max);
    }

    // 80*(1/2)=40
    assert_eq!(eval_ok(&expr, ModeAngle::Radian), 40.0);
}

#[test]
fn sci_stress_gros_litteral_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // 100 chiffres : lu exactement, converti une seule fois
    let big = "9".repeat(100);
    let v = eval_ok(&format!("{big}/7"), ModeAngle::Radian);
    budget(t0, max);
    assert!(v.is_finite() && v > 1e98);

    let petit = format!("0.{}1", "0".repeat(99));
    assert_eq!(eval_ok(&petit, ModeAngle::Radian), 1e-100);
}
