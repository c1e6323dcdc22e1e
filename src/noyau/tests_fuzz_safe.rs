//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - expressions BIEN FORMÉES : une erreur de syntaxe est toujours un bug,
//!   les erreurs de domaine / arithmétiques sont attendues (÷0, ln(-x), ...)
//! - invariant clé : la forme canonique relue redonne le même arbre

use std::time::{Duration, Instant};

use super::erreur::{ErreurCalc, GenreErreur};
use super::eval::normalise;
use super::{eval_expression, Contexte, ModeAngle};

/* ------------------------ RNG déterministe minimal ------------------------ */

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
    fn choix<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[self.pick(options.len() as u32) as usize]
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn is_erreur_attendue(e: &ErreurCalc) -> bool {
    // Liste blanche : le domaine des fonctions est volontairement limité.
    matches!(e.genre(), GenreErreur::Domaine | GenreErreur::Arithmetique)
}

fn check_idempotence(expr: &str, mode: ModeAngle) {
    let Ok(e) = normalise(expr, &Contexte::new(mode, None)) else {
        return;
    };
    let texte = e.to_string();
    let relu = normalise(&texte, &Contexte::new(ModeAngle::Radian, None))
        .unwrap_or_else(|err| panic!("forme canonique non relue: {texte:?} err={err}"));
    assert_eq!(relu, e, "expr={expr:?} canon={texte:?}");
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => rng.choix(&["0", "1", "2", "3", "7", "10", "45", "90"]).to_string(),
        1 => rng.choix(&["0.5", "2.25", ".5", "1.5E3", "2E-2"]).to_string(),
        2 => rng.choix(&["π", "e"]).to_string(),
        3 => rng.choix(&["0!", "3!", "5!"]).to_string(),
        4 => format!("{}π", rng.pick(5) + 1),
        _ => format!("√{}", rng.pick(17)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    let d = depth - 1;
    match rng.pick(12) {
        0 => gen_atom(rng),
        1 => format!("({}+{})", gen_expr(rng, d), gen_expr(rng, d)),
        2 => format!("({}−{})", gen_expr(rng, d), gen_expr(rng, d)),
        3 => format!("({}×{})", gen_expr(rng, d), gen_expr(rng, d)),
        4 => format!("({}÷{})", gen_expr(rng, d), gen_expr(rng, d)),
        5 => format!("({})^{}", gen_expr(rng, d), rng.pick(4)),
        6 => format!("({}){}", gen_expr(rng, d), rng.choix(&["²", "³", "⁻¹"])),
        7 => format!("-({})", gen_expr(rng, d)),
        8 => {
            let f = rng.choix(&["sin", "cos", "tan", "sin⁻¹", "cos⁻¹", "tan⁻¹"]);
            format!("{f}({})", gen_expr(rng, d))
        }
        9 => {
            let f = rng.choix(&["log", "ln", "√", "³√"]);
            format!("{f}({})", gen_expr(rng, d))
        }
        10 => format!("{}ⁿ√({})", rng.pick(4) + 1, gen_expr(rng, d)),
        // multiplication implicite
        _ => format!("{}({})", gen_atom(rng), gen_expr(rng, d)),
    }
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

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

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_idempotence() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for k in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let mode = if k % 2 == 0 {
            ModeAngle::Degre
        } else {
            ModeAngle::Radian
        };
        let ctx = Contexte::new(mode, None);

        let a = eval_expression(&expr, &ctx);
        let b = eval_expression(&expr, &ctx);

        match (a, b) {
            (Ok(x), Ok(y)) => {
                assert!(x.is_finite(), "expr={expr:?} résultat non fini {x}");
                assert_eq!(x.to_bits(), y.to_bits(), "non déterministe: expr={expr:?}");
                seen_ok += 1;
            }
            (Err(x), Err(y)) => {
                assert!(
                    is_erreur_attendue(&x),
                    "erreur non attendue: expr={expr:?} err={x}"
                );
                assert_eq!(x, y, "non déterministe: expr={expr:?}");
                seen_err += 1;
            }
            (a, b) => panic!("non déterministe: expr={expr:?} {a:?} / {b:?}"),
        }

        check_idempotence(&expr, mode);
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 20, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_trig_inverse_dans_domaine() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let mut rng = Rng::new(0xBADC0DE_u64);
    let ctx = Contexte::new(ModeAngle::Degre, None);

    for _ in 0..80 {
        budget(t0, max);

        // x dans [-1, 1] : arcsin toujours défini, et sin(arcsin(x)) = x
        let num = rng.pick(21) as f64 - 10.0;
        let x = num / 10.0;
        let expr = format!("sin(sin⁻¹({num}÷10))");

        let v = eval_expression(&expr, &ctx).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
        assert!((v - x).abs() < 1e-9, "expr={expr:?} v={v} attendu {x}");
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = somme_balancee("1/2", 800);
    budget(t0, max);

    let v = eval_expression(&expr, &Contexte::default()).unwrap_or_else(|e| panic!("err: {e}"));

    // 800*(1/2) = 400
    assert_eq!(v, 400.0);
}
