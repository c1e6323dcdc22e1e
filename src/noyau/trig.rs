// src/noyau/trig.rs
//
// Mode d’angle (degré / radian) appliqué comme réécriture d’arbre :
// - sin/cos/tan(a)          -> f(a * π/180)        en degré
// - arcsin/arccos/arctan(a) -> f(a) * 180/π        en degré
// - en radian : arbre inchangé
//
// La conversion est faite UNE fois, sur l’arbre complet, donc les appels
// imbriqués (sin(arcsin(x))) sont convertis chacun à leur niveau.

use serde::Deserialize;

use super::expr::Expr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeAngle {
    #[default]
    Degre,
    Radian,
}

impl ModeAngle {
    pub fn bascule(self) -> ModeAngle {
        match self {
            ModeAngle::Degre => ModeAngle::Radian,
            ModeAngle::Radian => ModeAngle::Degre,
        }
    }

    /// Libellé court (bouton DEG/RAD).
    pub fn libelle(self) -> &'static str {
        match self {
            ModeAngle::Degre => "DEG",
            ModeAngle::Radian => "RAD",
        }
    }
}

fn pi_sur_180() -> Expr {
    Expr::div(Expr::Pi, Expr::Num(180.0))
}

fn cent_quatre_vingt_sur_pi() -> Expr {
    Expr::div(Expr::Num(180.0), Expr::Pi)
}

/// Applique le mode d’angle PARTOUT dans l’arbre.
pub fn applique_mode_angle(expr: Expr, mode: ModeAngle) -> Expr {
    if mode == ModeAngle::Radian {
        return expr;
    }
    en_degres(expr)
}

fn en_degres(expr: Expr) -> Expr {
    use Expr::*;

    match expr {
        Fonction(f, x) => {
            let x = en_degres(*x);
            if f.est_trig_directe() {
                Expr::appel(f, Expr::mul(x, pi_sur_180()))
            } else if f.est_trig_inverse() {
                Expr::mul(Expr::appel(f, x), cent_quatre_vingt_sur_pi())
            } else {
                Expr::appel(f, x)
            }
        }

        Neg(x) => Neg(Box::new(en_degres(*x))),

        Add(a, b) => Add(Box::new(en_degres(*a)), Box::new(en_degres(*b))),
        Sub(a, b) => Sub(Box::new(en_degres(*a)), Box::new(en_degres(*b))),
        Mul(a, b) => Mul(Box::new(en_degres(*a)), Box::new(en_degres(*b))),
        Div(a, b) => Div(Box::new(en_degres(*a)), Box::new(en_degres(*b))),
        Pow(a, b) => Pow(Box::new(en_degres(*a)), Box::new(en_degres(*b))),
        Racine(n, x) => Racine(Box::new(en_degres(*n)), Box::new(en_degres(*x))),

        Num(_) | Pi | E => expr,
    }
}
