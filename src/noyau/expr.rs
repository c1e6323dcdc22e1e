// src/noyau/expr.rs
//
// AST flottant (IEEE double).
// - Num   : littéral déjà lu (toujours >= 0 : le signe est un Neg)
// - Pi, E : constantes
// - Fonction : fonctions unaires nommées (ensemble fermé)
// - Racine   : racine n-ième avec indice explicite (nⁿ√x)
//
// IMPORTANT :
// - L’affichage (Display) produit la forme CANONIQUE : relue en mode radian,
//   elle redonne exactement le même arbre.

use std::fmt;

use super::format::format_nombre;

/// Fonctions unaires reconnues. Rien d’autre n’est appelable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Arcsin,
    Arccos,
    Arctan,
    Log,
    Ln,
    Sqrt,
    Cbrt,
}

impl Fonction {
    /// Nom canonique (celui que le lexer relit).
    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Arcsin => "arcsin",
            Fonction::Arccos => "arccos",
            Fonction::Arctan => "arctan",
            Fonction::Log => "log",
            Fonction::Ln => "ln",
            Fonction::Sqrt => "sqrt",
            Fonction::Cbrt => "cbrt",
        }
    }

    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        let f = match nom {
            "sin" => Fonction::Sin,
            "cos" => Fonction::Cos,
            "tan" => Fonction::Tan,
            "arcsin" => Fonction::Arcsin,
            "arccos" => Fonction::Arccos,
            "arctan" => Fonction::Arctan,
            "log" => Fonction::Log,
            "ln" => Fonction::Ln,
            "sqrt" => Fonction::Sqrt,
            "cbrt" => Fonction::Cbrt,
            _ => return None,
        };
        Some(f)
    }

    /// sin/cos/tan : argument en angle.
    pub fn est_trig_directe(self) -> bool {
        matches!(self, Fonction::Sin | Fonction::Cos | Fonction::Tan)
    }

    /// arcsin/arccos/arctan : résultat en angle.
    pub fn est_trig_inverse(self) -> bool {
        matches!(self, Fonction::Arcsin | Fonction::Arccos | Fonction::Arctan)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Num(f64),
    Pi,
    E,

    Neg(Box<Expr>),

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),

    Fonction(Fonction, Box<Expr>),

    /// Racine { indice, radicande } : radicande^(1/indice), racine réelle si indice impair.
    Racine(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn appel(f: Fonction, x: Expr) -> Expr {
        Expr::Fonction(f, Box::new(x))
    }

    pub fn mul(a: Expr, b: Expr) -> Expr {
        Expr::Mul(Box::new(a), Box::new(b))
    }

    pub fn div(a: Expr, b: Expr) -> Expr {
        Expr::Div(Box::new(a), Box::new(b))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;
        match self {
            Num(v) => f.write_str(&format_nombre(*v)),
            Pi => f.write_str("π"),
            E => f.write_str("e"),
            Neg(x) => write!(f, "(-{x})"),
            Add(a, b) => write!(f, "({a}+{b})"),
            Sub(a, b) => write!(f, "({a}-{b})"),
            Mul(a, b) => write!(f, "({a}*{b})"),
            Div(a, b) => write!(f, "({a}/{b})"),
            Pow(a, b) => write!(f, "({a}^{b})"),
            Expr::Fonction(g, x) => write!(f, "{}({x})", g.nom()),
            Racine(n, x) => write!(f, "({n}ⁿ√{x})"),
        }
    }
}
