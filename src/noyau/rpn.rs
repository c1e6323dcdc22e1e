// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir la suite de Tok canonisée en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Fonction(f) : opérateur préfixe, sortie après la parenthèse fermante de son argument
//   (ou dès qu’un opérateur binaire arrive : "√√16", "sin 2 + 1")
// - Moins unaire : jeton Neg (préfixe), plus faible que ^ : "-2^2" => -(2^2)
//   mais plus fort que * : "2*-3" => 2*(-3)
// - Plus unaire : ignoré
// - ⁿ√ : binaire si une valeur précède (indice), sinon racine carrée préfixe
// - ^ et ⁿ√ associatifs à droite
//
// Précédences : + - (1) < * / (2) < Neg (3) < ^ ⁿ√ (4) < fonctions (5)

use num_traits::ToPrimitive;

use super::erreur::ErreurCalc;
use super::expr::{Expr, Fonction};
use super::jetons::Tok;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg => 3,
        Tok::Caret | Tok::RacineN => 4,
        Tok::Fonction(_) => 5,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret | Tok::RacineN)
}

/// Dépile les opérateurs qui doivent sortir avant `tok` (binaire).
fn depile_pour(tok: &Tok, ops: &mut Vec<Tok>, out: &mut Vec<Tok>) {
    let p_tok = precedence(tok);

    while let Some(top) = ops.last() {
        if matches!(top, Tok::LPar) {
            break;
        }

        let p_top = precedence(top);
        let doit_pop = if is_right_associative(tok) {
            p_top > p_tok
        } else {
            p_top >= p_tok
        };

        if !doit_pop {
            break;
        }
        if let Some(op) = ops.pop() {
            out.push(op);
        }
    }
}

/// Convertit une suite de jetons canonisés en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Fonction(sin), LPar, Pi, Slash, Num(2), RPar]
///   rpn:    [Pi, Num(2), Slash, Fonction(sin)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurCalc> {
    if tokens.is_empty() {
        return Err(ErreurCalc::syntaxe("Entrée vide"));
    }

    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter les opérateurs unaires et les opérateurs pendants.
    let mut prev_was_value = false;

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(_) | Tok::Pi | Tok::E => {
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Fonction(_) | Tok::LPar => {
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RacineN if !prev_was_value => {
                // ⁿ√x sans indice : racine carrée
                ops.push(Tok::Fonction(Fonction::Sqrt));
            }

            Tok::RPar => {
                if !prev_was_value {
                    return Err(ErreurCalc::syntaxe("parenthèse vide ou opérateur pendant"));
                }

                // dépile jusqu’à '('
                let mut ouverte = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouverte = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouverte {
                    return Err(ErreurCalc::syntaxe("parenthèse fermante sans ouvrante"));
                }

                // si une fonction est au sommet, on la sort aussi
                if let Some(Tok::Fonction(f)) = ops.last() {
                    let f = *f;
                    ops.pop();
                    out.push(Tok::Fonction(f));
                }

                prev_was_value = true;
            }

            Tok::Minus if !prev_was_value => {
                ops.push(Tok::Neg);
            }

            Tok::Plus if !prev_was_value => {}

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret | Tok::RacineN => {
                if !prev_was_value {
                    return Err(ErreurCalc::syntaxe(format!(
                        "opérateur pendant: {}",
                        super::jetons::format_tokens(std::slice::from_ref(&tok))
                    )));
                }
                depile_pour(&tok, &mut ops, &mut out);
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Ans | Tok::Exposant(_) | Tok::Factorielle | Tok::Exp10 | Tok::Neg => {
                return Err(ErreurCalc::syntaxe("jeton non canonisé"));
            }
        }
    }

    if !prev_was_value {
        return Err(ErreurCalc::syntaxe("expression incomplète"));
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurCalc::syntaxe("parenthèses non fermées"));
        }
        out.push(op);
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN.
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, ErreurCalc> {
    let mut st: Vec<Expr> = Vec::new();
    let invalide = || ErreurCalc::syntaxe("expression invalide");

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Num(r) => {
                let v = r
                    .to_f64()
                    .ok_or_else(|| ErreurCalc::arithmetique("littéral non représentable"))?;
                st.push(Expr::Num(v));
            }
            Tok::Pi => st.push(Expr::Pi),
            Tok::E => st.push(Expr::E),

            Tok::Neg => {
                let x = st.pop().ok_or_else(invalide)?;
                st.push(Expr::Neg(Box::new(x)));
            }

            Tok::Fonction(f) => {
                let x = st.pop().ok_or_else(|| ErreurCalc::syntaxe("fonction sans argument"))?;
                st.push(Expr::appel(f, x));
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret | Tok::RacineN => {
                let b = Box::new(st.pop().ok_or_else(invalide)?);
                let a = Box::new(st.pop().ok_or_else(invalide)?);

                let e = match tok {
                    Tok::Plus => Expr::Add(a, b),
                    Tok::Minus => Expr::Sub(a, b),
                    Tok::Star => Expr::Mul(a, b),
                    Tok::Slash => Expr::Div(a, b),
                    Tok::Caret => Expr::Pow(a, b),
                    _ => Expr::Racine(a, b),
                };
                st.push(e);
            }

            Tok::Ans | Tok::Exposant(_) | Tok::Factorielle | Tok::Exp10 | Tok::LPar | Tok::RPar => {
                return Err(ErreurCalc::syntaxe("jeton inattendu en RPN"));
            }
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some(e), true) => Ok(e),
        _ => Err(invalide()),
    }
}
