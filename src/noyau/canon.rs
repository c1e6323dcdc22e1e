// src/noyau/canon.rs
//
// Canonicalisation des jetons (déterministe, ordonnée) :
// 1. exposants      : x² -> x ^ 2 ; x⁻¹ -> x ^ ( - 1 ) ; x^³ -> x ^ 3
// 2. scientifique   : m E ±k -> littéral exact m·10^±k
// 3. factorielles   : n! -> littéral n! (littéraux seulement, calcul exact)
// 4. arguments nus  : sin 30 -> sin ( 30 )
// 5. Ans            : Ans -> ( dernier résultat ), sinon erreur de référence
// 6. multiplication implicite : 2π, 2(3), (1)(2), 2sin30, π2
//
// Chaque étape reçoit la forme produite par la précédente ; aucune n’a besoin
// de repasser plusieurs fois (l’arbre est construit APRÈS, dans rpn.rs).

use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::erreur::ErreurCalc;
use super::jetons::Tok;
use super::trig::ModeAngle;

/// Plus grande factorielle finie en double précision.
const FACTORIELLE_MAX: u64 = 170;

/// Garde-fou sur l’exposant décimal (évite de construire 10^1000000).
const EXP10_MAX: u32 = 1000;

/// Contexte en lecture seule de la normalisation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Contexte {
    pub mode_angle: ModeAngle,
    pub dernier_resultat: Option<f64>,
}

impl Contexte {
    pub fn new(mode_angle: ModeAngle, dernier_resultat: Option<f64>) -> Self {
        Self {
            mode_angle,
            dernier_resultat,
        }
    }
}

/// Pipeline complet, dans l’ordre.
pub fn canonise(jetons: Vec<Tok>, ctx: &Contexte) -> Result<Vec<Tok>, ErreurCalc> {
    let t = exposants(jetons);
    let t = notation_scientifique(t)?;
    let t = factorielles(t)?;
    let t = arguments_nus(t);
    let t = substitue_ans(t, ctx.dernier_resultat)?;
    Ok(multiplication_implicite(t))
}

/* ------------------------ Outils ------------------------ */

fn num_entier(n: BigInt) -> Tok {
    Tok::Num(BigRational::from_integer(n))
}

/// Vrai si, à cet endroit, un `-` serait un moins unaire.
fn attend_valeur(prev: Option<&Tok>) -> bool {
    match prev {
        None => true,
        Some(t) => matches!(
            t,
            Tok::Plus
                | Tok::Minus
                | Tok::Star
                | Tok::Slash
                | Tok::Caret
                | Tok::LPar
                | Tok::Fonction(_)
                | Tok::RacineN
                | Tok::Exp10
        ),
    }
}

fn termine_valeur(t: &Tok) -> bool {
    matches!(t, Tok::Num(_) | Tok::Pi | Tok::E | Tok::Ans | Tok::RPar)
}

fn commence_valeur(t: &Tok) -> bool {
    matches!(
        t,
        Tok::Num(_) | Tok::Pi | Tok::E | Tok::Ans | Tok::LPar | Tok::Fonction(_)
    )
}

/* ------------------------ 1. Exposants ------------------------ */

/// Un exposant unicode devient `^ n` (ou `^ ( - n )`).
/// Après un `^` explicite (saisie "2^³"), on ne double pas le `^`.
fn exposants(jetons: Vec<Tok>) -> Vec<Tok> {
    let mut out = Vec::with_capacity(jetons.len() + 4);

    for tok in jetons {
        let Tok::Exposant(n) = tok else {
            out.push(tok);
            continue;
        };

        if !matches!(out.last(), Some(Tok::Caret)) {
            out.push(Tok::Caret);
        }
        if n.is_negative() {
            out.push(Tok::LPar);
            out.push(Tok::Minus);
            out.push(num_entier(-n));
            out.push(Tok::RPar);
        } else {
            out.push(num_entier(n));
        }
    }

    out
}

/* ------------------------ 2. Notation scientifique ------------------------ */

/// `m E k`, `m E - k`, `m E + k` : replié en un seul littéral exact.
fn notation_scientifique(jetons: Vec<Tok>) -> Result<Vec<Tok>, ErreurCalc> {
    let mut out: Vec<Tok> = Vec::with_capacity(jetons.len());
    let mut it = jetons.into_iter().peekable();

    while let Some(tok) = it.next() {
        if tok != Tok::Exp10 {
            out.push(tok);
            continue;
        }

        let Some(Tok::Num(mantisse)) = out.pop() else {
            return Err(ErreurCalc::syntaxe("E : mantisse littérale attendue"));
        };

        let negatif = match it.peek() {
            Some(Tok::Minus) => {
                it.next();
                true
            }
            Some(Tok::Plus) => {
                it.next();
                false
            }
            _ => false,
        };

        let k = match it.next() {
            Some(Tok::Num(k)) if k.is_integer() => k.to_integer(),
            _ => return Err(ErreurCalc::syntaxe("E : exposant entier attendu")),
        };

        out.push(Tok::Num(replie_exp10(mantisse, &k, negatif)?));
    }

    Ok(out)
}

fn replie_exp10(
    mantisse: BigRational,
    k: &BigInt,
    negatif: bool,
) -> Result<BigRational, ErreurCalc> {
    if mantisse.is_zero() {
        return Ok(mantisse);
    }
    let k = match k.to_u32() {
        Some(k) if k <= EXP10_MAX => k,
        // 10^-énorme : zéro en double précision de toute façon
        _ if negatif => return Ok(BigRational::zero()),
        _ => return Err(ErreurCalc::arithmetique("E : dépassement de capacité")),
    };

    let p = BigRational::from_integer(BigInt::from(10u32).pow(k));
    Ok(if negatif { mantisse / p } else { mantisse * p })
}

/* ------------------------ 3. Factorielles ------------------------ */

/// `n!` résolu ICI, sur le littéral qui précède (pas sur une sous-expression).
fn factorielles(jetons: Vec<Tok>) -> Result<Vec<Tok>, ErreurCalc> {
    let mut out: Vec<Tok> = Vec::with_capacity(jetons.len());

    for tok in jetons {
        if tok != Tok::Factorielle {
            out.push(tok);
            continue;
        }

        let Some(Tok::Num(n)) = out.pop() else {
            return Err(ErreurCalc::syntaxe("factorielle : littéral attendu avant !"));
        };

        // -n! : le moins unaire colle au littéral
        let moins_unaire = out.last() == Some(&Tok::Minus)
            && attend_valeur(out.len().checked_sub(2).and_then(|i| out.get(i)));
        if moins_unaire && !n.is_zero() {
            return Err(ErreurCalc::domaine("factorielle d’un négatif"));
        }

        out.push(num_entier(BigInt::from(factorielle(&n)?)));
    }

    Ok(out)
}

fn factorielle(n: &BigRational) -> Result<BigUint, ErreurCalc> {
    if !n.is_integer() {
        return Err(ErreurCalc::domaine("factorielle d’un non-entier"));
    }
    let n = n
        .to_integer()
        .to_u64()
        .filter(|n| *n <= FACTORIELLE_MAX)
        .ok_or_else(|| ErreurCalc::arithmetique("factorielle : résultat non fini"))?;

    Ok((2..=n).fold(BigUint::one(), |acc, k| acc * k))
}

/* ------------------------ 4. Arguments nus ------------------------ */

/// Fonction suivie d’un atome (et pas de `(`) : on parenthèse l’atome.
fn arguments_nus(jetons: Vec<Tok>) -> Vec<Tok> {
    let mut out = Vec::with_capacity(jetons.len() + 4);
    let mut it = jetons.into_iter().peekable();

    while let Some(tok) = it.next() {
        let est_fonction = matches!(tok, Tok::Fonction(_));
        out.push(tok);

        if !est_fonction {
            continue;
        }
        if let Some(atome) = it.next_if(|t| matches!(t, Tok::Num(_) | Tok::Pi | Tok::E | Tok::Ans)) {
            out.push(Tok::LPar);
            out.push(atome);
            out.push(Tok::RPar);
        }
    }

    out
}

/* ------------------------ 5. Ans ------------------------ */

/// Ans -> ( valeur ) ; le signe reste un moins unaire (les littéraux sont >= 0).
fn substitue_ans(jetons: Vec<Tok>, dernier: Option<f64>) -> Result<Vec<Tok>, ErreurCalc> {
    let mut out = Vec::with_capacity(jetons.len() + 4);

    for tok in jetons {
        if tok != Tok::Ans {
            out.push(tok);
            continue;
        }

        let v = dernier.ok_or(ErreurCalc::Reference)?;
        let r = BigRational::from_float(v.abs())
            .ok_or_else(|| ErreurCalc::arithmetique("Ans : valeur non finie"))?;

        out.push(Tok::LPar);
        if v.is_sign_negative() && v != 0.0 {
            out.push(Tok::Minus);
        }
        out.push(Tok::Num(r));
        out.push(Tok::RPar);
    }

    Ok(out)
}

/* ------------------------ 6. Multiplication implicite ------------------------ */

fn multiplication_implicite(jetons: Vec<Tok>) -> Vec<Tok> {
    let mut out: Vec<Tok> = Vec::with_capacity(jetons.len() * 2);

    for tok in jetons {
        if out.last().is_some_and(termine_valeur) && commence_valeur(&tok) {
            out.push(Tok::Star);
        }
        out.push(tok);
    }

    out
}
