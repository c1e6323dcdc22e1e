// src/noyau/jetons.rs
//
// Lexer de la syntaxe “calculatrice” (ce que l’utilisateur voit dans le tampon).
// On lit UNE fois, en jetons ; toutes les réécritures se font ensuite sur les jetons
// (canon.rs) puis sur l’arbre (rpn.rs, trig.rs). Aucune regex, aucun ordre caché.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use super::erreur::ErreurCalc;
use super::expr::Fonction;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    /// Littéral décimal lu exactement (jamais négatif).
    Num(BigRational),
    Pi,
    E,
    Ans,

    Fonction(Fonction),
    /// ⁿ√ : binaire (indice à gauche) ou préfixe (racine carrée).
    RacineN,

    /// Suite d’exposants : ², ³, ⁻¹, ¹⁰ ...
    Exposant(BigInt),
    /// `!` postfixe.
    Factorielle,
    /// `E` de la notation scientifique.
    Exp10,

    Plus,
    Minus,
    Star,
    Slash,
    Caret,

    /// Moins unaire : produit seulement par rpn.rs (jamais par le lexer).
    Neg,

    LPar,
    RPar,
}

/// Mots reconnus, du plus long au plus court (découpe gloutonne d’une suite de lettres).
const MOTS: &[&str] = &[
    "arcsin", "arccos", "arctan", "sqrt", "cbrt", "sin", "cos", "tan", "log", "Ans", "ln",
    "pi", "e", "E",
];

/* ------------------------ Alphabet des exposants ------------------------ */

const EXPOSANTS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

/// '²' -> 2, etc.
pub fn valeur_exposant(c: char) -> Option<u32> {
    EXPOSANTS.iter().position(|&x| x == c).map(|p| p as u32)
}

/// '2' -> '²', etc. (utilisé par le contrôleur pour la saisie après '^').
pub fn chiffre_en_exposant(c: char) -> Option<char> {
    c.to_digit(10).map(|d| EXPOSANTS[d as usize])
}

pub fn est_exposant(c: char) -> bool {
    valeur_exposant(c).is_some()
}

/* ------------------------ Tokenisation ------------------------ */

/// Tokenise le tampon.
/// Supporte:
/// - espaces ignorés partout
/// - nombres décimaux (12, 0.5, .5, 5.) lus exactement
/// - opérateurs + - − * × / ÷ ^ ! et parenthèses
/// - π, e, E (notation scientifique), Ans
/// - fonctions sin cos tan arcsin arccos arctan log ln sqrt cbrt
/// - formes “jolies” : sin⁻¹ cos⁻¹ tan⁻¹, √, ³√, ⁿ√
/// - exposants unicode (², ³, ⁻¹, ¹²...)
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurCalc> {
    let mut out = Vec::new();
    // Espaces retirés AVANT lecture : "2 3" se lit 23, "si n" se lit sin.
    let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' | '−' => Some(Tok::Minus),
            '*' | '×' => Some(Tok::Star),
            '/' | '÷' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            '!' => Some(Tok::Factorielle),
            'π' => Some(Tok::Pi),
            '√' => Some(Tok::Fonction(Fonction::Sqrt)),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        // ⁿ√
        if c == 'ⁿ' {
            if chars.get(i + 1) == Some(&'√') {
                out.push(Tok::RacineN);
                i += 2;
                continue;
            }
            return Err(ErreurCalc::syntaxe("ⁿ sans √"));
        }

        // ³√ (prioritaire sur l’exposant ³)
        if c == '³' && chars.get(i + 1) == Some(&'√') {
            out.push(Tok::Fonction(Fonction::Cbrt));
            i += 2;
            continue;
        }

        // Exposants : ⁻? [⁰-⁹]+
        if c == '⁻' || est_exposant(c) {
            let (exposant, suivant) = lire_exposant(&chars, i)?;
            if chars.get(suivant) == Some(&'.') {
                return Err(ErreurCalc::syntaxe("exposant suivi d’un point décimal"));
            }
            out.push(Tok::Exposant(exposant));
            i = suivant;
            continue;
        }

        // Lettres : découpe en mots connus
        if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            i = pousser_mots(&word, &chars, i, &mut out)?;
            continue;
        }

        // Nombre décimal
        if c.is_ascii_digit() || c == '.' {
            let (n, suivant) = lire_nombre(&chars, i)?;
            out.push(Tok::Num(n));
            i = suivant;
            continue;
        }

        return Err(ErreurCalc::syntaxe(format!("caractère inattendu: '{c}'")));
    }

    Ok(out)
}

/// Découpe gloutonne d’une suite de lettres (`2esin30` -> e, sin).
/// `sin⁻¹` / `cos⁻¹` / `tan⁻¹` deviennent arcsin/arccos/arctan ICI,
/// avant que `⁻¹` puisse être lu comme un exposant.
fn pousser_mots(
    word: &str,
    chars: &[char],
    mut apres: usize,
    out: &mut Vec<Tok>,
) -> Result<usize, ErreurCalc> {
    let mut reste = word;

    while !reste.is_empty() {
        let mot = MOTS
            .iter()
            .find(|m| reste.starts_with(*m))
            .ok_or_else(|| ErreurCalc::syntaxe(format!("mot inconnu: '{reste}'")))?;
        reste = &reste[mot.len()..];

        let tok = match *mot {
            "pi" => Tok::Pi,
            "e" => Tok::E,
            "E" => Tok::Exp10,
            "Ans" => Tok::Ans,
            nom => {
                let f = Fonction::depuis_nom(nom)
                    .ok_or_else(|| ErreurCalc::syntaxe(format!("mot inconnu: '{nom}'")))?;
                // forme jolie : seulement en fin de suite de lettres
                if reste.is_empty() && f.est_trig_directe() && est_reciproque(chars, apres) {
                    apres += 2;
                    Tok::Fonction(inverse_trig(f))
                } else {
                    Tok::Fonction(f)
                }
            }
        };
        out.push(tok);
    }

    Ok(apres)
}

/// `⁻¹` exactement (pas `⁻¹²`).
fn est_reciproque(chars: &[char], i: usize) -> bool {
    chars.get(i) == Some(&'⁻')
        && chars.get(i + 1) == Some(&'¹')
        && !chars.get(i + 2).is_some_and(|c| est_exposant(*c))
}

fn inverse_trig(f: Fonction) -> Fonction {
    match f {
        Fonction::Sin => Fonction::Arcsin,
        Fonction::Cos => Fonction::Arccos,
        Fonction::Tan => Fonction::Arctan,
        autre => autre,
    }
}

/// Lit ⁻? [⁰-⁹]+ ; s’arrête devant un ³ suivi de √ (racine cubique).
fn lire_exposant(chars: &[char], mut i: usize) -> Result<(BigInt, usize), ErreurCalc> {
    let negatif = chars[i] == '⁻';
    if negatif {
        i += 1;
    }

    let mut valeur = BigInt::zero();
    let mut lus = 0usize;
    while i < chars.len() {
        let c = chars[i];
        if c == '³' && chars.get(i + 1) == Some(&'√') {
            break;
        }
        let Some(d) = valeur_exposant(c) else { break };
        valeur = valeur * 10u32 + d;
        lus += 1;
        i += 1;
    }

    if lus == 0 {
        return Err(ErreurCalc::syntaxe("exposant vide"));
    }
    Ok((if negatif { -valeur } else { valeur }, i))
}

/// Lit un décimal exact : chiffres [. chiffres]. Au moins un chiffre.
fn lire_nombre(chars: &[char], mut i: usize) -> Result<(BigRational, usize), ErreurCalc> {
    let mut chiffres = String::new();
    let mut decimales = 0usize;
    let mut point = false;

    while i < chars.len() {
        let c = chars[i];
        if c.is_ascii_digit() {
            chiffres.push(c);
            if point {
                decimales += 1;
            }
        } else if c == '.' && !point {
            point = true;
        } else {
            break;
        }
        i += 1;
    }

    if chiffres.is_empty() {
        return Err(ErreurCalc::syntaxe("point décimal isolé"));
    }
    if chars.get(i) == Some(&'.') {
        return Err(ErreurCalc::syntaxe("nombre mal formé (deux points)"));
    }

    let n = BigInt::parse_bytes(chiffres.as_bytes(), 10)
        .ok_or_else(|| ErreurCalc::syntaxe("nombre invalide"))?;
    let d = BigInt::from(10u32).pow(decimales as u32);
    Ok((BigRational::new(n, d), i))
}

/// Format utilitaire (journal) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    fn format_rat(r: &BigRational) -> String {
        let n = r.numer();
        let d = r.denom();
        if d.is_one() {
            format!("{n}")
        } else {
            format!("{n}/{d}")
        }
    }

    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(r) => format_rat(r),
            Tok::Pi => "π".to_string(),
            Tok::E => "e".to_string(),
            Tok::Ans => "Ans".to_string(),
            Tok::Fonction(f) => f.nom().to_string(),
            Tok::RacineN => "ⁿ√".to_string(),
            Tok::Exposant(n) => format!("^{n}"),
            Tok::Factorielle => "!".to_string(),
            Tok::Exp10 => "E".to_string(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),
            Tok::Neg => "neg".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
