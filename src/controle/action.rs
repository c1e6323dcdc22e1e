// src/controle/action.rs
//
// Vocabulaire FERMÉ des actions (boutons, clavier).
// Un code inconnu devient `Saisie` : recopié tel quel dans le tampon,
// à condition de rester dans l’alphabet de surface (filtré par le contrôleur).

use crate::noyau::expr::Fonction;
use crate::noyau::ModeAngle;

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// power
    Alimentation,
    /// AC
    ToutEffacer,
    /// C (retour arrière)
    Effacer,
    /// =
    Egal,

    /// MC / MR / M+ / M-
    MemoireEfface,
    MemoireRappel,
    MemoirePlus,
    MemoireMoins,

    /// ans
    Ans,

    /// deg / rad
    Angle(ModeAngle),
    /// mode (bouton DEG/RAD)
    BasculeAngle,

    /// 0-9 et le point décimal
    Chiffre(char),

    /// Jeton de surface fixe : π, e, √, ³√, ⁿ√, ², ³, ^, ⁻¹, !, ÷100, E, + - × ÷ ( )
    Insertion(&'static str),

    /// sin( cos( ... ; sin⁻¹( ... pour les réciproques
    Fonction(Fonction),

    /// Code non reconnu (passe-plat)
    Saisie(String),
}

impl Action {
    /// Code d’action -> Action.
    pub fn depuis_code(code: &str) -> Action {
        match code {
            "power" => Action::Alimentation,
            "AC" => Action::ToutEffacer,
            "C" => Action::Effacer,
            "=" => Action::Egal,

            "MC" => Action::MemoireEfface,
            "MR" => Action::MemoireRappel,
            "M+" => Action::MemoirePlus,
            "M-" => Action::MemoireMoins,

            "ans" => Action::Ans,
            "deg" => Action::Angle(ModeAngle::Degre),
            "rad" => Action::Angle(ModeAngle::Radian),
            "mode" => Action::BasculeAngle,

            "pi" => Action::Insertion("π"),
            "e" => Action::Insertion("e"),
            "sqrt" => Action::Insertion("√"),
            "cbrt" => Action::Insertion("³√"),
            "nthroot" => Action::Insertion("ⁿ√"),
            "pow2" => Action::Insertion("²"),
            "pow3" => Action::Insertion("³"),
            "pow" => Action::Insertion("^"),
            "inv" => Action::Insertion("⁻¹"),
            "fact" => Action::Insertion("!"),
            "percent" => Action::Insertion("÷100"),
            "exp" => Action::Insertion("E"),

            "+" => Action::Insertion("+"),
            "-" | "−" => Action::Insertion("-"),
            "*" | "×" => Action::Insertion("×"),
            "/" | "÷" => Action::Insertion("÷"),
            "(" => Action::Insertion("("),
            ")" => Action::Insertion(")"),

            _ => {
                if let Some(f) = Fonction::depuis_nom(code) {
                    return Action::Fonction(f);
                }
                let mut chars = code.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() || c == '.' => Action::Chiffre(c),
                    _ => Action::Saisie(code.to_string()),
                }
            }
        }
    }
}

/// Texte inséré pour une fonction préfixe : "sin(", "sin⁻¹(", "log(", ...
pub fn texte_fonction(f: Fonction) -> String {
    match f {
        Fonction::Arcsin => "sin⁻¹(".to_string(),
        Fonction::Arccos => "cos⁻¹(".to_string(),
        Fonction::Arctan => "tan⁻¹(".to_string(),
        Fonction::Sqrt => "√".to_string(),
        Fonction::Cbrt => "³√".to_string(),
        _ => format!("{}(", f.nom()),
    }
}

/// Touche clavier (nom egui ou caractère tapé) -> Action.
/// Enter / = évaluent, Backspace = C, Delete = AC ; le reste est ignoré.
pub fn action_pour_touche(touche: &str) -> Option<Action> {
    match touche {
        "Enter" | "=" => Some(Action::Egal),
        "Backspace" => Some(Action::Effacer),
        "Delete" => Some(Action::ToutEffacer),
        "+" | "-" | "*" | "/" | "(" | ")" => Some(Action::depuis_code(touche)),
        _ => {
            let mut chars = touche.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_digit() || c == '.' => Some(Action::Chiffre(c)),
                _ => None,
            }
        }
    }
}
