//! src/controle/etat.rs
//!
//! État de la calculatrice (sans UI, sans évaluation).
//!
//! Rôle : contenir le tampon de saisie et les drapeaux, et offrir les
//! opérations d’édition du tampon (ajout borné, retour arrière par jeton).
//!
//! Contrats :
//! - Le tampon ne contient que l’alphabet de surface.
//! - La mémoire survit à AC et à l’extinction.

use crate::noyau::jetons::{est_exposant, valeur_exposant};
use crate::noyau::{Contexte, ModeAngle};

/// Jetons de plusieurs caractères retirés d’un bloc par C.
const JETONS_ATOMIQUES: [&str; 4] = ["Ans", "⁻¹", "³√", "ⁿ√"];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alimentation {
    #[default]
    Allumee,
    Eteinte,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EtatCalc {
    // --- saisie ---
    pub tampon: String,

    // --- réglages ---
    pub mode_angle: ModeAngle,
    pub alimentation: Alimentation,

    // --- drapeaux ---
    pub erreur: bool,
    pub vient_d_evaluer: bool,

    // --- valeurs ---
    pub dernier_resultat: Option<f64>,
    pub memoire: f64,
}

impl EtatCalc {
    pub fn new(mode_angle: ModeAngle) -> Self {
        Self {
            tampon: String::new(),
            mode_angle,
            alimentation: Alimentation::Allumee,
            erreur: false,
            vient_d_evaluer: false,
            dernier_resultat: None,
            memoire: 0.0,
        }
    }

    pub fn est_allumee(&self) -> bool {
        self.alimentation == Alimentation::Allumee
    }

    /// Contexte de normalisation (lecture seule).
    pub fn contexte(&self) -> Contexte {
        Contexte::new(self.mode_angle, self.dernier_resultat)
    }

    /// Ce que l’écran montre pour le tampon : "0" s’il est vide.
    pub fn texte_affiche(&self) -> &str {
        if self.tampon.is_empty() {
            "0"
        } else {
            &self.tampon
        }
    }

    /// Indicateur M.
    pub fn memoire_active(&self) -> bool {
        self.memoire != 0.0
    }

    /* ------------------------ Édition du tampon ------------------------ */

    /// Ajoute `texte` si la longueur (en caractères) reste <= `longueur_max`.
    pub fn ajoute(&mut self, texte: &str, longueur_max: usize) -> bool {
        let longueur = self.tampon.chars().count() + texte.chars().count();
        if longueur > longueur_max {
            return false;
        }
        self.tampon.push_str(texte);
        true
    }

    /// C : retire un caractère, ou un jeton atomique entier (Ans, ⁻¹, ³√, ⁿ√).
    pub fn retire_dernier(&mut self) {
        for jeton in JETONS_ATOMIQUES {
            if self.tampon.ends_with(jeton) {
                self.tampon.truncate(self.tampon.len() - jeton.len());
                return;
            }
        }
        self.tampon.pop();
    }

    /// Vrai si un chiffre tapé maintenant doit s’écrire en exposant :
    /// juste après `^`, ou dans une suite d’exposants commencée après `^`.
    pub fn en_exposant(&self) -> bool {
        let mut avant = self.tampon.chars().rev().skip_while(|c| est_exposant(*c));
        avant.next() == Some('^')
    }

    /// Remet en chiffres ordinaires la suite d’exposants qui suit `^`
    /// (`2^¹` -> `2^1`), pour qu’un `.` prolonge l’exposant au lieu de
    /// commencer un nouveau facteur.
    pub fn exposant_en_ascii(&mut self) {
        if !self.en_exposant() {
            return;
        }
        let debut = self.tampon.trim_end_matches(est_exposant).len();
        let ascii: String = self.tampon[debut..]
            .chars()
            .filter_map(|c| valeur_exposant(c).and_then(|d| char::from_digit(d, 10)))
            .collect();
        self.tampon.truncate(debut);
        self.tampon.push_str(&ascii);
    }

    /// Le tampon se termine par une valeur (chiffre, constante, !, ), exposant, Ans).
    pub fn termine_par_valeur(&self) -> bool {
        if self.tampon.ends_with("Ans") {
            return true;
        }
        let Some(c) = self.tampon.chars().last() else {
            return false;
        };
        c.is_ascii_digit() || matches!(c, 'π' | 'e' | '!' | ')') || est_exposant(c)
    }
}
