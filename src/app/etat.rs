//! src/app/etat.rs
//!
//! État UI : le contrôleur + ce qui est montré à l’écran.
//!
//! Rôle : être les `Sorties` concrètes du contrôleur (écran + historique)
//! et lui transmettre les actions venues des boutons ou du clavier.
//!
//! Contrats :
//! - Aucune évaluation ici (tout passe par `Controleur::traiter`).
//! - L’écran montre exactement ce que le contrôleur a affiché en dernier.

use crate::config::ConfigCalc;
use crate::controle::{Action, Controleur, Sorties};

/// Ce que le contrôleur écrit.
#[derive(Clone, Debug, Default)]
pub struct Ecran {
    pub affichage: String,
    pub historique: String,
}

impl Sorties for Ecran {
    fn afficher(&mut self, texte: &str) {
        self.affichage = texte.to_string();
    }

    fn historique(&mut self, texte: &str) {
        self.historique = texte.to_string();
    }
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    pub controleur: Controleur,
    pub ecran: Ecran,
}

impl AppCalc {
    pub fn new(config: ConfigCalc) -> Self {
        let controleur = Controleur::new(config);
        let ecran = Ecran {
            affichage: controleur.etat().texte_affiche().to_string(),
            historique: String::new(),
        };
        Self { controleur, ecran }
    }

    /// Transmet une action au contrôleur.
    pub fn action(&mut self, action: &Action) {
        self.controleur.traiter(action, &mut self.ecran);
    }

    /// Même chose, depuis un code de bouton ("sin", "M+", "7", ...).
    pub fn code(&mut self, code: &str) {
        self.action(&Action::depuis_code(code));
    }
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(ConfigCalc::default())
    }
}
