// src/config.rs
//
// Réglages de la calculatrice (fichier TOML optionnel, natif seulement).
//
//   mode_angle      = "degre" | "radian"
//   marqueur_erreur = "Error"
//   ac_efface_ans   = true
//   longueur_max    = 256
//
// Clé inconnue => erreur de format.

use serde::Deserialize;

use crate::noyau::ModeAngle;

/// Nom du fichier lu dans le répertoire courant.
#[cfg(not(target_arch = "wasm32"))]
pub const FICHIER_CONFIG: &str = "calculatrice.toml";

/// Variable d’environnement qui remplace le chemin.
#[cfg(not(target_arch = "wasm32"))]
pub const VAR_CONFIG: &str = "CALCULATRICE_CONFIG";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ConfigCalc {
    /// Mode d’angle au démarrage.
    pub mode_angle: ModeAngle,
    /// Texte affiché quand `=` échoue.
    pub marqueur_erreur: String,
    /// AC efface aussi le dernier résultat (Ans).
    pub ac_efface_ans: bool,
    /// Longueur maximale du tampon, en caractères.
    pub longueur_max: usize,
}

impl Default for ConfigCalc {
    fn default() -> Self {
        Self {
            mode_angle: ModeAngle::Degre,
            marqueur_erreur: "Error".to_string(),
            ac_efface_ans: true,
            longueur_max: 256,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, thiserror::Error)]
pub enum ErreurConfig {
    #[error("lecture du fichier de configuration impossible : {0}")]
    Lecture(#[from] std::io::Error),

    #[error("fichier de configuration invalide : {0}")]
    Format(#[from] toml::de::Error),
}

#[cfg(not(target_arch = "wasm32"))]
impl ConfigCalc {
    pub fn depuis_toml(texte: &str) -> Result<Self, ErreurConfig> {
        Ok(toml::from_str(texte)?)
    }

    pub fn charger(chemin: &std::path::Path) -> Result<Self, ErreurConfig> {
        let texte = std::fs::read_to_string(chemin)?;
        Self::depuis_toml(&texte)
    }

    /// Fichier absent => défauts (silencieux) ; fichier invalide => défauts + avertissement.
    pub fn charger_ou_defaut(chemin: &std::path::Path) -> Self {
        match Self::charger(chemin) {
            Ok(config) => {
                tracing::info!(chemin = %chemin.display(), "configuration chargée");
                config
            }
            Err(ErreurConfig::Lecture(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(chemin = %chemin.display(), "pas de configuration, défauts");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(chemin = %chemin.display(), erreur = %e, "configuration ignorée");
                Self::default()
            }
        }
    }

    /// `$CALCULATRICE_CONFIG`, sinon `calculatrice.toml`.
    pub fn chemin_par_defaut() -> std::path::PathBuf {
        std::env::var_os(VAR_CONFIG)
            .map(std::path::PathBuf::from)
            .unwrap_or_else(|| std::path::PathBuf::from(FICHIER_CONFIG))
    }
}
