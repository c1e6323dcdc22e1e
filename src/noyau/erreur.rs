// src/noyau/erreur.rs
//
// Erreurs classées du noyau.
// Quatre genres seulement : le contrôleur les écrase en un seul état “Error”,
// mais les tests (et les journaux) ont besoin de savoir lequel est sorti.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErreurCalc {
    /// Expression mal formée ou incomplète (parenthèses, opérateur pendant, entrée vide).
    #[error("erreur de syntaxe : {0}")]
    Syntaxe(String),

    /// `Ans` utilisé sans résultat précédent.
    #[error("Ans : aucun résultat précédent")]
    Reference,

    /// Hors domaine (factorielle négative, racine paire d’un négatif, log ≤ 0, ...).
    #[error("hors domaine : {0}")]
    Domaine(String),

    /// Division par zéro ou résultat non fini.
    #[error("erreur arithmétique : {0}")]
    Arithmetique(String),
}

/// Genre d’erreur, sans le message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenreErreur {
    Syntaxe,
    Reference,
    Domaine,
    Arithmetique,
}

impl ErreurCalc {
    pub fn syntaxe(msg: impl Into<String>) -> Self {
        Self::Syntaxe(msg.into())
    }

    pub fn domaine(msg: impl Into<String>) -> Self {
        Self::Domaine(msg.into())
    }

    pub fn arithmetique(msg: impl Into<String>) -> Self {
        Self::Arithmetique(msg.into())
    }

    pub fn genre(&self) -> GenreErreur {
        match self {
            Self::Syntaxe(_) => GenreErreur::Syntaxe,
            Self::Reference => GenreErreur::Reference,
            Self::Domaine(_) => GenreErreur::Domaine,
            Self::Arithmetique(_) => GenreErreur::Arithmetique,
        }
    }
}
