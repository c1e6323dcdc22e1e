// src/controle.rs
//
// Contrôleur (machine à états) — module racine
// --------------------------------------------
// Rôle:
// - Déclarer les sous-modules (action, etat, sorties, controleur)
// - Ré-exporter ce dont le front-end a besoin
//
// Aucune dépendance à l’UI : le contrôleur reçoit des `Action`
// et écrit dans des `Sorties` (écran + historique).

pub mod action;
pub mod controleur;
pub mod etat;
pub mod sorties;

pub use action::{action_pour_touche, Action};
pub use controleur::Controleur;
pub use sorties::Sorties;
