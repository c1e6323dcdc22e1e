// src/app.rs
//
// Calculatrice scientifique — module App (racine)
// -----------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Clavier : lu ICI, une fois par frame, puis traduit en actions
// (chiffres + - * / . ( ) =, Enter, Backspace = C, Delete = AC).

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use eframe::egui;

use crate::controle::{action_pour_touche, Action};

/// Événements clavier de la frame -> actions.
fn actions_clavier(ctx: &egui::Context) -> Vec<Action> {
    ctx.input(|i| {
        i.events
            .iter()
            .filter_map(|ev| match ev {
                egui::Event::Text(t) => action_pour_touche(t),
                egui::Event::Key {
                    key: key @ (egui::Key::Enter | egui::Key::Backspace | egui::Key::Delete),
                    pressed: true,
                    ..
                } => action_pour_touche(key.name()),
                _ => None,
            })
            .collect()
    })
}

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for action in actions_clavier(ctx) {
            self.action(&action);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // méthode publique (dans vue.rs)
        });
    }
}
