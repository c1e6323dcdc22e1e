// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Chaque bouton émet un code d’action ; rien n’est évalué ici
// - Écran : historique (petit) + affichage (grand), indicateurs DEG/RAD et M
//
// Note :
// - Le clavier est lu dans app.rs (une seule fois par frame)

use eframe::egui;

use super::etat::AppCalc;

/// Pavé : (libellé, code d’action), ligne par ligne.
const PAVE: &[&[(&str, &str)]] = &[
    &[("MC", "MC"), ("MR", "MR"), ("M+", "M+"), ("M-", "M-"), ("AC", "AC"), ("C", "C")],
    &[("sin", "sin"), ("cos", "cos"), ("tan", "tan"), ("log", "log"), ("ln", "ln"), ("π", "pi")],
    &[("sin⁻¹", "arcsin"), ("cos⁻¹", "arccos"), ("tan⁻¹", "arctan"), ("√", "sqrt"), ("³√", "cbrt"), ("ⁿ√", "nthroot")],
    &[("x²", "pow2"), ("x³", "pow3"), ("xʸ", "pow"), ("x⁻¹", "inv"), ("n!", "fact"), ("e", "e")],
    &[("7", "7"), ("8", "8"), ("9", "9"), ("÷", "/"), ("(", "("), (")", ")")],
    &[("4", "4"), ("5", "5"), ("6", "6"), ("×", "*"), ("%", "percent"), ("EXP", "exp")],
    &[("1", "1"), ("2", "2"), ("3", "3"), ("−", "-"), ("Ans", "ans"), ("=", "=")],
    &[("0", "0"), (".", "."), ("+", "+")],
];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                self.ui_barre(ui);

                ui.add_space(6.0);
                self.ui_ecran(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_pave(ui);
            });
    }

    fn ui_barre(&mut self, ui: &mut egui::Ui) {
        let etat = self.controleur.etat();
        let allumee = etat.est_allumee();
        let libelle_mode = etat.mode_angle.libelle();
        let memoire = etat.memoire_active();

        ui.horizontal(|ui| {
            let titre = if allumee { "Éteindre" } else { "Allumer" };
            if ui.button(titre).clicked() {
                self.code("power");
            }

            ui.separator();

            if ui
                .button(libelle_mode)
                .on_hover_text("Bascule degré / radian")
                .clicked()
            {
                self.code("mode");
            }

            if memoire {
                ui.strong("M");
            }
        });
    }

    fn ui_ecran(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());

                ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                    ui.push_id("historique_out", |ui| {
                        ui.small(&self.ecran.historique);
                    });
                    ui.push_id("affichage_out", |ui| {
                        ui.label(
                            egui::RichText::new(&self.ecran.affichage)
                                .monospace()
                                .size(28.0),
                        );
                    });
                });
            });
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_calculatrice")
            .num_columns(6)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in PAVE {
                    for (libelle, code) in ligne.iter() {
                        self.bouton(ui, libelle, code);
                    }
                    ui.end_row();
                }
            });
    }

    fn bouton(&mut self, ui: &mut egui::Ui, libelle: &str, code: &str) {
        let resp = ui.add_sized([56.0, 34.0], egui::Button::new(libelle));
        if resp.clicked() {
            self.code(code);
        }
    }
}
