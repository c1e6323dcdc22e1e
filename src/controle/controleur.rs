// src/controle/controleur.rs
//
// Machine à états de la calculatrice.
//
// - Éteinte : toute action autre que `power` est ignorée.
// - Erreur  : la touche suivante efface tampon + erreur, PUIS fait son propre effet.
// - Après un `=` réussi : un chiffre (ou `.`) recommence une expression,
//   un opérateur continue sur le résultat.
// - M+ / M- avalent les erreurs d’évaluation (mémoire inchangée) ;
//   `=` les affiche (marqueur d’erreur).

use tracing::{debug, info, trace, warn};

use super::action::{texte_fonction, Action};
use super::etat::{Alimentation, EtatCalc};
use super::sorties::Sorties;
use crate::config::ConfigCalc;
use crate::noyau::jetons::{chiffre_en_exposant, est_exposant};
use crate::noyau::{eval_expression, format_nombre, ModeAngle};

/// Symboles acceptés en passe-plat (en plus des lettres, chiffres et exposants).
const SYMBOLES_SURFACE: &str = ".+-×÷^()!π√ⁿ⁻";

#[derive(Clone, Debug)]
pub struct Controleur {
    etat: EtatCalc,
    config: ConfigCalc,
}

impl Controleur {
    pub fn new(config: ConfigCalc) -> Self {
        Self {
            etat: EtatCalc::new(config.mode_angle),
            config,
        }
    }

    pub fn etat(&self) -> &EtatCalc {
        &self.etat
    }

    /// Traite UNE action jusqu’au bout.
    pub fn traiter(&mut self, action: &Action, sorties: &mut impl Sorties) {
        debug!(?action, tampon = %self.etat.tampon, "action");

        if *action != Action::Alimentation {
            if !self.etat.est_allumee() {
                trace!("éteinte : action ignorée");
                return;
            }
            if self.etat.erreur {
                self.etat.tampon.clear();
                self.etat.erreur = false;
                self.etat.vient_d_evaluer = false;
                sorties.afficher(self.etat.texte_affiche());
            }
        }

        match action {
            Action::Alimentation => self.bascule_alimentation(sorties),

            Action::ToutEffacer => {
                self.etat.tampon.clear();
                self.etat.vient_d_evaluer = false;
                if self.config.ac_efface_ans {
                    self.etat.dernier_resultat = None;
                }
                sorties.historique("");
                sorties.afficher(self.etat.texte_affiche());
            }

            Action::Effacer => {
                self.etat.retire_dernier();
                self.etat.vient_d_evaluer = false;
                sorties.afficher(self.etat.texte_affiche());
            }

            Action::Egal => self.egal(sorties),

            Action::MemoireEfface => self.etat.memoire = 0.0,
            Action::MemoireRappel => {
                self.etat.tampon = format_nombre(self.etat.memoire);
                self.etat.vient_d_evaluer = false;
                sorties.afficher(self.etat.texte_affiche());
            }
            Action::MemoirePlus => self.accumule(1.0),
            Action::MemoireMoins => self.accumule(-1.0),

            Action::Ans => self.ans(sorties),

            Action::Angle(mode) => self.change_mode(*mode),
            Action::BasculeAngle => self.change_mode(self.etat.mode_angle.bascule()),

            Action::Chiffre(c) => {
                if self.etat.vient_d_evaluer {
                    self.etat.tampon.clear();
                }
                if *c == '.' {
                    self.etat.exposant_en_ascii();
                }
                let c = if self.etat.en_exposant() {
                    chiffre_en_exposant(*c).unwrap_or(*c)
                } else {
                    *c
                };
                self.saisit(c.encode_utf8(&mut [0; 4]), sorties);
            }

            Action::Insertion(texte) => self.saisit(texte, sorties),
            Action::Fonction(f) => self.saisit(&texte_fonction(*f), sorties),

            Action::Saisie(code) => match filtre_saisie(code) {
                Some(texte) => self.saisit(&texte, sorties),
                None => debug!(code = %code, "saisie hors alphabet ignorée"),
            },
        }
    }

    /* ------------------------ Transitions ------------------------ */

    fn bascule_alimentation(&mut self, sorties: &mut impl Sorties) {
        match self.etat.alimentation {
            Alimentation::Allumee => {
                self.etat.alimentation = Alimentation::Eteinte;
                self.etat.tampon.clear();
                self.etat.erreur = false;
                self.etat.vient_d_evaluer = false;
                sorties.historique("");
                sorties.afficher("");
                info!("calculatrice éteinte");
            }
            Alimentation::Eteinte => {
                self.etat.alimentation = Alimentation::Allumee;
                sorties.afficher(self.etat.texte_affiche());
                info!("calculatrice allumée");
            }
        }
    }

    fn egal(&mut self, sorties: &mut impl Sorties) {
        match eval_expression(&self.etat.tampon, &self.etat.contexte()) {
            Ok(v) => {
                let texte = format_nombre(v);
                debug!(tampon = %self.etat.tampon, resultat = %texte, "évaluation");

                sorties.historique(&format!("{} = {}", self.etat.tampon, texte));
                sorties.afficher(&texte);

                self.etat.dernier_resultat = Some(v);
                self.etat.tampon = texte;
                self.etat.vient_d_evaluer = true;
            }
            Err(e) => {
                warn!(
                    tampon = %self.etat.tampon,
                    genre = ?e.genre(),
                    erreur = %e,
                    "évaluation impossible"
                );
                self.etat.erreur = true;
                self.etat.vient_d_evaluer = false;
                sorties.afficher(&self.config.marqueur_erreur);
            }
        }
    }

    /// M+ (signe = 1) / M- (signe = -1). Les erreurs sont avalées.
    fn accumule(&mut self, signe: f64) {
        match eval_expression(&self.etat.tampon, &self.etat.contexte()) {
            Ok(v) => {
                let m = self.etat.memoire + signe * v;
                if m.is_finite() {
                    self.etat.memoire = m;
                } else {
                    debug!(memoire = self.etat.memoire, v, "mémoire : dépassement ignoré");
                }
            }
            Err(e) => debug!(genre = ?e.genre(), erreur = %e, "mémoire : évaluation ignorée"),
        }
    }

    fn ans(&mut self, sorties: &mut impl Sorties) {
        if self.etat.dernier_resultat.is_none() {
            debug!("ans : aucun résultat, ignoré");
            return;
        }

        if self.etat.vient_d_evaluer {
            self.etat.tampon = "Ans".to_string();
            self.etat.vient_d_evaluer = false;
            sorties.afficher(self.etat.texte_affiche());
            return;
        }

        let texte = if self.etat.termine_par_valeur() {
            "×Ans"
        } else {
            "Ans"
        };
        self.saisit(texte, sorties);
    }

    fn change_mode(&mut self, mode: ModeAngle) {
        if self.etat.mode_angle != mode {
            info!(mode = mode.libelle(), "mode d’angle");
        }
        self.etat.mode_angle = mode;
    }

    /// Ajout au tampon (borné), puis affichage.
    fn saisit(&mut self, texte: &str, sorties: &mut impl Sorties) {
        self.etat.vient_d_evaluer = false;
        if !self.etat.ajoute(texte, self.config.longueur_max) {
            debug!(longueur_max = self.config.longueur_max, "tampon plein, saisie ignorée");
        }
        sorties.afficher(self.etat.texte_affiche());
    }
}

/// Passe-plat : garde l’alphabet de surface, `*` `/` `−` écrits `×` `÷` `-`.
/// Un seul caractère étranger et tout est refusé.
fn filtre_saisie(code: &str) -> Option<String> {
    let texte: Option<String> = code
        .chars()
        .map(|c| match c {
            '*' => Some('×'),
            '/' => Some('÷'),
            '−' => Some('-'),
            c if c.is_ascii_alphanumeric() || est_exposant(c) || SYMBOLES_SURFACE.contains(c) => {
                Some(c)
            }
            _ => None,
        })
        .collect();
    texte.filter(|t| !t.is_empty())
}
