// src/controle/sorties.rs
//
// Ce que le contrôleur produit : un écran et une ligne d’historique.
// Le front-end (ou un test) fournit l’implémentation concrète.

pub trait Sorties {
    /// Tampon courant, résultat, marqueur d’erreur, ou "" (éteinte).
    fn afficher(&mut self, texte: &str);

    /// "" (effacement) ou "<saisie> = <résultat>".
    fn historique(&mut self, texte: &str);
}
