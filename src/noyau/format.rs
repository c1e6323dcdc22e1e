// src/noyau/format.rs
//
// Forme textuelle d’un résultat.
// Contrat : le texte produit est relu par jetons.rs et redonne EXACTEMENT le même f64
// (plus courte écriture décimale qui fait l’aller-retour, notation E aux extrêmes).

/// Au-delà : notation E (1E21, 2.5E-8).
const SEUIL_GRAND: f64 = 1e21;
const SEUIL_PETIT: f64 = 1e-7;

pub fn format_nombre(x: f64) -> String {
    if x == 0.0 {
        // -0 compris
        return "0".to_string();
    }

    let a = x.abs();
    if a.is_finite() && (a >= SEUIL_GRAND || a < SEUIL_PETIT) {
        // "{:e}" donne la mantisse la plus courte : 1.5e-8 -> "1.5E-8"
        return format!("{x:e}").replace('e', "E");
    }

    format!("{x}")
}
