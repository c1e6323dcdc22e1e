//! Noyau de la calculatrice
//!
//! Organisation interne :
//! - jetons.rs  : tokenisation de la syntaxe de surface
//! - canon.rs   : canonisation ordonnée des jetons (exposants, E, !, Ans, ×implicite)
//! - rpn.rs     : shunting-yard + construction Expr
//! - expr.rs    : AST + forme canonique (Display)
//! - trig.rs    : mode d’angle (degré / radian)
//! - format.rs  : forme textuelle d’un résultat
//! - erreur.rs  : erreurs classées
//! - eval.rs    : pipeline complet + évaluation

pub mod canon;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod rpn;
pub mod trig;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use canon::Contexte;
pub use eval::eval_expression;
pub use format::format_nombre;
pub use trig::ModeAngle;
