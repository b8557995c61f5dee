//! schulfit-core: gemeinsame Domaenen-Typen
//!
//! Dieses Crate definiert:
//! - ID-Newtypes (KontoId, BerichtId)
//! - Rollen-Modell (RollenArt, Rolle mit Klassenzuweisung)
//! - Identitaet (der angemeldete Principal) inkl. Draht-Format
//! - NeuesKonto (Antrag zur Kontoerstellung durch den Admin)
//! - Validierungsfehler

pub mod error;
pub mod identitaet;
pub mod types;

// Bequeme Re-Exporte
pub use error::ValidierungsFehler;
pub use identitaet::{Identitaet, Klasse, NeuesKonto, Rolle, RollenArt};
pub use types::{BerichtId, KontoId};
