//! schulfit-berichte: taegliche Gesundheitsberichte
//!
//! Schueler melden einmal taeglich Temperatur, Gewicht, Groesse,
//! Stimmung und optional eine Beschwerde; Lehrer sehen die Meldungen
//! ihrer Klasse und antworten darauf. Jede Operation nimmt die
//! Identitaet des Aufrufers entgegen und erzwingt Rolle und
//! Klassenzugehoerigkeit: ein Bericht gehoert immer dem angemeldeten
//! Schueler, eine Antwort immer einer Lehrkraft derselben Klasse.

pub mod error;
pub mod service;
pub mod stimmung;

pub use error::{BerichtFehler, BerichtResult};
pub use service::{BerichtService, NeueMeldung};
pub use stimmung::Stimmung;
