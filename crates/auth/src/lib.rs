//! schulfit-auth: der Auth-Kern
//!
//! Dieses Crate implementiert:
//! - [`KontoStore`]: die Konto-Verwaltung als asynchrone Schnittstelle,
//!   mit zwei Varianten ([`DemoKontoStore`], [`BackendKontoStore`])
//! - [`SessionSpeicher`]: dauerhafte Ablage der aktiven Identitaet,
//!   damit ein Neustart die Anmeldung wiederherstellen kann
//! - [`AuthKern`]: der Zustandsautomat, der beides zusammenhaelt und die
//!   Operationen anmelden/registrieren/abmelden anbietet
//! - [`guard`]: die Route-Guard-Entscheidung fuer rollengeschuetzte Ansichten
//! - Passwort-Hashing mit Argon2id
//!
//! Der Kern wird einmal beim Start konstruiert und per `Arc` an die
//! Oberflaeche gereicht, es gibt bewusst keinen globalen Zustand.

pub mod backend_store;
pub mod demo_store;
pub mod error;
pub mod guard;
pub mod kern;
pub mod konto_store;
pub mod password;
pub mod session_speicher;

// Bequeme Re-Exporte
pub use backend_store::BackendKontoStore;
pub use demo_store::DemoKontoStore;
pub use error::{AuthError, AuthResult};
pub use guard::{pruefen, GuardEntscheidung};
pub use kern::{AuthKern, AuthZustand};
pub use konto_store::KontoStore;
pub use password::{passwort_hashen, passwort_verifizieren};
pub use session_speicher::{DateiSessionSpeicher, SessionSpeicher, SpeicherSessionSpeicher};
