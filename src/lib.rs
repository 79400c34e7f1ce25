use genetic_code::GeneticCode;
use lazy_static::lazy_static;
use messages::MessageCatalog;

pub mod about;
pub mod config;
pub mod engine;
pub mod error;
pub mod genetic_code;
pub mod interaction;
pub mod layout;
pub mod messages;
pub mod nucleotide;
pub mod simulation;
pub mod transcription;
pub mod translation;
pub mod trna;

pub use dogma_protocol as protocol;

lazy_static! {
    // Standard genetic code, RNA codon -> amino acid
    pub static ref GENETIC_CODE: GeneticCode = GeneticCode::standard();

    // Status and instruction texts
    pub static ref MESSAGES: MessageCatalog = MessageCatalog::default();
}
