use crate::{error::DogmaError, nucleotide::is_rna_base};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type Codon = [u8; 3];

const STOP_LABEL: &str = "STOP";

/// What a codon encodes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Residue {
    AminoAcid(String),
    Stop,
}

impl Residue {
    pub fn is_stop(&self) -> bool {
        matches!(self, Residue::Stop)
    }

    pub fn label(&self) -> &str {
        match self {
            Residue::AminoAcid(aa) => aa,
            Residue::Stop => STOP_LABEL,
        }
    }
}

/// Codon table mapping mRNA triplets to three-letter amino acid labels.
#[derive(Clone, Debug, Default)]
pub struct GeneticCode {
    codons: HashMap<Codon, Residue>,
}

impl GeneticCode {
    /// The standard table, embedded at build time.
    pub fn standard() -> Self {
        Self::from_json_str(include_str!("../assets/genetic_code.json"))
            .expect("Embedded genetic code is invalid")
    }

    /// Reads a JSON object of `"CODON": "Label"` pairs; `"STOP"` marks a stop codon.
    pub fn from_json_str(text: &str) -> Result<Self, DogmaError> {
        let table: HashMap<String, String> = serde_json::from_str(text)?;
        let mut codons = HashMap::with_capacity(table.len());
        for (codon, label) in table {
            let codon = Self::parse_codon(&codon)?;
            let residue = match label.as_str() {
                STOP_LABEL => Residue::Stop,
                _ => Residue::AminoAcid(label),
            };
            codons.insert(codon, residue);
        }
        Ok(Self { codons })
    }

    fn parse_codon(codon: &str) -> Result<Codon, DogmaError> {
        let bytes: Codon = codon
            .as_bytes()
            .try_into()
            .map_err(|_| DogmaError::InvalidConfig(format!("Codon '{codon}' is not 3 bases")))?;
        if !bytes.iter().all(|b| is_rna_base(*b)) {
            return Err(DogmaError::InvalidConfig(format!(
                "Codon '{codon}' contains non-RNA bases"
            )));
        }
        Ok(bytes)
    }

    pub fn translate(&self, codon: &[u8]) -> Option<&Residue> {
        let codon: &Codon = codon.try_into().ok()?;
        self.codons.get(codon)
    }

    #[inline(always)]
    pub fn is_stop_codon(&self, codon: &[u8]) -> bool {
        self.translate(codon).is_some_and(Residue::is_stop)
    }

    pub fn len(&self) -> usize {
        self.codons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codons.is_empty()
    }

    /// All codons in lexical order, so sampling with a seeded RNG is reproducible.
    pub fn codons(&self) -> Vec<Codon> {
        self.codons.keys().copied().sorted().collect()
    }

    /// Codons that encode an amino acid, in lexical order.
    pub fn sense_codons(&self) -> Vec<Codon> {
        self.codons
            .iter()
            .filter(|(_, residue)| !residue.is_stop())
            .map(|(codon, _)| *codon)
            .sorted()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table() {
        let code = GeneticCode::standard();
        assert_eq!(code.len(), 64);
        assert_eq!(
            code.translate(b"AUG"),
            Some(&Residue::AminoAcid("Met".to_string()))
        );
        assert_eq!(code.translate(b"UUU").map(Residue::label), Some("Phe"));
        assert_eq!(code.translate(b"GGG").map(Residue::label), Some("Gly"));
        assert!(code.is_stop_codon(b"UAA"));
        assert!(code.is_stop_codon(b"UAG"));
        assert!(code.is_stop_codon(b"UGA"));
        assert!(!code.is_stop_codon(b"UGG"));
        assert_eq!(code.sense_codons().len(), 61);
    }

    #[test]
    fn test_unknown_codons() {
        let code = GeneticCode::standard();
        assert_eq!(code.translate(b"AU?"), None);
        assert_eq!(code.translate(b"AU"), None);
        assert_eq!(code.translate(b"AUGA"), None);
        assert!(!code.is_stop_codon(b"U?A"));
    }

    #[test]
    fn test_codons_sorted() {
        let codons = GeneticCode::standard().codons();
        assert_eq!(&codons[0], b"AAA");
        assert_eq!(&codons[63], b"UUU");
    }

    #[test]
    fn test_invalid_table() {
        assert!(GeneticCode::from_json_str(r#"{"AUGA": "Met"}"#).is_err());
        assert!(GeneticCode::from_json_str(r#"{"ATG": "Met"}"#).is_err());
        assert!(GeneticCode::from_json_str("[]").is_err());
    }
}
