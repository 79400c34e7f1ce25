//! Base pairing rules between template DNA, mRNA and tRNA anticodons.

/// Stands in for any symbol that is not a base of the expected alphabet.
pub const UNKNOWN_BASE: u8 = b'?';

pub const START_CODON: &[u8; 3] = b"AUG";

#[inline(always)]
pub fn is_rna_base(base: u8) -> bool {
    matches!(base, b'A' | b'C' | b'G' | b'U')
}

/// The RNA base an RNA polymerase pairs with a DNA template base.
#[inline(always)]
pub fn rna_complement(dna_base: u8) -> u8 {
    match dna_base {
        b'A' => b'U',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        _ => UNKNOWN_BASE,
    }
}

/// Watson-Crick partner of an RNA base, as used for codon/anticodon pairing.
#[inline(always)]
pub fn rna_pair(rna_base: u8) -> u8 {
    match rna_base {
        b'A' => b'U',
        b'U' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        _ => UNKNOWN_BASE,
    }
}

/// Anticodon written 5'->3': complement every base of the codon, then reverse.
pub fn codon_to_anticodon(codon: &[u8]) -> String {
    let complement: Vec<u8> = codon.iter().map(|base| rna_pair(*base)).collect();
    complement.iter().rev().map(|base| *base as char).collect()
}
