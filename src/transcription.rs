use crate::{
    error::SimulationIssue,
    nucleotide::{UNKNOWN_BASE, rna_complement},
};
use tracing::warn;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TranscriptionStep {
    /// One base was appended to the mRNA.
    Base {
        position: usize,
        base: u8,
        issue: Option<SimulationIssue>,
    },
    Complete,
}

/// RNA polymerase walking along a fixed template, one base per step.
#[derive(Clone, Debug, Default)]
pub struct TranscriptionEngine {
    template: Vec<u8>,
    progress: usize,
    mrna: Vec<u8>,
}

impl TranscriptionEngine {
    pub fn new(template: &[u8]) -> Self {
        Self {
            template: template.to_vec(),
            progress: 0,
            mrna: Vec::with_capacity(template.len()),
        }
    }

    pub fn template(&self) -> &[u8] {
        &self.template
    }

    pub fn progress(&self) -> usize {
        self.progress
    }

    pub fn mrna(&self) -> &[u8] {
        &self.mrna
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= self.template.len()
    }

    pub fn reset(&mut self) {
        self.progress = 0;
        self.mrna.clear();
    }

    pub fn step(&mut self) -> TranscriptionStep {
        let Some(&dna_base) = self.template.get(self.progress) else {
            return TranscriptionStep::Complete;
        };
        let position = self.progress;
        let base = rna_complement(dna_base);
        let issue = (base == UNKNOWN_BASE).then(|| {
            let issue = SimulationIssue::MalformedBase {
                position,
                symbol: dna_base as char,
            };
            warn!("{issue}");
            issue
        });
        self.mrna.push(base);
        self.progress += 1;
        TranscriptionStep::Base {
            position,
            base,
            issue,
        }
    }
}
