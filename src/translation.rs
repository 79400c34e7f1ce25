//! Ribosome walk over the mRNA: find the start codon, then pause at every codon until the
//! matching tRNA is dropped on the ribosome.

use crate::{
    GENETIC_CODE,
    error::SimulationIssue,
    genetic_code::Residue,
    interaction::DropVerdict,
    layout::LayoutSettings,
    nucleotide::START_CODON,
    trna::{CandidateBatch, GeneratedBatch, TrnaChallengeGenerator},
};
use dogma_protocol::TargetZone;
use rand::Rng;
use tracing::{debug, info, warn};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StopReason {
    StopCodon { codon: String },
    /// Fewer than three bases left before a stop codon was read.
    EndOfSequence,
    NoStartCodon,
    UntranslatableCodon { codon: String },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TranslationPhase {
    #[default]
    SeekingStart,
    AwaitingCodon,
    PausedForInput,
    Stopped(StopReason),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StartOutcome {
    pub start_index: usize,
    pub issue: Option<SimulationIssue>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CodonStep {
    Paused {
        codon: String,
        amino_acid: String,
        issue: Option<SimulationIssue>,
    },
    Stopped(StopReason),
    /// Not awaiting a codon: either paused for input or already stopped.
    Unchanged,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Advanced { amino_acid: String },
    Rejected { anticodon: String },
    Returned,
    /// The verdict did not belong to the current pause.
    Ignored,
}

#[derive(Clone, Debug, Default)]
pub struct TranslationEngine {
    phase: TranslationPhase,
    progress: usize,
    start_index: Option<usize>,
    polypeptide: Vec<String>,
    batch: Option<CandidateBatch>,
}

impl TranslationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &TranslationPhase {
        &self.phase
    }

    pub fn progress(&self) -> usize {
        self.progress
    }

    pub fn start_index(&self) -> Option<usize> {
        self.start_index
    }

    pub fn polypeptide(&self) -> &[String] {
        &self.polypeptide
    }

    pub fn batch(&self) -> Option<&CandidateBatch> {
        self.batch.as_ref()
    }

    pub fn batch_mut(&mut self) -> Option<&mut CandidateBatch> {
        self.batch.as_mut()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The codon under the ribosome, if three bases remain.
    pub fn current_codon<'a>(&self, mrna: &'a [u8]) -> Option<&'a [u8]> {
        mrna.get(self.progress..self.progress + 3)
    }

    pub fn target_zone(&self, layout: &LayoutSettings) -> Option<TargetZone> {
        (self.phase == TranslationPhase::PausedForInput).then(|| layout.target_zone(self.progress))
    }

    /// Places the ribosome on the leftmost AUG. The reading frame is not realigned when the
    /// start codon is off-frame.
    pub fn start(&mut self, mrna: &[u8]) -> Result<StartOutcome, SimulationIssue> {
        self.reset();
        let Some(start_index) = mrna.windows(3).position(|w| w == START_CODON) else {
            warn!("No start codon in mRNA of length {}", mrna.len());
            self.phase = TranslationPhase::Stopped(StopReason::NoStartCodon);
            return Err(SimulationIssue::NoStartCodonFound);
        };
        let issue = (start_index % 3 != 0).then(|| {
            let issue = SimulationIssue::OffFrameStartCodon { index: start_index };
            warn!("{issue}");
            issue
        });
        info!("Ribosome placed on start codon at {start_index}");
        self.progress = start_index;
        self.start_index = Some(start_index);
        self.phase = TranslationPhase::AwaitingCodon;
        Ok(StartOutcome { start_index, issue })
    }

    /// Reads the codon under the ribosome and either stops or pauses for a tRNA.
    pub fn advance<R: Rng>(
        &mut self,
        mrna: &[u8],
        generator: &mut TrnaChallengeGenerator<R>,
    ) -> CodonStep {
        if self.phase != TranslationPhase::AwaitingCodon {
            return CodonStep::Unchanged;
        }
        let Some(codon) = self.current_codon(mrna) else {
            return self.stop(StopReason::EndOfSequence);
        };
        let codon_text = String::from_utf8_lossy(codon).to_string();
        match GENETIC_CODE.translate(codon) {
            Some(Residue::Stop) => self.stop(StopReason::StopCodon { codon: codon_text }),
            Some(Residue::AminoAcid(amino_acid)) => {
                let GeneratedBatch { batch, issue } = generator.generate(codon);
                debug!("Ribosome paused at {} on codon {codon_text}", self.progress);
                self.batch = Some(batch);
                self.phase = TranslationPhase::PausedForInput;
                CodonStep::Paused {
                    codon: codon_text,
                    amino_acid: amino_acid.clone(),
                    issue,
                }
            }
            None => {
                warn!("Codon {codon_text} at {} cannot be translated", self.progress);
                self.stop(StopReason::UntranslatableCodon { codon: codon_text })
            }
        }
    }

    fn stop(&mut self, reason: StopReason) -> CodonStep {
        info!(
            "Translation stopped ({reason:?}) with {} residues",
            self.polypeptide.len()
        );
        self.batch = None;
        self.phase = TranslationPhase::Stopped(reason.clone());
        CodonStep::Stopped(reason)
    }

    /// Applies the outcome of a drop while paused at a codon.
    pub fn resolve(&mut self, verdict: DropVerdict) -> Resolution {
        if self.phase != TranslationPhase::PausedForInput {
            return Resolution::Ignored;
        }
        let Some(batch) = self.batch.as_mut() else {
            return Resolution::Ignored;
        };
        if verdict.generation() != batch.generation() {
            return Resolution::Ignored;
        }
        match verdict {
            DropVerdict::Correct { candidate_id, .. } => {
                let Some(candidate) = batch.get(candidate_id) else {
                    return Resolution::Ignored;
                };
                let amino_acid = candidate.amino_acid.clone();
                self.polypeptide.push(amino_acid.clone());
                self.progress += 3;
                self.batch = None;
                self.phase = TranslationPhase::AwaitingCodon;
                Resolution::Advanced { amino_acid }
            }
            DropVerdict::Incorrect { candidate_id, .. } => {
                batch.snap_back(candidate_id);
                match batch.get(candidate_id) {
                    Some(candidate) => Resolution::Rejected {
                        anticodon: candidate.anticodon.clone(),
                    },
                    None => Resolution::Ignored,
                }
            }
            DropVerdict::OffTarget { candidate_id, .. } => {
                batch.snap_back(candidate_id);
                Resolution::Returned
            }
        }
    }
}
