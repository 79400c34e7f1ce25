//! tRNA candidates offered while the ribosome waits at a codon.

use crate::{
    GENETIC_CODE,
    config::SimulationConfig,
    error::SimulationIssue,
    genetic_code::Residue,
    layout::LayoutSettings,
    nucleotide::codon_to_anticodon,
};
use dogma_protocol::{CandidateView, Point};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use tracing::{debug, warn};

#[derive(Clone, Debug, PartialEq)]
pub struct TrnaCandidate {
    pub id: usize,
    pub anticodon: String,
    pub amino_acid: String,
    pub is_correct: bool,
    /// Top-left corner as currently drawn.
    pub position: Point,
    /// Where the candidate was spawned and returns to after a failed drop.
    pub origin: Point,
}

impl TrnaCandidate {
    fn new(anticodon: String, amino_acid: String, is_correct: bool) -> Self {
        Self {
            id: 0,
            anticodon,
            amino_acid,
            is_correct,
            position: Point::default(),
            origin: Point::default(),
        }
    }

    pub fn snap_back(&mut self) {
        self.position = self.origin;
    }

    pub fn view(&self) -> CandidateView {
        CandidateView {
            id: self.id,
            anticodon: self.anticodon.clone(),
            amino_acid: self.amino_acid.clone(),
            is_correct: self.is_correct,
            position: self.position,
            origin: self.origin,
        }
    }
}

/// The candidates for one codon pause. A new pause always gets a new generation number,
/// which is how stale drag references are recognised.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CandidateBatch {
    generation: u64,
    candidates: Vec<TrnaCandidate>,
}

impl CandidateBatch {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn candidates(&self) -> &[TrnaCandidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&TrnaCandidate> {
        self.candidates.get(id)
    }

    pub fn get_mut(&mut self, id: usize) -> Option<&mut TrnaCandidate> {
        self.candidates.get_mut(id)
    }

    pub fn correct(&self) -> Option<&TrnaCandidate> {
        self.candidates.iter().find(|c| c.is_correct)
    }

    pub fn snap_back(&mut self, id: usize) {
        if let Some(candidate) = self.candidates.get_mut(id) {
            candidate.snap_back();
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedBatch {
    pub batch: CandidateBatch,
    pub issue: Option<SimulationIssue>,
}

pub struct TrnaChallengeGenerator<R: Rng> {
    rng: R,
    candidate_count: usize,
    retry_budget: usize,
    layout: LayoutSettings,
    generation: u64,
}

impl TrnaChallengeGenerator<StdRng> {
    /// Seeded from the configuration when a seed is given, from OS entropy otherwise.
    pub fn from_config(config: &SimulationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(rng, config)
    }
}

impl<R: Rng> TrnaChallengeGenerator<R> {
    pub fn new(rng: R, config: &SimulationConfig) -> Self {
        Self {
            rng,
            candidate_count: config.candidate_count,
            retry_budget: config.retry_budget,
            layout: config.layout.clone(),
            generation: 0,
        }
    }

    pub fn generate(&mut self, codon: &[u8]) -> GeneratedBatch {
        self.generation += 1;
        let generation = self.generation;

        let amino_acid = match GENETIC_CODE.translate(codon) {
            Some(Residue::AminoAcid(aa)) => aa.clone(),
            _ => {
                let issue = SimulationIssue::UntranslatableCodon {
                    codon: String::from_utf8_lossy(codon).to_string(),
                };
                warn!("{issue}");
                return GeneratedBatch {
                    batch: CandidateBatch {
                        generation,
                        candidates: vec![],
                    },
                    issue: Some(issue),
                };
            }
        };

        let mut candidates = vec![TrnaCandidate::new(
            codon_to_anticodon(codon),
            amino_acid,
            true,
        )];

        let wanted = self.candidate_count.saturating_sub(1);
        let pool = GENETIC_CODE.codons();
        let mut attempts = 0;
        while candidates.len() < wanted + 1 && attempts < self.retry_budget {
            attempts += 1;
            let Some(random_codon) = pool.choose(&mut self.rng) else {
                break;
            };
            let Some(Residue::AminoAcid(aa)) = GENETIC_CODE.translate(random_codon) else {
                continue;
            };
            let anticodon = codon_to_anticodon(random_codon);
            if candidates.iter().any(|c| c.anticodon == anticodon) {
                continue;
            }
            candidates.push(TrnaCandidate::new(anticodon, aa.clone(), false));
        }

        let generated = candidates.len() - 1;
        let issue = (generated < wanted).then(|| {
            let issue = SimulationIssue::CandidateGenerationDegraded {
                requested: wanted,
                generated,
            };
            warn!("{issue}");
            issue
        });

        candidates.shuffle(&mut self.rng);
        let xs = self.layout.spread(candidates.len());
        let jitter = self.layout.trna_spawn_jitter;
        for (id, (candidate, x)) in candidates.iter_mut().zip(xs).enumerate() {
            let dy = if jitter > 0.0 {
                self.rng.gen_range(-jitter..jitter)
            } else {
                0.0
            };
            candidate.id = id;
            candidate.origin = Point::new(x, self.layout.trna_spawn_y + dy);
            candidate.position = candidate.origin;
        }
        debug!(
            "Generated {} tRNA candidates for codon {} after {attempts} draws",
            candidates.len(),
            String::from_utf8_lossy(codon)
        );

        GeneratedBatch {
            batch: CandidateBatch {
                generation,
                candidates,
            },
            issue,
        }
    }
}
