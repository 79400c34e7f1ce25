use crate::{
    MESSAGES,
    config::SimulationConfig,
    error::{DogmaError, SimulationIssue},
    interaction::DragInteractionController,
    messages::StatusMessage,
    transcription::{TranscriptionEngine, TranscriptionStep},
    translation::{CodonStep, Resolution, StopReason, TranslationEngine},
    trna::TrnaChallengeGenerator,
};
use dogma_protocol::{Command, Point, SimulationSnapshot, Stage, StatusKey, StatusView};
use rand::rngs::StdRng;
use tracing::{debug, info};

/// Owns every piece of run state. Driven by one `tick` per frame plus the command and
/// pointer events that arrive between ticks.
pub struct SimulationController {
    config: SimulationConfig,
    stage: Stage,
    transcription: TranscriptionEngine,
    translation: TranslationEngine,
    generator: TrnaChallengeGenerator<StdRng>,
    drag: DragInteractionController,
    status: StatusMessage,
    issues: Vec<SimulationIssue>,
    frame_counter: usize,
}

impl Default for SimulationController {
    fn default() -> Self {
        Self::build(SimulationConfig::default())
    }
}

impl SimulationController {
    pub fn new(config: SimulationConfig) -> Result<Self, DogmaError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SimulationConfig) -> Self {
        Self {
            stage: Stage::Idle,
            transcription: TranscriptionEngine::new(config.dna_template.as_bytes()),
            translation: TranslationEngine::new(),
            generator: TrnaChallengeGenerator::from_config(&config),
            drag: DragInteractionController::new(config.layout.clone()),
            status: StatusMessage::new(StatusKey::Idle),
            issues: vec![],
            frame_counter: 0,
            config,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn status(&self) -> &StatusMessage {
        &self.status
    }

    pub fn status_view(&self) -> StatusView {
        self.status.view(&MESSAGES, &self.config.language)
    }

    pub fn issues(&self) -> &[SimulationIssue] {
        &self.issues
    }

    pub fn transcription(&self) -> &TranscriptionEngine {
        &self.transcription
    }

    pub fn translation(&self) -> &TranslationEngine {
        &self.translation
    }

    pub fn mrna(&self) -> &[u8] {
        self.transcription.mrna()
    }

    pub fn polypeptide(&self) -> &[String] {
        self.translation.polypeptide()
    }

    pub fn drag(&self) -> &DragInteractionController {
        &self.drag
    }

    pub fn set_language(&mut self, language: &str) -> bool {
        if !MESSAGES.supports(language) {
            return false;
        }
        self.config.language = language.to_string();
        true
    }

    pub fn is_command_valid(&self, command: Command) -> bool {
        match command {
            Command::StartTranscription => self.stage == Stage::Idle,
            Command::StartTranslation => self.stage == Stage::Transcribed,
            Command::Reset => true,
        }
    }

    /// Runs a command. Returns false, and changes nothing, when the command is not valid in
    /// the current stage.
    pub fn execute(&mut self, command: Command) -> bool {
        match command {
            Command::StartTranscription => self.start_transcription(),
            Command::StartTranslation => self.start_translation(),
            Command::Reset => self.reset(),
        }
    }

    pub fn start_transcription(&mut self) -> bool {
        if !self.is_command_valid(Command::StartTranscription) {
            return false;
        }
        self.clear_run();
        self.enter(Stage::Transcribing, StatusMessage::new(StatusKey::TranscriptionActive));
        true
    }

    pub fn start_translation(&mut self) -> bool {
        if !self.is_command_valid(Command::StartTranslation) {
            return false;
        }
        self.drag.cancel();
        match self.translation.start(self.transcription.mrna()) {
            Ok(outcome) => {
                if let Some(issue) = outcome.issue {
                    self.issues.push(issue);
                }
                self.enter(
                    Stage::Translating,
                    StatusMessage::new(StatusKey::TranslationStarted),
                );
            }
            Err(issue) => {
                self.issues.push(issue);
                self.enter(Stage::Finished, StatusMessage::new(StatusKey::NoStartCodon));
            }
        }
        true
    }

    pub fn reset(&mut self) -> bool {
        self.clear_run();
        self.enter(Stage::Idle, StatusMessage::new(StatusKey::Idle));
        true
    }

    fn clear_run(&mut self) {
        self.transcription.reset();
        self.translation.reset();
        self.drag.cancel();
        self.issues.clear();
        self.frame_counter = 0;
    }

    fn enter(&mut self, stage: Stage, status: StatusMessage) {
        if stage != self.stage {
            info!("Stage {} -> {}", self.stage, stage);
        }
        self.stage = stage;
        self.status = status;
    }

    /// Advances the simulation by one frame.
    pub fn tick(&mut self) -> Stage {
        match self.stage {
            Stage::Transcribing => self.tick_transcription(),
            Stage::Translating => self.tick_translation(),
            Stage::Idle | Stage::Transcribed | Stage::PausedForTrna | Stage::Finished => {}
        }
        self.frame_counter += 1;
        self.stage
    }

    fn tick_transcription(&mut self) {
        if self.transcription.is_complete() {
            self.enter(
                Stage::Transcribed,
                StatusMessage::new(StatusKey::TranscriptionComplete),
            );
            return;
        }
        if self.frame_counter % self.config.frames_per_base() != 0 {
            return;
        }
        if let TranscriptionStep::Base {
            position,
            base,
            issue,
        } = self.transcription.step()
        {
            debug!("Transcribed base {position}: {}", base as char);
            if let Some(issue) = issue {
                self.issues.push(issue);
            }
        }
    }

    fn tick_translation(&mut self) {
        let step = self
            .translation
            .advance(self.transcription.mrna(), &mut self.generator);
        match step {
            CodonStep::Paused { codon, issue, .. } => {
                if let Some(issue) = issue {
                    self.issues.push(issue);
                }
                self.enter(
                    Stage::PausedForTrna,
                    StatusMessage::new(StatusKey::TranslationPaused).with_param("codon", codon),
                );
            }
            CodonStep::Stopped(reason) => {
                let status = match reason {
                    StopReason::StopCodon { codon } => {
                        StatusMessage::new(StatusKey::TranslationCompleteStop)
                            .with_param("codon", codon)
                    }
                    StopReason::EndOfSequence => {
                        StatusMessage::new(StatusKey::TranslationCompleteEnd)
                    }
                    StopReason::NoStartCodon => StatusMessage::new(StatusKey::NoStartCodon),
                    StopReason::UntranslatableCodon { codon } => {
                        self.issues.push(SimulationIssue::UntranslatableCodon {
                            codon: codon.clone(),
                        });
                        StatusMessage::new(StatusKey::UntranslatableCodon)
                            .with_param("codon", codon)
                    }
                };
                self.enter(Stage::Finished, status);
            }
            CodonStep::Unchanged => {}
        }
    }

    /// Picks up the topmost candidate under the pointer, if any.
    pub fn pointer_down(&mut self, pointer: Point) -> Option<usize> {
        if self.stage != Stage::PausedForTrna {
            return None;
        }
        let batch = self.translation.batch()?;
        self.drag.pick_up(batch, pointer)
    }

    pub fn pointer_move(&mut self, pointer: Point) -> bool {
        if self.stage != Stage::PausedForTrna {
            return false;
        }
        match self.translation.batch_mut() {
            Some(batch) => self.drag.drag(batch, pointer),
            None => false,
        }
    }

    /// Drops the held candidate and applies the verdict.
    pub fn pointer_up(&mut self) -> Option<Resolution> {
        let Some(target) = self
            .translation
            .target_zone(&self.config.layout)
            .filter(|_| self.stage == Stage::PausedForTrna)
        else {
            self.drag.cancel();
            return None;
        };
        let Some(batch) = self.translation.batch_mut() else {
            self.drag.cancel();
            return None;
        };
        let verdict = self.drag.release(batch, &target)?;
        let resolution = self.translation.resolve(verdict);
        match &resolution {
            Resolution::Advanced { amino_acid } => {
                info!("Matched {amino_acid}");
                self.enter(Stage::Translating, StatusMessage::new(StatusKey::CorrectTrna));
            }
            Resolution::Rejected { anticodon } => {
                self.enter(
                    Stage::PausedForTrna,
                    StatusMessage::new(StatusKey::IncorrectTrna)
                        .with_param("anticodon", anticodon.clone()),
                );
            }
            Resolution::Returned | Resolution::Ignored => {}
        }
        Some(resolution)
    }

    pub fn snapshot(&self) -> SimulationSnapshot {
        let mrna = self.transcription.mrna();
        let batch = self.translation.batch();
        let current_codon = match self.stage {
            Stage::Translating | Stage::PausedForTrna => self
                .translation
                .current_codon(mrna)
                .map(|codon| String::from_utf8_lossy(codon).to_string()),
            _ => None,
        };
        SimulationSnapshot {
            stage: self.stage,
            dna_template: String::from_utf8_lossy(self.transcription.template()).to_string(),
            mrna: String::from_utf8_lossy(mrna).to_string(),
            polymerase_progress: self.transcription.progress(),
            ribosome_progress: self.translation.progress(),
            current_codon,
            polypeptide: self.translation.polypeptide().to_vec(),
            candidates: batch
                .map(|b| b.candidates().iter().map(|c| c.view()).collect())
                .unwrap_or_default(),
            held_candidate: batch.and_then(|b| self.drag.held_candidate(b)),
            target_zone: self.translation.target_zone(&self.config.layout),
            status: self.status_view(),
            valid_commands: Command::ALL
                .into_iter()
                .filter(|c| self.is_command_valid(*c))
                .collect(),
            issues: self.issues.iter().map(|i| i.to_string()).collect(),
        }
    }
}
