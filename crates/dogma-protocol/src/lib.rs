//! Machine-readable contracts shared by the simulation core, its CLI and any renderer.

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, error::Error, fmt};

pub const PROTOCOL_VERSION: &str = "v1";

pub type OpId = String;
pub type RunId = String;

/// What the simulation is currently doing. Exactly one stage is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    #[default]
    Idle,
    Transcribing,
    Transcribed,
    Translating,
    PausedForTrna,
    Finished,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Transcribing => "transcribing",
            Self::Transcribed => "transcribed",
            Self::Translating => "translating",
            Self::PausedForTrna => "paused_for_trna",
            Self::Finished => "finished",
        }
    }

    /// Stages in which a cursor may still move.
    pub fn is_running(&self) -> bool {
        matches!(
            self,
            Self::Transcribing | Self::Translating | Self::PausedForTrna
        )
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The three triggers of the command surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    StartTranscription,
    StartTranslation,
    Reset,
}

impl Command {
    pub const ALL: [Command; 3] = [
        Command::StartTranscription,
        Command::StartTranslation,
        Command::Reset,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKey {
    Idle,
    TranscriptionActive,
    TranscriptionComplete,
    NoStartCodon,
    TranslationStarted,
    TranslationPaused,
    CorrectTrna,
    IncorrectTrna,
    TranslationCompleteStop,
    TranslationCompleteEnd,
    UntranslatableCodon,
}

impl StatusKey {
    /// Row name in the message catalog.
    pub fn catalog_key(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::TranscriptionActive => "transcription_active",
            Self::TranscriptionComplete => "transcription_complete",
            Self::NoStartCodon => "no_start_codon",
            Self::TranslationStarted => "translation_started",
            Self::TranslationPaused => "translation_paused",
            Self::CorrectTrna => "correct_trna",
            Self::IncorrectTrna => "incorrect_trna",
            Self::TranslationCompleteStop => "translation_complete_stop",
            Self::TranslationCompleteEnd => "translation_complete_end",
            Self::UntranslatableCodon => "untranslatable_codon",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Where a tRNA has to be dropped while the ribosome waits at a codon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetZone {
    pub center: Point,
    pub width: f64,
    pub height: f64,
    pub tolerance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateView {
    pub id: usize,
    pub anticodon: String,
    pub amino_acid: String,
    /// Never drawn; kept for hosts that grade or replay a session.
    pub is_correct: bool,
    pub position: Point,
    pub origin: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusView {
    pub key: StatusKey,
    #[serde(default)]
    pub params: BTreeMap<String, String>,
    pub status: String,
    pub instructions: String,
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    pub stage: Stage,
    pub dna_template: String,
    pub mrna: String,
    pub polymerase_progress: usize,
    pub ribosome_progress: usize,
    pub current_codon: Option<String>,
    pub polypeptide: Vec<String>,
    pub candidates: Vec<CandidateView>,
    pub held_candidate: Option<usize>,
    pub target_zone: Option<TargetZone>,
    pub status: StatusView,
    pub valid_commands: Vec<Command>,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    StartTranscription,
    StartTranslation,
    Reset,
    Tick { frames: usize },
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    SetLanguage { language: String },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::StartTranscription => "StartTranscription",
            Self::StartTranslation => "StartTranslation",
            Self::Reset => "Reset",
            Self::Tick { .. } => "Tick",
            Self::PointerDown { .. } => "PointerDown",
            Self::PointerMove { .. } => "PointerMove",
            Self::PointerUp => "PointerUp",
            Self::SetLanguage { .. } => "SetLanguage",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    pub run_id: RunId,
    pub ops: Vec<Operation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpResult {
    pub op_id: OpId,
    /// False when a command was issued from a stage where it does nothing.
    pub accepted: bool,
    pub stage: Stage,
    pub status: String,
    pub instructions: String,
    pub warnings: Vec<String>,
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationRecord {
    pub run_id: RunId,
    pub op: Operation,
    pub result: OpResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    pub protocol_version: String,
    pub supported_operations: Vec<String>,
    pub supported_languages: Vec<String>,
    pub stages: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    InvalidInput,
    Unsupported,
    Internal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineError {
    pub code: ErrorCode,
    pub message: String,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl Error for EngineError {}
