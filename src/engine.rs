use crate::{MESSAGES, config::SimulationConfig, simulation::SimulationController, translation::Resolution};
use dogma_protocol::{
    Capabilities, Command, EngineError, ErrorCode, OpId, OpResult, Operation, OperationRecord,
    PROTOCOL_VERSION, Point, SimulationSnapshot, Stage, Workflow,
};
use tracing::{debug, warn};

pub trait Engine {
    fn apply(&mut self, op: Operation) -> Result<OpResult, EngineError>;
    fn apply_workflow(&mut self, wf: Workflow) -> Result<Vec<OpResult>, EngineError>;
    fn snapshot(&self) -> SimulationSnapshot;
}

#[derive(Default)]
pub struct DogmaEngine {
    simulation: SimulationController,
    journal: Vec<OperationRecord>,
    op_counter: u64,
}

impl DogmaEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: SimulationConfig) -> Result<Self, EngineError> {
        if !MESSAGES.supports(&config.language) {
            return Err(EngineError {
                code: ErrorCode::Unsupported,
                message: format!("Language '{}' is not supported", config.language),
            });
        }
        let simulation = SimulationController::new(config).map_err(|e| EngineError {
            code: ErrorCode::InvalidInput,
            message: format!("Invalid configuration: {e}"),
        })?;
        Ok(Self {
            simulation,
            ..Self::default()
        })
    }

    pub fn simulation(&self) -> &SimulationController {
        &self.simulation
    }

    pub fn capabilities() -> Capabilities {
        Capabilities {
            protocol_version: PROTOCOL_VERSION.to_string(),
            supported_operations: vec![
                "StartTranscription".to_string(),
                "StartTranslation".to_string(),
                "Reset".to_string(),
                "Tick".to_string(),
                "PointerDown".to_string(),
                "PointerMove".to_string(),
                "PointerUp".to_string(),
                "SetLanguage".to_string(),
            ],
            supported_languages: MESSAGES.languages().to_vec(),
            stages: [
                Stage::Idle,
                Stage::Transcribing,
                Stage::Transcribed,
                Stage::Translating,
                Stage::PausedForTrna,
                Stage::Finished,
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }

    pub fn operation_log(&self) -> &[OperationRecord] {
        &self.journal
    }

    fn next_op_id(&mut self) -> OpId {
        self.op_counter += 1;
        format!("op-{}", self.op_counter)
    }

    fn run_command(&mut self, command: Command, result: &mut OpResult) {
        let stage = self.simulation.stage();
        result.accepted = self.simulation.execute(command);
        if !result.accepted {
            warn!("{command:?} ignored in stage {stage}");
            result
                .warnings
                .push(format!("{command:?} is not available in stage {stage}"));
        }
    }

    fn apply_internal(&mut self, op: Operation) -> Result<OpResult, EngineError> {
        let op_id = self.next_op_id();
        let known_issues = self.simulation.issues().len();
        let mut result = OpResult {
            op_id,
            accepted: true,
            stage: self.simulation.stage(),
            status: String::new(),
            instructions: String::new(),
            warnings: vec![],
            messages: vec![],
        };

        match op {
            Operation::StartTranscription => {
                self.run_command(Command::StartTranscription, &mut result)
            }
            Operation::StartTranslation => self.run_command(Command::StartTranslation, &mut result),
            Operation::Reset => self.run_command(Command::Reset, &mut result),
            Operation::Tick { frames } => {
                if frames == 0 {
                    return Err(EngineError {
                        code: ErrorCode::InvalidInput,
                        message: "Tick needs at least one frame".to_string(),
                    });
                }
                let from = self.simulation.stage();
                for _ in 0..frames {
                    self.simulation.tick();
                }
                let to = self.simulation.stage();
                result
                    .messages
                    .push(format!("Advanced {frames} frame(s), stage {from} -> {to}"));
            }
            Operation::PointerDown { x, y } => {
                match self.simulation.pointer_down(Point::new(x, y)) {
                    Some(id) => result.messages.push(format!("Holding tRNA {id}")),
                    None => result.accepted = false,
                }
            }
            Operation::PointerMove { x, y } => {
                result.accepted = self.simulation.pointer_move(Point::new(x, y));
            }
            Operation::PointerUp => match self.simulation.pointer_up() {
                Some(Resolution::Advanced { amino_acid }) => {
                    result.messages.push(format!("Added {amino_acid}"))
                }
                Some(Resolution::Rejected { anticodon }) => result
                    .messages
                    .push(format!("Anticodon {anticodon} rejected")),
                Some(Resolution::Returned) => {
                    result.messages.push("tRNA returned to its origin".to_string())
                }
                Some(Resolution::Ignored) | None => result.accepted = false,
            },
            Operation::SetLanguage { language } => {
                if !self.simulation.set_language(&language) {
                    return Err(EngineError {
                        code: ErrorCode::Unsupported,
                        message: format!("Language '{language}' is not supported"),
                    });
                }
            }
        }

        result.warnings.extend(
            self.simulation
                .issues()
                .get(known_issues..)
                .unwrap_or_default()
                .iter()
                .map(|issue| issue.to_string()),
        );
        let status = self.simulation.status_view();
        result.stage = self.simulation.stage();
        result.status = status.status;
        result.instructions = status.instructions;
        debug!("{} -> {:?}", result.op_id, result.stage);
        Ok(result)
    }
}

impl Engine for DogmaEngine {
    fn apply(&mut self, op: Operation) -> Result<OpResult, EngineError> {
        let run_id = "interactive".to_string();
        let result = self.apply_internal(op.clone())?;
        self.journal.push(OperationRecord {
            run_id,
            op,
            result: result.clone(),
        });
        Ok(result)
    }

    fn apply_workflow(&mut self, wf: Workflow) -> Result<Vec<OpResult>, EngineError> {
        let mut results = Vec::new();
        for op in &wf.ops {
            let result = self.apply_internal(op.clone())?;
            self.journal.push(OperationRecord {
                run_id: wf.run_id.clone(),
                op: op.clone(),
                result: result.clone(),
            });
            results.push(result);
        }
        Ok(results)
    }

    fn snapshot(&self) -> SimulationSnapshot {
        self.simulation.snapshot()
    }
}
