use dogma::{
    config::SimulationConfig,
    engine::{DogmaEngine, Engine},
    nucleotide::codon_to_anticodon,
    protocol::{Operation, SimulationSnapshot, Stage, StatusKey, Workflow},
    simulation::SimulationController,
};
use std::io::Write;

fn quick_config(template: &str) -> SimulationConfig {
    let mut config = SimulationConfig::with_template(template);
    config.seed = Some(2024);
    config.base_interval_frames = 1;
    config
}

fn correct_drop(snapshot: &SimulationSnapshot) -> Vec<Operation> {
    let correct = snapshot.candidates.iter().find(|c| c.is_correct).unwrap();
    let target = snapshot.target_zone.unwrap();
    vec![
        Operation::PointerDown {
            x: correct.position.x + 25.0,
            y: correct.position.y + 30.0,
        },
        Operation::PointerMove {
            x: target.center.x,
            y: target.center.y,
        },
        Operation::PointerUp,
    ]
}

#[test]
fn default_template_runs_to_end_of_mrna() {
    let mut engine = DogmaEngine::from_config(quick_config("TACGTACGTACGAAATT")).unwrap();
    engine.apply(Operation::StartTranscription).unwrap();
    engine.apply(Operation::Tick { frames: 40 }).unwrap();
    assert_eq!(engine.snapshot().mrna, "AUGCAUGCAUGCUUUAA");
    engine.apply(Operation::StartTranslation).unwrap();

    let mut pauses = vec![];
    loop {
        let result = engine.apply(Operation::Tick { frames: 1 }).unwrap();
        if result.stage == Stage::Finished {
            break;
        }
        let snapshot = engine.snapshot();
        let codon = snapshot.current_codon.clone().unwrap();
        let correct = snapshot.candidates.iter().find(|c| c.is_correct).unwrap();
        assert_eq!(correct.anticodon, codon_to_anticodon(codon.as_bytes()));
        pauses.push(codon);
        for op in correct_drop(&snapshot) {
            engine.apply(op).unwrap();
        }
    }

    assert_eq!(pauses, vec!["AUG", "CAU", "GCA", "UGC", "UUU"]);
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.polypeptide, vec!["Met", "His", "Ala", "Cys", "Phe"]);
    assert_eq!(snapshot.status.key, StatusKey::TranslationCompleteEnd);
    assert_eq!(snapshot.ribosome_progress, 15);
}

#[test]
fn stop_codon_ends_translation() {
    let mut sim = SimulationController::new(quick_config("TACAAAATT")).unwrap();
    sim.start_transcription();
    for _ in 0..20 {
        sim.tick();
    }
    sim.start_translation();
    let mut engine_ops = 0;
    while sim.tick() == Stage::PausedForTrna {
        let snapshot = sim.snapshot();
        let correct = snapshot.candidates.iter().find(|c| c.is_correct).unwrap();
        let target = snapshot.target_zone.unwrap();
        sim.pointer_down(dogma::protocol::Point::new(
            correct.position.x + 25.0,
            correct.position.y + 30.0,
        ))
        .unwrap();
        sim.pointer_move(target.center);
        sim.pointer_up().unwrap();
        engine_ops += 1;
    }
    assert_eq!(engine_ops, 2);
    assert_eq!(sim.stage(), Stage::Finished);
    assert_eq!(sim.polypeptide(), &["Met".to_string(), "Phe".to_string()]);
    assert_eq!(
        sim.status_view().status,
        "Translation Complete (STOP codon)"
    );
}

#[test]
fn workflow_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"dna_template": "TACAAAATT", "base_interval_frames": 1, "seed": 5, "language": "de"}}"#
    )
    .unwrap();
    let config = SimulationConfig::load_from_path(file.path().to_str().unwrap()).unwrap();
    let mut engine = DogmaEngine::from_config(config).unwrap();

    let workflow: Workflow = serde_json::from_str(
        r#"{"run_id": "file", "ops": ["StartTranscription", {"Tick": {"frames": 10}}, "StartTranslation", {"Tick": {"frames": 1}}]}"#,
    )
    .unwrap();
    let results = engine.apply_workflow(workflow).unwrap();
    let last = results.last().unwrap();
    assert_eq!(last.stage, Stage::PausedForTrna);
    assert_eq!(last.status, "Translation pausiert");
    assert_eq!(last.instructions, "Ziehen Sie die passende tRNA zum Codon AUG");
}

#[test]
fn reset_from_every_stage() {
    let mut sim = SimulationController::new(quick_config("TACAAAATT")).unwrap();
    let fresh = sim.snapshot();
    for steps in 0..25 {
        sim.reset();
        sim.start_transcription();
        for _ in 0..steps {
            sim.tick();
        }
        if sim.stage() == Stage::Transcribed {
            sim.start_translation();
            sim.tick();
        }
        sim.reset();
        let snapshot = sim.snapshot();
        assert_eq!(snapshot, fresh);
        sim.reset();
        assert_eq!(sim.snapshot(), fresh);
    }
}
