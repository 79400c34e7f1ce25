//! Pointer gestures over the tRNA candidates: pick up, drag, drop on the ribosome.

use crate::{layout::LayoutSettings, trna::CandidateBatch};
use dogma_protocol::{Point, TargetZone};
use tracing::debug;

/// A candidate held by the pointer. Refers into a batch by generation and id; it never owns
/// the candidate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hold {
    pub generation: u64,
    pub candidate_id: usize,
    /// Candidate corner minus pointer at pick-up, so the grab point stays under the pointer.
    pub grab_offset: Point,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Holding(Hold),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropVerdict {
    Correct { generation: u64, candidate_id: usize },
    Incorrect { generation: u64, candidate_id: usize },
    /// Released away from the target; the candidate is already back at its origin.
    OffTarget { generation: u64, candidate_id: usize },
}

impl DropVerdict {
    pub fn generation(&self) -> u64 {
        match self {
            Self::Correct { generation, .. }
            | Self::Incorrect { generation, .. }
            | Self::OffTarget { generation, .. } => *generation,
        }
    }

    pub fn candidate_id(&self) -> usize {
        match self {
            Self::Correct { candidate_id, .. }
            | Self::Incorrect { candidate_id, .. }
            | Self::OffTarget { candidate_id, .. } => *candidate_id,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct DragInteractionController {
    state: DragState,
    layout: LayoutSettings,
}

impl DragInteractionController {
    pub fn new(layout: LayoutSettings) -> Self {
        Self {
            state: DragState::Idle,
            layout,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// The held candidate's id, if the hold belongs to `batch`.
    pub fn held_candidate(&self, batch: &CandidateBatch) -> Option<usize> {
        match self.state {
            DragState::Holding(hold) if hold.generation == batch.generation() => {
                Some(hold.candidate_id)
            }
            _ => None,
        }
    }

    /// Hit-tests from the last candidate backwards so the topmost one wins.
    pub fn pick_up(&mut self, batch: &CandidateBatch, pointer: Point) -> Option<usize> {
        let candidate = batch
            .candidates()
            .iter()
            .rev()
            .find(|c| self.layout.hits_candidate(&c.position, &pointer))?;
        let hold = Hold {
            generation: batch.generation(),
            candidate_id: candidate.id,
            grab_offset: Point::new(
                candidate.position.x - pointer.x,
                candidate.position.y - pointer.y,
            ),
        };
        debug!("Picked up tRNA {} ({})", candidate.id, candidate.anticodon);
        self.state = DragState::Holding(hold);
        Some(candidate.id)
    }

    /// Moves the held candidate along with the pointer. Returns false when nothing is held.
    pub fn drag(&mut self, batch: &mut CandidateBatch, pointer: Point) -> bool {
        let DragState::Holding(hold) = self.state else {
            return false;
        };
        if hold.generation != batch.generation() {
            self.cancel();
            return false;
        }
        let Some(candidate) = batch.get_mut(hold.candidate_id) else {
            self.cancel();
            return false;
        };
        candidate.position = Point::new(
            pointer.x + hold.grab_offset.x,
            pointer.y + hold.grab_offset.y,
        );
        true
    }

    /// Ends the gesture. The hold is cleared whatever the outcome.
    pub fn release(
        &mut self,
        batch: &mut CandidateBatch,
        target: &TargetZone,
    ) -> Option<DropVerdict> {
        let DragState::Holding(hold) = std::mem::take(&mut self.state) else {
            return None;
        };
        if hold.generation != batch.generation() {
            return None;
        }
        let candidate = batch.get_mut(hold.candidate_id)?;
        let center = self.layout.candidate_center(&candidate.position);
        let distance = center.distance(&target.center);
        let (generation, candidate_id) = (hold.generation, hold.candidate_id);
        let verdict = if distance < target.tolerance {
            if candidate.is_correct {
                DropVerdict::Correct {
                    generation,
                    candidate_id,
                }
            } else {
                DropVerdict::Incorrect {
                    generation,
                    candidate_id,
                }
            }
        } else {
            candidate.snap_back();
            DropVerdict::OffTarget {
                generation,
                candidate_id,
            }
        };
        debug!("Dropped tRNA {candidate_id} at distance {distance:.1}: {verdict:?}");
        Some(verdict)
    }

    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::SimulationConfig, trna::TrnaChallengeGenerator};
    use rand::{SeedableRng, rngs::StdRng};

    fn setup() -> (DragInteractionController, CandidateBatch, TargetZone) {
        let mut config = SimulationConfig::default();
        config.layout.trna_spawn_jitter = 0.0;
        let mut generator = TrnaChallengeGenerator::new(StdRng::seed_from_u64(11), &config);
        let batch = generator.generate(b"AUG").batch;
        let target = config.layout.target_zone(0);
        (
            DragInteractionController::new(config.layout.clone()),
            batch,
            target,
        )
    }

    fn inside(batch: &CandidateBatch, id: usize) -> Point {
        let corner = batch.get(id).unwrap().position;
        Point::new(corner.x + 10.0, corner.y + 20.0)
    }

    /// Pointer position that puts the held candidate's centre on the target centre.
    fn onto_target(target: &TargetZone) -> Point {
        // grab offset is (-10, -20); centre is corner + (25, 30)
        Point::new(target.center.x - 15.0, target.center.y - 10.0)
    }

    #[test]
    fn test_pick_up_misses() {
        let (mut drag, batch, _) = setup();
        assert_eq!(drag.pick_up(&batch, Point::new(0.0, 0.0)), None);
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn test_pick_up_records_offset() {
        let (mut drag, batch, _) = setup();
        assert_eq!(drag.pick_up(&batch, inside(&batch, 2)), Some(2));
        let DragState::Holding(hold) = drag.state() else {
            panic!("expected a hold");
        };
        assert_eq!(hold.grab_offset, Point::new(-10.0, -20.0));
        assert_eq!(drag.held_candidate(&batch), Some(2));
    }

    #[test]
    fn test_topmost_wins_on_overlap() {
        let (mut drag, mut batch, _) = setup();
        let corner = batch.get(0).unwrap().position;
        batch.get_mut(2).unwrap().position = corner;
        assert_eq!(drag.pick_up(&batch, inside(&batch, 0)), Some(2));
    }

    #[test]
    fn test_drag_moves_with_offset() {
        let (mut drag, mut batch, _) = setup();
        drag.pick_up(&batch, inside(&batch, 1));
        assert!(drag.drag(&mut batch, Point::new(200.0, 300.0)));
        assert_eq!(batch.get(1).unwrap().position, Point::new(190.0, 280.0));
    }

    #[test]
    fn test_drag_without_hold() {
        let (mut drag, mut batch, _) = setup();
        assert!(!drag.drag(&mut batch, Point::new(200.0, 300.0)));
    }

    #[test]
    fn test_release_on_target() {
        let (mut drag, mut batch, target) = setup();
        let correct = batch.correct().unwrap().id;
        drag.pick_up(&batch, inside(&batch, correct));
        drag.drag(&mut batch, onto_target(&target));
        let verdict = drag.release(&mut batch, &target).unwrap();
        assert_eq!(
            verdict,
            DropVerdict::Correct {
                generation: batch.generation(),
                candidate_id: correct
            }
        );
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn test_release_incorrect_on_target() {
        let (mut drag, mut batch, target) = setup();
        let wrong = batch.candidates().iter().find(|c| !c.is_correct).unwrap().id;
        drag.pick_up(&batch, inside(&batch, wrong));
        drag.drag(&mut batch, onto_target(&target));
        assert!(matches!(
            drag.release(&mut batch, &target),
            Some(DropVerdict::Incorrect { .. })
        ));
    }

    #[test]
    fn test_release_off_target_snaps_back() {
        let (mut drag, mut batch, target) = setup();
        let origin = batch.get(0).unwrap().origin;
        drag.pick_up(&batch, inside(&batch, 0));
        drag.drag(&mut batch, Point::new(700.0, 400.0));
        let verdict = drag.release(&mut batch, &target).unwrap();
        assert!(matches!(verdict, DropVerdict::OffTarget { candidate_id: 0, .. }));
        assert_eq!(batch.get(0).unwrap().position, origin);
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn test_tolerance_boundary() {
        let (mut drag, mut batch, target) = setup();
        drag.pick_up(&batch, inside(&batch, 0));
        let on = onto_target(&target);
        drag.drag(&mut batch, Point::new(on.x + 43.0, on.y));
        assert!(!matches!(
            drag.release(&mut batch, &target),
            Some(DropVerdict::OffTarget { .. })
        ));

        batch.snap_back(0);
        drag.pick_up(&batch, inside(&batch, 0));
        drag.drag(&mut batch, Point::new(on.x + 44.0, on.y));
        assert!(matches!(
            drag.release(&mut batch, &target),
            Some(DropVerdict::OffTarget { .. })
        ));
    }

    #[test]
    fn test_stale_hold_is_ignored() {
        let (mut drag, batch, target) = setup();
        drag.pick_up(&batch, inside(&batch, 0));
        let mut config = SimulationConfig::default();
        config.layout.trna_spawn_jitter = 0.0;
        let mut generator = TrnaChallengeGenerator::new(StdRng::seed_from_u64(12), &config);
        generator.generate(b"AUG");
        let mut newer = generator.generate(b"UUU").batch;
        assert_ne!(newer.generation(), batch.generation());
        assert_eq!(drag.held_candidate(&newer), None);
        assert_eq!(drag.release(&mut newer, &target), None);
        assert_eq!(drag.state(), DragState::Idle);
    }
}
