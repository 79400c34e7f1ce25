//! Canvas geometry shared by candidate placement, hit-testing and the drop target.

use dogma_protocol::{Point, TargetZone};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub canvas_width: f64,
    pub sequence_origin_x: f64,
    pub base_spacing: f64,
    pub base_width: f64,
    pub mrna_y: f64,
    pub ribosome_height: f64,
    pub trna_width: f64,
    pub trna_height: f64,
    pub trna_spawn_y: f64,
    pub trna_spacing: f64,
    /// Candidates are placed up to this far above or below the spawn line.
    pub trna_spawn_jitter: f64,
    pub target_padding: f64,
    /// Drop tolerance is the mean of tRNA width and height divided by this.
    pub drop_tolerance_divisor: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            canvas_width: 900.0,
            sequence_origin_x: 50.0,
            base_spacing: 26.0,
            base_width: 22.0,
            mrna_y: 220.0,
            ribosome_height: 50.0,
            trna_width: 50.0,
            trna_height: 60.0,
            trna_spawn_y: 550.0,
            trna_spacing: 40.0,
            trna_spawn_jitter: 25.0,
            target_padding: 15.0,
            drop_tolerance_divisor: 1.25,
        }
    }
}

impl LayoutSettings {
    pub fn drop_tolerance(&self) -> f64 {
        (self.trna_width + self.trna_height) / 2.0 / self.drop_tolerance_divisor
    }

    /// Centre of the ribosome when it sits on the codon starting at `progress`.
    pub fn ribosome_x(&self, progress: usize) -> f64 {
        self.sequence_origin_x + (progress as f64 + 1.0) * self.base_spacing + self.base_width / 2.0
    }

    /// The drop zone sits right above the ribosome reading the codon at `progress`.
    pub fn target_zone(&self, progress: usize) -> TargetZone {
        TargetZone {
            center: Point::new(self.ribosome_x(progress), self.mrna_y - self.ribosome_height),
            width: self.trna_width + self.target_padding,
            height: self.trna_height + self.target_padding,
            tolerance: self.drop_tolerance(),
        }
    }

    /// Left edges of `count` candidates spread evenly and centred on the canvas.
    pub fn spread(&self, count: usize) -> Vec<f64> {
        if count == 0 {
            return vec![];
        }
        let total_width =
            count as f64 * self.trna_width + (count as f64 - 1.0) * self.trna_spacing;
        let start_x = (self.canvas_width - total_width) / 2.0;
        (0..count)
            .map(|i| start_x + i as f64 * (self.trna_width + self.trna_spacing))
            .collect()
    }

    /// Strict containment in the tRNA box whose top-left corner is `corner`.
    pub fn hits_candidate(&self, corner: &Point, pointer: &Point) -> bool {
        pointer.x > corner.x
            && pointer.x < corner.x + self.trna_width
            && pointer.y > corner.y
            && pointer.y < corner.y + self.trna_height
    }

    pub fn candidate_center(&self, corner: &Point) -> Point {
        Point::new(
            corner.x + self.trna_width / 2.0,
            corner.y + self.trna_height / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_tolerance() {
        assert_eq!(LayoutSettings::default().drop_tolerance(), 44.0);
    }

    #[test]
    fn test_target_zone() {
        let layout = LayoutSettings::default();
        let zone = layout.target_zone(0);
        assert_eq!(zone.center, Point::new(87.0, 170.0));
        assert_eq!(zone.width, 65.0);
        assert_eq!(zone.height, 75.0);
        assert_eq!(layout.target_zone(3).center.x, 165.0);
    }

    #[test]
    fn test_spread() {
        let layout = LayoutSettings::default();
        assert_eq!(layout.spread(3), vec![335.0, 425.0, 515.0]);
        assert_eq!(layout.spread(1), vec![425.0]);
        assert!(layout.spread(0).is_empty());
    }

    #[test]
    fn test_hits_candidate_is_strict() {
        let layout = LayoutSettings::default();
        let corner = Point::new(100.0, 500.0);
        assert!(layout.hits_candidate(&corner, &Point::new(125.0, 530.0)));
        assert!(!layout.hits_candidate(&corner, &Point::new(100.0, 530.0)));
        assert!(!layout.hits_candidate(&corner, &Point::new(150.0, 530.0)));
        assert!(!layout.hits_candidate(&corner, &Point::new(125.0, 560.0)));
    }
}
