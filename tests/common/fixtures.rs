use std::sync::Mutex;

use alertness_monitor::engine::types::{AlertEvent, AlertKind};
use alertness_monitor::engine::AlertSink;
use alertness_monitor::landmarks::{LandmarkSet, Point, LANDMARK_COUNT};

/// Synthetic face whose measured ratios equal `ear` and `mar` exactly.
///
/// Eye and mouth corners sit 2.0 apart on the horizontal axis; lids and
/// lips sit at `±ear` / `±mar`, which makes the aspect-ratio formulas come
/// out to the requested values. Remaining landmarks are staggered filler.
pub fn face(ear: f64, mar: f64) -> LandmarkSet {
    let mut points: Vec<Point> = (0..LANDMARK_COUNT)
        .map(|i| Point::new(i as f64 * 0.01, 500.0))
        .collect();
    for start in [36, 42] {
        points[start] = Point::new(0.0, 0.0);
        points[start + 1] = Point::new(0.5, ear);
        points[start + 2] = Point::new(1.5, ear);
        points[start + 3] = Point::new(2.0, 0.0);
        points[start + 4] = Point::new(1.5, -ear);
        points[start + 5] = Point::new(0.5, -ear);
    }
    points[60] = Point::new(0.0, 0.0);
    points[61] = Point::new(0.5, mar);
    points[62] = Point::new(1.0, mar);
    points[63] = Point::new(1.5, mar);
    points[64] = Point::new(2.0, 0.0);
    points[65] = Point::new(1.5, -mar);
    points[66] = Point::new(1.0, -mar);
    points[67] = Point::new(0.5, -mar);
    LandmarkSet::from_points(points).expect("synthetic face is valid")
}

/// JSONL record for a frame with the given ratios.
pub fn frame_json(ear: f64, mar: f64) -> String {
    let mut coords: Vec<[f64; 2]> = (0..LANDMARK_COUNT)
        .map(|i| [i as f64 * 0.01, 500.0])
        .collect();
    for start in [36, 42] {
        coords[start] = [0.0, 0.0];
        coords[start + 1] = [0.5, ear];
        coords[start + 2] = [1.5, ear];
        coords[start + 3] = [2.0, 0.0];
        coords[start + 4] = [1.5, -ear];
        coords[start + 5] = [0.5, -ear];
    }
    coords[60] = [0.0, 0.0];
    coords[61] = [0.5, mar];
    coords[62] = [1.0, mar];
    coords[63] = [1.5, mar];
    coords[64] = [2.0, 0.0];
    coords[65] = [1.5, -mar];
    coords[66] = [1.0, -mar];
    coords[67] = [0.5, -mar];
    serde_json::json!({ "points": coords }).to_string()
}

/// JSONL record for a frame in which no face was detected.
pub fn no_face_json() -> String {
    "{\"points\": null}".to_string()
}

/// Alert sink that records dispatched kinds for assertions.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<AlertKind>>,
}

impl RecordingSink {
    pub fn kinds(&self) -> Vec<AlertKind> {
        self.events.lock().expect("sink lock").clone()
    }
}

impl AlertSink for RecordingSink {
    fn dispatch(&self, event: &AlertEvent) {
        self.events.lock().expect("sink lock").push(event.kind);
    }
}
