// src/detector.rs
//
// Boundary with the external hand-landmark detector. Frames arrive as
// JSON lines, one per camera frame:
//
//   {"timestamp_ms": 1234, "hands": [{"side": "Right", "landmarks": [{"x":..,"y":..,"z":..}, ...]}]}
//
// A frame with a malformed hand fails on its own; the source keeps going.
// A read error on the underlying stream ends the source.

use crate::types::{HandObservation, HandSide, Landmark};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::BufRead;

#[derive(Debug, Clone, Deserialize)]
pub struct DetectorFrame {
    pub timestamp_ms: u64,
    #[serde(default)]
    pub hands: Vec<DetectedHand>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetectedHand {
    #[serde(alias = "handedness", alias = "label")]
    pub side: HandSide,
    pub landmarks: Vec<Landmark>,
}

impl DetectorFrame {
    /// Validate every hand in the frame.
    pub fn observations(&self) -> Result<Vec<HandObservation>> {
        self.hands
            .iter()
            .map(|h| HandObservation::new(h.side, &h.landmarks))
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("Malformed hand in frame at {}ms", self.timestamp_ms))
    }
}

/// Anything that yields detector frames in arrival order.
pub trait LandmarkSource {
    /// `None` when the source is exhausted.
    fn next_frame(&mut self) -> Option<Result<DetectorFrame>>;
}

pub struct JsonLinesSource<R> {
    reader: R,
    line_no: usize,
    buf: String,
    closed: bool,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            buf: String::new(),
            closed: false,
        }
    }
}

impl<R: BufRead> LandmarkSource for JsonLinesSource<R> {
    fn next_frame(&mut self) -> Option<Result<DetectorFrame>> {
        if self.closed {
            return None;
        }
        loop {
            self.buf.clear();
            self.line_no += 1;

            match self.reader.read_line(&mut self.buf) {
                Ok(0) => {
                    self.closed = true;
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    self.closed = true;
                    return Some(
                        Err(e).with_context(|| format!("Failed to read line {}", self.line_no)),
                    )
                }
            }

            let line = self.buf.trim();
            if line.is_empty() {
                continue;
            }

            let line_no = self.line_no;
            return Some(
                serde_json::from_str(line)
                    .with_context(|| format!("Invalid frame on line {}", line_no)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LANDMARK_COUNT;
    use std::io::{self, Cursor, Read};

    fn hand_json(side: &str, count: usize) -> String {
        let points: Vec<String> = (0..count)
            .map(|i| format!(r#"{{"x":{:.2},"y":0.5,"z":0.0}}"#, i as f32 / 40.0))
            .collect();
        format!(r#"{{"side":"{}","landmarks":[{}]}}"#, side, points.join(","))
    }

    #[test]
    fn test_reads_frames_and_skips_blank_lines() {
        let input = format!(
            "{{\"timestamp_ms\":0,\"hands\":[{}]}}\n\n{{\"timestamp_ms\":33}}\n",
            hand_json("Right", LANDMARK_COUNT)
        );
        let mut source = JsonLinesSource::new(Cursor::new(input));

        let first = source.next_frame().unwrap().unwrap();
        let observations = first.observations().unwrap();
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].side, HandSide::Right);

        let second = source.next_frame().unwrap().unwrap();
        assert_eq!(second.timestamp_ms, 33);
        assert!(second.hands.is_empty());

        assert!(source.next_frame().is_none());
    }

    #[test]
    fn test_bad_frame_does_not_stop_source() {
        let input = format!(
            "not json\n{{\"timestamp_ms\":10,\"hands\":[{}]}}\n{{\"timestamp_ms\":20,\"hands\":[{}]}}\n",
            hand_json("Left", 5),
            hand_json("Left", LANDMARK_COUNT)
        );
        let mut source = JsonLinesSource::new(Cursor::new(input));

        let err = source.next_frame().unwrap().unwrap_err();
        assert!(format!("{:#}", err).contains("line 1"));

        let short = source.next_frame().unwrap().unwrap();
        let err = short.observations().unwrap_err();
        assert!(format!("{:#}", err).contains("expected 21 landmarks, got 5"));

        let ok = source.next_frame().unwrap().unwrap();
        assert_eq!(ok.observations().unwrap().len(), 1);
    }

    struct BrokenPipe;

    impl Read for BrokenPipe {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "input/output error"))
        }
    }

    impl BufRead for BrokenPipe {
        fn fill_buf(&mut self) -> io::Result<&[u8]> {
            Err(io::Error::new(io::ErrorKind::Other, "input/output error"))
        }

        fn consume(&mut self, _amt: usize) {}
    }

    #[test]
    fn test_read_error_ends_source() {
        let mut source = JsonLinesSource::new(BrokenPipe);

        let err = source.next_frame().unwrap().unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read line 1"));

        assert!(source.next_frame().is_none());
        assert!(source.next_frame().is_none());
    }
}
