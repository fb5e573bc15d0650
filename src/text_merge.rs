// Merging per-frame text observations into one canonical text block

use std::collections::HashSet;

/// Text recognized from one candidate frame, with the frame's position in
/// the video and the lexical confidence of the text.
#[derive(Debug, Clone)]
pub struct TextObservation {
    pub frame_number: u64,
    pub timestamp: f64,
    pub text: String,
    pub confidence: f32,
}

/// Collapse per-frame observations into a single newline-joined text.
///
/// Observations are ranked by confidence, then by recency, so the most
/// trustworthy reading of each line lands first. Exact duplicate lines
/// (after trimming) are emitted once, keeping the first occurrence under
/// that ranking.
pub fn merge_observations(mut observations: Vec<TextObservation>) -> String {
    observations.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then(b.timestamp.total_cmp(&a.timestamp))
    });

    let mut combined: Vec<&str> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for observation in &observations {
        let text = observation.text.trim();
        if !text.is_empty() && seen.insert(text) {
            combined.push(text);
        }
    }

    combined.join("\n")
}
