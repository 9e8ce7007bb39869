//! Process-wide counters for successful detections.

use parking_lot::Mutex;
use std::collections::HashMap;

use crate::waste::WasteCategory;

#[derive(Debug, Default)]
struct Counters {
    total: u64,
    confidence_sum: f64,
    by_category: HashMap<WasteCategory, u64>,
}

/// Running detection statistics. Reset on restart.
#[derive(Debug, Default)]
pub struct DetectionStats {
    counters: Mutex<Counters>,
}

/// Point-in-time view of [`DetectionStats`].
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionStatsSnapshot {
    pub total_detections: u64,
    /// Mean confidence in `[0, 1]`; zero when nothing was detected yet
    pub average_confidence: f64,
    /// Most frequently detected category; ties resolve to table order
    pub most_detected: Option<WasteCategory>,
}

impl DetectionStats {
    pub fn record(&self, category: WasteCategory, confidence: f64) {
        let mut counters = self.counters.lock();
        counters.total += 1;
        counters.confidence_sum += confidence;
        *counters.by_category.entry(category).or_default() += 1;
    }

    pub fn snapshot(&self) -> DetectionStatsSnapshot {
        let counters = self.counters.lock();
        let average_confidence = if counters.total == 0 {
            0.0
        } else {
            counters.confidence_sum / counters.total as f64
        };

        let mut most_detected: Option<(WasteCategory, u64)> = None;
        for category in WasteCategory::ALL {
            let count = counters.by_category.get(&category).copied().unwrap_or(0);
            if count > 0 && most_detected.is_none_or(|(_, best)| count > best) {
                most_detected = Some((category, count));
            }
        }

        DetectionStatsSnapshot {
            total_detections: counters.total,
            average_confidence,
            most_detected: most_detected.map(|(category, _)| category),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot() {
        let stats = DetectionStats::default();
        assert_eq!(
            stats.snapshot(),
            DetectionStatsSnapshot {
                total_detections: 0,
                average_confidence: 0.0,
                most_detected: None,
            }
        );
    }

    #[test]
    fn test_records_accumulate() {
        let stats = DetectionStats::default();
        stats.record(WasteCategory::Metal, 0.9);
        stats.record(WasteCategory::Glass, 0.5);
        stats.record(WasteCategory::Glass, 0.7);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.total_detections, 3);
        assert!((snapshot.average_confidence - 0.7).abs() < 1e-9);
        assert_eq!(snapshot.most_detected, Some(WasteCategory::Glass));
    }

    #[test]
    fn test_ties_resolve_to_table_order() {
        let stats = DetectionStats::default();
        stats.record(WasteCategory::Organic, 0.8);
        stats.record(WasteCategory::Paper, 0.8);
        assert_eq!(stats.snapshot().most_detected, Some(WasteCategory::Paper));
    }
}
