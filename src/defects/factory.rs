use super::{DefectRecord, Severity, Stage};
use chrono::{Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fraction of generated defects that are resolved.
const RESOLVED_RATIO: f64 = 0.75;

/// Fraction of generated defects that carry no sprint label.
const UNASSIGNED_RATIO: f64 = 0.1;

/// Deterministic generator of realistic defect record sets.
///
/// Useful for demos and for seeding tests with larger inputs than the
/// hand-written fixtures. The same seed always produces the same records.
#[derive(Debug)]
pub struct DefectFactory {
    rng: StdRng,
    sprint_count: u32,
    sequence: u32,
}

impl DefectFactory {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            sprint_count: 6,
            sequence: 0,
        }
    }

    /// Number of distinct `Sprint N` labels to draw from.
    #[must_use]
    pub fn with_sprints(mut self, sprint_count: u32) -> Self {
        self.sprint_count = sprint_count.max(1);
        self
    }

    pub fn create(&mut self) -> DefectRecord {
        self.sequence += 1;

        let severity = pick_weighted(&mut self.rng, &SEVERITY_WEIGHTS);
        let found_stage = pick_weighted(&mut self.rng, &FOUND_STAGE_WEIGHTS);
        let introduced_stage = pick_weighted(&mut self.rng, &INTRODUCED_STAGE_WEIGHTS);

        let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).single().unwrap_or_else(Utc::now)
            + Duration::days(self.rng.gen_range(0..180))
            + Duration::hours(self.rng.gen_range(0..8));

        let resolved_at = self
            .rng
            .gen_bool(RESOLVED_RATIO)
            .then(|| created_at + Duration::days(self.rng.gen_range(0..21)) + Duration::hours(self.rng.gen_range(1..12)));

        let sprint = (!self.rng.gen_bool(UNASSIGNED_RATIO)).then(|| format!("Sprint {}", self.rng.gen_range(1..=self.sprint_count)));

        DefectRecord {
            id: format!("DEF-{:03}", self.sequence),
            title: self.title(found_stage),
            severity,
            found_stage,
            introduced_stage,
            created_at,
            resolved_at,
            sprint,
        }
    }

    pub fn create_batch(&mut self, count: usize) -> Vec<DefectRecord> {
        (0..count).map(|_| self.create()).collect()
    }

    fn title(&mut self, found_stage: Stage) -> String {
        let component = COMPONENTS[self.rng.gen_range(0..COMPONENTS.len())];
        let symptom = SYMPTOMS[self.rng.gen_range(0..SYMPTOMS.len())];
        format!("{component} {symptom} ({found_stage})")
    }
}

const SEVERITY_WEIGHTS: [(Severity, u32); 4] = [
    (Severity::Critical, 1),
    (Severity::High, 3),
    (Severity::Medium, 4),
    (Severity::Low, 2),
];

const FOUND_STAGE_WEIGHTS: [(Stage, u32); 5] = [
    (Stage::Development, 3),
    (Stage::CodeReview, 2),
    (Stage::QATesting, 5),
    (Stage::UAT, 2),
    (Stage::Production, 1),
];

const INTRODUCED_STAGE_WEIGHTS: [(Stage, u32); 5] = [
    (Stage::Development, 8),
    (Stage::CodeReview, 1),
    (Stage::QATesting, 1),
    (Stage::UAT, 0),
    (Stage::Production, 0),
];

const COMPONENTS: [&str; 6] = ["Login form", "Checkout flow", "Search results", "Profile page", "Export job", "Session handler"];

const SYMPTOMS: [&str; 6] = [
    "fails with special characters",
    "times out under load",
    "drops unsaved changes",
    "renders stale data",
    "rejects valid input",
    "crashes on empty response",
];

fn pick_weighted<T: Copy>(rng: &mut StdRng, weights: &[(T, u32)]) -> T {
    let total: u32 = weights.iter().map(|(_, w)| w).sum();
    let mut x = rng.gen_range(0..total);
    for &(value, weight) in weights {
        if x < weight {
            return value;
        }
        x -= weight;
    }
    weights[weights.len() - 1].0
}
