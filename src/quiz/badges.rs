use std::collections::BTreeSet;
use std::fmt;

const PERFECT_SCORE_ACCURACY: u32 = 90;
const WILDLIFE_EXPERT_ACCURACY: u32 = 80;
const CONSERVATION_CHAMPION_ACCURACY: u32 = 70;
const SPEED_DEMON_SECONDS: u64 = 120;
const STREAK_MASTER_STREAK: u32 = 5;
const KNOWLEDGE_SEEKER_SCORE: u32 = 6;

/// Achievements awarded once a quiz is completed.
///
/// The accuracy badges overlap: a 95% run earns all three of them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Badge {
    PerfectScore,
    WildlifeExpert,
    ConservationChampion,
    SpeedDemon,
    StreakMaster,
    KnowledgeSeeker,
}

impl Badge {
    pub const ALL: [Badge; 6] = [
        Badge::PerfectScore,
        Badge::WildlifeExpert,
        Badge::ConservationChampion,
        Badge::SpeedDemon,
        Badge::StreakMaster,
        Badge::KnowledgeSeeker,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Badge::PerfectScore => "Perfect Score",
            Badge::WildlifeExpert => "Wildlife Expert",
            Badge::ConservationChampion => "Conservation Champion",
            Badge::SpeedDemon => "Speed Demon",
            Badge::StreakMaster => "Streak Master",
            Badge::KnowledgeSeeker => "Knowledge Seeker",
        }
    }

    fn is_earned(&self, result: &QuizResult) -> bool {
        match self {
            Badge::PerfectScore => result.accuracy >= PERFECT_SCORE_ACCURACY,
            Badge::WildlifeExpert => result.accuracy >= WILDLIFE_EXPERT_ACCURACY,
            Badge::ConservationChampion => result.accuracy >= CONSERVATION_CHAMPION_ACCURACY,
            Badge::SpeedDemon => result.elapsed_seconds < SPEED_DEMON_SECONDS,
            Badge::StreakMaster => result.max_streak >= STREAK_MASTER_STREAK,
            Badge::KnowledgeSeeker => result.correct_answers >= KNOWLEDGE_SEEKER_SCORE,
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuizResult {
    pub correct_answers: u32,
    pub total_questions: u32,
    /// Percentage of correct answers, rounded half up.
    pub accuracy: u32,
    pub elapsed_seconds: u64,
    pub max_streak: u32,
    pub badges: BTreeSet<Badge>,
}

impl QuizResult {
    pub fn new(
        correct_answers: u32,
        total_questions: u32,
        elapsed_seconds: u64,
        max_streak: u32,
    ) -> Self {
        let mut result = Self {
            correct_answers,
            total_questions,
            accuracy: accuracy(correct_answers, total_questions),
            elapsed_seconds,
            max_streak,
            badges: BTreeSet::new(),
        };
        result.badges = Badge::ALL
            .iter()
            .copied()
            .filter(|badge| badge.is_earned(&result))
            .collect();
        result
    }
}

fn accuracy(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (200 * correct + total) / (2 * total)
}
