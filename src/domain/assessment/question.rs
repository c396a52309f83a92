//! Evaluation question bank.
//!
//! Questions are static data: the ADHD screening set (ASRS-style), the
//! four-dimension MBTI set, cognitive-style questions, and the behavioral
//! preference-tuning set, plus the 3-question quick bank. Option weights
//! drive the deterministic scoring in [`super::scoring`].

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;
use crate::domain::profile::{
    AttentionSpan, CognitiveStyle, ControlPreference, FeedbackFrequency, StimulationLevel,
};

/// Question group, asked in declaration order during full discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionGroup {
    AdhdScreening,
    MbtiAssessment,
    CognitiveStyle,
    PreferenceTuning,
}

impl QuestionGroup {
    /// Screening-phase groups, in asking order.
    pub fn screening() -> &'static [QuestionGroup] {
        &[
            Self::AdhdScreening,
            Self::MbtiAssessment,
            Self::CognitiveStyle,
        ]
    }
}

impl std::fmt::Display for QuestionGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AdhdScreening => write!(f, "ADHD Screening"),
            Self::MbtiAssessment => write!(f, "MBTI Assessment"),
            Self::CognitiveStyle => write!(f, "Cognitive Style"),
            Self::PreferenceTuning => write!(f, "Preferences"),
        }
    }
}

/// MBTI dimension; positive weights lean toward the first letter listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MbtiDimension {
    /// E (+) vs I (-)
    EnergyOrientation,
    /// N (+) vs S (-)
    Perception,
    /// T (+) vs F (-)
    Judgment,
    /// J (+) vs P (-)
    Lifestyle,
}

impl MbtiDimension {
    /// Letter pair as (positive, negative).
    pub fn letters(&self) -> (char, char) {
        match self {
            Self::EnergyOrientation => ('E', 'I'),
            Self::Perception => ('N', 'S'),
            Self::Judgment => ('T', 'F'),
            Self::Lifestyle => ('J', 'P'),
        }
    }
}

/// What choosing an option contributes to the running assessment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnswerEffect {
    /// ASRS-style symptom weight in [0, 1].
    AdhdIndicator(f32),
    /// Signed lean on one MBTI dimension.
    MbtiLean {
        dimension: MbtiDimension,
        weight: f32,
    },
    /// Vote for a cognitive processing style.
    StylePreference(CognitiveStyle),
    /// Directly observed attention span.
    AttentionObservation(AttentionSpan),
    /// Stated feedback cadence preference.
    FeedbackPreference(FeedbackFrequency),
    /// Stated control balance preference.
    ControlPreference(ControlPreference),
    /// Stated stimulation preference.
    StimulationPreference(StimulationLevel),
}

/// One selectable answer option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnswerOption {
    pub text: &'static str,
    pub effect: AnswerEffect,
}

/// Single evaluation question.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationQuestion {
    pub id: &'static str,
    pub group: QuestionGroup,
    pub prompt: &'static str,
    pub options: &'static [AnswerOption],
}

impl EvaluationQuestion {
    /// Resolves a raw answer to an option index.
    ///
    /// Accepts a single letter (`a`..), a 1-based option number, or the
    /// exact option text (case-insensitive). Anything else is out of
    /// domain.
    pub fn resolve_answer(&self, raw: &str) -> Result<usize, ValidationError> {
        resolve_option(self.id, raw, self.options.len(), |i| self.options[i].text)
    }
}

fn resolve_option(
    field: &str,
    raw: &str,
    len: usize,
    text_of: impl Fn(usize) -> &'static str,
) -> Result<usize, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field("answer"));
    }

    let lowered = trimmed.to_lowercase();
    if lowered.len() == 1 {
        let ch = lowered.chars().next().unwrap();
        if ch.is_ascii_lowercase() {
            let index = (ch as usize) - ('a' as usize);
            if index < len {
                return Ok(index);
            }
        }
        if let Some(digit) = ch.to_digit(10) {
            let digit = digit as usize;
            if (1..=len).contains(&digit) {
                return Ok(digit - 1);
            }
        }
        return Err(ValidationError::out_of_domain(field.to_string(), trimmed));
    }

    for i in 0..len {
        if text_of(i).eq_ignore_ascii_case(trimmed) {
            return Ok(i);
        }
    }
    Err(ValidationError::out_of_domain(field.to_string(), trimmed))
}

const ASRS_OPTIONS: [(&str, f32); 5] = [
    ("Never", 0.0),
    ("Rarely", 0.25),
    ("Sometimes", 0.5),
    ("Often", 0.75),
    ("Very Often", 1.0),
];

macro_rules! asrs_options {
    () => {
        &[
            AnswerOption {
                text: ASRS_OPTIONS[0].0,
                effect: AnswerEffect::AdhdIndicator(ASRS_OPTIONS[0].1),
            },
            AnswerOption {
                text: ASRS_OPTIONS[1].0,
                effect: AnswerEffect::AdhdIndicator(ASRS_OPTIONS[1].1),
            },
            AnswerOption {
                text: ASRS_OPTIONS[2].0,
                effect: AnswerEffect::AdhdIndicator(ASRS_OPTIONS[2].1),
            },
            AnswerOption {
                text: ASRS_OPTIONS[3].0,
                effect: AnswerEffect::AdhdIndicator(ASRS_OPTIONS[3].1),
            },
            AnswerOption {
                text: ASRS_OPTIONS[4].0,
                effect: AnswerEffect::AdhdIndicator(ASRS_OPTIONS[4].1),
            },
        ]
    };
}

macro_rules! mbti_options {
    ($dim:expr, $first:literal, $second:literal) => {
        &[
            AnswerOption {
                text: $first,
                effect: AnswerEffect::MbtiLean {
                    dimension: $dim,
                    weight: 1.0,
                },
            },
            AnswerOption {
                text: $second,
                effect: AnswerEffect::MbtiLean {
                    dimension: $dim,
                    weight: -1.0,
                },
            },
        ]
    };
}

/// The full-discovery question bank, in asking order.
pub const QUESTION_BANK: &[EvaluationQuestion] = &[
    // ADHD screening (ASRS part A wording)
    EvaluationQuestion {
        id: "adhd_1",
        group: QuestionGroup::AdhdScreening,
        prompt: "How often do you have trouble wrapping up the final details of a project, once the challenging parts have been done?",
        options: asrs_options!(),
    },
    EvaluationQuestion {
        id: "adhd_2",
        group: QuestionGroup::AdhdScreening,
        prompt: "How often do you have difficulty getting things in order when you have to do a task that requires organization?",
        options: asrs_options!(),
    },
    EvaluationQuestion {
        id: "adhd_3",
        group: QuestionGroup::AdhdScreening,
        prompt: "How often do you have problems remembering appointments or obligations?",
        options: asrs_options!(),
    },
    EvaluationQuestion {
        id: "adhd_4",
        group: QuestionGroup::AdhdScreening,
        prompt: "When you have a task that requires a lot of thought, how often do you avoid or delay getting started?",
        options: asrs_options!(),
    },
    EvaluationQuestion {
        id: "adhd_5",
        group: QuestionGroup::AdhdScreening,
        prompt: "How often do you fidget or squirm with your hands or feet when you have to sit down for a long time?",
        options: asrs_options!(),
    },
    EvaluationQuestion {
        id: "adhd_6",
        group: QuestionGroup::AdhdScreening,
        prompt: "How often do you feel overly active and compelled to do things, as if you were driven by a motor?",
        options: asrs_options!(),
    },
    // MBTI four-dimension assessment
    EvaluationQuestion {
        id: "mbti_ei",
        group: QuestionGroup::MbtiAssessment,
        prompt: "At a party, do you:",
        options: mbti_options!(
            MbtiDimension::EnergyOrientation,
            "Interact with many, including strangers",
            "Interact with a few, known to you"
        ),
    },
    EvaluationQuestion {
        id: "mbti_sn",
        group: QuestionGroup::MbtiAssessment,
        prompt: "Are you more interested in:",
        options: &[
            AnswerOption {
                text: "What is actual",
                effect: AnswerEffect::MbtiLean {
                    dimension: MbtiDimension::Perception,
                    weight: -1.0,
                },
            },
            AnswerOption {
                text: "What is possible",
                effect: AnswerEffect::MbtiLean {
                    dimension: MbtiDimension::Perception,
                    weight: 1.0,
                },
            },
        ],
    },
    EvaluationQuestion {
        id: "mbti_tf",
        group: QuestionGroup::MbtiAssessment,
        prompt: "In judging others, are you more swayed by:",
        options: mbti_options!(
            MbtiDimension::Judgment,
            "Laws and principles",
            "Individual circumstances and relationships"
        ),
    },
    EvaluationQuestion {
        id: "mbti_jp",
        group: QuestionGroup::MbtiAssessment,
        prompt: "In doing things, do you prefer to:",
        options: mbti_options!(
            MbtiDimension::Lifestyle,
            "Organize and schedule",
            "Keep options open and be flexible"
        ),
    },
    EvaluationQuestion {
        id: "mbti_intuition",
        group: QuestionGroup::MbtiAssessment,
        prompt: "Do you more often prefer:",
        options: &[
            AnswerOption {
                text: "The final, unambiguous answer",
                effect: AnswerEffect::MbtiLean {
                    dimension: MbtiDimension::Perception,
                    weight: -1.0,
                },
            },
            AnswerOption {
                text: "Exploring the possibilities and implications",
                effect: AnswerEffect::MbtiLean {
                    dimension: MbtiDimension::Perception,
                    weight: 1.0,
                },
            },
        ],
    },
    EvaluationQuestion {
        id: "mbti_feeling",
        group: QuestionGroup::MbtiAssessment,
        prompt: "Which rules you more:",
        options: mbti_options!(MbtiDimension::Judgment, "Your head", "Your heart"),
    },
    // Cognitive style
    EvaluationQuestion {
        id: "cog_learning",
        group: QuestionGroup::CognitiveStyle,
        prompt: "How do you prefer to learn new information?",
        options: &[
            AnswerOption {
                text: "Through logical analysis and step-by-step instructions",
                effect: AnswerEffect::StylePreference(CognitiveStyle::Analytical),
            },
            AnswerOption {
                text: "By seeing the big picture and understanding patterns",
                effect: AnswerEffect::StylePreference(CognitiveStyle::Intuitive),
            },
            AnswerOption {
                text: "Through hands-on experience and experimentation",
                effect: AnswerEffect::StylePreference(CognitiveStyle::Creative),
            },
            AnswerOption {
                text: "By understanding the underlying meaning and connections",
                effect: AnswerEffect::StylePreference(CognitiveStyle::Holistic),
            },
        ],
    },
    EvaluationQuestion {
        id: "cog_problem",
        group: QuestionGroup::CognitiveStyle,
        prompt: "When solving a complex problem, you typically:",
        options: &[
            AnswerOption {
                text: "Break it down into smaller, logical steps",
                effect: AnswerEffect::StylePreference(CognitiveStyle::Analytical),
            },
            AnswerOption {
                text: "Look for patterns and connections to similar problems",
                effect: AnswerEffect::StylePreference(CognitiveStyle::Intuitive),
            },
            AnswerOption {
                text: "Brainstorm multiple creative approaches",
                effect: AnswerEffect::StylePreference(CognitiveStyle::Creative),
            },
            AnswerOption {
                text: "Consider how it fits into the larger system",
                effect: AnswerEffect::StylePreference(CognitiveStyle::Holistic),
            },
        ],
    },
    EvaluationQuestion {
        id: "cog_attention",
        group: QuestionGroup::CognitiveStyle,
        prompt: "Your attention span is best described as:",
        options: &[
            AnswerOption {
                text: "Short and focused, I prefer quick tasks",
                effect: AnswerEffect::AttentionObservation(AttentionSpan::Short),
            },
            AnswerOption {
                text: "Variable, I can hyperfocus when interested",
                effect: AnswerEffect::AttentionObservation(AttentionSpan::Variable),
            },
            AnswerOption {
                text: "Long and sustained, I prefer deep work",
                effect: AnswerEffect::AttentionObservation(AttentionSpan::Long),
            },
            AnswerOption {
                text: "Flexible, I switch between different focus levels",
                effect: AnswerEffect::AttentionObservation(AttentionSpan::Variable),
            },
        ],
    },
    // Behavioral preference tuning
    EvaluationQuestion {
        id: "beh_feedback",
        group: QuestionGroup::PreferenceTuning,
        prompt: "How often do you prefer feedback on your work?",
        options: &[
            AnswerOption {
                text: "Rarely, I prefer to work independently",
                effect: AnswerEffect::FeedbackPreference(FeedbackFrequency::Minimal),
            },
            AnswerOption {
                text: "Occasionally, when I need guidance",
                effect: AnswerEffect::FeedbackPreference(FeedbackFrequency::Medium),
            },
            AnswerOption {
                text: "Frequently, I like to stay on track",
                effect: AnswerEffect::FeedbackPreference(FeedbackFrequency::High),
            },
            AnswerOption {
                text: "Constantly, I need regular confirmation",
                effect: AnswerEffect::FeedbackPreference(FeedbackFrequency::High),
            },
        ],
    },
    EvaluationQuestion {
        id: "beh_control",
        group: QuestionGroup::PreferenceTuning,
        prompt: "When working with AI systems, you prefer:",
        options: &[
            AnswerOption {
                text: "Full control over every decision",
                effect: AnswerEffect::ControlPreference(ControlPreference::High),
            },
            AnswerOption {
                text: "Guidance with autonomy for the AI",
                effect: AnswerEffect::ControlPreference(ControlPreference::Balanced),
            },
            AnswerOption {
                text: "Mostly autonomous with occasional direction",
                effect: AnswerEffect::ControlPreference(ControlPreference::Low),
            },
            AnswerOption {
                text: "Fully autonomous AI that handles everything",
                effect: AnswerEffect::ControlPreference(ControlPreference::Low),
            },
        ],
    },
    EvaluationQuestion {
        id: "beh_stimulation",
        group: QuestionGroup::PreferenceTuning,
        prompt: "Your ideal work environment has:",
        options: &[
            AnswerOption {
                text: "Minimal stimulation, quiet and calm",
                effect: AnswerEffect::StimulationPreference(StimulationLevel::Low),
            },
            AnswerOption {
                text: "Moderate stimulation, some background activity",
                effect: AnswerEffect::StimulationPreference(StimulationLevel::Medium),
            },
            AnswerOption {
                text: "High stimulation, lots of activity and energy",
                effect: AnswerEffect::StimulationPreference(StimulationLevel::High),
            },
            AnswerOption {
                text: "Variable stimulation that I can control",
                effect: AnswerEffect::StimulationPreference(StimulationLevel::Medium),
            },
        ],
    },
];

/// Finds a full-discovery question by id.
pub fn find_question(id: &str) -> Option<&'static EvaluationQuestion> {
    QUESTION_BANK.iter().find(|q| q.id == id)
}

/// Returns the questions of a group, in asking order.
pub fn group_questions(group: QuestionGroup) -> impl Iterator<Item = &'static EvaluationQuestion> {
    QUESTION_BANK.iter().filter(move |q| q.group == group)
}

/// Number of questions in a group.
pub fn group_size(group: QuestionGroup) -> usize {
    group_questions(group).count()
}

/// One question of the quick 3-question assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickQuestion {
    pub id: &'static str,
    pub prompt: &'static str,
    pub options: [&'static str; 4],
}

impl QuickQuestion {
    /// Resolves a quick answer to an option index.
    ///
    /// Accepts `a`..`d`, the combined `1a`..`3d` form (the leading digit
    /// must match the question position), or the exact option text.
    pub fn resolve_answer(&self, position: usize, raw: &str) -> Result<usize, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.len() == 2 {
            let mut chars = trimmed.chars();
            let digit = chars.next().unwrap();
            let letter = chars.next().unwrap().to_ascii_lowercase();
            if let Some(d) = digit.to_digit(10) {
                if d as usize != position + 1 {
                    return Err(ValidationError::out_of_domain(self.id.to_string(), trimmed));
                }
                return resolve_option(self.id, &letter.to_string(), 4, |i| self.options[i]);
            }
        }
        resolve_option(self.id, trimmed, 4, |i| self.options[i])
    }
}

/// The quick assessment bank, in asking order.
pub const QUICK_BANK: [QuickQuestion; 3] = [
    QuickQuestion {
        id: "quick_attention",
        prompt: "How would you describe your attention?",
        options: [
            "I focus best in short bursts",
            "I can hyperfocus when interested",
            "I prefer long, deep work sessions",
            "It varies depending on the task",
        ],
    },
    QuickQuestion {
        id: "quick_interaction",
        prompt: "When working with AI, you prefer:",
        options: [
            "Full control over decisions",
            "Guidance with AI autonomy",
            "Mostly autonomous AI",
            "Fully autonomous AI",
        ],
    },
    QuickQuestion {
        id: "quick_information",
        prompt: "You prefer information that is:",
        options: [
            "Detailed and step-by-step",
            "Pattern-focused and intuitive",
            "Creative and exploratory",
            "Big picture and meaningful",
        ],
    },
];

/// Finds a quick question and its position by id.
pub fn find_quick_question(id: &str) -> Option<(usize, &'static QuickQuestion)> {
    QUICK_BANK.iter().enumerate().find(|(_, q)| q.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_has_expected_group_sizes() {
        assert_eq!(group_size(QuestionGroup::AdhdScreening), 6);
        assert_eq!(group_size(QuestionGroup::MbtiAssessment), 6);
        assert_eq!(group_size(QuestionGroup::CognitiveStyle), 3);
        assert_eq!(group_size(QuestionGroup::PreferenceTuning), 3);
    }

    #[test]
    fn question_ids_are_unique() {
        for (i, a) in QUESTION_BANK.iter().enumerate() {
            for b in &QUESTION_BANK[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn resolve_answer_accepts_letters_numbers_and_text() {
        let q = find_question("adhd_1").unwrap();
        assert_eq!(q.resolve_answer("a").unwrap(), 0);
        assert_eq!(q.resolve_answer("E").unwrap(), 4);
        assert_eq!(q.resolve_answer("3").unwrap(), 2);
        assert_eq!(q.resolve_answer("very often").unwrap(), 4);
    }

    #[test]
    fn resolve_answer_rejects_out_of_domain() {
        let q = find_question("mbti_ei").unwrap();
        assert!(q.resolve_answer("c").is_err()); // only two options
        assert!(q.resolve_answer("maybe").is_err());
        assert!(q.resolve_answer("").is_err());
    }

    #[test]
    fn quick_answers_accept_combined_form() {
        let (pos, q) = find_quick_question("quick_interaction").unwrap();
        assert_eq!(pos, 1);
        assert_eq!(q.resolve_answer(pos, "2b").unwrap(), 1);
        assert_eq!(q.resolve_answer(pos, "b").unwrap(), 1);
        // wrong leading digit for this position
        assert!(q.resolve_answer(pos, "1b").is_err());
    }

    #[test]
    fn mbti_positive_weight_leans_first_letter() {
        let q = find_question("mbti_feeling").unwrap();
        match q.options[0].effect {
            AnswerEffect::MbtiLean { dimension, weight } => {
                assert_eq!(dimension, MbtiDimension::Judgment);
                assert_eq!(dimension.letters().0, 'T');
                assert!(weight > 0.0);
            }
            _ => panic!("expected MBTI lean"),
        }
    }
}
