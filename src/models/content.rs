use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

/// Learner audiences. Every piece of track-specific state is keyed by one of
/// these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    Conservation,
    Nonprofit,
    Teen,
}

impl Track {
    pub const ALL: [Track; 3] = [Track::Conservation, Track::Nonprofit, Track::Teen];

    pub fn as_str(&self) -> &'static str {
        match self {
            Track::Conservation => "conservation",
            Track::Nonprofit => "nonprofit",
            Track::Teen => "teen",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Lesson {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(range(min = 1, max = 120))]
    pub est_mins: u32,
    pub summary: String,
    pub checkpoints: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LearningModule {
    #[validate(length(min = 1))]
    pub key: String,
    #[validate(length(min = 1))]
    pub title: String,
    pub subtitle: String,
    #[validate]
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuizItem {
    #[validate(length(min = 1))]
    pub question: String,
    #[validate(length(min = 1))]
    pub answer: String,
}

/// Everything one track offers: its modules plus its core quiz bank.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TrackContent {
    pub track: Track,
    #[validate]
    pub modules: Vec<LearningModule>,
    #[validate]
    pub quiz: Vec<QuizItem>,
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("invalid content for track {track}: {source}")]
    Invalid {
        track: &'static str,
        #[source]
        source: validator::ValidationErrors,
    },
}

impl TrackContent {
    /// Schema check run once at load time. Dynamic record shapes from the
    /// old app become a hard error here instead of rendering oddly.
    pub fn validate_schema(&self) -> Result<(), ContentError> {
        self.validate().map_err(|source| ContentError::Invalid {
            track: self.track.as_str(),
            source,
        })
    }
}

fn lesson(id: &str, title: &str, est_mins: u32, summary: &str, checkpoints: &[&str]) -> Lesson {
    Lesson {
        id: id.to_string(),
        title: title.to_string(),
        est_mins,
        summary: summary.to_string(),
        checkpoints: checkpoints.iter().map(|c| c.to_string()).collect(),
    }
}

fn module(key: &str, title: &str, subtitle: &str, lessons: Vec<Lesson>) -> LearningModule {
    LearningModule {
        key: key.to_string(),
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        lessons,
    }
}

fn quiz(question: &str, answer: &str) -> QuizItem {
    QuizItem {
        question: question.to_string(),
        answer: answer.to_string(),
    }
}

/// Built-in curriculum for one track.
pub fn builtin_track(track: Track) -> TrackContent {
    let (modules, quiz_bank) = match track {
        Track::Conservation => (
            vec![
                module(
                    "core",
                    "Core Literacy",
                    "Models • Ethics • Data",
                    vec![
                        lesson(
                            "foundations",
                            "How models think",
                            15,
                            "Tokens, embeddings, context windows in plain words.",
                            &[
                                "Explain tokens with a species example.",
                                "Two uses of embeddings.",
                            ],
                        ),
                        lesson(
                            "ethics",
                            "Responsible AI in the field",
                            12,
                            "Consent, sensitive species, and public trust.",
                            &["Draft a kiosk disclosure.", "Name one bias risk and a test."],
                        ),
                    ],
                ),
                module(
                    "apply",
                    "Conservation Data",
                    "Sensors • GIS • ML",
                    vec![
                        lesson(
                            "sensors",
                            "Sensors & alerts",
                            15,
                            "AudioMoth, probes, practical alerts.",
                            &[
                                "Minimal field kit sketch.",
                                "One alert rule with time and threshold.",
                            ],
                        ),
                        lesson(
                            "gis",
                            "Maps with care",
                            15,
                            "Narrative maps without harm.",
                            &["Add a confluence marker.", "Buffer sensitive sites."],
                        ),
                    ],
                ),
                module(
                    "build",
                    "Implementation",
                    "Workflows • Dashboards",
                    vec![lesson(
                        "auto",
                        "Automations you can trust",
                        14,
                        "Approvals, logs, disclosures.",
                        &["Map a four step flow.", "Two governance controls."],
                    )],
                ),
            ],
            vec![quiz("Embeddings help with?", "Semantic search and retrieval.")],
        ),
        Track::Nonprofit => (
            vec![
                module(
                    "core",
                    "AI Literacy for Nonprofits",
                    "Models • Access • Value",
                    vec![
                        lesson(
                            "onramp",
                            "On ramp",
                            14,
                            "How assistants help and where they fail.",
                            &["Context window in plain words.", "Three safe pilot tasks."],
                        ),
                        lesson(
                            "equity",
                            "Access & energy",
                            12,
                            "Who benefits; reduce compute.",
                            &["Two access risks.", "One low compute tool."],
                        ),
                    ],
                ),
                module(
                    "impact",
                    "Impact & Strategy",
                    "Capacity • Governance",
                    vec![lesson(
                        "capacity",
                        "Capacity planning",
                        14,
                        "Drafting, summarizing, scheduling.",
                        &[
                            "Three workflows to streamline.",
                            "Pick a human approval point.",
                        ],
                    )],
                ),
                module(
                    "build",
                    "Tools & Workflows",
                    "Which tool for which task",
                    vec![lesson(
                        "stack",
                        "Choose your stack",
                        14,
                        "Writing, data, automation, CRM.",
                        &["Pick three tools.", "Two integrations."],
                    )],
                ),
            ],
            vec![quiz(
                "Context window is?",
                "How much recent text a model can see at once.",
            )],
        ),
        Track::Teen => (
            vec![
                module(
                    "core",
                    "How AI Works (Teen)",
                    "Systems • Prompts • Judgment",
                    vec![
                        lesson(
                            "systems",
                            "Systems not magic",
                            10,
                            "Why models guess and can be confidently wrong.",
                            &["Your words for tokens.", "Two times to double-check."],
                        ),
                        lesson(
                            "prompting",
                            "Prompt craft basics",
                            10,
                            "Role, goal, constraints, steps, examples.",
                            &["Write a four part prompt.", "Add one constraint."],
                        ),
                    ],
                ),
                module(
                    "brand",
                    "Brand & Digital Citizenship",
                    "Reputation • Craft • Opportunity",
                    vec![lesson(
                        "kit",
                        "Build a brand you are proud of",
                        12,
                        "Brainstorm content and projects; then make them real.",
                        &["Two projects this month.", "Three post plan."],
                    )],
                ),
            ],
            vec![quiz(
                "Prompt skeleton?",
                "Role, goal, constraints, steps; include an example.",
            )],
        ),
    };

    TrackContent {
        track,
        modules,
        quiz: quiz_bank,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Track::Conservation, 3)]
    #[case(Track::Nonprofit, 3)]
    #[case(Track::Teen, 2)]
    fn builtin_tracks_validate(#[case] track: Track, #[case] module_count: usize) {
        let content = builtin_track(track);
        assert_eq!(content.modules.len(), module_count);
        assert!(!content.quiz.is_empty());
        content.validate_schema().unwrap();
    }

    #[test]
    fn schema_rejects_empty_lesson_id() {
        let mut content = builtin_track(Track::Teen);
        content.modules[0].lessons[0].id.clear();
        assert!(content.validate_schema().is_err());
    }

    #[test]
    fn schema_rejects_out_of_range_minutes() {
        let mut content = builtin_track(Track::Conservation);
        content.modules[0].lessons[0].est_mins = 0;
        assert!(content.validate_schema().is_err());
    }

    #[test]
    fn track_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Track::Conservation).unwrap(),
            "\"conservation\""
        );
    }
}
