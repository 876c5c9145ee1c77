//! Degraded-mode answers from the built-in knowledge base.
//!
//! # Responsibilities
//! - Categorize a question by keyword matching on an accent-folded form
//! - Assemble a canned answer with an educational tip and a suggestion
//! - Render a service status line from a breaker snapshot
//!
//! # Design Decisions
//! - `respond` must never fail; any internal miss falls back to a fixed
//!   apology with bullet facts
//! - First matching category wins; detection order is fixed

use serde::Deserialize;

use crate::observability::metrics;
use crate::resilience::{CircuitSnapshot, CircuitState};

use super::knowledge::{
    CHARACTER_TYPES, DEGRADED_MODE_NOTICE, EXPLORATION_SUGGESTIONS, FAQ_ACTIVITY,
    FAQ_CHARACTEROLOGY, FAQ_EMOTIVITY, FAQ_RESONANCE, FAQ_TYPES_LIST, MINIMAL_FALLBACK,
    OFFLINE_GUIDANCE, TIPS_ADVANCED, TIPS_BEGINNER, TIPS_INTERMEDIATE, TYPE_IDENTIFICATION_GUIDE,
};

/// Self-declared expertise of the user, steering the educational tips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// Detected topic of a question, used to pick the canned content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionCategory {
    CharacterologyDefinition,
    EmotivityDefinition,
    ActivityDefinition,
    ResonanceDefinition,
    TypesList,
    TypeIdentification,
    Explanation,
    General,
}

impl QuestionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionCategory::CharacterologyDefinition => "definition_caracterologie",
            QuestionCategory::EmotivityDefinition => "definition_emotivite",
            QuestionCategory::ActivityDefinition => "definition_activite",
            QuestionCategory::ResonanceDefinition => "definition_retentissement",
            QuestionCategory::TypesList => "types_list",
            QuestionCategory::TypeIdentification => "type_identification",
            QuestionCategory::Explanation => "explanation",
            QuestionCategory::General => "general",
        }
    }
}

/// Lowercase and fold the accents the detection keywords care about.
fn normalize(question: &str) -> String {
    question
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'à' | 'â' => 'a',
            'ç' => 'c',
            'ô' => 'o',
            'û' | 'ù' | 'ü' => 'u',
            'î' | 'ï' => 'i',
            '’' => '\'',
            other => other,
        })
        .collect()
}

/// Keyword-based category detection, first match wins.
pub fn detect_category(question: &str) -> QuestionCategory {
    let q = normalize(question);
    let contains_any = |words: &[&str]| words.iter().any(|w| q.contains(w));

    if contains_any(&["qu'est-ce", "definition", "c'est quoi"]) {
        if q.contains("caracterologie") {
            return QuestionCategory::CharacterologyDefinition;
        }
        if contains_any(&["emotivite", "emotif"]) {
            return QuestionCategory::EmotivityDefinition;
        }
        if contains_any(&["activite", "actif"]) {
            return QuestionCategory::ActivityDefinition;
        }
        if q.contains("retentissement") {
            return QuestionCategory::ResonanceDefinition;
        }
    }

    if contains_any(&["types", "8 types", "huit types"]) {
        return QuestionCategory::TypesList;
    }
    if contains_any(&["mon type", "quel type", "je suis"]) {
        return QuestionCategory::TypeIdentification;
    }
    if contains_any(&["comment", "pourquoi", "difference"]) {
        return QuestionCategory::Explanation;
    }

    QuestionCategory::General
}

/// Serves canned characterology answers while the LLM is unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackResponder;

impl FallbackResponder {
    pub fn new() -> Self {
        Self
    }

    /// Canned degraded-mode answer for `question`. Never fails.
    pub fn respond(&self, question: &str, level: UserLevel) -> String {
        let category = detect_category(question);
        tracing::info!(category = category.as_str(), "serving fallback response");
        metrics::record_fallback(category.as_str());

        self.compose(category, level)
            .unwrap_or_else(|| MINIMAL_FALLBACK.to_string())
    }

    fn compose(&self, category: QuestionCategory, level: UserLevel) -> Option<String> {
        let content = match category {
            QuestionCategory::CharacterologyDefinition => FAQ_CHARACTEROLOGY.to_string(),
            QuestionCategory::EmotivityDefinition => FAQ_EMOTIVITY.to_string(),
            QuestionCategory::ActivityDefinition => FAQ_ACTIVITY.to_string(),
            QuestionCategory::ResonanceDefinition => FAQ_RESONANCE.to_string(),
            QuestionCategory::TypesList => FAQ_TYPES_LIST.to_string(),
            QuestionCategory::TypeIdentification => TYPE_IDENTIFICATION_GUIDE.to_string(),
            QuestionCategory::Explanation | QuestionCategory::General => self.general_content()?,
        };

        let tips: &[&str] = match level {
            UserLevel::Beginner => &TIPS_BEGINNER,
            UserLevel::Intermediate => &TIPS_INTERMEDIATE,
            UserLevel::Advanced => &TIPS_ADVANCED,
        };
        let tip = tips.get(fastrand::usize(..tips.len()))?;
        let suggestion = EXPLORATION_SUGGESTIONS.get(fastrand::usize(..EXPLORATION_SUGGESTIONS.len()))?;

        Some(format!(
            "{content}\n\n---\n\n💡 **Le saviez-vous ?** {tip}\n\n{suggestion}\n\n---\n\n{DEGRADED_MODE_NOTICE}"
        ))
    }

    fn general_content(&self) -> Option<String> {
        let sample = CHARACTER_TYPES.get(fastrand::usize(..CHARACTER_TYPES.len()))?;
        Some(format!(
            "**Introduction à la Caractérologie**\n\n\
             La caractérologie de René Le Senne étudie les **types de caractères innés** qui \
             forment la structure permanente de notre personnalité.\n\n\
             **Exemple : Le type {}**\n\
             - **Formule :** {}\n\
             - **Traits typiques :** {}\n\
             - **Souvent chez :** {}\n\n\
             La connaissance de votre type vous aide à :\n\
             • Mieux vous comprendre\n\
             • Optimiser vos relations\n\
             • Orienter vos choix de vie\n\
             • Développer votre potentiel",
            sample.name,
            sample.formula,
            sample.traits.join(", "),
            sample.examples,
        ))
    }

    /// One-line service availability message for the chat header.
    pub fn service_status_message(&self, snapshot: &CircuitSnapshot) -> String {
        match snapshot.state {
            CircuitState::Open => {
                let remaining = snapshot.remaining_recovery.as_secs();
                if remaining > 60 {
                    format!(
                        "🔴 **Service IA indisponible** - Récupération prévue dans ~{} minutes",
                        remaining / 60
                    )
                } else {
                    format!(
                        "🔴 **Service IA indisponible** - Test de récupération dans {remaining} secondes"
                    )
                }
            }
            CircuitState::HalfOpen => {
                "🟡 **Service IA en cours de récupération** - Test en cours...".to_string()
            }
            CircuitState::Closed => "🟢 **Service IA disponible**".to_string(),
        }
    }

    /// What the user can still do while the service is degraded.
    pub fn offline_guidance(&self) -> &'static str {
        OFFLINE_GUIDANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn snapshot(state: CircuitState, remaining: Duration) -> CircuitSnapshot {
        CircuitSnapshot {
            name: "openai".to_string(),
            state,
            failure_count: 0,
            success_count: 0,
            failure_threshold: 5,
            remaining_recovery: remaining,
        }
    }

    #[test]
    fn test_detects_domain_definition() {
        assert_eq!(
            detect_category("Qu'est-ce que la caractérologie ?"),
            QuestionCategory::CharacterologyDefinition
        );
        // Curly apostrophe, as typed by most keyboards.
        assert_eq!(
            detect_category("Qu’est-ce que la caractérologie ?"),
            QuestionCategory::CharacterologyDefinition
        );
    }

    #[test]
    fn test_detects_property_definitions() {
        assert_eq!(
            detect_category("C'est quoi l'émotivité ?"),
            QuestionCategory::EmotivityDefinition
        );
        assert_eq!(
            detect_category("Définition de l'activité"),
            QuestionCategory::ActivityDefinition
        );
        assert_eq!(
            detect_category("Qu'est-ce que le retentissement ?"),
            QuestionCategory::ResonanceDefinition
        );
    }

    #[test]
    fn test_detects_types_and_identification() {
        assert_eq!(detect_category("Quels sont les 8 types ?"), QuestionCategory::TypesList);
        assert_eq!(detect_category("Quel type suis-je ?"), QuestionCategory::TypeIdentification);
    }

    #[test]
    fn test_unmatched_falls_back_to_general() {
        assert_eq!(detect_category("Bonjour"), QuestionCategory::General);
        assert_eq!(detect_category(""), QuestionCategory::General);
    }

    #[test]
    fn test_respond_never_empty() {
        let responder = FallbackResponder::new();
        for question in ["", "xyzzy", "Qu'est-ce que la caractérologie ?", "🤖🤖🤖"] {
            let answer = responder.respond(question, UserLevel::Beginner);
            assert!(!answer.is_empty(), "empty answer for {question:?}");
        }
    }

    #[test]
    fn test_categories_render_distinct_content() {
        let responder = FallbackResponder::new();
        let definition = responder.respond("Qu'est-ce que la caractérologie ?", UserLevel::Beginner);
        let types = responder.respond("Quels sont les 8 types ?", UserLevel::Beginner);

        assert!(definition.contains("trois propriétés fondamentales"));
        assert!(types.contains("Les 8 Types Caractérologiques"));
        assert!(!types.contains("trois propriétés fondamentales"));
    }

    #[test]
    fn test_responses_carry_degraded_notice() {
        let responder = FallbackResponder::new();
        let answer = responder.respond("Quels sont les 8 types ?", UserLevel::Advanced);
        assert!(answer.contains("Mode dégradé"));
        assert!(answer.contains("Le saviez-vous ?"));
    }

    #[test]
    fn test_status_message_open_fine_grained() {
        let responder = FallbackResponder::new();
        let message = responder.service_status_message(&snapshot(
            CircuitState::Open,
            Duration::from_secs(45),
        ));
        assert!(message.contains("45 secondes"));
    }

    #[test]
    fn test_status_message_open_coarse_grained() {
        let responder = FallbackResponder::new();
        let message = responder.service_status_message(&snapshot(
            CircuitState::Open,
            Duration::from_secs(150),
        ));
        assert!(message.contains("~2 minutes"));
    }

    #[test]
    fn test_status_message_half_open_and_closed() {
        let responder = FallbackResponder::new();
        let recovering =
            responder.service_status_message(&snapshot(CircuitState::HalfOpen, Duration::ZERO));
        assert!(recovering.contains("récupération"));

        let available =
            responder.service_status_message(&snapshot(CircuitState::Closed, Duration::ZERO));
        assert!(available.contains("disponible"));
    }
}
