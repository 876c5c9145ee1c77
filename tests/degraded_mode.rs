//! Failure injection tests for the chat pipeline.
//!
//! Drives the engine end to end with a scripted provider: transient faults,
//! breaker trips, fallback degradation and recovery through Half-Open.

use std::sync::Arc;
use std::time::{Duration, Instant};

use characterology_chat::chat::{AnswerSource, ChatEngine};
use characterology_chat::fallback::UserLevel;
use characterology_chat::llm::LlmError;
use characterology_chat::resilience::{BreakerRegistry, BreakerSettings, CircuitState, RetryPolicy, LLM_BREAKER};

mod common;
use common::ScriptedClient;

fn fast_policy(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        base_delay: Duration::from_millis(5),
        max_delay: Duration::from_millis(20),
    }
}

fn build_engine(
    client: Arc<ScriptedClient>,
    settings: BreakerSettings,
    policy: RetryPolicy,
) -> (BreakerRegistry, ChatEngine<Arc<ScriptedClient>>) {
    let registry = BreakerRegistry::new();
    let breaker = registry.get_or_create(LLM_BREAKER, settings);
    (registry, ChatEngine::new(client, breaker, policy))
}

#[tokio::test]
async fn test_transient_faults_recover_to_model_answer() {
    let client = Arc::new(ScriptedClient::new(vec![
        Err(LlmError::RateLimited { retry_after_secs: Some(1) }),
        Err(LlmError::Timeout { secs: 1 }),
        Ok("Le type Colérique est Émotif, Actif, Primaire.".to_string()),
    ]));
    let (_, engine) = build_engine(client.clone(), BreakerSettings::default(), fast_policy(3));

    let answer = engine.ask("Parle-moi du type colérique", UserLevel::Beginner).await;

    assert_eq!(answer.source, AnswerSource::Model);
    assert!(!answer.is_degraded());
    assert!(answer.text.contains("Colérique"));
    assert_eq!(client.calls(), 3, "two transient failures then success");
}

#[tokio::test]
async fn test_non_retriable_fault_answers_once() {
    let client = Arc::new(ScriptedClient::always_failing(LlmError::Auth(
        "invalid api key".to_string(),
    )));
    let (_, engine) = build_engine(client.clone(), BreakerSettings::default(), fast_policy(3));

    let answer = engine.ask("Quels sont les 8 types ?", UserLevel::Beginner).await;

    assert_eq!(answer.source, AnswerSource::Error);
    assert!(answer.text.contains("clé API"));
    assert_eq!(client.calls(), 1, "auth errors must not be retried");
}

#[tokio::test]
async fn test_exhausted_retries_surface_localized_error() {
    let client = Arc::new(ScriptedClient::always_failing(LlmError::RateLimited {
        retry_after_secs: None,
    }));
    let (_, engine) = build_engine(client.clone(), BreakerSettings::default(), fast_policy(2));

    let answer = engine.ask("Bonjour", UserLevel::Beginner).await;

    assert_eq!(answer.source, AnswerSource::Error);
    assert!(answer.text.contains("très sollicité"));
    assert_eq!(client.calls(), 3, "initial attempt plus two retries");
}

#[tokio::test]
async fn test_open_breaker_serves_fallback_without_calling_provider() {
    let client = Arc::new(ScriptedClient::always_failing(LlmError::Connection(
        "connection refused".to_string(),
    )));
    let settings = BreakerSettings {
        failure_threshold: 2,
        recovery_timeout: Duration::from_secs(60),
    };
    let (registry, engine) = build_engine(client.clone(), settings, fast_policy(0));

    // Two failing questions trip the breaker.
    for _ in 0..2 {
        let answer = engine.ask("Bonjour", UserLevel::Beginner).await;
        assert_eq!(answer.source, AnswerSource::Error);
    }
    let breaker = registry.get(LLM_BREAKER).unwrap();
    assert_eq!(breaker.snapshot().state, CircuitState::Open);
    let calls_before = client.calls();

    // Degraded answer comes from the knowledge base, not the provider.
    let started = Instant::now();
    let answer = engine
        .ask("Qu'est-ce que la caractérologie ?", UserLevel::Beginner)
        .await;

    assert_eq!(answer.source, AnswerSource::Fallback);
    assert!(answer.text.contains("trois propriétés fondamentales"));
    assert!(answer.text.contains("Mode dégradé"));
    let status_line = answer.status_line.expect("degraded answers carry a status line");
    assert!(status_line.contains("indisponible"));
    assert_eq!(client.calls(), calls_before, "provider must not be contacted");
    assert!(started.elapsed() < Duration::from_millis(100), "fast-fail, no backoff");
}

#[tokio::test]
async fn test_fallback_categories_differ_by_question() {
    let client = Arc::new(ScriptedClient::always_failing(LlmError::Connection(
        "down".to_string(),
    )));
    let settings = BreakerSettings {
        failure_threshold: 1,
        recovery_timeout: Duration::from_secs(60),
    };
    let (_, engine) = build_engine(client, settings, fast_policy(0));

    let _ = engine.ask("Bonjour", UserLevel::Beginner).await;

    let definition = engine
        .ask("Qu'est-ce que la caractérologie ?", UserLevel::Beginner)
        .await;
    let types = engine.ask("Quels sont les 8 types ?", UserLevel::Beginner).await;

    assert_eq!(definition.source, AnswerSource::Fallback);
    assert_eq!(types.source, AnswerSource::Fallback);
    assert!(definition.text.contains("La Caractérologie selon René Le Senne"));
    assert!(types.text.contains("Les 8 Types Caractérologiques"));
    assert_ne!(definition.text, types.text);
}

#[tokio::test]
async fn test_breaker_recovers_through_half_open() {
    let client = Arc::new(ScriptedClient::new(vec![
        Err(LlmError::Connection("down".to_string())),
        Ok("Service rétabli.".to_string()),
    ]));
    let settings = BreakerSettings {
        failure_threshold: 1,
        recovery_timeout: Duration::from_millis(100),
    };
    let (registry, engine) = build_engine(client.clone(), settings, fast_policy(0));

    let answer = engine.ask("Bonjour", UserLevel::Beginner).await;
    assert_eq!(answer.source, AnswerSource::Error);
    let breaker = registry.get(LLM_BREAKER).unwrap();
    assert_eq!(breaker.snapshot().state, CircuitState::Open);

    tokio::time::sleep(Duration::from_millis(150)).await;

    // The probe goes through and closes the circuit.
    let answer = engine.ask("Bonjour", UserLevel::Beginner).await;
    assert_eq!(answer.source, AnswerSource::Model);
    assert_eq!(answer.text, "Service rétabli.");

    let snapshot = breaker.snapshot();
    assert_eq!(snapshot.state, CircuitState::Closed);
    assert_eq!(snapshot.failure_count, 0);
    assert_eq!(client.calls(), 2);
}

#[tokio::test]
async fn test_reset_reopens_traffic_immediately() {
    let client = Arc::new(ScriptedClient::new(vec![
        Err(LlmError::Server { status: 503, message: "unavailable".to_string() }),
        Ok("Réponse du modèle.".to_string()),
    ]));
    let settings = BreakerSettings {
        failure_threshold: 1,
        recovery_timeout: Duration::from_secs(3600),
    };
    let (registry, engine) = build_engine(client, settings, fast_policy(0));

    let _ = engine.ask("Bonjour", UserLevel::Beginner).await;
    let breaker = registry.get(LLM_BREAKER).unwrap();
    assert_eq!(breaker.snapshot().state, CircuitState::Open);

    // Operator override: no waiting out the hour-long recovery timeout.
    breaker.reset();
    let answer = engine.ask("Bonjour", UserLevel::Beginner).await;
    assert_eq!(answer.source, AnswerSource::Model);
}

#[tokio::test]
async fn test_concurrent_askers_share_breaker_state() {
    let client = Arc::new(ScriptedClient::always_failing(LlmError::Connection(
        "down".to_string(),
    )));
    let settings = BreakerSettings {
        failure_threshold: 4,
        recovery_timeout: Duration::from_secs(60),
    };
    let (registry, engine) = build_engine(client, settings, fast_policy(0));
    let engine = Arc::new(engine);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let engine = engine.clone();
        handles.push(tokio::spawn(async move {
            engine.ask("Bonjour", UserLevel::Beginner).await
        }));
    }
    for handle in handles {
        let answer = handle.await.expect("task panicked");
        assert!(matches!(answer.source, AnswerSource::Error | AnswerSource::Fallback));
    }

    // Failures observed by any caller inform all callers.
    let breaker = registry.get(LLM_BREAKER).unwrap();
    assert_eq!(breaker.snapshot().state, CircuitState::Open);
}
