use std::time::Duration;

use papersum::infrastructure::llm::{
    ANTHROPIC_DEFAULT_RESPONSE_TOKENS, OPENAI_DEFAULT_RESPONSE_TOKENS, TextGeneratorFactory,
    TextGeneratorFactoryError,
};
use papersum::presentation::config::LlmProvider;

#[test]
fn given_openai_provider_with_key_when_creating_then_returns_openai_generator() {
    let generator = TextGeneratorFactory::create(
        LlmProvider::OpenAi,
        Some("sk-test".to_string()),
        None,
        Duration::from_secs(30),
    )
    .unwrap();

    assert_eq!(generator.default_response_tokens(), OPENAI_DEFAULT_RESPONSE_TOKENS);
}

#[test]
fn given_anthropic_provider_with_key_when_creating_then_returns_anthropic_generator() {
    let generator = TextGeneratorFactory::create(
        LlmProvider::Anthropic,
        Some("key".to_string()),
        Some("http://localhost:9".to_string()),
        Duration::from_secs(30),
    )
    .unwrap();

    assert_eq!(generator.default_response_tokens(), ANTHROPIC_DEFAULT_RESPONSE_TOKENS);
}

#[test]
fn given_missing_key_when_creating_then_names_expected_variable() {
    let result = TextGeneratorFactory::create(
        LlmProvider::Anthropic,
        None,
        None,
        Duration::from_secs(30),
    );

    match result {
        Err(TextGeneratorFactoryError::MissingApiKey(provider, variable)) => {
            assert_eq!(provider, LlmProvider::Anthropic);
            assert_eq!(variable, "ANTHROPIC_API_KEY");
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("expected missing key error"),
    }
}

#[test]
fn given_blank_key_when_creating_then_treated_as_missing() {
    let result = TextGeneratorFactory::create(
        LlmProvider::OpenAi,
        Some("   ".to_string()),
        None,
        Duration::from_secs(30),
    );

    assert!(matches!(
        result,
        Err(TextGeneratorFactoryError::MissingApiKey(LlmProvider::OpenAi, "OPENAI_API_KEY"))
    ));
}
