mod anthropic_client;
mod http_failure;
mod mock_text_generator;
mod openai_client;
mod text_generator_factory;

pub use anthropic_client::{
    ANTHROPIC_BASE_URL, ANTHROPIC_DEFAULT_RESPONSE_TOKENS, ANTHROPIC_VERSION, AnthropicClient,
};
pub use mock_text_generator::MockTextGenerator;
pub use openai_client::{OPENAI_BASE_URL, OPENAI_DEFAULT_RESPONSE_TOKENS, OpenAiClient};
pub use text_generator_factory::{TextGeneratorFactory, TextGeneratorFactoryError};
