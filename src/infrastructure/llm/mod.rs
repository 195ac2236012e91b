mod azure_openai_client;
mod mock_insight_generator;

pub use azure_openai_client::{
    AzureOpenAiDeployment, AzureOpenAiInsightClient, INSIGHT_SYSTEM_PROMPT, truncate_chars,
};
pub use mock_insight_generator::{MOCK_INSIGHT_MARKDOWN, MockInsightGenerator};
