use crate::application::ports::{InsightGenerator, InsightGeneratorError};
use crate::domain::Insight;

pub const MOCK_INSIGHT_MARKDOWN: &str = "\
**Executive Summary**

This is a mock analysis for local testing.

**Key Points**
- Document uploaded successfully
- Local development environment working
- Ready for Azure integration

**Document Type**

Sample document for testing the application flow

**Notes**

Currently running in local mock mode without Azure services

**Next Steps**
1. Complete Terraform setup (Step 3)
2. Deploy Azure resources
3. Connect application to Azure (Step 4)
";

pub struct MockInsightGenerator;

#[async_trait::async_trait]
impl InsightGenerator for MockInsightGenerator {
    async fn generate(&self, _text: &str) -> Result<Insight, InsightGeneratorError> {
        Ok(Insight::new(MOCK_INSIGHT_MARKDOWN))
    }
}
