//! LLM prompt engineering for backstory decomposition

/// Builds the decomposition prompt for one backstory
pub struct PromptBuilder {
    backstory: String,
    character: String,
    max_claims: usize,
}

impl PromptBuilder {
    /// Create a new prompt builder
    pub fn new(backstory: impl Into<String>, character: impl Into<String>) -> Self {
        Self {
            backstory: backstory.into(),
            character: character.into(),
            max_claims: 5,
        }
    }

    /// Upper end of the requested claim count
    pub fn with_max_claims(mut self, max_claims: usize) -> Self {
        self.max_claims = max_claims;
        self
    }

    /// Build the complete decomposition prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        // 1. Subject
        prompt.push_str(&format!(
            "Analyze this backstory for character \"{}\":\n",
            self.character
        ));
        prompt.push_str(&format!("\"{}\"\n\n", self.backstory));

        // 2. What to extract
        let min_claims = self.max_claims.min(3);
        prompt.push_str(&format!(
            "Extract {}-{} atomic, verifiable claims (Temporal, Relationship, Location, Trait).\n",
            min_claims, self.max_claims
        ));
        prompt.push_str(QUERY_INSTRUCTIONS);
        prompt.push_str("\n\n");

        // 3. Output contract
        prompt.push_str(OUTPUT_FORMAT);

        prompt
    }
}

const QUERY_INSTRUCTIONS: &str = r#"For EACH claim, provide 3 search queries:
1. Keyword search
2. Descriptive search
3. Anti-evidence search (checking for contradiction)"#;

const OUTPUT_FORMAT: &str = r#"Output JSON format:
{
    "claims": [
        {
            "text": "Claim description",
            "type": "CATEGORY",
            "queries": ["query1", "query2", "query3"]
        }
    ]
}"#;
