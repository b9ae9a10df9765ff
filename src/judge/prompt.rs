//! Prompt construction for judge requests.
//!
//! Builds the judgment prompt deterministically from the challenge and the
//! candidate query, with the query fenced so it cannot be confused with the
//! surrounding prose.

use crate::validator::Challenge;

/// Judgment prompt template.
const PROMPT_TEMPLATE: &str = r#"Challenge: {title}
Description: {description}

Student's SQL Query:
```sql
{query}
```

Is this query correct for the challenge? Provide feedback."#;

/// Builds the judgment prompt for a challenge and candidate query.
pub fn build_prompt(challenge: &Challenge, query: &str) -> String {
    PROMPT_TEMPLATE
        .replace("{title}", &challenge.title)
        .replace("{description}", &challenge.description)
        .replace("{query}", query)
}
