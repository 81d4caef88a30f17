//! Keyword response matcher
//!
//! Maps free-text visitor input to a canned reply via an ordered keyword
//! scan. Pure and deterministic; the rule table is owned per instance so
//! sessions and tests never share mutable state.

/// Ordered keyword -> response table with a fallback reply.
///
/// Matching is case-insensitive substring containment over the trimmed
/// input. The first rule whose keyword appears in the input wins; insertion
/// order is the priority order.
#[derive(Debug, Clone)]
pub struct ResponseMatcher {
    rules: Vec<(String, String)>,
    default_response: String,
}

impl ResponseMatcher {
    pub fn new(
        rules: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
        default_response: impl Into<String>,
    ) -> Self {
        Self {
            rules: rules
                .into_iter()
                .map(|(keyword, response)| (keyword.into(), response.into()))
                .collect(),
            default_response: default_response.into(),
        }
    }

    /// The built-in portfolio table.
    ///
    /// The availability keys precede the greeting keys: "hire" contains
    /// "hi", so a hiring question must not trip the greeting rule.
    pub fn portfolio_rules() -> Self {
        Self::new(
            [
                (
                    "availability",
                    "James is currently available for new opportunities! He's open to discussing projects and job opportunities.",
                ),
                (
                    "available",
                    "Yes, James is available for new projects and job opportunities. Feel free to reach out through the contact form!",
                ),
                (
                    "hello",
                    "Hi there! I'm James's assistant. How can I help you today?",
                ),
                (
                    "hi",
                    "Hello! I'm here to answer any questions about James Castillo. What would you like to know?",
                ),
                (
                    "location",
                    "James is based in San Francisco, CA and is open to both local and remote opportunities.",
                ),
                (
                    "where",
                    "James is located in San Francisco, CA. He's available for work worldwide through remote collaboration.",
                ),
                (
                    "time",
                    "James is available during Pacific Time business hours (9 AM - 6 PM PST) but can accommodate different time zones for international clients.",
                ),
                (
                    "hours",
                    "James typically works during Pacific Time business hours but is flexible with scheduling for client needs.",
                ),
                (
                    "skills",
                    "James specializes in full-stack development with expertise in React, Node.js, TypeScript, and modern web technologies.",
                ),
                (
                    "experience",
                    "James has 5+ years of experience in full-stack development, creating modern web applications and user-centered designs.",
                ),
                (
                    "projects",
                    "You can view James's latest projects in the Projects section. He's worked on e-commerce platforms, task management apps, and analytics dashboards.",
                ),
                (
                    "contact",
                    "You can reach James through the contact form on this website, or connect with him on LinkedIn, Facebook, or Instagram.",
                ),
                (
                    "email",
                    "You can email James at james.castillo@email.com or use the contact form on this website.",
                ),
                (
                    "phone",
                    "James can be reached at +1 (555) 123-4567 for urgent inquiries.",
                ),
                (
                    "resume",
                    "You can download James's resume from the About section of this website.",
                ),
                (
                    "technologies",
                    "James works with React, Vue.js, Angular, Node.js, Python, PostgreSQL, MongoDB, AWS, Docker, and many other modern technologies.",
                ),
            ],
            "I'm here to help! You can ask me about James's location, availability, skills, experience, or how to contact him. What would you like to know?",
        )
    }

    /// Look up the reply for a visitor message.
    ///
    /// Returns the response of the first matching rule, or the default
    /// response when no keyword is a substring of the normalized input.
    pub fn respond(&self, input: &str) -> &str {
        let normalized = input.trim().to_lowercase();
        self.rules
            .iter()
            .find(|(keyword, _)| normalized.contains(keyword.as_str()))
            .map_or(self.default_response.as_str(), |(_, response)| response)
    }

    pub fn default_response(&self) -> &str {
        &self.default_response
    }
}
