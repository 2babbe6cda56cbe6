use crate::error::{Result, RetrievalError};
use log::debug;
use serde::{Deserialize, Serialize};

/// Built-in rule table. Order matters: the first rule whose keyword occurs in
/// the query wins.
const DEFAULT_SHORTCUTS: &[(&[&str], &str)] = &[
    (
        &["courses", "available", "offerings", "training"],
        "We offer courses in Microsoft Azure, Chip Design, 5G, Cybersecurity, Data Science, Generative AI, Full Stack Development, Quantum Computing, and HPC.",
    ),
    (
        &["founder", "ceo", "head"],
        "The founder and CEO of Object Automation is Ganesan Narayanasamy.",
    ),
    (
        &["location", "address", "where located"],
        "We are located in California, USA (9500 Gilman Drive, La Jolla) and in India. Contact us at +1 914 204 2581 or +91 7397784815.",
    ),
    (
        &["contact", "reach", "email", "phone number"],
        "You can contact us via our contact page: https://object-automation.com/html/home/contact.html",
    ),
    (
        &["azure", "microsoft cloud"],
        "The Microsoft Azure course includes cloud fundamentals, virtual networks, DevOps pipelines, and more.",
    ),
    (
        &["chip design", "vlsi", "semiconductor"],
        "Our Chip Design course covers VLSI principles, ASIC flow, and semiconductor logic fundamentals.",
    ),
    (
        &["generative ai", "genai", "ai course"],
        "The Generative AI course teaches LLMs, prompt engineering, transformers, and project-based learning.",
    ),
    (
        &["quantum computing", "quantum", "qubit"],
        "The Quantum Computing course includes Qiskit programming, quantum logic gates, and entanglement simulations.",
    ),
    (
        &["full stack", "web development", "mern"],
        "Our Full Stack Development course covers React, Node.js, MongoDB, and REST APIs.",
    ),
    (
        &["data science", "machine learning", "ml"],
        "The Data Science course includes Python, Pandas, ML models, data visualization, and real-world projects.",
    ),
    (
        &["hpc", "high performance computing", "gpu"],
        "The HPC course includes parallel computing, GPU acceleration using CUDA, and cluster architecture.",
    ),
    (
        &["5g", "fifth generation"],
        "We explore 5G innovations across industries like smart factories, automotive, and healthcare.",
    ),
    (
        &["ai project", "health bot"],
        "Our Health Bot is an AI-powered healthcare assistant for quick triage and symptom check.",
    ),
    (
        &["events", "webinars", "seminars"],
        "We conduct regular online webinars and in-person events. Check our events page for updates.",
    ),
    (
        &["internship", "job", "career"],
        "To apply for internships or job opportunities, contact us through our website or submit your resume.",
    ),
    (
        &["certification", "certificate", "proof"],
        "Yes, we provide industry-recognized certificates after course completion.",
    ),
    (
        &["fee", "payment", "emi"],
        "We accept payments via UPI, cards, and offer EMI options on request.",
    ),
    (
        &["recording", "missed class"],
        "If you miss a class, recordings will be provided or you may join the next batch.",
    ),
    (
        &["eligibility", "who can apply"],
        "Our courses are open to students, professionals, and graduates from any background with an interest in tech.",
    ),
    (
        &["beginner", "no experience", "basic knowledge"],
        "Yes, beginners are welcome! We provide foundational training for students with no prior experience.",
    ),
    (
        &["duration", "how long", "course length"],
        "Each course typically lasts between 4 to 12 weeks depending on the topic.",
    ),
    (
        &["live class", "zoom", "instructor led"],
        "Yes, we conduct live instructor-led classes through platforms like Zoom.",
    ),
    (
        &["project", "hands-on", "practical"],
        "All our courses include hands-on projects to apply your knowledge in real-world scenarios.",
    ),
    (
        &["doubt", "mentor", "support"],
        "You’ll get access to doubt-clearing sessions and personal mentorship throughout your course.",
    ),
    (
        &["community", "peer", "group"],
        "We offer community learning spaces where you can collaborate with peers and join project groups.",
    ),
    (
        &["resume", "linkedin", "portfolio"],
        "We help you build your tech portfolio and improve your resume/LinkedIn with certifications and projects.",
    ),
    (
        &["exam", "test", "assessment"],
        "Courses include assessments or mini-projects to evaluate your understanding and provide feedback.",
    ),
    (
        &["class timing", "schedule", "batch"],
        "We have flexible batch timings, including evening and weekend options.",
    ),
    (
        &["language", "medium", "english"],
        "All our courses are conducted in English for global accessibility.",
    ),
    (
        &["certificate validity", "recognition"],
        "Our certificates are recognized by hiring managers and industry professionals globally.",
    ),
    (
        &["rejoin", "re-enroll", "repeat class"],
        "You can rejoin missed sessions or future batches with prior notice.",
    ),
];

/// A trigger-keyword → canned-answer rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutRule {
    /// Trigger substrings, matched case-insensitively
    pub keywords: Vec<String>,

    /// Answer returned verbatim when any keyword matches
    pub response: String,
}

impl ShortcutRule {
    pub fn new<K, S>(keywords: K, response: impl Into<String>) -> Self
    where
        K: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            response: response.into(),
        }
    }

    fn matches(&self, lowered_query: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| lowered_query.contains(keyword.as_str()))
    }
}

/// The built-in rule table, in declaration order
pub fn default_rules() -> Vec<ShortcutRule> {
    DEFAULT_SHORTCUTS
        .iter()
        .map(|(keywords, response)| ShortcutRule::new(keywords.iter().copied(), *response))
        .collect()
}

/// First-match-wins keyword matcher over an ordered rule table
#[derive(Debug, Clone)]
pub struct ShortcutMatcher {
    rules: Vec<ShortcutRule>,
}

impl ShortcutMatcher {
    /// Build a matcher; keywords are lower-cased and empty keywords rejected
    pub fn new(rules: Vec<ShortcutRule>) -> Result<Self> {
        let mut normalized = Vec::with_capacity(rules.len());

        for (idx, rule) in rules.into_iter().enumerate() {
            if rule.keywords.is_empty() {
                return Err(RetrievalError::InvalidShortcut(format!(
                    "rule {idx} has no keywords"
                )));
            }
            if rule.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(RetrievalError::InvalidShortcut(format!(
                    "rule {idx} has an empty keyword"
                )));
            }

            normalized.push(ShortcutRule {
                keywords: rule.keywords.iter().map(|k| k.to_lowercase()).collect(),
                response: rule.response,
            });
        }

        Ok(Self { rules: normalized })
    }

    /// Canned response of the first rule with a keyword contained in `query`
    pub fn find_response(&self, query: &str) -> Option<&str> {
        let lowered = query.to_lowercase();
        let hit = self
            .rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.matches(&lowered));

        match hit {
            Some((idx, rule)) => {
                debug!("Shortcut rule {idx} matched");
                Some(rule.response.as_str())
            }
            None => None,
        }
    }

    pub fn rules(&self) -> &[ShortcutRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for ShortcutMatcher {
    fn default() -> Self {
        // built-in keywords are already lowercase
        Self {
            rules: default_rules(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FOUNDER: &str = "The founder and CEO of Object Automation is Ganesan Narayanasamy.";

    #[test]
    fn test_default_table_size() {
        let matcher = ShortcutMatcher::default();
        assert_eq!(matcher.len(), 31);
        assert_eq!(matcher.rules()[1].response, FOUNDER);
    }

    #[test]
    fn test_founder_query() {
        let matcher = ShortcutMatcher::default();
        assert_eq!(matcher.find_response("who is the founder"), Some(FOUNDER));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let matcher = ShortcutMatcher::default();
        assert_eq!(matcher.find_response("Who is your CEO?"), Some(FOUNDER));
        assert_eq!(
            matcher.find_response("Tell me about QUBIT hardware"),
            Some(
                "The Quantum Computing course includes Qiskit programming, quantum logic gates, and entanglement simulations."
            )
        );
    }

    #[test]
    fn test_match_is_substring_not_token() {
        let matcher = ShortcutMatcher::default();
        // "ml" inside "html" triggers the data science rule
        assert_eq!(
            matcher.find_response("do you teach html?"),
            Some(
                "The Data Science course includes Python, Pandas, ML models, data visualization, and real-world projects."
            )
        );
    }

    #[test]
    fn test_earlier_rule_wins() {
        let matcher = ShortcutMatcher::default();
        // "azure" (rule 5) and "courses" (rule 1) both match
        assert_eq!(
            matcher.find_response("azure courses"),
            Some(
                "We offer courses in Microsoft Azure, Chip Design, 5G, Cybersecurity, Data Science, Generative AI, Full Stack Development, Quantum Computing, and HPC."
            )
        );
    }

    #[test]
    fn test_no_match() {
        let matcher = ShortcutMatcher::default();
        assert_eq!(matcher.find_response("what is your refund policy"), None);
    }

    #[test]
    fn test_custom_rules_are_lowercased() {
        let matcher = ShortcutMatcher::new(vec![
            ShortcutRule::new(["Refund"], "Refunds within 7 days."),
            ShortcutRule::new(["refund", "policy"], "Never reached for refund."),
        ])
        .unwrap();

        assert_eq!(matcher.rules()[0].keywords, vec!["refund".to_string()]);
        assert_eq!(
            matcher.find_response("REFUND policy?"),
            Some("Refunds within 7 days.")
        );
        assert_eq!(
            matcher.find_response("privacy policy"),
            Some("Never reached for refund.")
        );
    }

    #[test]
    fn test_empty_keyword_rejected() {
        assert!(ShortcutMatcher::new(vec![ShortcutRule::new([" "], "x")]).is_err());
        assert!(ShortcutMatcher::new(vec![ShortcutRule::new(Vec::<String>::new(), "x")]).is_err());
    }

    #[test]
    fn test_every_keyword_triggers_its_rule_or_an_earlier_one() {
        let matcher = ShortcutMatcher::default();
        for (idx, rule) in matcher.rules().iter().enumerate() {
            for keyword in &rule.keywords {
                let query = format!("Question about {} please", keyword.to_uppercase());
                let response = matcher.find_response(&query).unwrap();
                let winner = matcher
                    .rules()
                    .iter()
                    .position(|r| r.response == response)
                    .unwrap();
                assert!(winner <= idx, "keyword {keyword:?} resolved to a later rule");
            }
        }
    }
}
