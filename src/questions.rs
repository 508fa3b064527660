//! Static question bank
//!
//! Ordered question lists keyed by domain, plus the resolution rules the
//! orchestrator uses at session setup: exact match, then case-insensitive
//! match, then case-insensitive substring match, then the default domain.

/// Domain used when a requested domain cannot be resolved
pub const DEFAULT_DOMAIN: &str = "Software Development";

/// The full bank, in display order.
pub const QUESTION_BANK: &[(&str, &[&str])] = &[
    (
        "Software Development",
        &[
            "Explain the difference between concurrency and parallelism.",
            "Describe how you would design a rate limiter.",
            "What are the trade-offs of microservices vs monoliths?",
            "How does HTTP/2 differ from HTTP/1.1?",
            "What is eventual consistency and when to use it?",
        ],
    ),
    (
        "Data Science",
        &[
            "How do you handle class imbalance?",
            "Explain bias-variance tradeoff.",
            "Walk through a typical ML pipeline.",
            "How to select evaluation metrics for regression tasks?",
            "Feature selection techniques and when to use them?",
        ],
    ),
    (
        "Machine Learning",
        &[
            "When would you use CNNs vs RNNs?",
            "Explain regularization techniques.",
            "How do you prevent overfitting?",
            "What is gradient vanishing/exploding?",
            "Compare batch vs stochastic gradient descent.",
        ],
    ),
    (
        "DevOps",
        &[
            "Explain CI/CD and its benefits.",
            "What is infrastructure as code?",
            "How do you design a blue/green deployment?",
        ],
    ),
    (
        "Cloud",
        &[
            "Compare IaaS, PaaS, and SaaS.",
            "Design a multi-region architecture in the cloud.",
            "Cost optimization strategies in cloud workloads.",
        ],
    ),
    (
        "Cybersecurity",
        &[
            "Explain OWASP Top 10.",
            "What is zero-trust architecture?",
            "How do you prevent SQL injection and XSS?",
        ],
    ),
    (
        "HR",
        &[
            "Describe effective behavioral interviewing.",
            "How do you handle conflict mediation?",
            "What metrics matter in talent acquisition?",
        ],
    ),
    (
        "Sales",
        &[
            "Walk me through your sales funnel.",
            "How do you qualify leads?",
            "Objection handling strategies.",
        ],
    ),
    (
        "Finance",
        &[
            "Explain NPV vs IRR.",
            "How do you evaluate credit risk?",
            "What is duration and convexity?",
        ],
    ),
    (
        "Marketing",
        &[
            "Describe A/B testing for campaigns.",
            "How do you build a brand strategy?",
            "Key metrics for digital marketing.",
        ],
    ),
    (
        "Civil Engineering",
        &[
            "Explain load-bearing vs framed structures.",
            "Soil testing methods and importance.",
            "Bridge design considerations.",
        ],
    ),
    (
        "Mechanical",
        &[
            "Thermodynamics laws in practice.",
            "Explain different heat exchangers.",
            "Preventive vs predictive maintenance.",
        ],
    ),
    (
        "Electrical",
        &[
            "AC vs DC and use cases.",
            "Protective relays and coordination.",
            "Power factor correction methods.",
        ],
    ),
    (
        "Product",
        &[
            "Define and measure product-market fit.",
            "Roadmap prioritization frameworks.",
            "Writing effective PRDs.",
        ],
    ),
    (
        "Design",
        &[
            "Explain visual hierarchy principles.",
            "UX research methods and trade-offs.",
            "Design systems: benefits and challenges.",
        ],
    ),
    (
        "Support",
        &[
            "Handling critical incidents.",
            "Building a knowledge base.",
            "CSAT vs NPS: differences and use.",
        ],
    ),
    (
        "Operations",
        &[
            "Lean vs Six Sigma.",
            "Capacity planning approach.",
            "Supply chain risk mitigation.",
        ],
    ),
    (
        "Healthcare",
        &[
            "HIPAA implications in practice.",
            "Care pathway optimization.",
            "Outcome tracking and reporting.",
        ],
    ),
    (
        "Biotech",
        &[
            "Explain CRISPR basics.",
            "Clinical trial phases and goals.",
            "Bioprocess scale-up challenges.",
        ],
    ),
    (
        "Energy",
        &[
            "Grid stability and renewables integration.",
            "Battery storage technologies.",
            "Demand response mechanisms.",
        ],
    ),
    (
        "Product Management",
        &[
            "How do you validate problem-solution fit?",
            "Prioritization: RICE vs MoSCoW—when to use which?",
            "Define product success metrics for a new feature.",
            "How to run effective user research and synthesize insights?",
            "Go-to-market plan for a 0→1 product.",
        ],
    ),
    (
        "System Design",
        &[
            "Design a URL shortener end-to-end.",
            "Design a news feed with ranking.",
            "Scale a chat service to millions of users.",
            "Design a rate limiter for an API gateway.",
            "Design a real-time analytics system.",
        ],
    ),
    (
        "DevOps & Cloud",
        &[
            "Design a GitOps workflow for multi-env deployments.",
            "Blue/green vs canary—trade-offs and tooling.",
            "Implement observability: logs, metrics, traces.",
            "Kubernetes multi-tenant cluster hardening.",
            "Disaster recovery strategy with RPO/RTO targets.",
        ],
    ),
    (
        "Digital Marketing",
        &[
            "Full-funnel strategy for a SaaS product.",
            "Set up and interpret an A/B test for a landing page.",
            "Attribution models: pros and cons.",
            "Content strategy for organic growth.",
            "Building a marketing analytics dashboard.",
        ],
    ),
    (
        "Finance & Banking",
        &[
            "Credit risk modeling approaches.",
            "ALM: duration gap and interest-rate risk.",
            "Design a fraud detection pipeline.",
            "Capital budgeting: NPV vs IRR caveats.",
            "Basel III implications on lending.",
        ],
    ),
    (
        "Healthcare Tech",
        &[
            "Design a HIPAA-compliant telehealth system.",
            "FHIR vs HL7—interoperability considerations.",
            "Patient outcomes measurement and analytics.",
            "EHR integration challenges and solutions.",
            "Remote patient monitoring architecture.",
        ],
    ),
    (
        "Sales & BD",
        &[
            "Lead qualification frameworks (BANT/MEDDIC).",
            "Build a repeatable outbound motion.",
            "Pricing and packaging strategy for enterprise.",
            "Design a win-loss analysis process.",
            "Forecasting accuracy—methods and pitfalls.",
        ],
    ),
    (
        "Operations Management",
        &[
            "Capacity planning for seasonal demand.",
            "Design an SLA/SLO framework.",
            "Lean improvements in a warehouse process.",
            "Supplier risk assessment methodology.",
            "Queueing theory applications in ops.",
        ],
    ),
    (
        "Consulting",
        &[
            "Structure a profitability case.",
            "Market sizing: top-down vs bottom-up.",
            "MECE and issue trees—apply to a retail case.",
            "Build a recommendation with risks and next steps.",
            "Stakeholder alignment in ambiguous projects.",
        ],
    ),
    (
        "Startup & Entrepreneurship",
        &[
            "Find and validate a beachhead market.",
            "Design an MVP and success metrics.",
            "Fundraising narrative and key milestones.",
            "Build a growth loop for a new product.",
            "Hiring plan for the first 10 employees.",
        ],
    ),
];

/// All domain names in display order.
pub fn domains() -> impl Iterator<Item = &'static str> {
    QUESTION_BANK.iter().map(|(name, _)| *name)
}

/// Resolve a requested domain to a known bank entry.
///
/// Exact match wins, then case-insensitive match, then case-insensitive
/// substring match; anything else falls back to [`DEFAULT_DOMAIN`]. Always
/// resolvable, never an error.
pub fn resolve_domain(requested: &str) -> &'static str {
    let lowered = requested.to_lowercase();
    QUESTION_BANK
        .iter()
        .find(|(name, _)| *name == requested)
        .or_else(|| {
            QUESTION_BANK
                .iter()
                .find(|(name, _)| name.to_lowercase() == lowered)
        })
        .or_else(|| {
            QUESTION_BANK
                .iter()
                .find(|(name, _)| name.to_lowercase().contains(&lowered))
        })
        .map(|(name, _)| *name)
        .unwrap_or(DEFAULT_DOMAIN)
}

/// Ordered question list for a resolved domain.
pub fn question_list(domain: &str) -> &'static [&'static str] {
    QUESTION_BANK
        .iter()
        .find(|(name, _)| *name == domain)
        .or_else(|| QUESTION_BANK.iter().find(|(name, _)| *name == DEFAULT_DOMAIN))
        .map(|(_, list)| *list)
        .expect("default domain is always present")
}

/// Take the first `count` questions of a domain, with `count` clamped to
/// `1..=list.len()`.
pub fn select_questions(domain: &str, count: usize) -> Vec<String> {
    let list = question_list(resolve_domain(domain));
    let take = count.clamp(1, list.len());
    list[..take].iter().map(|q| q.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_resolution() {
        assert_eq!(resolve_domain("System Design"), "System Design");
    }

    #[test]
    fn test_case_insensitive_resolution() {
        assert_eq!(resolve_domain("system design"), "System Design");
        assert_eq!(resolve_domain("DEVOPS"), "DevOps");
    }

    #[test]
    fn test_substring_resolution() {
        assert_eq!(resolve_domain("consult"), "Consulting");
    }

    #[test]
    fn test_unknown_domain_falls_back_to_default() {
        assert_eq!(resolve_domain("Underwater Basket Weaving"), DEFAULT_DOMAIN);
        let questions = select_questions("Underwater Basket Weaving", 3);
        assert_eq!(questions.len(), 3);
        assert_eq!(
            questions[0],
            "Explain the difference between concurrency and parallelism."
        );
    }

    #[test]
    fn test_count_clamped_to_list_length() {
        // DevOps only has 3 questions.
        assert_eq!(select_questions("DevOps", 10).len(), 3);
        assert_eq!(select_questions("DevOps", 0).len(), 1);
        assert_eq!(select_questions("Software Development", 3).len(), 3);
    }

    #[test]
    fn test_every_domain_has_questions() {
        for (name, list) in QUESTION_BANK {
            assert!(!list.is_empty(), "domain {} has no questions", name);
        }
        assert!(domains().any(|d| d == DEFAULT_DOMAIN));
    }
}
