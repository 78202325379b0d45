//! Static reference tables shared by the scorer, the gap extractor and the editor.
//!
//! Every table is matched case-insensitively against lower-cased text, so the
//! canonical spelling here is only what gets shown back to the user.

/// Canonical skill/technology names, in evaluation order.
///
/// Matching is plain substring containment, so very short or very common
/// spellings (`Go`, `AI`, `REST`, `API`) are deliberately spelled out to keep
/// them from firing inside ordinary words.
pub const SKILL_CATALOG: &[&str] = &[
    "Python",
    "JavaScript",
    "Java",
    "C++",
    "C#",
    "Golang",
    "Rust",
    "Swift",
    "Kotlin",
    "React",
    "Angular",
    "Vue",
    "Node.js",
    "Express",
    "Django",
    "Flask",
    "Spring",
    "AWS",
    "Azure",
    "GCP",
    "Docker",
    "Kubernetes",
    "Jenkins",
    "GitLab",
    "GitHub",
    "MongoDB",
    "PostgreSQL",
    "MySQL",
    "Redis",
    "Elasticsearch",
    "GraphQL",
    "TypeScript",
    "HTML",
    "CSS",
    "SASS",
    "Webpack",
    "Babel",
    "Jest",
    "Cypress",
    "Machine Learning",
    "Artificial Intelligence",
    "TensorFlow",
    "PyTorch",
    "Pandas",
    "NumPy",
    "Scikit-learn",
    "Agile",
    "Scrum",
    "DevOps",
    "CI/CD",
    "Microservices",
    "RESTful",
];

/// Non-technology domain words surfaced as gap keywords when the job asks
/// for them and the resume never mentions them.
pub const SECONDARY_TERMS: &[&str] = &[
    "leadership",
    "communication",
    "collaboration",
    "problem solving",
    "stakeholder",
    "mentoring",
    "analytics",
    "architecture",
    "scalability",
    "testing",
    "debugging",
    "optimization",
    "deployment",
    "security",
    "documentation",
    "cloud",
    "database",
    "distributed systems",
    "performance",
    "automation",
];

/// Words never worth proposing as keywords on their own.
pub const STOP_WORDS: &[&str] = &[
    "the", "and", "or", "for", "with", "to", "of", "in", "on", "at", "by", "an", "a", "is",
    "are", "be", "as", "we", "you", "our", "your", "will", "this", "that", "from", "have",
    "has", "who", "what", "all", "any", "can", "must", "should", "able", "about", "into",
    "their", "they", "them", "also", "more", "work", "working", "team", "role", "join",
    "looking", "ideal", "candidate", "including", "strong", "plus", "using", "within",
    "across", "other", "well", "such", "experience", "skills", "required", "preferred",
    "development", "design", "framework", "platform", "years", "knowledge", "ability",
    "responsibilities", "requirements", "qualifications", "company", "position", "opportunity",
];

// ── Scoring signals ────────────────────────────────────────────────────────

pub const SENIOR_JOB_SIGNALS: &[&str] = &["senior", "lead"];
pub const SENIOR_RESUME_SIGNALS: &[&str] = &["senior", "lead", "5+", "years"];

pub const ENTRY_JOB_SIGNALS: &[&str] = &["entry level", "entry-level", "junior", "intern", "graduate"];
pub const ENTRY_RESUME_SIGNALS: &[&str] = &["intern", "student", "graduate", "junior", "entry"];

pub const DEGREE_JOB_SIGNALS: &[&str] = &["degree", "bachelor", "master", "phd", "education"];
pub const DEGREE_RESUME_SIGNALS: &[&str] = &["bachelor", "master", "phd", "degree", "b.s.", "m.s.", "diploma"];

pub const EXPERIENCE_TERMS: &[&str] = &[
    "experience",
    "years",
    "developed",
    "built",
    "created",
    "managed",
    "led",
];

pub const PROJECT_SIGNALS: &[&str] = &["project", "portfolio", "github", "gitlab"];

// ── Recommendation triggers ────────────────────────────────────────────────

pub const EXPERIENCE_TRIGGERS: &[&str] = &["experience", "years"];
pub const EDUCATION_TRIGGERS: &[&str] = &["degree", "education", "bachelor", "master"];
pub const LEADERSHIP_TRIGGERS: &[&str] = &["leadership", "manage", "team"];
pub const PROJECT_TRIGGERS: &[&str] = &["project", "portfolio"];
