use crate::config::ClassifierConfig;
use regex::Regex;
use std::fmt;

/// Change category assigned to a commit, doubling as the bump severity.
///
/// Variants are declared in ascending severity order so that `Ord` gives
/// `Chore < Fix < Feature < Breaking` and the aggregate bump type is the
/// maximum over all classified commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Chore,
    Fix,
    Feature,
    Breaking,
}

impl Category {
    /// Fixed rendering order for changelog sections, highest severity first.
    pub const SEVERITY_DESC: [Category; 4] = [
        Category::Breaking,
        Category::Feature,
        Category::Fix,
        Category::Chore,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Breaking => "breaking",
            Category::Feature => "feature",
            Category::Fix => "fix",
            Category::Chore => "chore",
        };
        f.write_str(label)
    }
}

/// Conventional-commit marker extracted from a message subject.
///
/// Recognized subject shapes:
/// - `type(scope)!: description`
/// - `type(scope): description`
/// - `type!: description`
/// - `type: description`
///
/// Anything else yields no type and no breaking marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionalSubject {
    pub commit_type: Option<String>,
    pub bang: bool,
}

impl ConventionalSubject {
    /// Parse the first line of a commit message
    pub fn parse(message: &str) -> Self {
        let subject = message.lines().next().unwrap_or("");

        if let Some(captures) = Regex::new(r"^([a-z]+)(\([^)]+\))?(!?):\s*")
            .ok()
            .and_then(|re| re.captures(subject))
        {
            return ConventionalSubject {
                commit_type: captures.get(1).map(|m| m.as_str().to_string()),
                bang: captures.get(3).map(|m| m.as_str()) == Some("!"),
            };
        }

        ConventionalSubject {
            commit_type: None,
            bang: false,
        }
    }
}

enum Matcher {
    /// `!` after the type, or a breaking indicator anywhere in the message
    BreakingMarker { indicators: Vec<String> },
    /// Conventional type is one of the listed types
    SubjectType { types: Vec<String> },
}

impl Matcher {
    fn matches(&self, message: &str, subject: &ConventionalSubject) -> bool {
        match self {
            Matcher::BreakingMarker { indicators } => {
                subject.bang || indicators.iter().any(|marker| message.contains(marker.as_str()))
            }
            Matcher::SubjectType { types } => subject
                .commit_type
                .as_deref()
                .map(|t| types.iter().any(|candidate| candidate == t))
                .unwrap_or(false),
        }
    }
}

struct Rule {
    category: Category,
    matcher: Matcher,
}

/// Ordered classification rules, evaluated first-match-wins.
///
/// The rule vocabulary comes from [ClassifierConfig]; the priority order is
/// fixed: breaking markers outrank feature types, which outrank fix types.
/// A message matching no rule falls back to [Category::Chore], so
/// classification is total over all possible messages.
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Build the rule table from configuration
    pub fn from_config(config: &ClassifierConfig) -> Self {
        RuleTable {
            rules: vec![
                Rule {
                    category: Category::Breaking,
                    matcher: Matcher::BreakingMarker {
                        indicators: config.breaking_indicators.clone(),
                    },
                },
                Rule {
                    category: Category::Feature,
                    matcher: Matcher::SubjectType {
                        types: config.feature_types.clone(),
                    },
                },
                Rule {
                    category: Category::Fix,
                    matcher: Matcher::SubjectType {
                        types: config.fix_types.clone(),
                    },
                },
            ],
        }
    }

    /// Classify a commit message into exactly one category
    pub fn classify(&self, message: &str) -> Category {
        let subject = ConventionalSubject::parse(message);

        self.rules
            .iter()
            .find(|rule| rule.matcher.matches(message, &subject))
            .map(|rule| rule.category)
            .unwrap_or(Category::Chore)
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        RuleTable::from_config(&ClassifierConfig::default())
    }
}
