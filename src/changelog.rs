use crate::classify::{Category, RuleTable};
use crate::config::TemplateConfig;
use crate::history::CommitHistory;

/// One rendered changelog section: a category and its commit subjects
#[derive(Debug, Clone, PartialEq)]
pub struct ChangelogSection {
    pub category: Category,
    pub lines: Vec<String>,
}

/// Severity-ordered changelog sections; empty categories are absent
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangelogDocument {
    pub sections: Vec<ChangelogSection>,
}

/// Assign a category to every record in the history.
///
/// Pure per-record: the same message always yields the same category, and
/// file lists are never consulted.
pub fn classify_history(history: &mut CommitHistory, rules: &RuleTable) {
    for record in history.iter_mut() {
        record.category = Some(rules.classify(&record.message));
    }
}

/// Group a classified history into a changelog document and derive the
/// aggregate bump type.
///
/// Sections follow the fixed severity-descending order; within a section,
/// commits keep the history's insertion order. The bump type is the maximum
/// severity present, or [Category::Chore] for an empty history.
pub fn build_changelog(history: &CommitHistory) -> (ChangelogDocument, Category) {
    let mut document = ChangelogDocument::default();

    for category in Category::SEVERITY_DESC {
        let lines: Vec<String> = history
            .iter()
            .filter(|record| record.category.unwrap_or(Category::Chore) == category)
            .map(|record| record.subject().to_string())
            .collect();

        if !lines.is_empty() {
            document.sections.push(ChangelogSection { category, lines });
        }
    }

    let bump_type = history
        .iter()
        .filter_map(|record| record.category)
        .max()
        .unwrap_or(Category::Chore);

    (document, bump_type)
}

/// Render the document as Markdown, one bullet per commit subject
pub fn render(document: &ChangelogDocument, template: &TemplateConfig) -> String {
    let mut output = String::new();

    output.push_str(&template.title);
    output.push('\n');

    for section in &document.sections {
        output.push('\n');
        output.push_str(&format!("### {}\n\n", template.heading(section.category)));
        for line in &section.lines {
            output.push_str(&format!("- {}\n", line));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn classified_history(messages: &[&str]) -> CommitHistory {
        let mut history = CommitHistory::new();
        for (i, message) in messages.iter().enumerate() {
            history.insert(format!("{:040x}", i + 1), *message);
        }
        classify_history(&mut history, &RuleTable::default());
        history
    }

    #[test]
    fn test_sections_in_severity_order() {
        let history = classified_history(&[
            "fix: null pointer",
            "BREAKING CHANGE: remove v1 api",
            "feat: add login flow",
        ]);
        let (document, bump_type) = build_changelog(&history);

        let categories: Vec<Category> =
            document.sections.iter().map(|s| s.category).collect();
        assert_eq!(
            categories,
            vec![Category::Breaking, Category::Feature, Category::Fix]
        );
        assert_eq!(bump_type, Category::Breaking);
    }

    #[test]
    fn test_empty_categories_are_omitted() {
        let history = classified_history(&["fix: one", "fix: two"]);
        let (document, bump_type) = build_changelog(&history);

        assert_eq!(document.sections.len(), 1);
        assert_eq!(document.sections[0].category, Category::Fix);
        assert_eq!(bump_type, Category::Fix);
    }

    #[test]
    fn test_no_commit_dropped_or_duplicated() {
        let messages = [
            "feat: a",
            "fix: b",
            "update readme",
            "feat!: c",
            "perf: d",
        ];
        let history = classified_history(&messages);
        let (document, _) = build_changelog(&history);

        let rendered: Vec<&str> = document
            .sections
            .iter()
            .flat_map(|s| s.lines.iter().map(String::as_str))
            .collect();
        assert_eq!(rendered.len(), messages.len());

        let unique: HashSet<&str> = rendered.iter().copied().collect();
        let expected: HashSet<&str> = messages.iter().copied().collect();
        assert_eq!(unique, expected);
    }

    #[test]
    fn test_intra_section_order_preserved() {
        let history = classified_history(&["fix: first", "feat: middle", "fix: second"]);
        let (document, _) = build_changelog(&history);

        let fixes = document
            .sections
            .iter()
            .find(|s| s.category == Category::Fix)
            .unwrap();
        assert_eq!(fixes.lines, vec!["fix: first", "fix: second"]);
    }

    #[test]
    fn test_empty_history_defaults_to_lowest_tier() {
        let history = CommitHistory::new();
        let (document, bump_type) = build_changelog(&history);

        assert!(document.sections.is_empty());
        assert_eq!(bump_type, Category::Chore);
    }

    #[test]
    fn test_all_chore_history_stays_lowest_tier() {
        let history = classified_history(&["update readme", "docs: tweak wording"]);
        let (_, bump_type) = build_changelog(&history);
        assert_eq!(bump_type, Category::Chore);
    }

    #[test]
    fn test_render_uses_subject_only() {
        let mut history = CommitHistory::new();
        history.insert(
            "a".repeat(40),
            "fix: something\n\nBody text that must not be rendered",
        );
        classify_history(&mut history, &RuleTable::default());
        let (document, _) = build_changelog(&history);
        let rendered = render(&document, &TemplateConfig::default());

        assert!(rendered.contains("- fix: something\n"));
        assert!(!rendered.contains("Body text"));
    }

    #[test]
    fn test_render_headings_and_order() {
        let history = classified_history(&["fix: null pointer", "BREAKING CHANGE: remove v1 api"]);
        let (document, _) = build_changelog(&history);
        let rendered = render(&document, &TemplateConfig::default());

        let breaking_pos = rendered.find("Breaking Changes").unwrap();
        let fix_pos = rendered.find("Bug Fixes").unwrap();
        assert!(breaking_pos < fix_pos);
        assert!(rendered.starts_with("## Changelog\n"));
        assert!(!rendered.contains("Features"));
    }

    #[test]
    fn test_render_empty_document() {
        let rendered = render(&ChangelogDocument::default(), &TemplateConfig::default());
        assert_eq!(rendered, "## Changelog\n");
    }
}
