//! Record categories and their form schemas
//!
//! A schema bundles everything a category's UI needs: the form fields with
//! their validation rules, and the table columns. Schemas are built as
//! plain values and handed to components; nothing here is a global.

use super::column::{ColumnDef, CELL_PLACEHOLDER};
use super::record::Record;
use super::validation::{
    email, hours, max_length, min_length, pattern, percentage, positive_number, required, year,
    Rule, RuleSet,
};
use regex::Regex;

/// Record category shown as a tab in the main UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Awards,
    Publications,
    Books,
    Conferences,
    Consultancy,
    Internships,
    Fellowships,
    Workload,
    JournalEditorials,
    TechnicalTalks,
}

impl Category {
    pub fn all() -> Vec<Category> {
        vec![
            Category::Awards,
            Category::Publications,
            Category::Books,
            Category::Conferences,
            Category::Consultancy,
            Category::Internships,
            Category::Fellowships,
            Category::Workload,
            Category::JournalEditorials,
            Category::TechnicalTalks,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Category::Awards => "Awards",
            Category::Publications => "Publications",
            Category::Books => "Books",
            Category::Conferences => "Conferences",
            Category::Consultancy => "Consultancy",
            Category::Internships => "Internships",
            Category::Fellowships => "Fellowships",
            Category::Workload => "Workload",
            Category::JournalEditorials => "Editorials",
            Category::TechnicalTalks => "Talks",
        }
    }

    /// Stable identifier used as the JSON key in the record store
    pub fn slug(&self) -> &'static str {
        match self {
            Category::Awards => "awards",
            Category::Publications => "publications",
            Category::Books => "books",
            Category::Conferences => "conferences",
            Category::Consultancy => "consultancy",
            Category::Internships => "internships",
            Category::Fellowships => "fellowships",
            Category::Workload => "workload",
            Category::JournalEditorials => "journal_editorials",
            Category::TechnicalTalks => "technical_talks",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Category> {
        Category::all().into_iter().find(|c| c.slug() == slug)
    }

    /// Label used in dialog titles ("Add Publication", "Delete Award?")
    pub fn singular(&self) -> &'static str {
        match self {
            Category::Awards => "Award",
            Category::Publications => "Publication",
            Category::Books => "Book",
            Category::Conferences => "Conference",
            Category::Consultancy => "Consultancy Project",
            Category::Internships => "Internship",
            Category::Fellowships => "Fellowship",
            Category::Workload => "Workload Entry",
            Category::JournalEditorials => "Journal Editorial",
            Category::TechnicalTalks => "Technical Talk",
        }
    }

    pub fn schema(&self) -> FormSchema {
        match self {
            Category::Awards => awards_schema(),
            Category::Publications => publications_schema(),
            Category::Books => books_schema(),
            Category::Conferences => conferences_schema(),
            Category::Consultancy => consultancy_schema(),
            Category::Internships => internships_schema(),
            Category::Fellowships => fellowships_schema(),
            Category::Workload => workload_schema(),
            Category::JournalEditorials => journal_editorials_schema(),
            Category::TechnicalTalks => technical_talks_schema(),
        }
    }
}

/// One form field: key, label, and the ordered rules applied to it
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub rules: Vec<Rule>,
}

impl FieldSpec {
    fn new(key: &'static str, label: &'static str, rules: Vec<Rule>) -> Self {
        Self { key, label, rules }
    }
}

/// Everything a category's UI needs: form fields and table columns
#[derive(Clone)]
pub struct FormSchema {
    pub category: Category,
    pub fields: Vec<FieldSpec>,
    pub columns: Vec<ColumnDef>,
}

impl FormSchema {
    /// Rule set over this schema's fields, in field order
    pub fn rule_set(&self) -> RuleSet {
        self.fields
            .iter()
            .fold(RuleSet::new(), |set, f| set.field(f.key, f.rules.clone()))
    }

    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Cell renderers
// ─────────────────────────────────────────────────────────────────────────────

/// Append a percent sign to non-empty numeric values
fn render_percent(raw: &str, _record: &Record) -> String {
    if raw.trim().is_empty() {
        CELL_PLACEHOLDER.to_string()
    } else {
        format!("{}%", raw.trim())
    }
}

/// Group integer amounts with thousands separators
fn render_amount(raw: &str, _record: &Record) -> String {
    let trimmed = raw.trim();
    match trimmed.parse::<u64>() {
        Ok(n) => {
            let digits = n.to_string();
            let mut out = String::with_capacity(digits.len() + digits.len() / 3);
            for (i, c) in digits.chars().enumerate() {
                if i > 0 && (digits.len() - i) % 3 == 0 {
                    out.push(',');
                }
                out.push(c);
            }
            out
        }
        Err(_) if trimmed.is_empty() => CELL_PLACEHOLDER.to_string(),
        Err(_) => trimmed.to_string(),
    }
}

/// Mark rows that carry an attached document
fn render_document(_raw: &str, record: &Record) -> String {
    match record.document() {
        Some(doc) => doc.name,
        None => CELL_PLACEHOLDER.to_string(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Per-category schemas
// ─────────────────────────────────────────────────────────────────────────────

fn url_rule() -> Rule {
    pattern(
        Regex::new(r"^https?://\S+$").unwrap(),
        Some("Must be an http(s) URL"),
    )
}

fn document_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("document_url", "Document URL", vec![url_rule()]),
        FieldSpec::new("document_name", "Document Name", vec![max_length(100, None)]),
    ]
}

fn awards_schema() -> FormSchema {
    let mut fields = vec![
        FieldSpec::new(
            "title",
            "Award Title",
            vec![required(None), min_length(3, None), max_length(150, None)],
        ),
        FieldSpec::new("agency", "Awarding Agency", vec![required(None), max_length(150, None)]),
        FieldSpec::new("year", "Year", vec![required(None), year(None)]),
        FieldSpec::new("description", "Description", vec![max_length(500, None)]),
    ];
    fields.extend(document_fields());
    FormSchema {
        category: Category::Awards,
        fields,
        columns: vec![
            ColumnDef::new("title", "Title").width(40),
            ColumnDef::new("agency", "Agency").width(30),
            ColumnDef::new("year", "Year").width(10),
            ColumnDef::new("document_url", "Document").width(20).render(render_document),
        ],
    }
}

fn publications_schema() -> FormSchema {
    let mut fields = vec![
        FieldSpec::new(
            "title",
            "Paper Title",
            vec![required(None), min_length(5, None), max_length(250, None)],
        ),
        FieldSpec::new("journal", "Journal", vec![required(None), max_length(150, None)]),
        FieldSpec::new("year", "Year", vec![required(None), year(None)]),
        FieldSpec::new("impact_factor", "Impact Factor", vec![positive_number(None)]),
        FieldSpec::new("coauthors", "Co-authors", vec![max_length(300, None)]),
    ];
    fields.extend(document_fields());
    FormSchema {
        category: Category::Publications,
        fields,
        columns: vec![
            ColumnDef::new("title", "Title").width(40),
            ColumnDef::new("journal", "Journal").width(25),
            ColumnDef::new("year", "Year").width(10),
            ColumnDef::new("impact_factor", "IF").width(10),
            ColumnDef::new("coauthors", "Co-authors").width(15),
        ],
    }
}

fn books_schema() -> FormSchema {
    FormSchema {
        category: Category::Books,
        fields: vec![
            FieldSpec::new("title", "Book Title", vec![required(None), max_length(200, None)]),
            FieldSpec::new("publisher", "Publisher", vec![required(None), max_length(150, None)]),
            FieldSpec::new(
                "isbn",
                "ISBN",
                vec![pattern(
                    Regex::new(r"^[0-9][0-9-]{8,15}[0-9X]$").unwrap(),
                    Some("Must be a valid ISBN (digits and dashes)"),
                )],
            ),
            FieldSpec::new("year", "Year", vec![required(None), year(None)]),
        ],
        columns: vec![
            ColumnDef::new("title", "Title").width(40),
            ColumnDef::new("publisher", "Publisher").width(30),
            ColumnDef::new("isbn", "ISBN").width(20),
            ColumnDef::new("year", "Year").width(10),
        ],
    }
}

fn conferences_schema() -> FormSchema {
    FormSchema {
        category: Category::Conferences,
        fields: vec![
            FieldSpec::new("title", "Paper / Session Title", vec![required(None), max_length(250, None)]),
            FieldSpec::new("conference", "Conference", vec![required(None), max_length(200, None)]),
            FieldSpec::new("venue", "Venue", vec![max_length(150, None)]),
            FieldSpec::new("year", "Year", vec![required(None), year(None)]),
        ],
        columns: vec![
            ColumnDef::new("title", "Title").width(35),
            ColumnDef::new("conference", "Conference").width(30),
            ColumnDef::new("venue", "Venue").width(25),
            ColumnDef::new("year", "Year").width(10),
        ],
    }
}

fn consultancy_schema() -> FormSchema {
    FormSchema {
        category: Category::Consultancy,
        fields: vec![
            FieldSpec::new("project", "Project Title", vec![required(None), max_length(200, None)]),
            FieldSpec::new("client", "Client Organization", vec![required(None), max_length(150, None)]),
            FieldSpec::new("amount", "Amount", vec![positive_number(None)]),
            FieldSpec::new("duration_months", "Duration (months)", vec![positive_number(None)]),
        ],
        columns: vec![
            ColumnDef::new("project", "Project").width(40),
            ColumnDef::new("client", "Client").width(30),
            ColumnDef::new("amount", "Amount").width(15).render(render_amount),
            ColumnDef::new("duration_months", "Months").width(15),
        ],
    }
}

fn internships_schema() -> FormSchema {
    FormSchema {
        category: Category::Internships,
        fields: vec![
            FieldSpec::new("student", "Student Name", vec![required(None), max_length(100, None)]),
            FieldSpec::new("organization", "Organization", vec![required(None), max_length(150, None)]),
            FieldSpec::new("topic", "Topic", vec![max_length(200, None)]),
            FieldSpec::new("year", "Year", vec![required(None), year(None)]),
        ],
        columns: vec![
            ColumnDef::new("student", "Student").width(25),
            ColumnDef::new("organization", "Organization").width(30),
            ColumnDef::new("topic", "Topic").width(35),
            ColumnDef::new("year", "Year").width(10),
        ],
    }
}

fn fellowships_schema() -> FormSchema {
    FormSchema {
        category: Category::Fellowships,
        fields: vec![
            FieldSpec::new("name", "Fellowship Name", vec![required(None), max_length(150, None)]),
            FieldSpec::new("agency", "Funding Agency", vec![required(None), max_length(150, None)]),
            FieldSpec::new("year", "Year", vec![required(None), year(None)]),
            FieldSpec::new("amount", "Amount", vec![positive_number(None)]),
        ],
        columns: vec![
            ColumnDef::new("name", "Fellowship").width(35),
            ColumnDef::new("agency", "Agency").width(30),
            ColumnDef::new("year", "Year").width(10),
            ColumnDef::new("amount", "Amount").width(25).render(render_amount),
        ],
    }
}

fn workload_schema() -> FormSchema {
    FormSchema {
        category: Category::Workload,
        fields: vec![
            FieldSpec::new("course", "Course", vec![required(None), max_length(150, None)]),
            FieldSpec::new("semester", "Semester", vec![required(None), max_length(50, None)]),
            FieldSpec::new(
                "hours_per_week",
                "Hours / Week",
                vec![required(None), hours(40.0, None)],
            ),
            FieldSpec::new("load_share", "Load Share (%)", vec![percentage(None)]),
        ],
        columns: vec![
            ColumnDef::new("course", "Course").width(40),
            ColumnDef::new("semester", "Semester").width(20),
            ColumnDef::new("hours_per_week", "Hrs/Week").width(20),
            ColumnDef::new("load_share", "Share").width(20).render(render_percent),
        ],
    }
}

fn journal_editorials_schema() -> FormSchema {
    FormSchema {
        category: Category::JournalEditorials,
        fields: vec![
            FieldSpec::new("journal", "Journal", vec![required(None), max_length(150, None)]),
            FieldSpec::new("role", "Editorial Role", vec![required(None), max_length(100, None)]),
            FieldSpec::new("since_year", "Since (year)", vec![required(None), year(None)]),
        ],
        columns: vec![
            ColumnDef::new("journal", "Journal").width(45),
            ColumnDef::new("role", "Role").width(35),
            ColumnDef::new("since_year", "Since").width(20),
        ],
    }
}

fn technical_talks_schema() -> FormSchema {
    FormSchema {
        category: Category::TechnicalTalks,
        fields: vec![
            FieldSpec::new("title", "Talk Title", vec![required(None), max_length(200, None)]),
            FieldSpec::new("event", "Event / Host", vec![required(None), max_length(150, None)]),
            FieldSpec::new("year", "Year", vec![required(None), year(None)]),
            FieldSpec::new("audience_size", "Audience Size", vec![positive_number(None)]),
        ],
        columns: vec![
            ColumnDef::new("title", "Title").width(40),
            ColumnDef::new("event", "Event").width(30),
            ColumnDef::new("year", "Year").width(10),
            ColumnDef::new("audience_size", "Audience").width(20),
        ],
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Faculty profile wizard schema
// ─────────────────────────────────────────────────────────────────────────────

/// Field specs for one wizard step
pub fn profile_step_fields(step: ProfileStep) -> Vec<FieldSpec> {
    match step {
        ProfileStep::Welcome | ProfileStep::Confirm => Vec::new(),
        ProfileStep::Identity => vec![
            FieldSpec::new("name", "Full Name", vec![required(None), min_length(2, None), max_length(100, None)]),
            FieldSpec::new("email", "Email", vec![required(None), email(None)]),
        ],
        ProfileStep::Position => vec![
            FieldSpec::new("department", "Department", vec![required(None), max_length(100, None)]),
            FieldSpec::new("designation", "Designation", vec![required(None), max_length(100, None)]),
            FieldSpec::new("joining_year", "Joining Year", vec![required(None), year(None)]),
        ],
        ProfileStep::Workload => vec![
            FieldSpec::new(
                "teaching_load",
                "Teaching Load (%)",
                vec![required(None), percentage(None)],
            ),
            FieldSpec::new(
                "weekly_hours",
                "Weekly Hours",
                vec![required(None), hours(40.0, None)],
            ),
        ],
    }
}

/// Faculty-profile wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileStep {
    Welcome,
    Identity,
    Position,
    Workload,
    Confirm,
}

impl ProfileStep {
    pub fn next(&self) -> Option<ProfileStep> {
        match self {
            ProfileStep::Welcome => Some(ProfileStep::Identity),
            ProfileStep::Identity => Some(ProfileStep::Position),
            ProfileStep::Position => Some(ProfileStep::Workload),
            ProfileStep::Workload => Some(ProfileStep::Confirm),
            ProfileStep::Confirm => None,
        }
    }

    pub fn prev(&self) -> Option<ProfileStep> {
        match self {
            ProfileStep::Welcome => None,
            ProfileStep::Identity => Some(ProfileStep::Welcome),
            ProfileStep::Position => Some(ProfileStep::Identity),
            ProfileStep::Workload => Some(ProfileStep::Position),
            ProfileStep::Confirm => Some(ProfileStep::Workload),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ProfileStep::Welcome => "Welcome",
            ProfileStep::Identity => "Identity",
            ProfileStep::Position => "Position",
            ProfileStep::Workload => "Workload",
            ProfileStep::Confirm => "Confirm",
        }
    }

    pub fn step_number(&self) -> usize {
        match self {
            ProfileStep::Welcome => 1,
            ProfileStep::Identity => 2,
            ProfileStep::Position => 3,
            ProfileStep::Workload => 4,
            ProfileStep::Confirm => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::column::keys_are_unique;
    use crate::model::validation::FormErrors;
    use std::collections::BTreeMap;

    #[test]
    fn test_every_schema_has_unique_column_keys() {
        for category in Category::all() {
            let schema = category.schema();
            assert!(
                keys_are_unique(&schema.columns),
                "duplicate column key in {:?}",
                category
            );
            assert!(!schema.fields.is_empty());
        }
    }

    #[test]
    fn test_every_column_width_set_sums_to_100() {
        for category in Category::all() {
            let schema = category.schema();
            let total: u16 = schema.columns.iter().filter_map(|c| c.width).sum();
            assert_eq!(total, 100, "column widths for {:?}", category);
        }
    }

    #[test]
    fn test_slug_round_trip() {
        for category in Category::all() {
            assert_eq!(Category::from_slug(category.slug()), Some(category));
        }
        assert_eq!(Category::from_slug("unknown"), None);
    }

    #[test]
    fn test_award_schema_rejects_blank_title() {
        let schema = Category::Awards.schema();
        let mut errors = FormErrors::new();
        let mut values = BTreeMap::new();
        values.insert("agency".to_string(), "UGC".to_string());
        values.insert("year".to_string(), "2023".to_string());
        assert!(!errors.validate_form(&values, &schema.rule_set()));
        assert!(errors.error("title").is_some());
        assert!(errors.error("agency").is_none());
    }

    #[test]
    fn test_workload_schema_bounds() {
        let schema = Category::Workload.schema();
        let rule_set = schema.rule_set();
        let mut errors = FormErrors::new();

        let mut values = BTreeMap::new();
        values.insert("course".to_string(), "Operating Systems".to_string());
        values.insert("semester".to_string(), "Fall 2024".to_string());
        values.insert("hours_per_week".to_string(), "44".to_string());
        values.insert("load_share".to_string(), "120".to_string());
        assert!(!errors.validate_form(&values, &rule_set));
        assert!(errors.error("hours_per_week").is_some());
        assert!(errors.error("load_share").is_some());

        values.insert("hours_per_week".to_string(), "12".to_string());
        values.insert("load_share".to_string(), "40".to_string());
        assert!(errors.validate_form(&values, &rule_set));
    }

    #[test]
    fn test_render_amount_groups_digits() {
        let r = Record::default();
        assert_eq!(render_amount("1500000", &r), "1,500,000");
        assert_eq!(render_amount("999", &r), "999");
        assert_eq!(render_amount("", &r), CELL_PLACEHOLDER);
        assert_eq!(render_amount("n/a", &r), "n/a");
    }

    #[test]
    fn test_profile_steps_walk_forward_and_back() {
        let mut step = ProfileStep::Welcome;
        let mut seen = vec![step];
        while let Some(next) = step.next() {
            step = next;
            seen.push(step);
        }
        assert_eq!(seen.len(), 5);
        assert_eq!(step, ProfileStep::Confirm);

        while let Some(prev) = step.prev() {
            step = prev;
        }
        assert_eq!(step, ProfileStep::Welcome);
    }

    #[test]
    fn test_profile_workload_step_rules() {
        let fields = profile_step_fields(ProfileStep::Workload);
        let rule_set = fields
            .iter()
            .fold(crate::model::validation::RuleSet::new(), |set, f| {
                set.field(f.key, f.rules.clone())
            });
        let mut errors = FormErrors::new();
        let mut values = BTreeMap::new();
        values.insert("teaching_load".to_string(), "0".to_string());
        values.insert("weekly_hours".to_string(), "20".to_string());
        assert!(!errors.validate_form(&values, &rule_set));
        assert!(errors.error("teaching_load").is_some());
    }
}
