use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::core::category::Category;
use crate::core::task::Priority;

use super::dates::resolve_due_date;
use super::keywords::detect_category;

/// Verb alternations tried at the start of the input, in order, with
/// the canonical action each maps to. First match wins.
const VERB_TABLE: [(&str, &str); 7] = [
    (r"appeler|appel|tel", "APPELER"),
    (r"contrôler|controler|vérifier|check", "CONTROLER"),
    (r"programmer|planifier|prévoir", "PROGRAMMER"),
    (r"regarder|voir|consulter|examiner", "REGARDER"),
    (r"discuter|parler|échanger", "DISCUTER"),
    (r"rencontrer|rdv|rendez-vous", "RENCONTRER"),
    (r"organiser|préparer|mettre en place", "ORGANISER"),
];

static VERB_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    VERB_TABLE
        .iter()
        .map(|(alts, canonical)| {
            (
                Regex::new(&format!(r"(?i)^({alts})")).unwrap(),
                *canonical,
            )
        })
        .collect()
});

/// Same alternations with a trailing separator, used to peel the verb
/// phrase off the front of the context.
static VERB_STRIP_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    VERB_TABLE
        .iter()
        .map(|(alts, _)| Regex::new(&format!(r"(?i)^({alts})\s+")).unwrap())
        .collect()
});

static PATIENT_FULL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(Mme?\.?|M\.?|Mlle\.?)\s+([A-Z][a-z]*\.?)\s+([A-Z]\.?)").unwrap());

static PATIENT_SHORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(Mme?\.?|M\.?|Mlle\.?)\s+([A-Z][a-z]*\.?)").unwrap());

static BARE_INITIALS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z]\.\s*[A-Z]\.?)\b").unwrap());

static PATIENT_STRIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][a-z]*\.?\s+[A-Z]\.?\s+\d+").unwrap());

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(\d{4,12})\b").unwrap());

static DIGITS_STRIP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d{4,8}\b").unwrap());

static URGENCY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(urgente?|prioritaire|asap|rapidement)\b").unwrap());

static PRIORITY_STRIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(urgent|important|normal)\b").unwrap());

static DAYWORD_STRIP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(demain|aujourd'hui|lundi|mardi|mercredi|jeudi|vendredi|samedi|dimanche)\b")
        .unwrap()
});

static RELATIVE_STRIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(dans\s+\d+\s+(jours?|semaines?|mois))\b").unwrap());

/// Structured candidate extracted from one free-text line. Ephemeral:
/// the caller turns it into a task plus, when `action` is present, an
/// initial action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedTask {
    /// The trimmed input, verbatim. Not canonicalized: re-parsing the
    /// title is not guaranteed to reproduce the other fields.
    pub title: String,
    pub action: Option<String>,
    pub context: Option<String>,
    pub patient_initials: Option<String>,
    pub patient_number: Option<String>,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub detected_category: Option<String>,
}

/// Free-text task parser. Pure and total: every input yields a
/// `ParsedTask`, with unmatched fields simply absent.
pub struct TaskParser {
    /// Known action names, matched as whole lowercased words anywhere
    /// in the input before the verb-pattern table is consulted.
    actions: Vec<String>,
}

impl TaskParser {
    /// The category catalog is accepted for interface symmetry with
    /// the action catalog; categories are inferred from a fixed
    /// keyword table, not from it.
    pub fn new(action_catalog: &[String], _category_catalog: &[String]) -> Self {
        Self {
            actions: action_catalog.iter().map(|a| a.to_lowercase()).collect(),
        }
    }

    /// Parse against the local calendar date.
    pub fn parse(&self, input: &str) -> ParsedTask {
        self.parse_at(input, chrono::Local::now().date_naive())
    }

    /// Parse with an explicit `today`, the reference for relative date
    /// expressions. Each extractor runs against the whole cleaned
    /// input, independently of the others.
    pub fn parse_at(&self, input: &str, today: NaiveDate) -> ParsedTask {
        let cleaned = input.trim();

        ParsedTask {
            title: cleaned.to_string(),
            action: self.extract_action(cleaned),
            context: extract_context(cleaned),
            patient_initials: extract_patient_initials(cleaned),
            patient_number: extract_patient_number(cleaned),
            priority: extract_priority(cleaned),
            due_date: resolve_due_date(cleaned, today),
            detected_category: detect_category(cleaned).map(str::to_string),
        }
    }

    fn extract_action(&self, text: &str) -> Option<String> {
        let words: Vec<String> = text
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        for name in &self.actions {
            if words.iter().any(|w| w == name) {
                return Some(name.to_uppercase());
            }
        }

        for (re, canonical) in VERB_RULES.iter() {
            if re.is_match(text) {
                return Some((*canonical).to_string());
            }
        }

        None
    }
}

fn extract_context(text: &str) -> Option<String> {
    let mut context = text.to_string();

    for re in VERB_STRIP_RES.iter() {
        context = re.replace(&context, "").into_owned();
    }

    context = PATIENT_STRIP_RE.replace_all(&context, "").into_owned();
    context = DIGITS_STRIP_RE.replace_all(&context, "").into_owned();
    context = PRIORITY_STRIP_RE.replace_all(&context, "").into_owned();
    context = DAYWORD_STRIP_RE.replace_all(&context, "").into_owned();
    context = RELATIVE_STRIP_RE.replace_all(&context, "").into_owned();

    let context = context.trim();
    if context.is_empty() {
        None
    } else {
        Some(context.to_string())
    }
}

fn extract_patient_initials(text: &str) -> Option<String> {
    // Honorific + name + trailing initial, e.g. "Mme Dupont D."
    if let Some(caps) = PATIENT_FULL_RE.captures(text) {
        return Some(format!("{} {} {}", &caps[1], &caps[2], &caps[3]));
    }
    // Honorific + single name or abbreviation, e.g. "Mme D."
    if let Some(caps) = PATIENT_SHORT_RE.captures(text) {
        return Some(format!("{} {}", &caps[1], &caps[2]));
    }
    // Two bare initials, e.g. "D. M."
    BARE_INITIALS_RE
        .captures(text)
        .map(|caps| caps[1].to_string())
}

fn extract_patient_number(text: &str) -> Option<String> {
    NUMBER_RE.captures(text).map(|caps| caps[1].to_string())
}

fn extract_priority(text: &str) -> Priority {
    if URGENCY_RE.is_match(text) {
        Priority::Urgent
    } else {
        Priority::Normal
    }
}

/// Privacy-preserving display title for a task created from a parse:
/// the category name plus the anonymized patient reference or a short
/// context preview, never the raw input.
pub fn neutral_title(parsed: &ParsedTask, category: Option<&Category>) -> String {
    let category_name = category
        .map(|c| c.name.as_str())
        .or(parsed.detected_category.as_deref())
        .unwrap_or("Tâche");

    if category_name == "Patient" {
        let number = parsed
            .patient_number
            .as_ref()
            .map(|n| format!(" ({n})"))
            .unwrap_or_default();

        if let Some(ref initials) = parsed.patient_initials {
            return format!("{category_name} {initials}{number}");
        }
        if !number.is_empty() {
            return format!("{category_name}{number}");
        }
        if let Some(caps) = PATIENT_SHORT_RE.captures(&parsed.title) {
            return format!("{category_name} {} {}", &caps[1], &caps[2]);
        }
    } else if let Some(ref context) = parsed.context {
        let preview: String = context.chars().take(30).collect();
        let ellipsis = if context.chars().count() > 30 { "..." } else { "" };
        return format!("{category_name} - {preview}{ellipsis}");
    }

    category_name.to_string()
}
