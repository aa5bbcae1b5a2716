//! Category inference by keyword scoring.
//!
//! Four fixed vocabularies, one per stock category. A text's score for
//! a category is the number of that category's keywords appearing as
//! case-insensitive substrings; the highest score wins, ties resolving
//! to the earliest category in the table. The real category catalog
//! plays no part here; callers match the returned display name against
//! it and may come up empty.

const PATIENT_KEYWORDS: &[&str] = &[
    "patient",
    "mme",
    "m.",
    "mlle",
    "ecbu",
    "résultat",
    "analyse",
    "examen",
    "bilan",
    "chimio",
    "traitement",
    "effet",
    "toxicité",
    "surveillance",
    "suivi",
    "appeler",
    "rappeler",
    "mr",
];

const PROJECT_KEYWORDS: &[&str] = &[
    "projet",
    "recherche",
    "étude",
    "protocole",
    "inclure",
    "inclusion",
    "amélioration",
    "qualité",
    "évaluation",
    "audit",
    "développement",
];

const ADMIN_KEYWORDS: &[&str] = &[
    "formation",
    "dpc",
    "réunion",
    "staff",
    "planning",
    "congés",
    "administratif",
    "rapport",
    "document",
    "procédure",
    "protocole",
    "certification",
    "accréditation",
];

const TEAM_KEYWORDS: &[&str] = &[
    "dr",
    "docteur",
    "médecin",
    "équipe",
    "collègue",
    "discuter",
    "rencontrer",
    "coordination",
    "transmission",
    "relai",
];

const CATEGORY_TABLE: &[(&str, &[&str])] = &[
    ("Patient", PATIENT_KEYWORDS),
    ("Projet", PROJECT_KEYWORDS),
    ("Administratif", ADMIN_KEYWORDS),
    ("Équipe", TEAM_KEYWORDS),
];

/// Infer a category display name from free text, or None when no
/// keyword matches at all.
pub fn detect_category(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();

    let mut best: Option<(&'static str, usize)> = None;
    for (name, keywords) in CATEGORY_TABLE {
        let score = keywords.iter().filter(|k| lower.contains(*k)).count();
        match best {
            Some((_, top)) if score <= top => {}
            _ if score == 0 => {}
            _ => best = Some((name, score)),
        }
    }

    best.map(|(name, _)| name)
}
