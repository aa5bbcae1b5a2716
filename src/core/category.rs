use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User-scoped catalog entry used both for grouping tasks and as
/// parser vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub owner: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub rank: u32,
    pub is_default: bool,
    pub deleted: Option<NaiveDateTime>,
}

impl Category {
    pub fn new(owner: impl Into<String>, name: impl Into<String>, rank: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner: owner.into(),
            name: name.into(),
            icon: String::new(),
            color: String::new(),
            rank,
            is_default: false,
            deleted: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.deleted.is_none()
    }
}

/// Known action verbs, fed to the parser as its catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionTemplate {
    pub id: Uuid,
    pub owner: String,
    pub name: String,
    pub rank: u32,
    pub is_default: bool,
    pub deleted: Option<NaiveDateTime>,
}

impl ActionTemplate {
    pub fn new(owner: impl Into<String>, name: impl Into<String>, rank: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner: owner.into(),
            name: name.into(),
            rank,
            is_default: false,
            deleted: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.deleted.is_none()
    }
}

/// The four stock categories seeded for every new user.
pub fn default_categories(owner: &str) -> Vec<Category> {
    let seed = [
        ("Patient", "👤", "#3b82f6"),
        ("Projet", "📋", "#10b981"),
        ("Administratif", "🏥", "#f59e0b"),
        ("Équipe", "👥", "#8b5cf6"),
    ];
    seed.iter()
        .enumerate()
        .map(|(i, (name, icon, color))| {
            let mut c = Category::new(owner, *name, i as u32 + 1);
            c.icon = (*icon).to_string();
            c.color = (*color).to_string();
            c.is_default = true;
            c
        })
        .collect()
}

/// The seven stock action verbs seeded for every new user.
pub fn default_action_templates(owner: &str) -> Vec<ActionTemplate> {
    [
        "APPELER",
        "CONTROLER",
        "PROGRAMMER",
        "REGARDER",
        "DISCUTER",
        "RENCONTRER",
        "ORGANISER",
    ]
    .iter()
    .enumerate()
    .map(|(i, name)| {
        let mut t = ActionTemplate::new(owner, *name, i as u32 + 1);
        t.is_default = true;
        t
    })
    .collect()
}
