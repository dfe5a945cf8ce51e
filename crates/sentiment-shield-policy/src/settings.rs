//! User settings: enabled flag, blocked categories and allow-list
//!
//! Stored settings may be partial or stale. Deserialization fills every
//! missing piece with its default instead of failing, and unknown category
//! keys are ignored.

use sentiment_shield_core::{Category, Error, Result};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Which categories the user wants hidden
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockedCategories([bool; Category::COUNT]);

impl Default for BlockedCategories {
    fn default() -> Self {
        let mut blocked = Self([false; Category::COUNT]);
        blocked.set(Category::Anger, true);
        blocked.set(Category::Toxic, true);
        blocked
    }
}

impl BlockedCategories {
    /// Nothing blocked
    pub fn none() -> Self {
        Self([false; Category::COUNT])
    }

    pub fn is_blocked(&self, category: Category) -> bool {
        self.0[category.index()]
    }

    pub fn set(&mut self, category: Category, blocked: bool) {
        self.0[category.index()] = blocked;
    }

    /// Flip a category, returning the new state
    pub fn toggle(&mut self, category: Category) -> bool {
        let blocked = !self.is_blocked(category);
        self.set(category, blocked);
        blocked
    }

    /// Blocked categories in declaration order
    pub fn blocked(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(|c| self.is_blocked(*c))
    }

    /// Apply the known entries of a name → flag map
    pub fn merge(&mut self, entries: &BTreeMap<String, bool>) {
        for (name, blocked) in entries {
            if let Ok(category) = name.parse::<Category>() {
                self.set(category, *blocked);
            }
        }
    }
}

impl Serialize for BlockedCategories {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Category::COUNT))?;
        for category in Category::ALL {
            map.serialize_entry(category.as_str(), &self.is_blocked(category))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for BlockedCategories {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct BlockedVisitor;

        impl<'de> Visitor<'de> for BlockedVisitor {
            type Value = BlockedCategories;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category names to booleans")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = BTreeMap::new();
                while let Some((name, blocked)) = access.next_entry::<String, bool>()? {
                    entries.insert(name, blocked);
                }
                let mut blocked = BlockedCategories::default();
                blocked.merge(&entries);
                Ok(blocked)
            }
        }

        deserializer.deserialize_map(BlockedVisitor)
    }
}

/// Authors and keywords that bypass blocking
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowList {
    #[serde(default)]
    pub users: Vec<String>,

    #[serde(default)]
    pub keywords: Vec<String>,
}

impl AllowList {
    /// Add a user; a leading `@` is dropped and case is folded.
    ///
    /// Returns `false` when the user was already listed.
    pub fn add_user(&mut self, user: &str) -> Result<bool> {
        let user = normalize_author(user);
        if user.is_empty() {
            return Err(Error::policy("allow-listed user must not be empty"));
        }
        Ok(push_unique(&mut self.users, user))
    }

    /// Add a keyword. Returns `false` when it was already listed.
    pub fn add_keyword(&mut self, keyword: &str) -> Result<bool> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(Error::policy("allow-listed keyword must not be empty"));
        }
        Ok(push_unique(&mut self.keywords, keyword.to_string()))
    }

    /// Remove a user. Returns `true` when something was removed.
    pub fn remove_user(&mut self, user: &str) -> bool {
        let user = normalize_author(user);
        remove_matching(&mut self.users, &user)
    }

    /// Remove a keyword. Returns `true` when something was removed.
    pub fn remove_keyword(&mut self, keyword: &str) -> bool {
        remove_matching(&mut self.keywords, keyword.trim())
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.keywords.is_empty()
    }
}

/// Trim, drop `@` and lowercase an author handle
pub fn normalize_author(author: &str) -> String {
    author.trim().replace('@', "").to_lowercase()
}

fn push_unique(list: &mut Vec<String>, value: String) -> bool {
    if list.iter().any(|v| v.eq_ignore_ascii_case(&value)) {
        return false;
    }
    list.push(value);
    true
}

fn remove_matching(list: &mut Vec<String>, value: &str) -> bool {
    let before = list.len();
    list.retain(|v| !v.eq_ignore_ascii_case(value));
    list.len() != before
}

/// User settings consulted by the policy filter and the scanner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub blocked_emotions: BlockedCategories,

    #[serde(default)]
    pub whitelist: AllowList,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            blocked_emotions: BlockedCategories::default(),
            whitelist: AllowList::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

impl Settings {
    /// Merge a runtime update into these settings.
    ///
    /// Present fields replace, absent fields are kept. Category flags merge
    /// key by key; an allow-list replaces the whole list, with missing
    /// arrays treated as empty.
    pub fn apply(&mut self, update: &SettingsUpdate) {
        if let Some(enabled) = update.enabled {
            self.enabled = enabled;
        }
        if let Some(entries) = &update.blocked_emotions {
            self.blocked_emotions.merge(entries);
        }
        if let Some(whitelist) = &update.whitelist {
            self.whitelist = whitelist.clone();
        }
    }
}

/// Partial settings change delivered at runtime
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_emotions: Option<BTreeMap<String, bool>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whitelist: Option<AllowList>,
}

impl SettingsUpdate {
    pub fn enabled(enabled: bool) -> Self {
        Self {
            enabled: Some(enabled),
            ..Default::default()
        }
    }

    pub fn block(category: Category, blocked: bool) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(category.as_str().to_string(), blocked);
        Self {
            blocked_emotions: Some(entries),
            ..Default::default()
        }
    }

    pub fn whitelist(whitelist: AllowList) -> Self {
        Self {
            whitelist: Some(whitelist),
            ..Default::default()
        }
    }
}
