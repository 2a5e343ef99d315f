//! Canned response tables. Passed into handlers explicitly; optionally loaded from a JSON file.

use std::path::Path;

use anyhow::{bail, Context, Result};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Placeholder replaced by the command name in unknown-action lines.
pub const ACTION_PLACEHOLDER: &str = "{action}";

/// Every table must be non-empty; one entry is picked uniformly at random per reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseTables {
    pub initial_call_notes: Vec<String>,
    pub initial_prep_notes: Vec<String>,
    pub unknown_action: Vec<String>,
    pub off_topic: Vec<String>,
}

impl Default for ResponseTables {
    fn default() -> Self {
        let lines = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            initial_call_notes: lines(&["On call notes for 1/3, session 7 PM - 12 AM:\n\
                1. 7:00 PM - 8:00 PM: Escalated issue with application to development team.\n\
                2. 8:00 PM - 9:00 PM: Provided remote support to user experiencing login issues.\n\
                3. 9:00 PM - 10:00 PM: Conducted system updates and maintenance.\n\
                4. 10:00 PM - 11:00 PM: Performed routine backups and testing.\n\
                5. 11:00 PM - 12:00 AM: Monitored system performance and resolved minor issues."]),
            initial_prep_notes: lines(&["Prep notes for the 1/4 handover:\n\
                1. Follow up with the development team on the escalated application issue.\n\
                2. Confirm the login fix with the affected user.\n\
                3. Review last night's backup and maintenance reports."]),
            unknown_action: lines(&[
                "I'm sorry, I'm not sure how to {action}.",
                "I don't know the first thing about {action}.",
                "I'm not sure I'm the best person to help with {action}.",
                "I'm still learning about {action}, but I'll try my best.",
                "I'm afraid I'm not experienced enough with {action}.",
            ]),
            off_topic: lines(&[
                "I'm sorry, I'm not sure I can help you with that.",
                "I'm sorry, I'm afraid I'm not allowed to talk about such things.",
                "I'm sorry, I'm not sure I'm the right person to help you with that.",
                "I wish I could help you with that, but it's not something I can talk about.",
                "I'm sorry, I'm not allowed to discuss that topic.",
            ]),
        }
    }
}

impl ResponseTables {
    /// Loads tables from a JSON file with the same field names.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read responses file {}", path.display()))?;
        let tables: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid responses file {}", path.display()))?;
        tables.validate()?;
        Ok(tables)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, table) in [
            ("initial_call_notes", &self.initial_call_notes),
            ("initial_prep_notes", &self.initial_prep_notes),
            ("unknown_action", &self.unknown_action),
            ("off_topic", &self.off_topic),
        ] {
            if table.is_empty() {
                bail!("response table '{}' is empty", name);
            }
        }
        Ok(())
    }

    pub fn initial_call_notes(&self) -> String {
        pick(&self.initial_call_notes, &mut rand::rng())
    }

    pub fn initial_prep_notes(&self) -> String {
        pick(&self.initial_prep_notes, &mut rand::rng())
    }

    pub fn unknown_action(&self, action: &str) -> String {
        pick(&self.unknown_action, &mut rand::rng()).replace(ACTION_PLACEHOLDER, action)
    }

    pub fn off_topic(&self) -> String {
        pick(&self.off_topic, &mut rand::rng())
    }
}

/// Uniform over every entry; an empty table yields an empty string.
pub fn pick<R: Rng + ?Sized>(entries: &[String], rng: &mut R) -> String {
    entries.choose(rng).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_pick_reaches_every_entry() {
        let entries: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let mut rng = StdRng::seed_from_u64(7);
        let seen: HashSet<String> = (0..200).map(|_| pick(&entries, &mut rng)).collect();
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_pick_single_and_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick(&["only".to_string()], &mut rng), "only");
        assert_eq!(pick(&[], &mut rng), "");
    }

    #[test]
    fn test_unknown_action_names_the_action() {
        let tables = ResponseTables::default();
        for _ in 0..20 {
            let line = tables.unknown_action("dance");
            assert!(line.contains("dance"), "{}", line);
            assert!(!line.contains(ACTION_PLACEHOLDER));
        }
    }

    #[test]
    fn test_default_tables_are_valid() {
        let tables = ResponseTables::default();
        tables.validate().unwrap();
        assert!(tables.initial_call_notes().starts_with("On call notes"));
        assert!(tables.off_topic().starts_with("I"));
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("responses.json");
        let mut tables = ResponseTables::default();
        tables.off_topic = vec!["Let's stick to notes.".to_string()];
        std::fs::write(&path, serde_json::to_string(&tables).unwrap()).unwrap();

        let loaded = ResponseTables::from_json_file(&path).unwrap();
        assert_eq!(loaded.off_topic(), "Let's stick to notes.");

        tables.unknown_action.clear();
        std::fs::write(&path, serde_json::to_string(&tables).unwrap()).unwrap();
        assert!(ResponseTables::from_json_file(&path).is_err());
    }
}
