//! Card templates: JSON resources with `${name}` placeholders, expanded per send.

use notes_core::{Card, HandlerError};
use serde_json::{Map, Value};

use crate::variant::BotVariant;

const CALL_NOTES_CARD: &str = include_str!("resources/call_notes_card.json");
const BASIC_CALL_NOTES_CARD: &str = include_str!("resources/basic_call_notes_card.json");
const PREP_NOTES_CARD: &str = include_str!("resources/prep_notes_card.json");

/// Data key for the on-call notes in card templates.
pub const KEY_CALL_NOTES: &str = "oncallnotes";
/// Data key for the prep notes in card templates.
pub const KEY_PREP_NOTES: &str = "prepnotes";

/// A parsed card template.
#[derive(Debug, Clone)]
pub struct CardTemplate {
    template: Value,
}

impl CardTemplate {
    pub fn parse(json: &str) -> Result<Self, HandlerError> {
        let template: Value =
            serde_json::from_str(json).map_err(|e| HandlerError::Template(e.to_string()))?;
        Ok(Self { template })
    }

    /// Substitutes `${key}` in every string of the template and builds the card.
    /// Placeholders without data are left in place.
    pub fn expand(&self, data: &Map<String, Value>) -> Result<Card, HandlerError> {
        let expanded = expand_value(&self.template, data);
        serde_json::from_value(expanded).map_err(|e| HandlerError::Template(e.to_string()))
    }

    /// Expands with a single string value.
    pub fn expand_one(&self, key: &str, value: &str) -> Result<Card, HandlerError> {
        let mut data = Map::new();
        data.insert(key.to_string(), Value::String(value.to_string()));
        self.expand(&data)
    }
}

fn expand_value(value: &Value, data: &Map<String, Value>) -> Value {
    match value {
        Value::String(s) => Value::String(expand_str(s, data)),
        Value::Array(items) => Value::Array(items.iter().map(|v| expand_value(v, data)).collect()),
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), expand_value(v, data)))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn expand_str(s: &str, data: &Map<String, Value>) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };
        let key = &after[..end];
        match data.get(key) {
            Some(Value::String(v)) => out.push_str(v),
            Some(v) => out.push_str(&v.to_string()),
            None => out.push_str(&rest[start..start + 2 + end + 1]),
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out
}

/// The card templates a variant sends.
#[derive(Debug, Clone)]
pub struct CardTemplates {
    pub call_notes: CardTemplate,
    pub prep_notes: CardTemplate,
}

impl CardTemplates {
    pub fn for_variant(variant: BotVariant) -> Result<Self, HandlerError> {
        let call_notes = match variant {
            BotVariant::Basic => BASIC_CALL_NOTES_CARD,
            BotVariant::LiveShare => CALL_NOTES_CARD,
        };
        Ok(Self {
            call_notes: CardTemplate::parse(call_notes)?,
            prep_notes: CardTemplate::parse(PREP_NOTES_CARD)?,
        })
    }

    pub fn call_notes_card(&self, notes: &str) -> Result<Card, HandlerError> {
        self.call_notes.expand_one(KEY_CALL_NOTES, notes)
    }

    pub fn prep_notes_card(&self, notes: &str) -> Result<Card, HandlerError> {
        self.prep_notes.expand_one(KEY_PREP_NOTES, notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{VERB_AI_CARD, VERB_AI_SUMMARIZE_PREP, VERB_CONFIRM, VERB_SAVE};
    use serde_json::json;

    #[test]
    fn test_expand_str_substitutes_known_keys() {
        let data = json!({ "name": "Ada", "count": 3 });
        let data = data.as_object().unwrap();
        assert_eq!(expand_str("Hi ${name}, ${count} notes", data), "Hi Ada, 3 notes");
        assert_eq!(expand_str("keep ${missing} and ${name}", data), "keep ${missing} and Ada");
        assert_eq!(expand_str("open ${name", data), "open ${name");
    }

    #[test]
    fn test_liveshare_cards() {
        let cards = CardTemplates::for_variant(BotVariant::LiveShare).unwrap();

        let card = cards.call_notes_card("Quiet night.").unwrap();
        assert_eq!(card.title, "On call notes");
        assert!(card.body.starts_with("Quiet night.\n\n"));
        let verbs: Vec<&str> = card.actions.iter().map(|a| a.verb.as_str()).collect();
        assert_eq!(verbs, vec![VERB_AI_CARD, VERB_CONFIRM]);

        let card = cards.prep_notes_card("Check backups.").unwrap();
        assert!(card.body.starts_with("Check backups."));
        let verbs: Vec<&str> = card.actions.iter().map(|a| a.verb.as_str()).collect();
        assert_eq!(verbs, vec![VERB_AI_SUMMARIZE_PREP, VERB_SAVE]);
    }

    #[test]
    fn test_basic_card_only_summarizes() {
        let cards = CardTemplates::for_variant(BotVariant::Basic).unwrap();
        let card = cards.call_notes_card("notes").unwrap();
        assert_eq!(card.actions.len(), 1);
        assert_eq!(card.actions[0].verb, VERB_AI_CARD);
    }

    #[test]
    fn test_notes_containing_placeholders_are_not_re_expanded() {
        let cards = CardTemplates::for_variant(BotVariant::LiveShare).unwrap();
        let card = cards.call_notes_card("literal ${prepnotes}").unwrap();
        assert!(card.body.starts_with("literal ${prepnotes}"));
    }

    #[test]
    fn test_parse_rejects_bad_json() {
        assert!(CardTemplate::parse("{ not json").is_err());
        let template = CardTemplate::parse(r#"{"title": 1}"#).unwrap();
        assert!(template.expand(&Map::new()).is_err());
    }
}
