//! Bot variants: which actions a deployment answers and how notes are prompted.

use anyhow::{bail, Result};
use prompt::PromptStyle;

use crate::actions::{VERB_AI_CARD, VERB_AI_SUMMARIZE_PREP, VERB_CONFIRM, VERB_SAVE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotVariant {
    /// On-call notes card and raw-query summaries only; nothing is remembered.
    Basic,
    /// Call and prep notes, remembered per chat, summarized with a `Summarize:` prompt.
    LiveShare,
}

impl BotVariant {
    /// Parses `basic` or `liveshare` (case-insensitive).
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(BotVariant::Basic),
            "liveshare" | "live-share" => Ok(BotVariant::LiveShare),
            other => bail!("BOT_VARIANT must be 'basic' or 'liveshare', got '{}'", other),
        }
    }

    pub fn prompt_style(&self) -> PromptStyle {
        match self {
            BotVariant::Basic => PromptStyle::Raw,
            BotVariant::LiveShare => PromptStyle::Summarize,
        }
    }

    pub fn supports_verb(&self, verb: &str) -> bool {
        match self {
            BotVariant::Basic => verb == VERB_AI_CARD,
            BotVariant::LiveShare => matches!(
                verb,
                VERB_AI_CARD | VERB_AI_SUMMARIZE_PREP | VERB_CONFIRM | VERB_SAVE
            ),
        }
    }

    pub fn has_prep_notes(&self) -> bool {
        matches!(self, BotVariant::LiveShare)
    }

    /// Whether submitted notes are written back to conversation state.
    pub fn remembers_notes(&self) -> bool {
        matches!(self, BotVariant::LiveShare)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variant() {
        assert_eq!(BotVariant::parse("basic").unwrap(), BotVariant::Basic);
        assert_eq!(BotVariant::parse(" LiveShare ").unwrap(), BotVariant::LiveShare);
        assert!(BotVariant::parse("teams").is_err());
    }

    #[test]
    fn test_basic_only_summarizes_call_notes() {
        assert!(BotVariant::Basic.supports_verb(VERB_AI_CARD));
        assert!(!BotVariant::Basic.supports_verb(VERB_SAVE));
        assert!(!BotVariant::Basic.has_prep_notes());
        assert_eq!(BotVariant::Basic.prompt_style(), PromptStyle::Raw);
    }

    #[test]
    fn test_liveshare_supports_all_verbs() {
        for verb in [VERB_AI_CARD, VERB_AI_SUMMARIZE_PREP, VERB_CONFIRM, VERB_SAVE] {
            assert!(BotVariant::LiveShare.supports_verb(verb));
        }
        assert!(!BotVariant::LiveShare.supports_verb("delete"));
        assert_eq!(BotVariant::LiveShare.prompt_style(), PromptStyle::Summarize);
    }
}
