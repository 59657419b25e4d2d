//! Exits: directed, gated edges between rooms.

use serde::{Deserialize, Serialize};

use crate::{ExitId, ItemId, ModelError, RoomId};

/// The words a player can type to use an exit, e.g. `["north", "n"]`.
///
/// Never empty and never contains a blank word. Order matters: the first
/// keyword is the exit's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Keywords(Vec<String>);

impl Keywords {
    /// Builds a keyword list, rejecting empty lists and blank words.
    pub fn new<I, S>(words: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        if words.is_empty() {
            return Err(ModelError::NoKeywords);
        }
        if words.iter().any(|w| w.trim().is_empty()) {
            return Err(ModelError::BlankKeyword);
        }
        Ok(Self(words))
    }

    /// Case-sensitive exact match against any keyword.
    pub fn matches(&self, keyword: &str) -> bool {
        self.0.iter().any(|w| w == keyword)
    }

    /// The display name (first keyword).
    pub fn primary(&self) -> &str {
        &self.0[0]
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl TryFrom<Vec<String>> for Keywords {
    type Error = ModelError;

    fn try_from(words: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(words)
    }
}

impl From<Keywords> for Vec<String> {
    fn from(keywords: Keywords) -> Self {
        keywords.0
    }
}

/// A one-way connection from `from` to `to`.
///
/// Exits are not paired: a way back is a separate exit. The five gates are
/// independent of each other; movement evaluates `locked`, then `open`, then
/// `requires_item`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exit {
    pub id: ExitId,
    pub from: RoomId,
    pub to: RoomId,
    pub keywords: Keywords,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default = "yes")]
    pub obvious: bool,
    #[serde(default = "yes")]
    pub allow_look_through: bool,
    #[serde(default = "yes")]
    pub open: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub requires_item: Option<ItemId>,
}

impl Exit {
    /// Materializes a draft with a store-assigned id.
    pub fn from_draft(id: ExitId, draft: ExitDraft) -> Self {
        Self {
            id,
            from: draft.from,
            to: draft.to,
            keywords: draft.keywords,
            description: draft.description,
            hidden: draft.hidden,
            obvious: draft.obvious,
            allow_look_through: draft.allow_look_through,
            open: draft.open,
            locked: draft.locked,
            requires_item: draft.requires_item,
        }
    }

    /// Listed in a room's "Obvious exits" line: not hidden and marked obvious.
    pub fn is_obvious(&self) -> bool {
        !self.hidden && self.obvious
    }

    /// Case-sensitive exact match against this exit's keywords.
    pub fn matches(&self, keyword: &str) -> bool {
        self.keywords.matches(keyword)
    }
}

/// The author-supplied fields of a new exit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitDraft {
    #[serde(default)]
    pub id: Option<ExitId>,
    pub from: RoomId,
    pub to: RoomId,
    pub keywords: Keywords,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default = "yes")]
    pub obvious: bool,
    #[serde(default = "yes")]
    pub allow_look_through: bool,
    #[serde(default = "yes")]
    pub open: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub requires_item: Option<ItemId>,
}

fn yes() -> bool {
    true
}

impl ExitDraft {
    /// A visible, open, unlocked exit with no item requirement.
    pub fn new(from: RoomId, to: RoomId, keywords: Keywords) -> Self {
        Self {
            id: None,
            from,
            to,
            keywords,
            description: String::new(),
            hidden: false,
            obvious: true,
            allow_look_through: true,
            open: true,
            locked: false,
            requires_item: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exit(hidden: bool, obvious: bool) -> Exit {
        let mut draft = ExitDraft::new(
            RoomId::from("a"),
            RoomId::from("b"),
            Keywords::new(["north", "n"]).unwrap(),
        );
        draft.hidden = hidden;
        draft.obvious = obvious;
        Exit::from_draft(ExitId::from("e"), draft)
    }

    #[test]
    fn test_keywords_new_empty_returns_error() {
        assert_eq!(Keywords::new(Vec::<String>::new()), Err(ModelError::NoKeywords));
    }

    #[test]
    fn test_keywords_new_blank_word_returns_error() {
        assert_eq!(Keywords::new(["north", " "]), Err(ModelError::BlankKeyword));
    }

    #[test]
    fn test_keywords_match_is_case_sensitive() {
        let kw = Keywords::new(["north", "n"]).unwrap();
        assert!(kw.matches("n"));
        assert!(!kw.matches("N"));
        assert!(!kw.matches("nor"));
        assert_eq!(kw.primary(), "north");
    }

    #[test]
    fn test_keywords_deserialize_empty_fails() {
        assert!(serde_json::from_str::<Keywords>("[]").is_err());
        let kw: Keywords = serde_json::from_str(r#"["up","u"]"#).unwrap();
        assert_eq!(kw.as_slice(), ["up", "u"]);
    }

    #[test]
    fn test_is_obvious_requires_visible_and_obvious() {
        assert!(exit(false, true).is_obvious());
        assert!(!exit(true, true).is_obvious());
        assert!(!exit(false, false).is_obvious());
        assert!(!exit(true, false).is_obvious());
    }

    #[test]
    fn test_exit_draft_json_defaults_to_walkable() {
        let draft: ExitDraft =
            serde_json::from_str(r#"{"from":"a","to":"b","keywords":["east","e"]}"#).unwrap();
        assert!(draft.open);
        assert!(draft.obvious);
        assert!(!draft.locked);
        assert!(!draft.hidden);
    }

    #[test]
    fn test_exit_json_defaults_match_draft() {
        let exit: Exit = serde_json::from_str(
            r#"{"id":"e1","from":"a","to":"b","keywords":["east","e"]}"#,
        )
        .unwrap();
        assert!(exit.open);
        assert!(exit.obvious);
        assert!(exit.allow_look_through);
        assert!(!exit.locked);
        assert!(!exit.hidden);
        assert!(exit.is_obvious());
    }
}
