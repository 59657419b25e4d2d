//! Command words and how they map to verbs.

use std::collections::HashMap;

/// Compass and vertical directions with their one- or two-letter aliases.
pub const DIRECTIONS: [(&str, &str); 10] = [
    ("north", "n"),
    ("south", "s"),
    ("east", "e"),
    ("west", "w"),
    ("northeast", "ne"),
    ("northwest", "nw"),
    ("southeast", "se"),
    ("southwest", "sw"),
    ("up", "u"),
    ("down", "d"),
];

/// What a command word asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Look,
    /// `move <direction>`.
    Move,
    /// A direction typed on its own. Carries the full direction word.
    Go(&'static str),
    Say,
    Quit,
    Teleport,
    Rooms,
    Zones,
    Room,
    Exit,
    Zone,
    Who,
}

/// A parsed input line.
#[derive(Debug, PartialEq, Eq)]
pub enum Parsed<'a> {
    /// Blank input.
    Empty,
    /// The first word is not a registered command (lower-cased).
    Unknown(String),
    Command { verb: Verb, args: Vec<&'a str> },
}

/// Maps command words to verbs.
///
/// Words are matched case-insensitively; arguments keep their case.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    verbs: HashMap<String, Verb>,
}

impl CommandRegistry {
    /// A registry with every built-in command and alias.
    pub fn new() -> Self {
        let mut registry = Self {
            verbs: HashMap::new(),
        };

        registry.register("look", Verb::Look);
        registry.register("l", Verb::Look);
        registry.register("move", Verb::Move);
        registry.register("say", Verb::Say);
        registry.register("quit", Verb::Quit);

        for (full, short) in DIRECTIONS {
            registry.register(full, Verb::Go(full));
            registry.register(short, Verb::Go(full));
        }

        registry.register("teleport", Verb::Teleport);
        registry.register("tp", Verb::Teleport);
        registry.register("goto", Verb::Teleport);
        registry.register("rooms", Verb::Rooms);
        registry.register("zones", Verb::Zones);
        registry.register("room", Verb::Room);
        registry.register("exit", Verb::Exit);
        registry.register("zone", Verb::Zone);
        registry.register("who", Verb::Who);

        registry
    }

    /// Adds or replaces a command word.
    pub fn register(&mut self, word: &str, verb: Verb) {
        self.verbs.insert(word.to_lowercase(), verb);
    }

    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Splits `line` on whitespace and resolves the first word.
    pub fn parse<'a>(&self, line: &'a str) -> Parsed<'a> {
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            return Parsed::Empty;
        };
        let word = first.to_lowercase();
        match self.verbs.get(&word) {
            Some(verb) => Parsed::Command {
                verb: *verb,
                args: words.collect(),
            },
            None => Parsed::Unknown(word),
        }
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The keyword list for a new exit: a known direction in either form
/// becomes `[full, short]`, anything else is kept as the single keyword.
pub fn expand_direction(dir: &str) -> Vec<String> {
    let dir = dir.to_lowercase();
    DIRECTIONS
        .iter()
        .find(|(full, short)| *full == dir || *short == dir)
        .map(|(full, short)| vec![full.to_string(), short.to_string()])
        .unwrap_or_else(|| vec![dir])
}
