use crate::model::Item;

pub mod add;
pub mod list;
pub mod purge;
pub mod remove;
pub mod search;

/// Attempts before a checked mutation gives up with `WriteConflict`.
pub(crate) const CAS_ATTEMPTS: usize = 3;

/// How mutations handle the read-then-write pair.
///
/// `Unguarded` keeps the plain sequence: read the quantity, decide, write.
/// Two clients racing on the same name can lose an update (both read `q`,
/// both write `q + 1`). That window is a documented property of the design,
/// not a bug.
///
/// `Checked` is the explicit opt-in that closes it: mutations go through the
/// store's conditional writes and retry the whole read-decide-write sequence
/// a bounded number of times before giving up with a `WriteConflict`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WritePolicy {
    #[default]
    Unguarded,
    Checked,
}

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Item state after a mutation; empty when the mutation deleted the
    /// record or touched nothing.
    pub affected: Vec<Item>,
    pub listed: Vec<Item>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected(mut self, items: Vec<Item>) -> Self {
        self.affected = items;
        self
    }

    pub fn with_listed(mut self, items: Vec<Item>) -> Self {
        self.listed = items;
        self
    }
}
