use thiserror::Error;

use crate::RelationKind;

/// Validation failures returned by model mutations.
///
/// All of them are local and recoverable: the model is left untouched when one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("an element named '{0}' already exists")]
    DuplicateName(String),

    #[error("node '{0}' is not in the graph")]
    UnknownNode(String),

    #[error("node '{0}' cannot be related to itself")]
    SelfRelation(String),

    #[error("relation '{from}' -[{kind}]-> '{to}' already exists")]
    DuplicateRelation {
        from: String,
        to: String,
        kind: RelationKind,
    },

    #[error("frame '{0}' does not exist")]
    UnknownFrame(String),

    #[error("{0} must not be empty")]
    EmptyInput(&'static str),

    #[error("unknown {category} kind '{value}'")]
    UnknownKind {
        category: &'static str,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Trims `value` and rejects it with [`Error::EmptyInput`] when nothing is left.
pub(crate) fn non_blank<'a>(value: &'a str, field: &'static str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyInput(field));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_blank_trims() {
        assert_eq!(non_blank("  bird ", "name"), Ok("bird"));
    }

    #[test]
    fn non_blank_rejects_whitespace() {
        assert_eq!(non_blank(" \t ", "slot value"), Err(Error::EmptyInput("slot value")));
    }

    #[test]
    fn messages_name_the_offender() {
        let err = Error::DuplicateRelation {
            from: "sparrow".to_string(),
            to: "bird".to_string(),
            kind: RelationKind::IsA,
        };
        assert_eq!(
            err.to_string(),
            "relation 'sparrow' -[is a]-> 'bird' already exists"
        );
    }
}
