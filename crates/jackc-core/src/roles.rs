//! Declaration roles: how a name is stored and what kind of subroutine declares it.

use std::fmt;

/// Storage kind of a symbol.
///
/// `Static` and `Field` live in the class-level table, `Argument` and `Local`
/// in the subroutine-level table. Slot indices are numbered densely per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
    Static,
    Field,
    Argument,
    Local,
}

impl StorageKind {
    /// Parse the storage keyword of a class variable declaration.
    pub fn from_class_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "static" => Some(StorageKind::Static),
            "field" => Some(StorageKind::Field),
            _ => None,
        }
    }

    /// Whether symbols of this kind belong in the class-level table.
    pub fn is_class_level(self) -> bool {
        matches!(self, StorageKind::Static | StorageKind::Field)
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StorageKind::Static => "static",
            StorageKind::Field => "field",
            StorageKind::Argument => "argument",
            StorageKind::Local => "local",
        };
        f.write_str(s)
    }
}

/// The three kinds of subroutine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubroutineKind {
    /// Allocates and returns a new instance.
    Constructor,
    /// No receiver.
    Function,
    /// Receives its object as argument 0.
    Method,
}

impl SubroutineKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "constructor" => Some(SubroutineKind::Constructor),
            "function" => Some(SubroutineKind::Function),
            "method" => Some(SubroutineKind::Method),
            _ => None,
        }
    }
}

impl fmt::Display for SubroutineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SubroutineKind::Constructor => "constructor",
            SubroutineKind::Function => "function",
            SubroutineKind::Method => "method",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_keywords() {
        assert_eq!(StorageKind::from_class_keyword("static"), Some(StorageKind::Static));
        assert_eq!(StorageKind::from_class_keyword("field"), Some(StorageKind::Field));
        assert_eq!(StorageKind::from_class_keyword("var"), None);
    }

    #[test]
    fn class_level_kinds() {
        assert!(StorageKind::Field.is_class_level());
        assert!(!StorageKind::Local.is_class_level());
    }

    #[test]
    fn subroutine_keywords() {
        assert_eq!(SubroutineKind::from_keyword("method"), Some(SubroutineKind::Method));
        assert_eq!(SubroutineKind::from_keyword("static"), None);
        assert_eq!(SubroutineKind::Constructor.to_string(), "constructor");
    }
}
