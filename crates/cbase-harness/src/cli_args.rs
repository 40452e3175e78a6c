//! Command-line words as printf arguments.

use cbase_core::Arg;

/// An owned argument parsed from a command-line word.
#[derive(Debug, Clone, PartialEq)]
pub enum CliArg {
    Int(i64),
    Float(f64),
    Str(String),
}

impl CliArg {
    /// Integer if it parses as one, then float, else the word itself.
    pub fn parse(word: &str) -> Self {
        if let Ok(v) = word.parse::<i64>() {
            Self::Int(v)
        } else if let Ok(v) = word.parse::<f64>() {
            Self::Float(v)
        } else {
            Self::Str(word.to_owned())
        }
    }

    pub fn as_arg(&self) -> Arg<'_> {
        match self {
            Self::Int(v) => Arg::Int(*v),
            Self::Float(v) => Arg::Float(*v),
            Self::Str(s) => Arg::Str(s.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_prefers_integers() {
        assert_eq!(CliArg::parse("42"), CliArg::Int(42));
        assert_eq!(CliArg::parse("-7"), CliArg::Int(-7));
        assert_eq!(CliArg::parse("2.5"), CliArg::Float(2.5));
        assert_eq!(CliArg::parse("1e3"), CliArg::Float(1000.0));
        assert_eq!(CliArg::parse("abc"), CliArg::Str("abc".into()));
        assert_eq!(CliArg::parse(""), CliArg::Str(String::new()));
    }

    #[test]
    fn borrows_as_arg() {
        let word = CliArg::parse("name");
        assert!(matches!(word.as_arg(), Arg::Str("name")));
        assert!(matches!(CliArg::Int(3).as_arg(), Arg::Int(3)));
    }
}
