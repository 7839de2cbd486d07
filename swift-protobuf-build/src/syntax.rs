use crate::error::{Error, Result};

/// The schema era of a `.proto` file.
///
/// `Proto2` files track presence for every singular field and may carry
/// explicit defaults. `Proto3` files only track presence for message fields
/// and fields declared `optional`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    Proto2,
    Proto3,
}

impl Syntax {
    pub fn from_descriptor(syntax: Option<&str>) -> Result<Syntax> {
        match syntax {
            None | Some("") | Some("proto2") => Ok(Syntax::Proto2),
            Some("proto3") => Ok(Syntax::Proto3),
            Some(s) => Err(Error::UnsupportedSyntax(s.to_string())),
        }
    }

    pub fn is_proto3(self) -> bool {
        self == Syntax::Proto3
    }
}
