use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordClass(pub u16);

impl RecordClass {
    /// IN, the only class the proxy forwards or classifies.
    pub const INTERNET: RecordClass = RecordClass(1);
}

impl fmt::Display for RecordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            RecordClass::INTERNET => f.write_str("IN"),
            RecordClass(code) => write!(f, "CLASS{}", code),
        }
    }
}
