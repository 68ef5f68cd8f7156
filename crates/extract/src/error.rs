use std::fmt;

#[derive(Debug)]
pub enum ExtractError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty region list, bad lookahead cap, etc.).
    ConfigValidation(String),
    /// A report kind name that is not one of npl / kol2 / realisasi.
    UnknownKind(String),
    /// Spreadsheet column offsets that cannot describe a table.
    SheetLayout { layout: &'static str, reason: String },
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::UnknownKind(kind) => {
                write!(f, "unknown report kind: '{kind}' (expected npl, kol2 or realisasi)")
            }
            Self::SheetLayout { layout, reason } => {
                write!(f, "sheet layout '{layout}': {reason}")
            }
        }
    }
}

impl std::error::Error for ExtractError {}
