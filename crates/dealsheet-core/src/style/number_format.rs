//! Number format types

use std::fmt;

/// Number format for cell display
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NumberFormat {
    /// General format (default)
    #[default]
    General,

    /// Format code, e.g. `$#,##0.00`
    Custom(String),
}

impl NumberFormat {
    /// `$#,##0.00`
    pub const CURRENCY: &'static str = "$#,##0.00";
    /// `0.00%`
    pub const PERCENT: &'static str = "0.00%";
    /// `0.0`, durations in months
    pub const MONTHS: &'static str = "0.0";
    /// `0.00`, coverage ratios
    pub const RATIO: &'static str = "0.00";

    /// Create a number format from a format code
    pub fn from_code<S: Into<String>>(code: S) -> Self {
        let code = code.into();
        if code.eq_ignore_ascii_case("general") {
            NumberFormat::General
        } else {
            NumberFormat::Custom(code)
        }
    }

    pub fn currency() -> Self {
        Self::from_code(Self::CURRENCY)
    }

    pub fn percent() -> Self {
        Self::from_code(Self::PERCENT)
    }

    pub fn months() -> Self {
        Self::from_code(Self::MONTHS)
    }

    pub fn ratio() -> Self {
        Self::from_code(Self::RATIO)
    }

    /// The format code as a host would receive it
    pub fn code(&self) -> &str {
        match self {
            NumberFormat::General => "General",
            NumberFormat::Custom(code) => code,
        }
    }

    /// XLSX built-in format id for codes that have one
    pub fn builtin_id(&self) -> Option<u32> {
        match self.code() {
            "General" => Some(0),
            "0" => Some(1),
            "0.00" => Some(2),
            "#,##0" => Some(3),
            "#,##0.00" => Some(4),
            "0%" => Some(9),
            "0.00%" => Some(10),
            "0.00E+00" => Some(11),
            "@" => Some(49),
            _ => None,
        }
    }
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
