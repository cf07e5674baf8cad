// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    Empty(&'static str),
    Unknown { kind: &'static str, value: String },
    InvalidInstant(String),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty(name) => write!(f, "{name} must not be empty"),
            Self::Unknown { kind, value } => write!(f, "unknown {kind} `{value}`"),
            Self::InvalidInstant(value) => {
                write!(f, "`{value}` is not an RFC 3339 timestamp")
            }
        }
    }
}

impl std::error::Error for ParseError {}

macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }

            pub fn parse(raw: &str) -> Result<Self, ParseError> {
                match raw {
                    "" => Err(ParseError::Empty($kind)),
                    $($text => Ok(Self::$variant),)+
                    other => Err(ParseError::Unknown {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum!(
    /// Inspection cell on the line. Each station runs one vision model.
    Station, "station" {
        ScrewCheck => "ScrewCheck",
        LabelOCR => "LabelOCR",
        DrawingConform => "DrawingConform",
    }
);

wire_enum!(InspectionResult, "result" {
    Ok => "OK",
    Ng => "NG",
});

wire_enum!(Severity, "severity" {
    Info => "info",
    Minor => "minor",
    Major => "major",
    Critical => "critical",
});

wire_enum!(NgCode, "ngCode" {
    ScrMissing => "SCR_MISSING",
    ScrWrongType => "SCR_WRONG_TYPE",
    LblMissing => "LBL_MISSING",
    LblMisread => "LBL_MISREAD",
    DrwMisalign => "DRW_MISALIGN",
    CosScratch => "COS_SCRATCH",
});

wire_enum!(NgCategory, "ngCategory" {
    Screw => "Screw",
    Label => "Label",
    Drawing => "Drawing",
    Cosmetic => "Cosmetic",
});

wire_enum!(DeploymentKind, "deployment type" {
    Deploy => "deploy",
    Retrain => "retrain",
});

wire_enum!(StationHealth, "station status" {
    Online => "online",
    Offline => "offline",
    Degraded => "degraded",
});

impl NgCode {
    /// Defect grouping, fixed by the code prefix.
    #[must_use]
    pub const fn category(self) -> NgCategory {
        match self {
            Self::ScrMissing | Self::ScrWrongType => NgCategory::Screw,
            Self::LblMissing | Self::LblMisread => NgCategory::Label,
            Self::DrwMisalign => NgCategory::Drawing,
            Self::CosScratch => NgCategory::Cosmetic,
        }
    }
}
