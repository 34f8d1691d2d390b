use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Rendered in every column whose value does not apply.
pub const NOT_APPLICABLE: &str = "_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelError {
    pub kind: &'static str,
    pub value: alloc::string::String,
}

impl fmt::Display for LabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} label: '{}'", self.kind, self.value)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LabelError {}

macro_rules! define_label {
    ($name:ident, $kind:expr, { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
        #[repr(u8)]
        pub enum $name {
            $(
                #[cfg_attr(feature = "serde", serde(rename = $text))]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = LabelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(LabelError { kind: $kind, value: other.into() }),
                }
            }
        }
    };
}

define_label!(ClauseType, "clause type", {
    Main => "HV",
    Dependent => "VV",
});

define_label!(ClausePosition, "clause position", {
    Initial => "iniciální",
    PostInitial => "postiniciální",
    Medial => "mediální",
    PreFinal => "prefinální",
    Final => "finální",
});

define_label!(RelationToRegent, "relation to regent", {
    ContactPreverbal => "kontaktní preverbální",
    ContactPostverbal => "kontaktní postverbální",
    ContactInterverbal => "kontaktní interverbální",
    Isolated => "izolovaná",
    Other => "jiné",
});

/// Renders an optional label, falling back to [`NOT_APPLICABLE`].
pub fn or_not_applicable<T: fmt::Display>(value: Option<T>) -> alloc::string::String {
    match value {
        Some(v) => format!("{}", v),
        None => NOT_APPLICABLE.into(),
    }
}
