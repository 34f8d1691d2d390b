use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
        #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
        #[archive(check_bytes)]
        #[repr(transparent)]
        pub struct $name(pub u32);

        impl $name {
            pub const fn new(id: u32) -> Self {
                Self(id)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> u32 {
                id.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(TokenId, "CoNLL-U word index (`ord`). `0` is the virtual root.");
define_id!(SentenceId, "1-based position of a sentence in its input stream.");

impl TokenId {
    /// The virtual root every sentence hangs from.
    pub const ROOT: TokenId = TokenId(0);

    pub const fn is_root(self) -> bool {
        self.0 == 0
    }
}
