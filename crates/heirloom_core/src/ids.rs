//! Strongly typed entity identifiers.

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
            derive_more::Display,
            derive_more::From,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// The raw numeric value.
            pub fn get(self) -> i64 {
                self.0
            }
        }
    };
}

entity_id!(
    /// Identifies a storyteller.
    UserId
);
entity_id!(
    /// Identifies a memory branch.
    BranchId
);
entity_id!(
    /// Identifies a raw input (fragment).
    InputId
);
entity_id!(
    /// Identifies a generated story.
    StoryId
);
