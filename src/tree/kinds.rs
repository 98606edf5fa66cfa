//! Element kind tags
//!
//! Every target format declares its closed set of element kinds with
//! [`element_kinds!`], which generates the enum, the integer type tag and the
//! tag-name lookups used by the renderers.

use std::fmt::Debug;
use std::hash::Hash;

/// A closed enumeration of element kinds for one target format
pub trait ElementKind: Copy + Eq + Hash + Debug + 'static {
    /// Name used when the element is serialized
    fn tag_name(&self) -> &'static str;

    /// Inverse of [`ElementKind::tag_name`], for reading trees back
    fn from_tag_name(name: &str) -> Option<Self>;

    /// Integer type tag
    fn type_tag(&self) -> u16;

    /// The comment kind of this format
    fn comment() -> Self;

    fn is_comment(&self) -> bool {
        *self == Self::comment()
    }
}

/// Declare an element kind enumeration.
///
/// A `Comment` variant is always added first (type tag 0).
///
/// ```ignore
/// element_kinds! {
///     pub enum MeiKind {
///         Mei => "mei",
///         Note => "note",
///     }
/// }
/// ```
#[macro_export]
macro_rules! element_kinds {
    ($(#[$meta:meta])* $vis:vis enum $name:ident { $($variant:ident => $tag:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            Comment,
            $($variant),+
        }

        impl $crate::tree::ElementKind for $name {
            fn tag_name(&self) -> &'static str {
                match self {
                    $name::Comment => "#comment",
                    $($name::$variant => $tag),+
                }
            }

            fn from_tag_name(name: &str) -> Option<Self> {
                match name {
                    $($tag => Some($name::$variant),)+
                    _ => None,
                }
            }

            fn type_tag(&self) -> u16 {
                *self as u16
            }

            fn comment() -> Self {
                $name::Comment
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::ElementKind;

    crate::element_kinds! {
        enum SampleKind {
            Measure => "measure",
            Note => "note",
            TimeModification => "time-modification",
        }
    }

    #[test]
    fn test_tag_names_round_trip() {
        for kind in [SampleKind::Measure, SampleKind::Note, SampleKind::TimeModification] {
            assert_eq!(SampleKind::from_tag_name(kind.tag_name()), Some(kind));
        }
        assert_eq!(SampleKind::from_tag_name("backup"), None);
    }

    #[test]
    fn test_comment_is_type_tag_zero() {
        assert_eq!(SampleKind::comment().type_tag(), 0);
        assert!(SampleKind::Comment.is_comment());
        assert!(!SampleKind::Note.is_comment());
        assert_eq!(SampleKind::TimeModification.type_tag(), 3);
    }
}
