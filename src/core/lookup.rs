//! Index lookups over tag collections
//!
//! Used to detect inherited (golden) and imputed tags that must not be
//! re-emitted as explicit `tag` blocks. Lookups never fail: an empty
//! haystack, an unknown field, or no match all yield `None`.

use crate::domain::MonitorTag;

/// Borrowed value of a named record field, compared by deep equality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    List(&'a [String]),
}

/// Records whose fields can be addressed by name
pub trait FieldLookup {
    /// Value of `name`, or `None` when the record has no such field
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

impl FieldLookup for MonitorTag {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "key" => Some(FieldValue::Text(&self.key)),
            "values" => Some(FieldValue::List(&self.values)),
            _ => None,
        }
    }
}

/// Index of the first element equal to `needle`
pub fn index_of<T: PartialEq>(needle: &T, haystack: &[T]) -> Option<usize> {
    haystack.iter().position(|item| item == needle)
}

/// Index of the first element whose `field` equals the same field of `needle`
///
/// Elements lacking the field are passed over.
///
/// # Examples
///
/// ```
/// use tfsynth::core::lookup::index_of_with_field;
/// use tfsynth::domain::MonitorTag;
///
/// let golden = vec![MonitorTag::key_only("account"), MonitorTag::key_only("team")];
/// let tag = MonitorTag::new("team", ["sre"]);
///
/// assert_eq!(index_of_with_field(&tag, &golden, "key"), Some(1));
/// assert_eq!(index_of_with_field(&tag, &golden, "values"), None);
/// ```
pub fn index_of_with_field<T: FieldLookup>(needle: &T, haystack: &[T], field: &str) -> Option<usize> {
    let wanted = needle.field(field)?;
    haystack
        .iter()
        .position(|item| item.field(field) == Some(wanted))
}
