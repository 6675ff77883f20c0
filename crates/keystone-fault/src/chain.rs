use std::error::Error;

use crate::fault::Fault;
use crate::tag::Tag;

/// Walk `err` and its sources and return the first [`Fault`]
///
/// The walk starts at `err` itself, so an outer fault wins over any fault it
/// wraps.
pub fn find_fault<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a Fault> {
    let mut current = Some(err);
    while let Some(err) = current {
        if let Some(fault) = err.downcast_ref::<Fault>() {
            return Some(fault);
        }
        current = err.source();
    }
    None
}

/// Tag of the first [`Fault`] in the error chain
///
/// Returns [`Tag::UNTAGGED`] for `None` or when no fault is found.
///
/// ```
/// use keystone_fault::{Fault, Tag, get_tag};
///
/// let err = Fault::not_found("user not found");
/// match get_tag(Some(&err)) {
///     tag if tag == Tag::NOT_FOUND => {}
///     other => panic!("unexpected tag {other}"),
/// }
/// ```
pub fn get_tag(err: Option<&(dyn Error + 'static)>) -> Tag {
    err.and_then(find_fault).map_or(Tag::UNTAGGED, |fault| fault.tag().clone())
}
