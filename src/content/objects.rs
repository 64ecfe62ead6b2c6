//! Small accessors over `lopdf` objects.

use crate::error::Result;
use lopdf::{Dictionary, Document, Object};

/// Follow a reference to the object it points at.
pub(crate) fn resolve<'a>(doc: &'a Document, object: &'a Object) -> Result<&'a Object> {
    match object {
        Object::Reference(id) => Ok(doc.get_object(*id)?),
        other => Ok(other),
    }
}

/// Look up a dictionary entry, following a reference.
pub(crate) fn get_resolved<'a>(
    doc: &'a Document,
    dict: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Object> {
    dict.get(key).ok().and_then(|obj| resolve(doc, obj).ok())
}

/// Numeric value of an integer or real object.
pub(crate) fn number(object: &Object) -> Option<f32> {
    match object {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}

/// Name bytes of a name object.
pub(crate) fn name(object: &Object) -> Option<&[u8]> {
    match object {
        Object::Name(n) => Some(n.as_slice()),
        _ => None,
    }
}

/// Numbers of an array operand list, or `None` if any is not numeric.
pub(crate) fn numbers(objects: &[Object]) -> Option<Vec<f32>> {
    objects.iter().map(number).collect()
}
