//! Structural phase: reading an api document attribute by attribute.
//!
//! A malformed attribute is recorded at its path and dropped, and the rest
//! of the document is still read. A list element that is not a node drops
//! the whole list. Only input that is not a JSON document fails as a whole.

use serde_json::Value as Json;
use serde_path_to_error::{Path, Segment};

use crate::api;
use crate::entity::{EntityDescriptor, EntityType, FieldShape};
use crate::error::{ScalarError, StructuralError};
use crate::null_flavor::NullFlavor;
use crate::path::{FieldPath, PathSegment};

/// An api document and the faults of the attributes dropped while reading it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadDocument {
    pub icsr: api::Icsr,
    pub faults: Vec<StructuralError>,
}

impl ReadDocument {
    pub fn is_clean(&self) -> bool {
        self.faults.is_empty()
    }
}

/// Reads an api document from JSON text, collecting one fault per
/// malformed attribute.
pub fn read_document(text: &str) -> Result<ReadDocument, StructuralError> {
    let mut json: Json = serde_json::from_str(text)?;
    let root = api::Icsr::schema();
    let mut faults = Vec::new();
    drop_unaccepted_null_flavors(&mut json, root, &FieldPath::root(), &mut faults);

    loop {
        let error = match serde_path_to_error::deserialize::<_, api::Icsr>(&json) {
            Ok(icsr) => return Ok(ReadDocument { icsr, faults }),
            Err(error) => error,
        };
        let path = attribute_path(root, error.path());
        let fault = StructuralError::new(path, error.inner().to_string());
        if !remove_attribute(&mut json, fault.path.segments()) {
            return Err(fault);
        }
        faults.push(fault);
    }
}

/// Drops every attribute carrying a null flavor its field does not accept.
fn drop_unaccepted_null_flavors(
    json: &mut Json,
    entity: &'static EntityDescriptor,
    at: &FieldPath,
    faults: &mut Vec<StructuralError>,
) {
    let Some(object) = json.as_object_mut() else {
        return;
    };
    for field in entity.fields {
        let path = at.field(field.name);
        match field.shape {
            FieldShape::Scalar => {
                let flavor = object
                    .get(field.name)
                    .and_then(|attribute| attribute.get("null_flavor"))
                    .and_then(Json::as_str)
                    .and_then(|code| code.parse::<NullFlavor>().ok());
                if let Some(flavor) = flavor.filter(|flavor| !field.accepts(*flavor)) {
                    object.remove(field.name);
                    let reason = ScalarError::NullFlavorNotAccepted(flavor);
                    faults.push(StructuralError::new(path, reason.to_string()));
                }
            }
            FieldShape::Child(child) => {
                if let Some(node) = object.get_mut(field.name) {
                    drop_unaccepted_null_flavors(node, child(), &path, faults);
                }
            }
            FieldShape::Children(child) => {
                if let Some(nodes) = object.get_mut(field.name).and_then(Json::as_array_mut) {
                    for (index, node) in nodes.iter_mut().enumerate() {
                        drop_unaccepted_null_flavors(node, child(), &path.index(index), faults);
                    }
                }
            }
        }
    }
}

/// Cuts a deserializer error location down to the attribute it falls in.
fn attribute_path(root: &'static EntityDescriptor, location: &Path) -> FieldPath {
    let mut path = FieldPath::root();
    let mut entity = root;
    let mut in_list = false;
    for segment in location.iter() {
        match (segment, in_list) {
            (Segment::Seq { index }, true) => {
                path = path.index(*index);
                in_list = false;
            }
            (Segment::Map { key }, false) => {
                let Some(field) = entity.field(key) else {
                    break;
                };
                path = path.field(field.name);
                match field.shape {
                    FieldShape::Scalar => break,
                    FieldShape::Child(child) => entity = child(),
                    FieldShape::Children(child) => {
                        entity = child();
                        in_list = true;
                    }
                }
            }
            _ => break,
        }
    }
    path
}

fn remove_attribute(json: &mut Json, segments: &[PathSegment]) -> bool {
    match segments {
        [] => false,
        [PathSegment::Field(name)] | [PathSegment::Field(name), PathSegment::Index(_)] => json
            .as_object_mut()
            .is_some_and(|object| object.remove(name).is_some()),
        [PathSegment::Field(name), rest @ ..] => json
            .get_mut(name.as_str())
            .is_some_and(|next| remove_attribute(next, rest)),
        [PathSegment::Index(index), rest @ ..] => json
            .get_mut(*index)
            .is_some_and(|next| remove_attribute(next, rest)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_element_fault_drops_the_list() {
        let mut json = serde_json::json!({"e_i_reaction_event": [5], "h_narrative_case_summary": {}});
        let path = FieldPath::root().field("e_i_reaction_event").index(0);

        assert!(remove_attribute(&mut json, path.segments()));
        assert_eq!(json, serde_json::json!({"h_narrative_case_summary": {}}));
    }

    #[test]
    fn missing_attribute_cannot_be_removed() {
        let mut json = serde_json::json!({});
        let path = FieldPath::root().field("h_narrative_case_summary").field("h_1_case_narrative");
        assert!(!remove_attribute(&mut json, path.segments()));
    }

    #[test]
    fn non_object_document_fails_as_a_whole() {
        let error = read_document("[1, 2]").unwrap_err();
        assert!(error.path.is_root());
    }

    #[test]
    fn syntax_error_fails_as_a_whole() {
        let error = read_document("{\"e_i_reaction_event\": [").unwrap_err();
        assert!(error.path.is_root());
        assert!(error.message.contains("line 1"), "{}", error.message);
    }
}
