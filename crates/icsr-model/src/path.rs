use std::fmt;

use serde::{Deserialize, Serialize};

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Field(String),
}

/// Structural location of a node or attribute inside a document tree.
///
/// Serializes as a location array such as
/// `["g_k_drug_information", 0, "g_k_9_i_drug_reaction_matrix", 1]` and
/// displays as `g_k_drug_information[0].g_k_9_i_drug_reaction_matrix[1]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn field(&self, name: impl Into<String>) -> Self {
        let mut path = self.clone();
        path.0.push(PathSegment::Field(name.into()));
        path
    }

    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        let mut path = self.clone();
        path.0.push(PathSegment::Index(index));
        path
    }

    /// Appends `suffix` to this path.
    #[must_use]
    pub fn join(&self, suffix: &FieldPath) -> Self {
        let mut path = self.clone();
        path.0.extend(suffix.0.iter().cloned());
        path
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }
}

impl FromIterator<PathSegment> for FieldPath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (position, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::Field(name) if position == 0 => f.write_str(name)?,
                PathSegment::Field(name) => write!(f, ".{name}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_fields_and_indices() {
        let path = FieldPath::root()
            .field("g_k_drug_information")
            .index(2)
            .field("g_k_9_i_drug_reaction_matrix")
            .index(0)
            .field("g_k_9_i_1_reaction_assessed");
        assert_eq!(
            path.to_string(),
            "g_k_drug_information[2].g_k_9_i_drug_reaction_matrix[0].g_k_9_i_1_reaction_assessed"
        );
        assert_eq!(FieldPath::root().to_string(), "<root>");
    }

    #[test]
    fn serializes_as_location_array() {
        let path = FieldPath::root().field("e_i_reaction_event").index(1);
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(json, serde_json::json!(["e_i_reaction_event", 1]));
    }
}
