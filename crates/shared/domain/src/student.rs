//! Student domain entity.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Student domain entity
///
/// `phones` mirrors the child collection at read time. Child document ids
/// are not kept, only the stored numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Store-assigned parent document id (None until first persisted)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    /// Caller-supplied identifier, not guaranteed unique
    pub id: String,
    pub name: String,
    pub program: String,
    #[serde(default)]
    pub phones: Vec<String>,
}

impl Student {
    /// Create a student that has not been persisted yet
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        program: impl Into<String>,
        phones: Vec<String>,
    ) -> Self {
        Self {
            document_id: None,
            id: id.into(),
            name: name.into(),
            program: program.into(),
            phones,
        }
    }

    /// Attach the store-assigned document id
    pub fn with_document_id(mut self, document_id: impl Into<String>) -> Self {
        self.document_id = Some(document_id.into());
        self
    }

    /// Check if the student has been written to the store
    pub fn is_persisted(&self) -> bool {
        self.document_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    /// Document id of a persisted student.
    ///
    /// An empty id counts as missing.
    pub fn require_document_id(&self) -> DomainResult<&str> {
        match self.document_id.as_deref() {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(DomainError::MissingDocumentId),
        }
    }
}

/// Sort a roster by name, keeping store order among equal names.
pub fn sort_by_name(students: &mut [Student]) {
    students.sort_by(|a, b| a.name.cmp(&b.name));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_student_is_not_persisted() {
        let student = Student::new("s1", "Amy", "CS", vec!["555".to_string()]);

        assert!(!student.is_persisted());
        assert_eq!(
            student.require_document_id(),
            Err(DomainError::MissingDocumentId)
        );
    }

    #[test]
    fn test_empty_document_id_counts_as_missing() {
        let student = Student::new("s1", "Amy", "CS", vec![]).with_document_id("");

        assert!(!student.is_persisted());
        assert!(student.require_document_id().is_err());
    }

    #[test]
    fn test_require_document_id() {
        let student = Student::new("s1", "Amy", "CS", vec![]).with_document_id("doc-1");

        assert_eq!(student.require_document_id(), Ok("doc-1"));
    }

    #[test]
    fn test_sort_by_name_is_stable() {
        let mut students = vec![
            Student::new("3", "Zoe", "", vec![]),
            Student::new("1", "Amy", "", vec![]),
            Student::new("2", "Amy", "", vec![]),
        ];

        sort_by_name(&mut students);

        let ids: Vec<&str> = students.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_sort_is_case_sensitive() {
        let mut students = vec![
            Student::new("1", "amy", "", vec![]),
            Student::new("2", "Zoe", "", vec![]),
        ];

        sort_by_name(&mut students);

        // Uppercase sorts before lowercase in byte order
        assert_eq!(students[0].name, "Zoe");
    }

    #[test]
    fn test_missing_phones_deserialize_as_empty() {
        let student: Student =
            serde_json::from_str(r#"{"id":"s1","name":"A","program":"CS"}"#).unwrap();

        assert!(student.phones.is_empty());
        assert!(student.document_id.is_none());
    }
}
