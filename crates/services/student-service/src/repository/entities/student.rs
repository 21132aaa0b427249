//! Student and phone document mappings.
//!
//! Parent documents live in `students/{autoId}` as `{id, name, program}`.
//! Each phone is its own document `{number}` in `students/{autoId}/phones`.

use serde_json::Value;

use domain::{Student, FIELD_ID, FIELD_NAME, FIELD_NUMBER, FIELD_PROGRAM};

use crate::store::{Document, Fields};

/// Parent document of a student, without its phones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    pub document_id: String,
    pub id: String,
    pub name: String,
    pub program: String,
}

impl StudentRecord {
    /// Read a parent document. Missing or non-string fields become empty.
    pub fn from_document(document: &Document) -> Self {
        let text = |key: &str| document.get_str(key).unwrap_or_default().to_string();

        Self {
            document_id: document.id.clone(),
            id: text(FIELD_ID),
            name: text(FIELD_NAME),
            program: text(FIELD_PROGRAM),
        }
    }

    /// Join the parent document with its phone numbers
    pub fn into_student(self, phones: Vec<String>) -> Student {
        Student {
            document_id: Some(self.document_id),
            id: self.id,
            name: self.name,
            program: self.program,
            phones,
        }
    }
}

/// Parent payload written on create and update
pub fn student_fields(student: &Student) -> Fields {
    let mut fields = Fields::new();
    fields.insert(FIELD_ID.to_string(), Value::String(student.id.clone()));
    fields.insert(FIELD_NAME.to_string(), Value::String(student.name.clone()));
    fields.insert(
        FIELD_PROGRAM.to_string(),
        Value::String(student.program.clone()),
    );
    fields
}

/// One document of a student's phone collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneRecord {
    /// Child document id
    pub id: String,
    pub number: String,
}

impl PhoneRecord {
    /// Read a phone document, skipping ones without a string `number`
    pub fn from_document(document: &Document) -> Option<Self> {
        document.get_str(FIELD_NUMBER).map(|number| Self {
            id: document.id.clone(),
            number: number.to_string(),
        })
    }
}

/// Child payload for a single phone number
pub fn phone_fields(number: &str) -> Fields {
    let mut fields = Fields::new();
    fields.insert(FIELD_NUMBER.to_string(), Value::String(number.to_string()));
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(id: &str, value: Value) -> Document {
        Document::new(id, value.as_object().cloned().unwrap())
    }

    #[test]
    fn test_student_round_trip() {
        let student = Student::new("s1", "A", "CS", vec![]);
        let doc = Document::new("doc-1", student_fields(&student));

        let record = StudentRecord::from_document(&doc);
        let restored = record.into_student(vec!["555".to_string()]);

        assert_eq!(restored.document_id.as_deref(), Some("doc-1"));
        assert_eq!(restored.id, "s1");
        assert_eq!(restored.name, "A");
        assert_eq!(restored.program, "CS");
        assert_eq!(restored.phones, vec!["555".to_string()]);
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let doc = document("doc-1", json!({"name": 42}));

        let record = StudentRecord::from_document(&doc);

        assert_eq!(record.id, "");
        assert_eq!(record.name, "");
        assert_eq!(record.program, "");
    }

    #[test]
    fn test_student_fields_exclude_phones() {
        let student = Student::new("s1", "A", "CS", vec!["555".to_string()]);
        let fields = student_fields(&student);

        assert_eq!(fields.len(), 3);
        assert!(fields.get("phones").is_none());
    }

    #[test]
    fn test_phone_without_number_is_skipped() {
        assert!(PhoneRecord::from_document(&document("p1", json!({}))).is_none());
        assert!(PhoneRecord::from_document(&document("p2", json!({"number": 5}))).is_none());

        let phone = PhoneRecord::from_document(&document("p3", json!({"number": "555"}))).unwrap();
        assert_eq!(phone.id, "p3");
        assert_eq!(phone.number, "555");
    }
}
