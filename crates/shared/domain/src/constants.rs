//! Domain-level constants.
//!
//! These constants define the persisted shape of the student roster.

// =============================================================================
// Collections
// =============================================================================

/// Top-level collection holding one document per student
pub const STUDENTS_COLLECTION: &str = "students";

/// Child collection nested under each student document
pub const PHONES_SUBCOLLECTION: &str = "phones";

/// Separator between collection and document segments of a path
pub const PATH_SEPARATOR: char = '/';

/// Path of the phone collection belonging to a student document.
///
/// `phones_collection("abc")` is `students/abc/phones`.
pub fn phones_collection(document_id: &str) -> String {
    format!(
        "{}{}{}{}{}",
        STUDENTS_COLLECTION, PATH_SEPARATOR, document_id, PATH_SEPARATOR, PHONES_SUBCOLLECTION
    )
}

// =============================================================================
// Fields
// =============================================================================

/// Caller-supplied logical student identifier
pub const FIELD_ID: &str = "id";

/// Student display name
pub const FIELD_NAME: &str = "name";

/// Study program
pub const FIELD_PROGRAM: &str = "program";

/// Phone number stored in each child document
pub const FIELD_NUMBER: &str = "number";
