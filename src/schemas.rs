//! Static crime-type question schemas.
//!
//! The question sets are configuration data baked into the binary; intake
//! links carry a serialized copy so the form a guest sees stays stable for
//! the life of the link.

pub mod crime_types;

pub use crime_types::{
    crime_label, crime_schema, crime_type_tags, default_form_schema, CrimeSchema, FormLimits,
    FormSchema, Question, QuestionKind, CRIME_SCHEMAS,
};
