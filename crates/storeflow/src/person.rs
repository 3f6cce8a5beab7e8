// Person records for data-driven checkout runs
//
// The fixture file carries a document-ordered list of person entries, each
// with seven required contact fields. Reads fail fast: a missing file, an
// unparsable document, or an entry with a missing sub-field fails the whole
// read before any scenario body executes; a partially-malformed document
// never silently drops just its bad entries.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// One form-fill identity. Immutable after construction; consumed by value
/// for the duration of a single parameterized scenario.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub postcode: String,
    pub city: String,
    pub phone: String,
    pub email: String,
}

#[derive(Deserialize)]
struct PeopleFile {
    people: Vec<Person>,
}

/// Reads person records from a JSON fixture of the form
/// `{"people": [ ... ]}`, preserving document order.
///
/// A zero-entry file yields an empty vector (the parameterized scenario
/// then runs zero times); every failure mode maps to
/// [`Error::DataFile`] with the offending path attached.
pub fn read_people(path: impl AsRef<Path>) -> Result<Vec<Person>> {
    let path = path.as_ref();
    let data_err = |source: Error| Error::DataFile {
        path: path.to_path_buf(),
        source: Box::new(source),
    };

    let raw = std::fs::read_to_string(path).map_err(|e| data_err(e.into()))?;
    let file: PeopleFile = serde_json::from_str(&raw).map_err(|e| data_err(e.into()))?;
    Ok(file.people)
}
