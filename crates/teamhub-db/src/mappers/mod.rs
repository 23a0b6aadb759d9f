//! Model to entity mappers
//!
//! Rows store closed enums as text, so conversion is fallible: an unknown
//! stored value surfaces as `DomainError::DatabaseError`.

mod event;
mod join_request;
mod member;
mod team;

use teamhub_core::{DomainError, UnknownVariant};

fn parse_column<T>(raw: &str) -> Result<T, DomainError>
where
    T: std::str::FromStr<Err = UnknownVariant>,
{
    raw.parse()
        .map_err(|e: UnknownVariant| DomainError::DatabaseError(e.to_string()))
}

/// Convert a batch of rows, failing on the first bad one
pub fn map_all<M, E>(rows: Vec<M>) -> Result<Vec<E>, DomainError>
where
    E: TryFrom<M, Error = DomainError>,
{
    rows.into_iter().map(E::try_from).collect()
}
