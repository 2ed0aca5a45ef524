//! Field constraints gating every book write.

use super::{error::BookError, models::BookRequest};

pub const MIN_YEAR: i32 = 1000;
pub const MAX_YEAR: i32 = 2034;

/// Check a create/update payload. Fields are checked in order title, author, year.
pub fn validate(request: &BookRequest) -> Result<(), BookError> {
    if request.title.is_empty() {
        return Err(BookError::InvalidField {
            field: "title",
            reason: "required",
        });
    }
    if request.author.is_empty() {
        return Err(BookError::InvalidField {
            field: "author",
            reason: "required",
        });
    }
    if !(MIN_YEAR..=MAX_YEAR).contains(&request.year) {
        return Err(BookError::InvalidField {
            field: "year",
            reason: "out_of_range",
        });
    }
    Ok(())
}
