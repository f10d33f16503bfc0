mod sanitize;
mod validation;

pub use sanitize::{sanitize_for_storage, unescape_for_display};
pub use validation::{
    check_field, check_list, check_optional_field, parse_calendar_date, parse_choice,
    validate_and_sanitize_input, FieldKind, Validate, ValidationError,
};
