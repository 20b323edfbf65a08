use super::{FieldSpec, FormSpec};
use crate::domain::feedback::feedback::TITLE_MAX_LEN;
use crate::domain::users::user::{EMAIL_MAX_LEN, NAME_MAX_LEN, USERNAME_MAX_LEN};

/// Password bounds, shared by register and login.
pub const PASSWORD_MIN_LEN: usize = 6;
pub const PASSWORD_MAX_LEN: usize = 55;

pub static REGISTER_FORM: FormSpec = FormSpec {
    name: "register",
    fields: &[
        FieldSpec::required("username").max(USERNAME_MAX_LEN),
        FieldSpec::required("password").between(PASSWORD_MIN_LEN, PASSWORD_MAX_LEN),
        FieldSpec::required("email")
            .max(EMAIL_MAX_LEN)
            .email(),
        FieldSpec::required("first_name").max(NAME_MAX_LEN),
        FieldSpec::required("last_name").max(NAME_MAX_LEN),
    ],
};

pub static FEEDBACK_FORM: FormSpec = FormSpec {
    name: "feedback",
    fields: &[
        FieldSpec::required("title").max(TITLE_MAX_LEN),
        FieldSpec::required("content"),
    ],
};

pub static LOGIN_FORM: FormSpec = FormSpec {
    name: "login",
    fields: &[
        FieldSpec::required("username").between(1, USERNAME_MAX_LEN),
        FieldSpec::required("password").between(PASSWORD_MIN_LEN, PASSWORD_MAX_LEN),
    ],
};

/// Confirmation gate for destructive actions; intentionally has no fields.
pub static DELETE_FORM: FormSpec = FormSpec {
    name: "delete",
    fields: &[],
};
