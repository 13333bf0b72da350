//! Client side of the contact form: the form state shown to the visitor and
//! the transport that submits it to `POST /api/contact`.

pub use crate::{
    api::{ContactApi, ContactApiError, ContactApiResponse, ContactClient},
    form::{
        ContactForm, ContactFormData, ContactFormField, ContactFormStatus, UnknownFieldError,
    },
};

mod api;
mod form;
