use crate::error::{ErrorContext, PrebinError};

pub fn format_error_chain(error: &PrebinError) -> String {
    let context = ErrorContext::new(error);
    context.to_string()
}
