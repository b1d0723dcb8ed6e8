use gl::types::GLenum;
use thiserror::Error;

/// Error drained from the driver's error flag right after a single call.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("{call} raised driver error {code:#06x} at {location}")]
pub struct DriverError {
    pub call: &'static str,
    pub code: GLenum,
    pub location: &'static str,
}

/// Drains any error flags left over from earlier, unchecked calls.
pub fn clear_errors() {
    while unsafe { gl::GetError() } != gl::NO_ERROR {}
}

pub fn check(call: &'static str, location: &'static str) -> Result<(), DriverError> {
    let code = unsafe { gl::GetError() };
    if code == gl::NO_ERROR {
        Ok(())
    } else {
        Err(DriverError {
            call,
            code,
            location,
        })
    }
}

/// Wraps one driver call in a clear-then-check scope, so a failure is
/// reported against the call that raised it instead of some later one.
#[macro_export]
macro_rules! gl_call {
    ($call:expr) => {{
        $crate::error::clear_errors();
        #[allow(unused_unsafe)]
        let out = unsafe { $call };
        $crate::error::check(stringify!($call), concat!(file!(), ":", line!())).map(|_| out)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_error_names_call_and_location() {
        let err = DriverError {
            call: "gl::DrawElements(...)",
            code: 0x0502,
            location: "renderer.rs:31",
        };

        assert_eq!(
            err.to_string(),
            "gl::DrawElements(...) raised driver error 0x0502 at renderer.rs:31"
        );
    }
}
