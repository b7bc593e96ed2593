//! Assertion subjects.

use std::{any::Any, fmt};

/// Anything an assertion can be invoked on.
///
/// Implemented for every `'static` type with a `Debug` representation, so
/// callers can hand any value to [`crate::expect`]; the guard decides whether
/// it is a usable endpoint.
pub trait Subject: Any + fmt::Debug {
    /// Name of the concrete type, for diagnostics.
    fn type_name(&self) -> &'static str;

    /// Upcast for downcasting to a concrete endpoint.
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + fmt::Debug> Subject for T {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use sockmock_endpoint::MockEndpoint;

    use super::*;

    #[test]
    fn type_name_reflects_concrete_type() {
        let subject: &dyn Subject = &"boom";
        assert_eq!(subject.type_name(), "&str");
    }

    #[test]
    fn endpoint_downcasts() {
        let endpoint = MockEndpoint::new("ws://localhost:1234");
        let subject: &dyn Subject = &endpoint;
        assert!(subject.as_any().downcast_ref::<MockEndpoint>().is_some());

        let other: &dyn Subject = &42_u32;
        assert!(other.as_any().downcast_ref::<MockEndpoint>().is_none());
    }
}
