//! Common traits shared by the core and its callers

/// Supplies the duration, in minutes, of the next call to register
///
/// The registry only consults the source once it has decided to record a
/// call, so a busy booth never consumes a value. Implementations may return
/// any integer; non-positive values are rejected when the call is built.
pub trait DurationSource {
    fn next_duration(&mut self) -> i64;
}

impl<F> DurationSource for F
where
    F: FnMut() -> i64,
{
    fn next_duration(&mut self) -> i64 {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_source() {
        let mut next = 0;
        let mut source = move || {
            next += 1;
            next
        };
        assert_eq!(source.next_duration(), 1);
        assert_eq!(source.next_duration(), 2);
    }

    #[test]
    fn test_trait_object_source() {
        let mut boxed: Box<dyn DurationSource> = Box::new(|| 7);
        let source: &mut dyn DurationSource = boxed.as_mut();
        assert_eq!(source.next_duration(), 7);
    }
}
