/// Asserts that running `$run` panics. The block is run with
/// [`AssertUnwindSafe`](std::panic::AssertUnwindSafe), so it may capture shared cells such as
/// drop counters. A literal pattern can be given to also check the panic message.
#[allow(unused_macros)]
macro_rules! assert_panics {
    ($run:block) => {{
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $run));
        assert!(result.is_err(), "Block was expected to panic, but returned normally.");
    }};
    ($run:block, $expected:literal) => {{
        let Err(payload) = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $run)) else {
            panic!("Block was expected to panic with {:?}, but returned normally.", $expected);
        };
        let message = payload
            .downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| payload.downcast_ref::<&str>().copied())
            .unwrap_or_default();
        assert!(
            message.contains($expected),
            "Panic message {message:?} doesn't mention {:?}.",
            $expected
        );
    }};
}

#[allow(unused_imports)]
pub(crate) use assert_panics;
