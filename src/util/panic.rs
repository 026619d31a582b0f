/// Asserts that running `$run` panics. The closure is wrapped in `AssertUnwindSafe`, so tests can
/// inspect the container afterwards to check that the panic left it consistent.
#[allow(unused_macros)]
macro_rules! assert_panics {
    ($run:block) => {
        assert_panics!($run, "expected the block to panic")
    };
    ($run:block, $msg:literal) => {{
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $run));
        assert!(result.is_err(), $msg);
    }};
}

#[allow(unused_imports)]
pub(crate) use assert_panics;
