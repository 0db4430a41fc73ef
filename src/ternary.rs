/// A ternary expression handler.  Rust's `if` is already an
/// expression, but `cargo fmt` insists on breaking it across lines,
/// and the matrix of border-clamping rules in the seam recurrence is
/// far easier to read as a one-liner per edge.
#[macro_export]
macro_rules! cq {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}
