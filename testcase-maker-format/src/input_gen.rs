use itertools::Itertools;

/// Smallest value of the two numbers of a case.
pub const MIN_VALUE: u32 = 1;
/// Largest value of the two numbers of a case.
pub const MAX_VALUE: u32 = 10;

/// Generate the content of an input file: the number of cases `T`, drawn uniformly from
/// `[1, max_cases]`, followed by `T` lines with two numbers each. There is no trailing newline.
pub fn random_input(rng: &mut fastrand::Rng, max_cases: u32) -> String {
    let cases = rng.u32(1..=max_cases.max(1));
    let lines = (0..cases).map(|_| {
        format!(
            "{} {}",
            rng.u32(MIN_VALUE..=MAX_VALUE),
            rng.u32(MIN_VALUE..=MAX_VALUE)
        )
    });
    std::iter::once(cases.to_string()).chain(lines).join("\n")
}
