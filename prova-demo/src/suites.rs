//! Sample suites

use prova_testing::{
    expect_eq, expect_gt, expect_lt, expect_ne, suite, test, FailurePolicy, TestSuite,
};

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect()
}

pub fn arithmetic() -> TestSuite {
    suite(
        "arithmetic",
        "Integer and floating point arithmetic",
        FailurePolicy::ContinueOnFailure,
        [
            test("gcd_of_coprimes", || {
                let result = gcd(17, 5);
                expect_eq!(result, 1);
                Ok(())
            }),
            test("gcd_of_multiples", || {
                let result = gcd(84, 36);
                expect_eq!(result, 12, "84 = 2^2 * 3 * 7, 36 = 2^2 * 3^2");
                Ok(())
            })
            .with_description("shared factors"),
            test("boiling_point", || {
                let fahrenheit = celsius_to_fahrenheit(100.0);
                expect_eq!(fahrenheit, 212.0);
                Ok(())
            }),
            test("wrapping_add", || {
                let wrapped = u8::MAX.wrapping_add(1);
                expect_lt!(wrapped, u8::MAX);
                expect_eq!(wrapped, 0);
                Ok(())
            }),
        ],
    )
}

pub fn text() -> TestSuite {
    suite(
        "text",
        "String helpers",
        FailurePolicy::TerminateOnFailure,
        [
            test("initials", || {
                let result = initials("Ada King Lovelace");
                expect_eq!(result, String::from("AKL"));
                Ok(())
            }),
            test("first_char", || {
                let first = "prova".chars().next().unwrap_or_default();
                expect_eq!(first, 'p');
                expect_ne!(first, 'q');
                Ok(())
            })
            .with_description("chars compare by code point"),
            test("lexical_order", || {
                let (later, earlier) = ("beta", "alpha");
                expect_gt!(later, earlier);
                Ok(())
            }),
        ],
    )
}

/// Suites that fail on purpose, to show failure reports.
pub fn showcase_failures() -> Vec<TestSuite> {
    vec![
        suite(
            "continue_showcase",
            "Failures under continue-on-failure",
            FailurePolicy::ContinueOnFailure,
            [
                test("passes_first", || Ok(())),
                test("off_by_one", || {
                    let a = 3;
                    let b = 5;
                    expect_eq!(a, b, "a and b should match");
                    Ok(())
                })
                .with_description("shows both operand values"),
                test("still_runs", || {
                    let count = 0usize;
                    expect_gt!(count, 1);
                    Ok(())
                }),
            ],
        ),
        suite(
            "terminate_showcase",
            "Failures under terminate-on-failure",
            FailurePolicy::TerminateOnFailure,
            [
                test("passes_first", || Ok(())),
                test("stops_here", || {
                    let ratio = 0.1 + 0.2;
                    expect_eq!(ratio, 0.3, "floating point rounding");
                    Ok(())
                }),
                test("never_runs", || Ok(())),
            ],
        ),
    ]
}

/// Every suite to run, in order.
pub fn all(with_failures: bool) -> Vec<TestSuite> {
    let mut suites = vec![arithmetic(), text()];
    if with_failures {
        suites.extend(showcase_failures());
    }
    suites
}
