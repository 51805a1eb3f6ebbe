use prova_testing::{
    expect_eq, expect_gt, expect_lt, expect_ne, Checked, Renderable, ACTUAL_RESULT_BUFFER_SIZE,
    UNREPRESENTABLE,
};

macro_rules! equality_cases {
    ($($name:ident: $ty:ty = ($a:expr, $b:expr) => $actual:expr;)*) => {
        $(
            #[test]
            fn $name() {
                fn check(a: $ty, b: $ty) -> Checked {
                    expect_eq!(a, b);
                    Ok(())
                }

                assert_eq!(check($a, $a), Ok(()));

                let failure = check($a, $b).unwrap_err();
                assert_eq!(failure.expected, "a == b");
                assert_eq!(failure.actual, $actual);
            }
        )*
    };
}

equality_cases! {
    char_values: char = ('a', 'z') => "a = a and b = z";
    str_values: &'static str = ("left", "right") => "a = left and b = right";
    u8_values: u8 = (1, 2) => "a = 1 and b = 2";
    u16_values: u16 = (300, 301) => "a = 300 and b = 301";
    u32_values: u32 = (7, 9) => "a = 7 and b = 9";
    u64_values: u64 = (u64::MAX, 0) => "a = 18446744073709551615 and b = 0";
    usize_values: usize = (10, 11) => "a = 10 and b = 11";
    u128_values: u128 = (u128::MAX, 1) => "a = 340282366920938463463374607431768211455 and b = 1";
    i8_values: i8 = (-1, 1) => "a = -1 and b = 1";
    i16_values: i16 = (-300, 300) => "a = -300 and b = 300";
    i32_values: i32 = (3, 5) => "a = 3 and b = 5";
    i64_values: i64 = (i64::MIN, 0) => "a = -9223372036854775808 and b = 0";
    i128_values: i128 = (i128::MIN, 0) => "a = -170141183460469231731687303715884105728 and b = 0";
    isize_values: isize = (-2, 2) => "a = -2 and b = 2";
    f32_values: f32 = (0.5, 0.25) => "a = 0.500000 and b = 0.250000";
    f64_values: f64 = (1.0, 2.5) => "a = 1.000000 and b = 2.500000";
}

#[test]
fn owned_strings() {
    fn check(a: String, b: String) -> Checked {
        expect_eq!(a, b);
        Ok(())
    }

    assert!(check("same".to_string(), "same".to_string()).is_ok());
    let failure = check("one".to_string(), "two".to_string()).unwrap_err();
    assert_eq!(failure.actual, "a = one and b = two");
}

#[test]
fn pointers() {
    fn check(a: *const u8, b: *const u8) -> Checked {
        expect_eq!(a, b);
        Ok(())
    }

    let bytes = [1u8, 2u8];
    let first = &bytes[0] as *const u8;
    let second = &bytes[1] as *const u8;

    assert!(check(first, first).is_ok());
    let failure = check(first, second).unwrap_err();
    assert_eq!(
        failure.actual,
        format!("a = {:p} and b = {:p}", first, second)
    );
}

#[test]
fn mutable_pointers() {
    fn check(a: *mut u8, b: *mut u8) -> Checked {
        expect_eq!(a, b);
        Ok(())
    }

    let mut bytes = [1u8, 2u8];
    let first = bytes.as_mut_ptr();
    let second = first.wrapping_add(1);

    assert!(check(first, first).is_ok());
    let failure = check(first, second).unwrap_err();
    assert_eq!(
        failure.actual,
        format!("a = {:p} and b = {:p}", first, second)
    );
}

#[test]
fn every_kind_renders_its_operator() {
    fn eq() -> Checked {
        let (a, b) = (1, 2);
        expect_eq!(a, b);
        Ok(())
    }
    fn ne() -> Checked {
        let (a, b) = (2, 2);
        expect_ne!(a, b);
        Ok(())
    }
    fn gt() -> Checked {
        let (a, b) = (1, 2);
        expect_gt!(a, b);
        Ok(())
    }
    fn lt() -> Checked {
        let (a, b) = (2, 1);
        expect_lt!(a, b);
        Ok(())
    }

    let conditions: Vec<String> = [eq(), ne(), gt(), lt()]
        .into_iter()
        .map(|checked| checked.unwrap_err().expected)
        .collect();
    assert_eq!(conditions, ["a == b", "a != b", "a > b", "a < b"]);
}

#[test]
fn passing_relations_are_ok() {
    fn check() -> Checked {
        let (small, large) = (1u32, 2u32);
        expect_ne!(small, large);
        expect_gt!(large, small);
        expect_lt!(small, large);
        Ok(())
    }

    assert_eq!(check(), Ok(()));
}

#[test]
fn unsupported_types_render_placeholder() {
    #[derive(PartialEq, PartialOrd)]
    struct Version(u32, u32);

    struct Labelled;
    impl Renderable for Labelled {}

    fn check() -> Checked {
        let installed = Version(1, 2);
        let required = Version(1, 3);
        expect_gt!(installed, required, "upgrade needed");
        Ok(())
    }

    let failure = check().unwrap_err();
    assert_eq!(
        failure.actual,
        format!("installed = {0} and required = {0}", UNREPRESENTABLE)
    );
    assert_eq!(failure.detail, "upgrade needed");
    let mut text = String::new();
    Labelled.render(&mut text).unwrap();
    assert_eq!(text, UNREPRESENTABLE);
}

#[test]
fn long_values_are_truncated_to_default_capacity() {
    fn check() -> Checked {
        let a = "a".repeat(2 * ACTUAL_RESULT_BUFFER_SIZE);
        let b = String::from("short");
        expect_eq!(a, b);
        Ok(())
    }

    let failure = check().unwrap_err();
    assert_eq!(failure.actual.len(), ACTUAL_RESULT_BUFFER_SIZE - 1);
    assert!(failure.actual.starts_with("a = aaaa"));
    assert!(!failure.actual.contains(" and b = "));
}
