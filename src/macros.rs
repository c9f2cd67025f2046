#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// One element of a type-sequence pattern.
///
/// `date`, `num`, `numpart`, `mark` and `year4` are wildcards; any
/// other identifier names a [`Kind`](crate::model::Kind) variant.
#[macro_export]
macro_rules! pat {
    (date) => {
        $crate::engine::Pat::AnyDate
    };
    (num) => {
        $crate::engine::Pat::AnyNumber
    };
    (mark) => {
        $crate::engine::Pat::Marker
    };
    (numpart) => {
        $crate::engine::Pat::NumberOrPart
    };
    (year4) => {
        $crate::engine::Pat::YearLike
    };
    ($kind:ident) => {
        $crate::engine::Pat::Is($crate::model::Kind::$kind)
    };
}

/// Declares a rewrite rule for a pass table.
///
/// ```text
/// rule! { name: "space_after", contains: [Space], act: absorb_space }
/// rule! { name: "wrapped", when: find_wrapped, act: unwrap_whole }
/// ```
#[macro_export]
macro_rules! rule {
    (name: $name:expr, exact: [ $($p:tt),* $(,)? ], act: $act:expr $(,)?) => {
        $crate::engine::Rule { name: $name, shape: $crate::engine::Shape::Exact(&[ $($crate::pat!($p)),* ]), action: $act }
    };
    (name: $name:expr, prefix: [ $($p:tt),* $(,)? ], act: $act:expr $(,)?) => {
        $crate::engine::Rule { name: $name, shape: $crate::engine::Shape::Prefix(&[ $($crate::pat!($p)),* ]), action: $act }
    };
    (name: $name:expr, suffix: [ $($p:tt),* $(,)? ], act: $act:expr $(,)?) => {
        $crate::engine::Rule { name: $name, shape: $crate::engine::Shape::Suffix(&[ $($crate::pat!($p)),* ]), action: $act }
    };
    (name: $name:expr, contains: [ $($p:tt),* $(,)? ], act: $act:expr $(,)?) => {
        $crate::engine::Rule { name: $name, shape: $crate::engine::Shape::Contains(&[ $($crate::pat!($p)),* ]), action: $act }
    };
    (name: $name:expr, when: $find:expr, act: $act:expr $(,)?) => {
        $crate::engine::Rule { name: $name, shape: $crate::engine::Shape::Custom($find), action: $act }
    };
}
