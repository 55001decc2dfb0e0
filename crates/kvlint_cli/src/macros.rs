#[macro_export]
macro_rules! lint_diagnostic {
    ($severity:literal, $color:ident, $($format_args:tt)*) => {{
        use ::colored::Colorize;
        eprintln!("{}: {}", $severity.$color().bold(), format!($($format_args)*));
    }};
}

/// Construct a simple linter error and immediately throw it to stderr
#[macro_export]
macro_rules! lint_err {
    ($($format_args:tt)*) => {{
        $crate::lint_diagnostic!("error", red, $($format_args)*);
    }};
}

/// Construct a simple linter warning and immediately throw it to stderr
#[macro_export]
macro_rules! lint_warn {
    ($($format_args:tt)*) => {{
        $crate::lint_diagnostic!("warning", yellow, $($format_args)*);
    }};
}

/// Construct a simple linter note and immediately throw it to stderr
#[macro_export]
macro_rules! lint_note {
    ($($format_args:tt)*) => {{
        $crate::lint_diagnostic!("note", cyan, $($format_args)*);
    }};
}
