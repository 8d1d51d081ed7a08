//! # Utility Functions Module
//!
//! Small helpers that keep external command construction readable.

/// Builds a `Vec<String>` from heterogeneous arguments.
///
/// Every item only needs to implement `ToString`, so string literals and
/// numeric encoder parameters can be mixed freely.
///
/// # Example
/// ```rust,ignore
/// let crf = 23;
/// let args = args!["-c:v", "libx264", "-crf", crf];
/// ```
#[macro_export]
macro_rules! args {
    [$($item:expr),* $(,)?] => {
        vec![$(::std::string::ToString::to_string(&$item)),*]
    };
}
