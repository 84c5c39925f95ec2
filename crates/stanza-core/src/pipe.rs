//! Left-to-right function composition
//!
//! Two flavours are provided:
//!
//! - [`pipe!`](crate::pipe!) / [`compose`] build a single closure out of a
//!   fixed chain of unary functions. The type may change at every step.
//! - [`Pipeline`] holds a runtime-built sequence of `T -> T` steps, for
//!   chains assembled from configuration.
//!
//! Both treat an empty chain as the identity.
//!
//! ```rust
//! use stanza_core::{Pipeline, pipe};
//!
//! let shout = pipe!(|s: &str| s.to_uppercase(), |s: String| s + "!");
//! assert_eq!(shout("hi"), "HI!");
//!
//! let steps = Pipeline::<i32>::new().then(|x| x + 1).then(|x| x * 10);
//! assert_eq!(steps.apply(1), 20);
//! ```

use std::fmt;

/// Return the argument unchanged.
pub fn identity<T>(value: T) -> T {
    value
}

/// Compose two functions left to right: `compose(f, g)(x) == g(f(x))`.
pub fn compose<A, B, C>(f: impl Fn(A) -> B, g: impl Fn(B) -> C) -> impl Fn(A) -> C {
    move |x| g(f(x))
}

/// Compose any number of unary functions left to right.
///
/// `pipe!(f1, f2, f3)(x)` is `f3(f2(f1(x)))`; `pipe!()` is [`identity`].
#[macro_export]
macro_rules! pipe {
    () => {
        $crate::pipe::identity
    };
    ($f:expr $(,)?) => {
        $f
    };
    ($f:expr, $($rest:expr),+ $(,)?) => {
        $crate::pipe::compose($f, $crate::pipe!($($rest),+))
    };
}

type Step<T> = Box<dyn Fn(T) -> T + Send + Sync>;

/// An ordered sequence of `T -> T` transforms applied left to right.
pub struct Pipeline<T> {
    steps: Vec<Step<T>>,
}

impl<T> Pipeline<T> {
    /// Create an empty pipeline (the identity).
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a step to the end of the pipeline.
    pub fn then(mut self, step: impl Fn(T) -> T + Send + Sync + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the pipeline has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Feed `input` through every step in order and return the last output.
    pub fn apply(&self, input: T) -> T {
        self.steps.iter().fold(input, |value, step| step(value))
    }
}

impl<T> Default for Pipeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Pipeline<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("steps", &self.steps.len())
            .finish()
    }
}

impl<T, F> FromIterator<F> for Pipeline<T>
where
    F: Fn(T) -> T + Send + Sync + 'static,
{
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        Self {
            steps: iter
                .into_iter()
                .map(|f| Box::new(f) as Step<T>)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_empty_pipe_is_identity() {
        let id = pipe!();
        assert_eq!(id(42), 42);
        assert_eq!(identity("same"), "same");
    }

    #[test]
    fn test_single_function_pipe() {
        let double = pipe!(|x: i32| x * 2);
        assert_eq!(double(21), 42);
    }

    #[test]
    fn test_pipe_applies_left_to_right() {
        let f = pipe!(|x: i32| x + 1, |x: i32| x * 10, |x: i32| x - 3);
        // (0 + 1) * 10 - 3
        assert_eq!(f(0), 7);
    }

    #[test]
    fn test_pipe_feeds_each_output_into_next_input() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let (s1, s2, s3) = (seen.clone(), seen.clone(), seen.clone());
        let f = pipe!(
            move |x: i32| {
                s1.lock().unwrap().push(x);
                1
            },
            move |x: i32| {
                s2.lock().unwrap().push(x);
                2
            },
            move |x: i32| {
                s3.lock().unwrap().push(x);
                3
            },
        );
        assert_eq!(f(0), 3);
        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_pipe_changes_types() {
        let f = pipe!(|s: &str| s.len(), |n: usize| n % 2 == 0);
        assert!(f("four"));
        assert!(!f("odd"));
    }

    #[test]
    fn test_compose_order() {
        let f = compose(|s: String| s + "a", |s: String| s + "b");
        assert_eq!(f(String::new()), "ab");
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let p: Pipeline<String> = Pipeline::new();
        assert!(p.is_empty());
        assert_eq!(p.apply("x".to_string()), "x");
    }

    #[test]
    fn test_pipeline_from_iter() {
        let steps: Vec<fn(i32) -> i32> = vec![|x| x + 1, |x| x + 2];
        let p: Pipeline<i32> = steps.into_iter().collect();
        assert_eq!(p.len(), 2);
        assert_eq!(p.apply(0), 3);
    }

    #[test]
    fn test_pipeline_then_order() {
        let p = Pipeline::new()
            .then(|s: String| format!("<em>{s}</em>"))
            .then(|s: String| format!("<h3>{s}</h3>"));
        assert_eq!(p.apply("x".to_string()), "<h3><em>x</em></h3>");
        assert_eq!(format!("{p:?}"), "Pipeline { steps: 2 }");
    }
}
