//! Payload values fed to containers under test.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Record added by every workload.
///
/// A struct rather than a bare integer so benchmarks pay realistic copy and
/// allocation costs; user records rarely carry a single field, hence `f2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TestValue {
    pub count: usize,
    pub f2: usize,
}

pub fn value_for(i: usize) -> TestValue {
    TestValue { count: i, f2: 1 }
}

/// A value type workloads can derive from a sequence index.
///
/// Implementations must be deterministic: equal indices produce equal values.
pub trait Payload: Sized {
    fn for_index(i: usize) -> Self;
}

impl Payload for TestValue {
    #[inline]
    fn for_index(i: usize) -> Self {
        value_for(i)
    }
}

impl<T: Payload> Payload for Box<T> {
    #[inline]
    fn for_index(i: usize) -> Self {
        Box::new(T::for_index(i))
    }
}

impl Payload for usize {
    #[inline]
    fn for_index(i: usize) -> Self {
        i
    }
}

/// Payload shapes selectable at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    /// `TestValue` moved by value.
    Inline,
    /// `Box<TestValue>`, one heap allocation per value.
    Boxed,
    /// Bare `usize`.
    Scalar,
}

impl PayloadKind {
    pub const ALL: [PayloadKind; 3] = [PayloadKind::Inline, PayloadKind::Boxed, PayloadKind::Scalar];

    pub fn key(self) -> &'static str {
        match self {
            PayloadKind::Inline => "inline",
            PayloadKind::Boxed => "boxed",
            PayloadKind::Scalar => "scalar",
        }
    }
}

impl FromStr for PayloadKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PayloadKind::ALL
            .into_iter()
            .find(|kind| kind.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow::anyhow!("unknown payload '{}'; expected one of inline, boxed, scalar", s))
    }
}
