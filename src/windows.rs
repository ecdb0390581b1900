use std::num::NonZero;

use serde::{Deserialize, Serialize};

use crate::{InvalidWindow, Result};

/// One or more window lengths, in bars.
///
/// Built from a single length or any collection of lengths. Deserializes from
/// either a number (`20`) or a list (`[20, 50]`).
///
/// ```
/// use vnstock_ta::Windows;
///
/// assert_eq!(Windows::from(20).lengths(), &[20]);
/// assert_eq!(Windows::from([5, 20, 5]).lengths(), &[5, 20, 5]);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Debug, Serialize, Deserialize)]
#[serde(from = "WindowsRepr")]
pub struct Windows(Vec<usize>);

#[derive(Deserialize)]
#[serde(untagged)]
enum WindowsRepr {
    One(usize),
    Many(Vec<usize>),
}

impl From<WindowsRepr> for Windows {
    fn from(repr: WindowsRepr) -> Self {
        match repr {
            WindowsRepr::One(length) => Self(vec![length]),
            WindowsRepr::Many(lengths) => Self(lengths),
        }
    }
}

impl Windows {
    /// Requested lengths as given, unvalidated.
    #[must_use]
    pub fn lengths(&self) -> &[usize] {
        &self.0
    }

    /// Validated lengths with duplicates removed, first occurrence order.
    ///
    /// # Errors
    ///
    /// [`InvalidWindow::NoWindows`] for an empty request,
    /// [`InvalidWindow::Zero`] if any length is zero.
    pub fn validate(&self) -> Result<Vec<NonZero<usize>>> {
        if self.0.is_empty() {
            return Err(InvalidWindow::NoWindows.into());
        }

        let mut valid: Vec<NonZero<usize>> = Vec::with_capacity(self.0.len());
        for &length in &self.0 {
            let length = NonZero::new(length).ok_or(InvalidWindow::Zero)?;
            if !valid.contains(&length) {
                valid.push(length);
            }
        }

        Ok(valid)
    }
}

impl From<usize> for Windows {
    fn from(length: usize) -> Self {
        Self(vec![length])
    }
}

impl From<NonZero<usize>> for Windows {
    fn from(length: NonZero<usize>) -> Self {
        Self(vec![length.get()])
    }
}

impl From<Vec<usize>> for Windows {
    fn from(lengths: Vec<usize>) -> Self {
        Self(lengths)
    }
}

impl From<&[usize]> for Windows {
    fn from(lengths: &[usize]) -> Self {
        Self(lengths.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Windows {
    fn from(lengths: [usize; N]) -> Self {
        Self(lengths.to_vec())
    }
}

impl From<&Windows> for Windows {
    fn from(windows: &Windows) -> Self {
        windows.clone()
    }
}

impl FromIterator<usize> for Windows {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
