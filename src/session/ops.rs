use std::{fmt, str::FromStr};

use crate::foundation::error::{WrapError, WrapResult};

/// One scripted grid edit, as given on the command line.
///
/// | Form | Meaning |
/// |---|---|
/// | `add:<i>` | append picker candidate `i` |
/// | `url:<URL>` | append a remote image |
/// | `swap:<a>:<b>` | exchange slots `a` and `b` |
/// | `remove:<i>` | remove slot `i` |
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridOp {
    AddLocal(usize),
    AddUrl(String),
    Swap(usize, usize),
    Remove(usize),
}

impl FromStr for GridOp {
    type Err = WrapError;

    fn from_str(s: &str) -> WrapResult<Self> {
        let (kind, rest) = s
            .split_once(':')
            .ok_or_else(|| WrapError::validation(format!("grid op '{s}' has no ':'")))?;
        match kind.trim() {
            "add" => Ok(Self::AddLocal(parse_index(rest)?)),
            "url" => {
                let url = rest.trim();
                if url.is_empty() {
                    return Err(WrapError::validation("url op needs a URL"));
                }
                Ok(Self::AddUrl(url.to_string()))
            }
            "swap" => {
                let (a, b) = rest.split_once(':').ok_or_else(|| {
                    WrapError::validation(format!("swap op '{s}' needs two slots"))
                })?;
                Ok(Self::Swap(parse_index(a)?, parse_index(b)?))
            }
            "remove" => Ok(Self::Remove(parse_index(rest)?)),
            other => Err(WrapError::validation(format!("unknown grid op '{other}'"))),
        }
    }
}

impl fmt::Display for GridOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddLocal(i) => write!(f, "add:{i}"),
            Self::AddUrl(url) => write!(f, "url:{url}"),
            Self::Swap(a, b) => write!(f, "swap:{a}:{b}"),
            Self::Remove(i) => write!(f, "remove:{i}"),
        }
    }
}

fn parse_index(raw: &str) -> WrapResult<usize> {
    let raw = raw.trim();
    raw.parse()
        .map_err(|_| WrapError::validation(format!("'{raw}' is not a slot index")))
}

#[cfg(test)]
#[path = "../../tests/unit/session/ops.rs"]
mod tests;
