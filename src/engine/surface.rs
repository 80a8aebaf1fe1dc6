//! Surface - The visual target a map instance is bound to.

use crate::error::MapError;

/// A named rectangle a backend draws into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    id: String,
    width: u16,
    height: u16,
}

impl Surface {
    pub fn new(id: impl Into<String>, width: u16, height: u16) -> Self {
        Self {
            id: id.into(),
            width,
            height,
        }
    }

    /// The current terminal window, sized via crossterm.
    pub fn terminal() -> Result<Self, MapError> {
        let (width, height) = crossterm::terminal::size()?;
        Ok(Self::new("terminal", width, height))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
