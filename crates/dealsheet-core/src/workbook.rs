//! Workbook type - a named collection of worksheets

use crate::error::{Error, Result};
use crate::host::SheetHost;
use crate::worksheet::Worksheet;
use crate::MAX_SHEET_NAME_LEN;

/// A workbook (spreadsheet document)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    worksheets: Vec<Worksheet>,
}

impl Workbook {
    /// Create an empty workbook with no worksheets
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Check if the workbook has no worksheets
    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    /// Append a worksheet and return its index
    pub fn add_worksheet(&mut self, name: &str) -> Result<usize> {
        self.validate_sheet_name(name)?;
        self.worksheets.push(Worksheet::new(name));
        Ok(self.worksheets.len() - 1)
    }

    /// Get a mutable worksheet by index
    pub fn worksheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.worksheets.get_mut(index)
    }

    /// Index of the sheet called `name`, compared with Unicode lowercase folding
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        let wanted = name.to_lowercase();
        self.worksheets
            .iter()
            .position(|ws| ws.name().to_lowercase() == wanted)
    }

    /// Get a worksheet by name
    pub fn worksheet_by_name(&self, name: &str) -> Result<&Worksheet> {
        self.sheet_index(name)
            .map(|i| &self.worksheets[i])
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))
    }

    /// Borrow two different sheets mutably at once, in the order asked for
    pub fn sheet_pair_mut(
        &mut self,
        first: &str,
        second: &str,
    ) -> Result<(&mut Worksheet, &mut Worksheet)> {
        let a = self
            .sheet_index(first)
            .ok_or_else(|| Error::SheetNotFound(first.to_string()))?;
        let b = self
            .sheet_index(second)
            .ok_or_else(|| Error::SheetNotFound(second.to_string()))?;

        if a == b {
            return Err(Error::InvalidSheetName(format!(
                "'{}' and '{}' name the same sheet",
                first, second
            )));
        }

        if a < b {
            let (left, right) = self.worksheets.split_at_mut(b);
            Ok((&mut left[a], &mut right[0]))
        } else {
            let (left, right) = self.worksheets.split_at_mut(a);
            Ok((&mut right[0], &mut left[b]))
        }
    }

    /// Iterate over worksheets
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    fn validate_sheet_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name too long (max {} characters)",
                MAX_SHEET_NAME_LEN
            )));
        }

        const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
        if let Some(c) = name.chars().find(|c| INVALID_CHARS.contains(c)) {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name cannot contain '{}'",
                c
            )));
        }

        if self.sheet_index(name).is_some() {
            return Err(Error::DuplicateSheetName(name.to_string()));
        }
        Ok(())
    }
}
