//! Colour → size/stock matrix editor.

use serde::{Deserialize, Serialize};

use crate::catalog::{ColorVariant, SizeStock};
use crate::error::CommerceError;
use crate::validation::ValidationError;

const COLOR_REQUIRED: &str = "Please fill in all color fields";
const SIZE_REQUIRED: &str = "Please select a size for all options";
const STOCK_INVALID: &str = "Please enter a valid stock quantity";

/// One size row as typed: both fields are free text until validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRow {
    pub size: String,
    pub stock: String,
}

impl SizeRow {
    pub fn new(size: impl Into<String>, stock: impl Into<String>) -> Self {
        Self {
            size: size.into(),
            stock: stock.into(),
        }
    }

    /// Parsed stock, when it is a non-negative whole number.
    pub fn parsed_stock(&self) -> Option<u32> {
        parse_stock(&self.stock)
    }

    fn is_complete(&self) -> bool {
        !self.size.trim().is_empty() && self.parsed_stock().is_some()
    }
}

/// One colour and its size rows. Always holds at least one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorGroup {
    pub color: String,
    pub sizes: Vec<SizeRow>,
}

impl Default for ColorGroup {
    fn default() -> Self {
        Self {
            color: String::new(),
            sizes: vec![SizeRow::default()],
        }
    }
}

/// Editor for the variable-length colour/size/stock matrix.
///
/// Never empty: there is always at least one colour group, and every group
/// has at least one size row. Removals that would break this are refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeMatrixEditor {
    groups: Vec<ColorGroup>,
}

impl Default for AttributeMatrixEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeMatrixEditor {
    /// Start with one blank colour group holding one blank row.
    pub fn new() -> Self {
        Self {
            groups: vec![ColorGroup::default()],
        }
    }

    pub fn groups(&self) -> &[ColorGroup] {
        &self.groups
    }

    /// Append a blank colour group; returns its index.
    pub fn add_color_group(&mut self) -> usize {
        self.groups.push(ColorGroup::default());
        self.groups.len() - 1
    }

    /// Remove a colour group. The last remaining group cannot be removed.
    pub fn remove_color_group(&mut self, index: usize) -> Result<ColorGroup, CommerceError> {
        if index >= self.groups.len() {
            return Err(CommerceError::ColorGroupNotFound(index));
        }
        if self.groups.len() == 1 {
            return Err(CommerceError::LastColorGroup);
        }
        Ok(self.groups.remove(index))
    }

    /// Append a blank size row to a group; returns its index.
    pub fn add_size_row(&mut self, group: usize) -> Result<usize, CommerceError> {
        let sizes = &mut self.group_mut(group)?.sizes;
        sizes.push(SizeRow::default());
        Ok(sizes.len() - 1)
    }

    /// Remove a size row. The last row of a group cannot be removed.
    pub fn remove_size_row(&mut self, group: usize, row: usize) -> Result<SizeRow, CommerceError> {
        let sizes = &mut self.group_mut(group)?.sizes;
        if row >= sizes.len() {
            return Err(CommerceError::SizeRowNotFound { group, row });
        }
        if sizes.len() == 1 {
            return Err(CommerceError::LastSizeRow);
        }
        Ok(sizes.remove(row))
    }

    pub fn set_color(&mut self, group: usize, color: impl Into<String>) -> Result<(), CommerceError> {
        self.group_mut(group)?.color = color.into();
        Ok(())
    }

    pub fn set_size(
        &mut self,
        group: usize,
        row: usize,
        size: impl Into<String>,
    ) -> Result<(), CommerceError> {
        self.row_mut(group, row)?.size = size.into();
        Ok(())
    }

    pub fn set_stock(
        &mut self,
        group: usize,
        row: usize,
        stock: impl Into<String>,
    ) -> Result<(), CommerceError> {
        self.row_mut(group, row)?.stock = stock.into();
        Ok(())
    }

    /// Back to a single blank group.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Check every group and row, reporting each offending field.
    ///
    /// A group without a colour is reported once and its rows are not
    /// inspected further.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::new();

        for (g, group) in self.groups.iter().enumerate() {
            if group.color.trim().is_empty() {
                errors.push(format!("colors[{}].color", g), COLOR_REQUIRED);
                continue;
            }
            for (r, row) in group.sizes.iter().enumerate() {
                if row.size.trim().is_empty() {
                    errors.push(format!("colors[{}].sizes[{}].size", g, r), SIZE_REQUIRED);
                }
                if row.parsed_stock().is_none() {
                    errors.push(format!("colors[{}].sizes[{}].stock", g, r), STOCK_INVALID);
                }
            }
        }

        errors.into_result()
    }

    /// The variants to submit: colours trimmed, incomplete rows dropped,
    /// groups left without rows dropped.
    pub fn to_variants(&self) -> Vec<ColorVariant> {
        self.groups
            .iter()
            .filter(|g| !g.color.trim().is_empty())
            .filter_map(|g| {
                let sizes: Vec<SizeStock> = g
                    .sizes
                    .iter()
                    .filter(|r| r.is_complete())
                    .filter_map(|r| {
                        r.parsed_stock()
                            .map(|stock| SizeStock::new(r.size.trim(), stock))
                    })
                    .collect();
                if sizes.is_empty() {
                    None
                } else {
                    Some(ColorVariant::new(g.color.trim(), sizes))
                }
            })
            .collect()
    }

    fn group_mut(&mut self, group: usize) -> Result<&mut ColorGroup, CommerceError> {
        self.groups
            .get_mut(group)
            .ok_or(CommerceError::ColorGroupNotFound(group))
    }

    fn row_mut(&mut self, group: usize, row: usize) -> Result<&mut SizeRow, CommerceError> {
        self.group_mut(group)?
            .sizes
            .get_mut(row)
            .ok_or(CommerceError::SizeRowNotFound { group, row })
    }
}

/// Stock must be a non-negative whole number; surrounding spaces are fine.
fn parse_stock(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let value = trimmed.parse::<f64>().ok()?;
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
        return None;
    }
    Some(value as u32)
}
