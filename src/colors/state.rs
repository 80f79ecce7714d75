use std::collections::BTreeMap;

use crate::palette::color::Color;

/// Per-cell color resolution: lock, then override, then `palette[i % len]`, then gray.
///
/// Mutators silently ignore indices outside `[0, cell_count)`; indices outlive the current
/// cell count during fast interaction and are not treated as errors.
#[derive(Clone, Debug, Default)]
pub struct ColorState {
    cell_count: usize,
    palette: Vec<Color>,
    overrides: BTreeMap<usize, Color>,
    locks: BTreeMap<usize, Color>,
}

impl ColorState {
    pub fn new(cell_count: usize) -> Self {
        Self {
            cell_count,
            ..Self::default()
        }
    }

    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    /// Track a new cell count. Locks and overrides past the end are kept; they apply
    /// again if the count grows back.
    pub fn set_cell_count(&mut self, cell_count: usize) {
        self.cell_count = cell_count;
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Install a freshly generated palette. Overrides are cleared; locks survive.
    pub fn regenerate(&mut self, palette: Vec<Color>) {
        self.palette = palette;
        self.overrides.clear();
    }

    /// Swap the palette in place (adjustment, hue animation). Overrides and locks survive.
    pub fn set_palette(&mut self, palette: Vec<Color>) {
        self.palette = palette;
    }

    pub fn get_cell_color(&self, index: usize) -> Color {
        if let Some(c) = self.locks.get(&index) {
            return c.clone();
        }
        if let Some(c) = self.overrides.get(&index) {
            return c.clone();
        }
        if self.palette.is_empty() {
            return Color::neutral();
        }
        self.palette[index % self.palette.len()].clone()
    }

    /// Store `hex` as an override, or as a lock when `lock` is set. Invalid hex is ignored.
    pub fn set_cell_color(&mut self, index: usize, hex: &str, lock: bool) -> bool {
        if !self.in_range(index) {
            return false;
        }
        let color = match Color::from_hex(hex) {
            Ok(c) => c,
            Err(err) => {
                tracing::debug!(index, %err, "set_cell_color ignored");
                return false;
            }
        };
        if lock {
            self.locks.insert(index, color);
        } else {
            self.overrides.insert(index, color);
        }
        true
    }

    /// Freeze what the cell currently shows and drop its override.
    pub fn lock_cell_color(&mut self, index: usize) -> bool {
        if !self.in_range(index) {
            return false;
        }
        let current = self.get_cell_color(index);
        self.locks.insert(index, current);
        self.overrides.remove(&index);
        true
    }

    /// Drop both lock and override so the cell tracks the live palette again.
    pub fn unlock_cell_color(&mut self, index: usize) -> bool {
        if !self.in_range(index) {
            return false;
        }
        let had_lock = self.locks.remove(&index).is_some();
        let had_override = self.overrides.remove(&index).is_some();
        had_lock || had_override
    }

    pub fn is_cell_color_locked(&self, index: usize) -> bool {
        self.locks.contains_key(&index)
    }

    /// Transient overrides in index order.
    pub fn overrides(&self) -> impl Iterator<Item = (usize, &Color)> + '_ {
        self.overrides.iter().map(|(&i, c)| (i, c))
    }

    pub fn locked_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.locks.keys().copied()
    }

    /// Effective color for every cell, in index order.
    pub fn resolved_colors(&self) -> Vec<Color> {
        (0..self.cell_count).map(|i| self.get_cell_color(i)).collect()
    }

    fn in_range(&self, index: usize) -> bool {
        let ok = index < self.cell_count;
        if !ok {
            tracing::debug!(index, cell_count = self.cell_count, "stale cell index ignored");
        }
        ok
    }
}

#[cfg(test)]
#[path = "../../tests/unit/colors/state.rs"]
mod tests;
