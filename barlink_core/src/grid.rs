use bitvec::{slice::BitSlice, vec::BitVec};

/// Module (aka, a logical cell) of an encoded symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Module {
    Light,
    Dark,
}

impl From<bool> for Module {
    fn from(value: bool) -> Self {
        match value {
            true => Module::Dark,
            false => Module::Light,
        }
    }
}

impl From<Module> for bool {
    fn from(value: Module) -> Self {
        match value {
            Module::Dark => true,
            Module::Light => false,
        }
    }
}

/// A rectangular grid of modules as produced by the engine, stored row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct ModuleGrid {
    bits: BitVec,
    width: usize,
    height: usize,
}

impl ModuleGrid {
    /// Return a grid of `width` by `height` filled with `module`.
    pub fn filled(width: usize, height: usize, module: Module) -> Self {
        Self {
            bits: BitVec::repeat(module.into(), width * height),
            width,
            height,
        }
    }

    /// Build a grid of `width` by `height` where the module at column `x` and row `y` is `f(x, y)`.
    /// # Example
    /// ```
    /// use barlink_core::{Module, ModuleGrid};
    /// let grid = ModuleGrid::from_fn(3, 2, |x, y| x == y);
    /// assert_eq!(grid.get(1, 1), Some(Module::Dark));
    /// assert_eq!(grid.get(2, 1), Some(Module::Light));
    /// assert_eq!(grid.get(3, 0), None);
    /// ```
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut bits = BitVec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                bits.push(f(x, y));
            }
        }
        Self {
            bits,
            width,
            height,
        }
    }

    /// Number of modules per row.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the grid has no modules at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Get the 1D index of the bit vector corresponding to column `x` and row `y`, checking for validity.
    #[inline]
    fn linearized_index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(self.width * y + x)
        } else {
            None
        }
    }

    /// Get the module at column `x` and row `y`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Module> {
        let index = self.linearized_index(x, y)?;
        self.bits.get(index).map(|bit| Module::from(*bit))
    }

    /// Whether the module at column `x` and row `y` is dark. Out of bounds positions are light.
    #[inline]
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_some_and(bool::from)
    }

    /// Get the `y`th row of the grid.
    pub fn row(&self, y: usize) -> Option<&BitSlice> {
        if y >= self.height {
            return None;
        }
        let start = self.width * y;
        Some(&self.bits[start..start + self.width])
    }

    /// Iterate over the rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &BitSlice> + '_ {
        (0..self.height).filter_map(move |y| self.row(y))
    }

    /// Count the dark modules.
    pub fn count_dark(&self) -> usize {
        self.bits.count_ones()
    }
}

impl std::fmt::Debug for ModuleGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleGrid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("dark", &self.count_dark())
            .finish()
    }
}
