use std::io::Write;

use itertools::Itertools;

use barlink_core::{Module, ModuleGrid};

/// Text renderer for module grids, one pattern per module.
pub struct AsciiRenderer {
    dark: Box<str>,
    light: Box<str>,
}

impl AsciiRenderer {
    /// Construct a new [AsciiRenderer] that uses "██" to render dark modules and "  " to print light ones.
    pub fn new() -> Self {
        Self::with_patterns("██", "  ")
    }

    /// Construct a renderer printing `dark` for dark modules and `light` for light ones.
    pub fn with_patterns(dark: &str, light: &str) -> Self {
        Self {
            dark: dark.into(),
            light: light.into(),
        }
    }

    /// Swap the patterns, for terminals printing light text on a dark background.
    pub fn inverted(self) -> Self {
        Self {
            dark: self.light,
            light: self.dark,
        }
    }

    /// Get the pattern printed for `module`.
    pub fn pattern(&self, module: Module) -> &str {
        match module {
            Module::Dark => &self.dark,
            Module::Light => &self.light,
        }
    }

    /// Render each row of `grid` into a string.
    pub fn rows<'a>(&'a self, grid: &'a ModuleGrid) -> impl Iterator<Item = String> + 'a {
        grid.rows().map(move |row| {
            row.iter()
                .map(|bit| self.pattern(Module::from(*bit)))
                .collect()
        })
    }

    /// Render the `grid` into `output`, one line per row.
    pub fn render<W: Write>(&self, output: &mut W, grid: &ModuleGrid) -> std::io::Result<()> {
        for row in self.rows(grid) {
            writeln!(output, "{}", row)?;
        }
        Ok(())
    }

    /// Render the `grid` into a string, rows separated by newlines and no trailing newline.
    /// # Example
    /// ```
    /// use barlink_core::ModuleGrid;
    /// use barlink_encode::AsciiRenderer;
    /// let grid = ModuleGrid::from_fn(2, 2, |x, y| x == y);
    /// assert_eq!(AsciiRenderer::new().render_to_string(&grid), "██  \n  ██");
    /// ```
    pub fn render_to_string(&self, grid: &ModuleGrid) -> String {
        self.rows(grid).join("\n")
    }
}

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self::new()
    }
}
