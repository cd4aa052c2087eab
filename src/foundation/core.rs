/// Number of slots in the gallery grid.
pub const GRID_SLOTS: usize = 25;

/// Gallery grid columns.
pub const GRID_COLUMNS: u32 = 5;

/// Gallery grid rows.
pub const GRID_ROWS: u32 = 5;

/// Edge length, in pixels, of a normalized thumbnail.
pub const THUMBNAIL_SIZE: u32 = 150;

/// How many times the captured gallery repeats along each axis of the export.
pub const TILE_REPEAT: u32 = 4;
