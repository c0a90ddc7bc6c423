/// Module with the backtrack point type.
mod backtrack_point;
pub(crate) use backtrack_point::BacktrackPoint;

/// Module with the cursor that tracks the scan position.
mod cursor;
pub(crate) use cursor::Cursor;
