mod select;

pub use select::select;
