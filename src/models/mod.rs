mod page_info;

pub use page_info::{Fragment, OgpEntry, PageInfo};
