mod result;
mod row;

pub use result::QueryResult;
pub use row::ResultRow;
