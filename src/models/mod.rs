mod attributes;
mod query;
mod response;
mod restaurant;
mod table;

pub use attributes::AttributeList;
pub use query::QueryFragment;
pub use response::{PoiSearchResponse, SearchResult, PaginationResult};
pub use restaurant::{RestaurantId, RawRecord, ProjectedRecord, RestaurantData};
pub use table::Table;
