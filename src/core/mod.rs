//! Core module containing the query path: records, validation, filtering,
//! sorting, pagination and response assembly

pub mod assembler;
pub mod error;
pub mod predicate;
pub mod query;
pub mod record;
pub mod resolver;
pub mod store;

pub use assembler::{AdvocateListResponse, AdvocateResponse, RecordWarning, ResponseAssembler};
pub use error::{
    ConfigError, DirectoryError, DirectoryResult, ErrorResponse, StorageError, ValidationError,
};
pub use predicate::{Predicate, SearchField};
pub use query::{
    Page, PaginationMeta, QueryParams, QueryRequest, QueryResult, RawQueryParams, SortDirection,
    SortField, SortOrder,
};
pub use record::{Advocate, NewAdvocate};
pub use resolver::QueryResolver;
pub use store::AdvocateStore;
