//! idsplit core classification types, split records, and errors.

mod error;
pub mod limits;
mod types;

pub use error::IdsplitError;
pub use limits::can_be_token;
pub use types::{
    ExtractType, IdentifierSplitResult, SourceFile, SplitIdentification, SplitPosition,
    SplitWithIdentification,
};
