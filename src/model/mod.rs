mod bill;
mod listing;

pub use bill::{bill_file_name, BillMetadata, BillRecord};
pub use listing::{parse_listing_date, DocumentStub, ListingPage};
