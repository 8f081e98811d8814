mod in_memory_tender_repository;
mod pg_tender_repository;

pub use in_memory_tender_repository::InMemoryTenderRepository;
pub use pg_tender_repository::PgTenderRepository;
